//! Internal composition profile
//!
//! Hydrogen and helium mass fractions of one snapshot against normalized radius or
//! normalized mass. Dashed guides mark the composition of the first snapshot
//! (taken as the zero-age main sequence) and the primordial helium fraction.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mesa_rs::output::visualization::{plot_composition, CompositionAxis};
//!
//! // Second snapshot in index order, against normalized mass
//! plot_composition("LOGS", 2, CompositionAxis::Mass, "composition.png", None)?;
//! ```

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::config::{PlotConfig, LIGHT_GRAY, NO_TITLE};
use crate::data::{get_profiles, Profile};
use crate::error::{MesaError, Result};
use crate::physics::PRIMORDIAL_HELIUM;

/// Horizontal coordinate of a composition profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositionAxis {
    /// $10^{\log R} / \max$
    #[default]
    Radius,

    /// $m / \max$
    Mass,
}

impl CompositionAxis {
    /// Axis label
    pub fn label(&self) -> &'static str {
        match self {
            CompositionAxis::Radius => "r / R",
            CompositionAxis::Mass => "m / M",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompositionAxis::Radius => "radius",
            CompositionAxis::Mass => "mass",
        }
    }

    /// Raw coordinate of every zone
    fn values(&self, profile: &Profile) -> Result<Vec<f64>> {
        let column = match self {
            CompositionAxis::Radius => profile.radius()?,
            CompositionAxis::Mass => profile.mass()?,
        };
        Ok(column.iter().copied().collect())
    }
}

impl fmt::Display for CompositionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompositionAxis {
    type Err = MesaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "radius" => Ok(CompositionAxis::Radius),
            "mass" => Ok(CompositionAxis::Mass),
            other => Err(MesaError::invalid_input(format!(
                "unknown composition axis '{}' (expected 'radius' or 'mass')",
                other
            ))),
        }
    }
}

// =================================================================================================
// Data
// =================================================================================================

/// Data of a composition plot
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionView {
    /// Profile number of the plotted snapshot
    pub profile_number: i64,

    pub axis: CompositionAxis,

    /// Normalized coordinate, one per zone, in file order
    pub coordinate: Vec<f64>,

    /// Hydrogen mass fraction X
    pub hydrogen: Vec<f64>,

    /// Helium mass fraction Y
    pub helium: Vec<f64>,

    /// X of the first zone of the first snapshot
    pub zams_hydrogen: f64,

    /// Y of the first zone of the first snapshot
    pub zams_helium: f64,

    pub primordial_helium: f64,
}

impl CompositionView {
    /// Select snapshot `ordinal` (1-based position in index order) from `profiles`
    ///
    /// # Errors
    ///
    /// - [`MesaError::ProfileOrdinalOutOfRange`] if `ordinal` is 0 or past the end
    /// - [`MesaError::MissingColumn`] if a needed column is absent
    pub fn from_profiles(profiles: &[Profile], ordinal: usize, axis: CompositionAxis) -> Result<Self> {
        let out_of_range = || MesaError::ProfileOrdinalOutOfRange {
            ordinal,
            available: profiles.len(),
        };

        let index = ordinal.checked_sub(1).ok_or_else(out_of_range)?;
        let profile = profiles.get(index).ok_or_else(out_of_range)?;
        let zams = profiles.first().ok_or_else(out_of_range)?;

        let (zams_hydrogen, zams_helium) = zams.first_zone_composition()?;

        Ok(Self {
            profile_number: profile.number(),
            axis,
            coordinate: normalized(axis.values(profile)?),
            hydrogen: profile.hydrogen()?.iter().copied().collect(),
            helium: profile.helium()?.iter().copied().collect(),
            zams_hydrogen,
            zams_helium,
            primordial_helium: PRIMORDIAL_HELIUM,
        })
    }

    /// Read every snapshot listed in the index and select `ordinal`
    pub fn load(logs_dir: impl AsRef<Path>, ordinal: usize, axis: CompositionAxis) -> Result<Self> {
        let profiles = get_profiles(logs_dir)?;
        Self::from_profiles(&profiles, ordinal, axis)
    }

    pub fn len(&self) -> usize {
        self.coordinate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinate.is_empty()
    }
}

/// Divide by the maximum (left unchanged if the maximum is not positive)
fn normalized(values: Vec<f64>) -> Vec<f64> {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);

    if max > 0.0 {
        values.into_iter().map(|v| v / max).collect()
    } else {
        log::warn!("Composition coordinate has no positive maximum, left unnormalized");
        values
    }
}

// =================================================================================================
// Drawing
// =================================================================================================

/// Horizontal dashed guide from x = 0 to x = 1
fn dashed_guide<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    y: f64,
    style: ShapeStyle,
) -> Result<()> {
    const DASH: f64 = 0.02;

    chart.draw_series((0..).map(|i| i as f64 * 2.0 * DASH).take_while(|x| *x < 1.0).map(
        |x0| PathElement::new(vec![(x0, y), ((x0 + DASH).min(1.0), y)], style),
    ))?;

    Ok(())
}

/// Draw a composition profile on an existing drawing area
///
/// Guides are drawn first so the curves sit on top of them: ZAMS X and ZAMS Y in
/// black, primordial helium in light gray. Hydrogen uses `config.line_color`,
/// helium `config.secondary_color`. Both axes span [0, 1].
pub fn draw_composition<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    view: &CompositionView,
    config: &PlotConfig,
) -> Result<()> {
    root.fill(&config.background)?;

    let xlabel = if config.xlabel.is_empty() {
        view.axis.label()
    } else {
        config.xlabel.as_str()
    };

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.1}", x))
            .y_label_formatter(&|y| format!("{:.1}", y))
            .draw()?;
    }

    let guide = ShapeStyle::from(&BLACK).stroke_width(1);
    dashed_guide(&mut chart, view.zams_hydrogen, guide)?;
    dashed_guide(&mut chart, view.zams_helium, guide)?;
    dashed_guide(
        &mut chart,
        view.primordial_helium,
        ShapeStyle::from(&LIGHT_GRAY).stroke_width(1),
    )?;

    let curves = [
        ("hydrogen", &view.hydrogen, config.line_color),
        ("helium", &view.helium, config.secondary_color),
    ];

    for (label, fractions, color) in curves {
        chart
            .draw_series(LineSeries::new(
                view.coordinate.iter().copied().zip(fractions.iter().copied()),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

/// Plot the composition of snapshot `ordinal` of a `LOGS` directory to a file
///
/// # Arguments
///
/// * `logs_dir` - MESA `LOGS` directory
/// * `ordinal` - 1-based position of the snapshot in `profiles.index`
/// * `axis` - Horizontal coordinate
/// * `output_path` - Path to save the plot (`.svg` → SVG, anything else → PNG)
/// * `config` - Optional plot configuration
pub fn plot_composition(
    logs_dir: impl AsRef<Path>,
    ordinal: usize,
    axis: CompositionAxis,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    let view = CompositionView::load(logs_dir, ordinal, axis)?;
    plot_composition_view(&view, output_path, config)
}

/// Plot an already-built composition view to a file
pub fn plot_composition_view(
    view: &CompositionView,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    let output_path = output_path.as_ref();

    let default_config = PlotConfig::composition(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let ext = output_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let root = SVGBackend::new(output_path, (config.width, config.height))
                .into_drawing_area();
            draw_composition(&root, view, config)?;
        }
        _ => {
            let root = BitMapBackend::new(output_path, (config.width, config.height))
                .into_drawing_area();
            draw_composition(&root, view, config)?;
        }
    }

    log::info!("Wrote composition profile to {}", output_path.display());
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
