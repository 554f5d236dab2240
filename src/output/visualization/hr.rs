//! Hertzsprung–Russell diagram
//!
//! The diagram shows the evolutionary track of the run (every history row but the
//! first) in effective temperature / luminosity space, with one marker per saved
//! profile snapshot. One snapshot can be highlighted and labeled with its age.
//!
//! Building the data ([`HrDiagram`]) is separate from drawing it
//! ([`draw_hr_diagram`]), and drawing happens on a caller-supplied plotters
//! drawing area.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mesa_rs::output::visualization::{plot_hr, PlotConfig};
//!
//! // Highlight snapshot 3
//! plot_hr("LOGS", 3, "hr.png", None)?;
//!
//! // No highlight
//! plot_hr("LOGS", mesa_rs::output::visualization::NO_HIGHLIGHT, "hr.svg", None)?;
//! ```

use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

use super::config::{PlotConfig, NO_TITLE};
use crate::data::{get_index, load_history_file, History, ProfileIndex};
use crate::error::{MesaError, Result};

/// Profile number that matches no snapshot
pub const NO_HIGHLIGHT: i64 = -1;

/// Legend entry shared by all non-highlighted snapshots
pub const PROFILE_FILES_LABEL: &str = "profile files";

// =================================================================================================
// Data
// =================================================================================================

/// One point of the HR diagram, stored as base-10 logarithms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HrPoint {
    pub log_teff: f64,
    pub log_l: f64,
}

impl HrPoint {
    /// Effective temperature [K]
    pub fn effective_temperature(&self) -> f64 {
        10f64.powf(self.log_teff)
    }

    /// Luminosity [L☉]
    pub fn luminosity(&self) -> f64 {
        10f64.powf(self.log_l)
    }

    /// Chart coordinate: reversed log temperature, log luminosity
    fn chart_coord(&self) -> (f64, f64) {
        (-self.log_teff, self.log_l)
    }
}

/// Marker for one profile snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotMarker {
    pub profile_number: i64,
    pub model_number: i64,

    /// History points at `model_number` (normally exactly one)
    pub points: Vec<HrPoint>,

    /// Whether this is the selected snapshot
    pub highlighted: bool,

    /// Legend entry, if any
    pub label: Option<String>,
}

/// Data of an HR diagram
#[derive(Debug, Clone, PartialEq)]
pub struct HrDiagram {
    /// Evolutionary track (history without its first row)
    pub track: Vec<HrPoint>,

    /// One marker per index entry, in index order
    pub markers: Vec<SnapshotMarker>,
}

impl HrDiagram {
    /// Build the diagram from already-loaded tables
    ///
    /// The marker whose profile number equals `profile_number` is highlighted and
    /// labeled `"<age> Gyr"`. The first other marker is labeled
    /// [`PROFILE_FILES_LABEL`] and the rest are left unlabeled, so the legend
    /// holds a single entry for them. Use [`NO_HIGHLIGHT`] to highlight nothing.
    ///
    /// A profile number listed more than once resolves to its first index entry,
    /// as in [`ProfileIndex::entry_for`]; later duplicates are ordinary markers.
    pub fn from_tables(history: &History, index: &ProfileIndex, profile_number: i64) -> Result<Self> {
        let track = points_of(&history.without_first_row())?;

        let highlight_at = index
            .iter()
            .position(|e| e.profile_number == profile_number);

        let mut markers = Vec::with_capacity(index.len());
        let mut generic_label_used = false;

        for (i, entry) in index.iter().enumerate() {
            let rows = history.rows_for_model(entry.model_number)?;
            let highlighted = highlight_at == Some(i);

            let label = if highlighted {
                match rows.star_age()?.iter().next() {
                    Some(age) => Some(format!("{:.2} Gyr", age / 1e9)),
                    None => {
                        log::warn!(
                            "Profile {} points at model {} which has no history row",
                            entry.profile_number,
                            entry.model_number
                        );
                        None
                    }
                }
            } else if !generic_label_used {
                generic_label_used = true;
                Some(PROFILE_FILES_LABEL.to_string())
            } else {
                None
            };

            markers.push(SnapshotMarker {
                profile_number: entry.profile_number,
                model_number: entry.model_number,
                points: points_of(&rows)?,
                highlighted,
                label,
            });
        }

        Ok(Self { track, markers })
    }

    /// Read `history.data` and `profiles.index` and build the diagram
    pub fn load(logs_dir: impl AsRef<Path>, profile_number: i64) -> Result<Self> {
        let logs_dir = logs_dir.as_ref();
        let history = load_history_file(logs_dir)?;
        let index = get_index(logs_dir)?;

        Self::from_tables(&history, &index, profile_number)
    }

    /// The highlighted marker, if any
    pub fn highlighted(&self) -> Option<&SnapshotMarker> {
        self.markers.iter().find(|m| m.highlighted)
    }

    /// Chart ranges in `(-log Teff, log L)` space with a 5% margin
    fn chart_ranges(&self) -> Option<(Range<f64>, Range<f64>)> {
        let coords: Vec<(f64, f64)> = self
            .track
            .iter()
            .chain(self.markers.iter().flat_map(|m| m.points.iter()))
            .map(HrPoint::chart_coord)
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();

        if coords.is_empty() {
            return None;
        }

        let x = padded_range(coords.iter().map(|c| c.0));
        let y = padded_range(coords.iter().map(|c| c.1));
        Some((x, y))
    }
}

/// Min..max widened by 5% of the span on each side (at least 0.05)
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let margin = ((hi - lo) * 0.05).max(0.05);
    (lo - margin)..(hi + margin)
}

fn points_of(history: &History) -> Result<Vec<HrPoint>> {
    let log_teff = history.log_teff()?;
    let log_l = history.log_l()?;

    Ok(log_teff
        .iter()
        .zip(log_l.iter())
        .map(|(&log_teff, &log_l)| HrPoint { log_teff, log_l })
        .collect())
}

/// Tick label for a log10 axis value
fn format_log_tick(log_value: f64) -> String {
    let value = 10f64.powf(log_value);
    if (0.01..1e4).contains(&value) {
        format!("{:.2}", value)
    } else {
        format!("{:.1e}", value)
    }
}

// =================================================================================================
// Drawing
// =================================================================================================

/// Draw an HR diagram on an existing drawing area
///
/// Both axes are logarithmic and temperature decreases to the right. The track is
/// a thick line in `config.line_color`; snapshots are filled circles in
/// `config.highlight_color` (selected) or `config.secondary_color` (others).
///
/// # Errors
///
/// [`MesaError::Plot`] if the diagram has no points or the backend fails.
pub fn draw_hr_diagram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    diagram: &HrDiagram,
    config: &PlotConfig,
) -> Result<()> {
    let (x_range, y_range) = diagram.chart_ranges().ok_or_else(|| MesaError::Plot {
        message: "HR diagram has no points".to_string(),
    })?;

    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.0}", 10f64.powf(-*x)))
            .y_label_formatter(&|y| format_log_tick(*y))
            .draw()?;
    }

    let line_color = config.line_color;
    chart
        .draw_series(LineSeries::new(
            diagram.track.iter().map(HrPoint::chart_coord),
            ShapeStyle::from(&line_color).stroke_width(config.line_width),
        ))?
        .label("evolutionary track")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &line_color));

    for marker in &diagram.markers {
        let color = if marker.highlighted {
            config.highlight_color
        } else {
            config.secondary_color
        };

        let series = chart.draw_series(
            marker
                .points
                .iter()
                .map(|p| Circle::new(p.chart_coord(), config.marker_size, color.filled())),
        )?;

        if let Some(label) = &marker.label {
            series
                .label(label.as_str())
                .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
        }
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

/// Plot the HR diagram of a `LOGS` directory to a file
///
/// # Arguments
///
/// * `logs_dir` - MESA `LOGS` directory
/// * `profile_number` - Snapshot to highlight ([`NO_HIGHLIGHT`] for none)
/// * `output_path` - Path to save the plot (`.svg` → SVG, anything else → PNG)
/// * `config` - Optional plot configuration
pub fn plot_hr(
    logs_dir: impl AsRef<Path>,
    profile_number: i64,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    let diagram = HrDiagram::load(logs_dir, profile_number)?;
    plot_hr_diagram(&diagram, output_path, config)
}

/// Plot an already-built HR diagram to a file
pub fn plot_hr_diagram(
    diagram: &HrDiagram,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<()> {
    let output_path = output_path.as_ref();

    // Create default config if needed (avoid temporary value)
    let default_config = PlotConfig::hr_diagram(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let ext = output_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let root = SVGBackend::new(output_path, (config.width, config.height))
                .into_drawing_area();
            draw_hr_diagram(&root, diagram, config)?;
        }
        _ => {
            let root = BitMapBackend::new(output_path, (config.width, config.height))
                .into_drawing_area();
            draw_hr_diagram(&root, diagram, config)?;
        }
    }

    log::info!("Wrote HR diagram to {}", output_path.display());
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
