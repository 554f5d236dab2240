//! Plot configuration shared across visualization modules
//!
//! This module defines the configuration used by both the HR diagram and the
//! composition profile.

use plotters::prelude::*;

/// Light gray used for the primordial helium guide
pub const LIGHT_GRAY: RGBColor = RGBColor(211, 211, 211);

/// Configuration for customizing plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels (an empty `xlabel` lets the composition plot
///   pick the label of its coordinate)
/// - `line_color`: Main curve (evolutionary track, hydrogen)
/// - `secondary_color`: Second curve and ordinary snapshot markers (helium, profiles)
/// - `highlight_color`: Selected snapshot marker
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `marker_size`: Snapshot marker radius in pixels
/// - `show_grid`: Whether to draw the mesh and axis labels
///
/// # Example
///
/// ```rust,ignore
/// use mesa_rs::output::visualization::PlotConfig;
///
/// let mut config = PlotConfig::hr_diagram("1 Msun, Z = 0.02");
/// config.width = 1920;
/// config.height = 1080;
/// ```
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: auto-set by plot type)
    pub xlabel: String,

    /// Y-axis label (default: auto-set by plot type)
    pub ylabel: String,

    /// Main curve color (default: BLACK)
    pub line_color: RGBColor,

    /// Second curve / ordinary marker color (default: BLUE)
    pub secondary_color: RGBColor,

    /// Highlighted marker color (default: RED)
    pub highlight_color: RGBColor,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 3)
    pub line_width: u32,

    /// Marker radius in pixels (default: 5)
    pub marker_size: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: String::new(),
            line_color: BLACK,
            secondary_color: BLUE,
            highlight_color: RED,
            background: WHITE,
            line_width: 3,
            marker_size: 5,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
///
/// # Example
///
/// ```rust,ignore
/// let config = PlotConfig::hr_diagram(NO_TITLE);
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Create config for HR diagrams with optional custom title
    ///
    /// Sets temperature/luminosity axis labels and title to custom value or "HR Diagram"
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let config = PlotConfig::hr_diagram("Solar track");
    /// let config = PlotConfig::hr_diagram(NO_TITLE);
    /// ```
    pub fn hr_diagram(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.xlabel = "Effective temperature Teff (K)".to_string();
        config.ylabel = "Luminosity L (Lsun)".to_string();
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "HR Diagram".to_string());
        config
    }

    /// Create config for composition profiles with optional custom title
    ///
    /// Leaves `xlabel` empty so the plotted coordinate names the axis, and
    /// sets title to custom value or "Internal Composition"
    pub fn composition(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.ylabel = "Mass fraction".to_string();
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Internal Composition".to_string());
        config
    }

    /// Builder pattern: set image size
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

// =================================================================================================
// Tests
// =================================================================================================
