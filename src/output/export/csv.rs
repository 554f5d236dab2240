//! CSV export of HR diagrams and composition profiles
//!
//! Writes the plotted series to CSV (Comma-Separated Values), readable by
//! spreadsheets, pandas, gnuplot and most analysis tools.
//!
//! # Features
//!
//! - **Metadata support**: Optional `#` header with run information
//! - **Customizable**: Delimiter, precision, decimal separator
//! - **Validation**: Rejects empty series and NaN/Inf values
//!
//! # Quick Examples
//!
//! ## HR track
//!
//! ```rust,ignore
//! use mesa_rs::output::export::export_hr_track_csv;
//! use mesa_rs::output::visualization::HrDiagram;
//!
//! let diagram = HrDiagram::load("LOGS", 3)?;
//! export_hr_track_csv(&diagram, "track.csv", None)?;
//! ```
//!
//! **Output** (`track.csv`):
//! ```csv
//! Teff (K),L (Lsun)
//! 5.776183e3,9.782350e-1
//! 5.779004e3,9.816110e-1
//! ...
//! ```
//!
//! ## With Metadata
//!
//! ```rust,ignore
//! use mesa_rs::output::export::{export_composition_csv, CsvConfig, CsvMetadata};
//!
//! let metadata = CsvMetadata::for_snapshot("LOGS", 3);
//! let config = CsvConfig::default().with_metadata(metadata);
//!
//! export_composition_csv(&view, "composition.csv", Some(&config))?;
//! ```
//!
//! **Output** (`composition.csv`):
//! ```csv
//! # MESA Run Data
//! # Generated: 2026-02-11T15:30:00+00:00
//! # Logs: LOGS
//! # Profile: 3
//! #
//! r / R,X,Y
//! 1.000000,0.700000,0.280000
//! ...
//! ```

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use super::Exporter;
use crate::error::{MesaError, Result};
use crate::output::visualization::{CompositionView, HrDiagram};

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Fields
///
/// - `delimiter`: Column separator (default: ',')
/// - `decimal_separator`: Decimal point character (default: '.')
/// - `precision`: Number of decimal places (default: 6); for temperature and
///   luminosity it counts significant digits after the first
/// - `include_metadata`: Add header comments with run info
/// - `metadata`: Run metadata to include
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// High precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.delimiter == self.decimal_separator {
            return Err(MesaError::export(format!(
                "delimiter and decimal separator are both '{}'",
                self.delimiter
            )));
        }
        Ok(())
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set are written.
#[derive(Clone, Debug, Default)]
pub struct CsvMetadata {
    /// `LOGS` directory the data came from
    pub logs_dir: Option<String>,

    pub profile_number: Option<i64>,

    pub model_number: Option<i64>,

    /// Star age [yr]
    pub star_age: Option<f64>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata naming a `LOGS` directory and one of its snapshots
    pub fn for_snapshot(logs_dir: impl AsRef<Path>, profile_number: i64) -> Self {
        Self {
            logs_dir: Some(logs_dir.as_ref().display().to_string()),
            profile_number: Some(profile_number),
            ..Default::default()
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header(out: &mut impl Write, metadata: &CsvMetadata) -> io::Result<()> {
    writeln!(out, "# MESA Run Data")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(logs_dir) = &metadata.logs_dir {
        writeln!(out, "# Logs: {}", logs_dir)?;
    }
    if let Some(profile) = metadata.profile_number {
        writeln!(out, "# Profile: {}", profile)?;
    }
    if let Some(model) = metadata.model_number {
        writeln!(out, "# Model: {}", model)?;
    }
    if let Some(age) = metadata.star_age {
        writeln!(out, "# Star Age: {} yr", age)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")?;

    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

/// Format number in scientific notation with configured precision and decimal separator
///
/// Used for temperature and luminosity, which span many decades.
fn format_scientific(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$e}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

/// Reject empty or non-finite series
fn check_series(name: &str, values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(MesaError::export(format!("Empty data: {} series is empty", name)));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(MesaError::export(format!(
            "Invalid data: NaN or Inf detected in {} series",
            name
        )));
    }
    Ok(())
}

/// Write header and pre-formatted rows to `output_path`
fn write_table(
    output_path: &Path,
    config: &CsvConfig,
    headers: &[&str],
    rows: impl IntoIterator<Item = Vec<String>>,
) -> Result<()> {
    let io_err = |e: io::Error| MesaError::from_io(output_path, e);
    let delimiter = config.delimiter.to_string();

    let mut file = File::create(output_path).map_err(io_err)?;

    if config.include_metadata {
        if let Some(metadata) = &config.metadata {
            write_metadata_header(&mut file, metadata).map_err(io_err)?;
        }
    }

    writeln!(file, "{}", headers.join(&delimiter)).map_err(io_err)?;

    let mut n_rows = 0;
    for row in rows {
        writeln!(file, "{}", row.join(&delimiter)).map_err(io_err)?;
        n_rows += 1;
    }

    log::info!("Wrote {} rows to {}", n_rows, output_path.display());
    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export the evolutionary track of an HR diagram
///
/// Two columns, `Teff (K)` and `L (Lsun)`, one row per track point, both in
/// scientific notation.
///
/// # Errors
///
/// - [`MesaError::Export`] for an empty track, NaN/Inf values or a delimiter equal to
///   the decimal separator
/// - [`MesaError::Io`] if the file cannot be written
pub fn export_hr_track_csv(
    diagram: &HrDiagram,
    output_path: impl AsRef<Path>,
    config: Option<&CsvConfig>,
) -> Result<()> {
    // ============================= Validation =============================

    let teff: Vec<f64> = diagram.track.iter().map(|p| p.effective_temperature()).collect();
    let lum: Vec<f64> = diagram.track.iter().map(|p| p.luminosity()).collect();

    check_series("effective temperature", &teff)?;
    check_series("luminosity", &lum)?;

    // ============================= Configuration ==========================

    let binding = CsvConfig::default();
    let config = config.unwrap_or(&binding);
    config.validate()?;

    // ============================= Write ==================================

    let rows = teff
        .iter()
        .zip(&lum)
        .map(|(&t, &l)| vec![format_scientific(t, config), format_scientific(l, config)]);

    write_table(output_path.as_ref(), config, &["Teff (K)", "L (Lsun)"], rows)
}

/// Export the snapshot markers of an HR diagram
///
/// Columns `profile_number`, `model_number`, `Teff (K)`, `L (Lsun)`, `highlighted`,
/// one row per history point of each marker. Markers without history rows are skipped.
pub fn export_hr_snapshots_csv(
    diagram: &HrDiagram,
    output_path: impl AsRef<Path>,
    config: Option<&CsvConfig>,
) -> Result<()> {
    let points: Vec<_> = diagram
        .markers
        .iter()
        .flat_map(|m| m.points.iter().map(move |p| (m, p)))
        .collect();

    let teff: Vec<f64> = points.iter().map(|(_, p)| p.effective_temperature()).collect();
    let lum: Vec<f64> = points.iter().map(|(_, p)| p.luminosity()).collect();

    check_series("snapshot temperature", &teff)?;
    check_series("snapshot luminosity", &lum)?;

    let binding = CsvConfig::default();
    let config = config.unwrap_or(&binding);
    config.validate()?;

    let rows = points.iter().zip(teff.iter().zip(&lum)).map(|((marker, _), (&t, &l))| {
        vec![
            marker.profile_number.to_string(),
            marker.model_number.to_string(),
            format_scientific(t, config),
            format_scientific(l, config),
            marker.highlighted.to_string(),
        ]
    });

    write_table(
        output_path.as_ref(),
        config,
        &["profile_number", "model_number", "Teff (K)", "L (Lsun)", "highlighted"],
        rows,
    )
}

/// Export a composition profile
///
/// Columns: the normalized coordinate (`r / R` or `m / M`), `X`, `Y`.
pub fn export_composition_csv(
    view: &CompositionView,
    output_path: impl AsRef<Path>,
    config: Option<&CsvConfig>,
) -> Result<()> {
    check_series("coordinate", &view.coordinate)?;
    check_series("hydrogen", &view.hydrogen)?;
    check_series("helium", &view.helium)?;

    if view.hydrogen.len() != view.coordinate.len() || view.helium.len() != view.coordinate.len() {
        return Err(MesaError::export(format!(
            "Data length mismatch: {} coordinates, {} X values, {} Y values",
            view.coordinate.len(),
            view.hydrogen.len(),
            view.helium.len()
        )));
    }

    let binding = CsvConfig::default();
    let config = config.unwrap_or(&binding);
    config.validate()?;

    let rows = (0..view.coordinate.len()).map(|i| {
        vec![
            format_number(view.coordinate[i], config),
            format_number(view.hydrogen[i], config),
            format_number(view.helium[i], config),
        ]
    });

    write_table(output_path.as_ref(), config, &[view.axis.label(), "X", "Y"], rows)
}

// =============================================================================
// Exporter
// =============================================================================

/// CSV implementation of [`Exporter`]
#[derive(Clone, Debug, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    type Error = MesaError;

    fn export_hr(&self, diagram: &HrDiagram, path: &Path) -> Result<()> {
        export_hr_track_csv(diagram, path, Some(&self.config))
    }

    fn export_composition(&self, view: &CompositionView, path: &Path) -> Result<()> {
        export_composition_csv(view, path, Some(&self.config))
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::visualization::{CompositionAxis, HrPoint, SnapshotMarker};
    use approx::assert_relative_eq;
    use std::fs;
    use tempfile::NamedTempFile;

    fn diagram() -> HrDiagram {
        HrDiagram {
            track: vec![
                HrPoint { log_teff: 4.0, log_l: 0.0 },
                HrPoint { log_teff: 3.5, log_l: 1.0 },
            ],
            markers: vec![
                SnapshotMarker {
                    profile_number: 1,
                    model_number: 10,
                    points: vec![HrPoint { log_teff: 4.0, log_l: 0.0 }],
                    highlighted: false,
                    label: Some("profile files".to_string()),
                },
                SnapshotMarker {
                    profile_number: 2,
                    model_number: 20,
                    points: vec![],
                    highlighted: true,
                    label: None,
                },
            ],
        }
    }

    fn view() -> CompositionView {
        CompositionView {
            profile_number: 3,
            axis: CompositionAxis::Mass,
            coordinate: vec![1.0, 0.5],
            hydrogen: vec![0.7, 0.3],
            helium: vec![0.28, 0.68],
            zams_hydrogen: 0.7,
            zams_helium: 0.28,
            primordial_helium: 0.2463,
        }
    }

    #[test]
    fn test_track_export() {
        let file = NamedTempFile::new().unwrap();
        export_hr_track_csv(&diagram(), file.path(), Some(&CsvConfig::default().precision(1)))
            .unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["Teff (K),L (Lsun)", "1.0e4,1.0e0", "3.2e3,1.0e1"]);
    }

    #[test]
    fn test_track_export_keeps_faint_luminosities() {
        let faint = HrDiagram {
            track: vec![
                HrPoint { log_teff: 4.0, log_l: -4.5 },
                HrPoint { log_teff: 4.0, log_l: -7.2 },
            ],
            markers: vec![],
        };

        let file = NamedTempFile::new().unwrap();
        export_hr_track_csv(&faint, file.path(), None).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let luminosities: Vec<f64> = content
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(1).unwrap().parse().unwrap())
            .collect();

        assert_eq!(luminosities.len(), 2);
        assert_relative_eq!(luminosities[0], 10f64.powf(-4.5), max_relative = 1e-6);
        assert_relative_eq!(luminosities[1], 10f64.powf(-7.2), max_relative = 1e-6);
    }

    #[test]
    fn test_scientific_european_separator() {
        let config = CsvConfig::european().precision(2);
        assert_eq!(format_scientific(6.3e-8, &config), "6,30e-8");
    }

    #[test]
    fn test_snapshot_export_skips_markers_without_points() {
        let file = NamedTempFile::new().unwrap();
        export_hr_snapshots_csv(&diagram(), file.path(), Some(&CsvConfig::default().precision(0)))
            .unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "profile_number,model_number,Teff (K),L (Lsun),highlighted");
        assert_eq!(lines[1], "1,10,1e4,1e0,false");
    }

    #[test]
    fn test_composition_export_european() {
        let file = NamedTempFile::new().unwrap();
        let config = CsvConfig::european().precision(2);
        export_composition_csv(&view(), file.path(), Some(&config)).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "m / M;X;Y");
        assert_eq!(lines[1], "1,00;0,70;0,28");
    }

    #[test]
    fn test_metadata_header() {
        let file = NamedTempFile::new().unwrap();
        let mut metadata = CsvMetadata::for_snapshot("LOGS", 3);
        metadata.model_number = Some(300);
        metadata.add_custom("Axis", "mass");

        let config = CsvConfig::default().with_metadata(metadata);
        export_composition_csv(&view(), file.path(), Some(&config)).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.starts_with("# MESA Run Data\n# Generated: "));
        assert!(content.contains("# Logs: LOGS\n"));
        assert!(content.contains("# Profile: 3\n"));
        assert!(content.contains("# Model: 300\n"));
        assert!(content.contains("# Axis: mass\n"));
        assert!(content.contains("#\nm / M,X,Y\n"));
    }

    #[test]
    fn test_empty_track_rejected() {
        let file = NamedTempFile::new().unwrap();
        let empty = HrDiagram { track: vec![], markers: vec![] };
        let err = export_hr_track_csv(&empty, file.path(), None).unwrap_err();
        assert!(matches!(err, MesaError::Export { .. }));
    }

    #[test]
    fn test_non_finite_rejected() {
        let file = NamedTempFile::new().unwrap();
        let mut bad = view();
        bad.helium[1] = f64::NAN;
        let err = export_composition_csv(&bad, file.path(), None).unwrap_err();
        assert!(matches!(err, MesaError::Export { .. }));
    }

    #[test]
    fn test_ambiguous_separators_rejected() {
        let file = NamedTempFile::new().unwrap();
        let config = CsvConfig::european().delimiter(',');
        let err = export_composition_csv(&view(), file.path(), Some(&config)).unwrap_err();
        assert!(matches!(err, MesaError::Export { .. }));
    }

    #[test]
    fn test_exporter_trait() {
        let file = NamedTempFile::new().unwrap();
        let exporter = CsvExporter::default();
        exporter.export_composition(&view(), file.path()).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
