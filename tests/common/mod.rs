//! Common utilities for integration tests
//!
//! [`SyntheticLogs`] writes a small MESA `LOGS` directory into a temporary
//! directory: a history of `n_models` steps and one profile per snapshot.

#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Number of lines before the first data row of a history or profile file
pub const HEADER_LINES: usize = 6;

/// Temporary `LOGS` directory
pub struct SyntheticLogs {
    dir: TempDir,

    /// Number of history rows
    pub n_models: usize,

    /// `(model_number, profile_number)` of each snapshot, in index order
    pub snapshots: Vec<(i64, i64)>,

    /// Zones per profile
    pub n_zones: usize,
}

impl SyntheticLogs {
    /// Ten models, snapshots at models 1, 4 and 10 (profiles 1, 2, 3), eight zones
    pub fn new() -> Self {
        Self::with_layout(10, vec![(1, 1), (4, 2), (10, 3)], 8)
    }

    pub fn with_layout(n_models: usize, snapshots: Vec<(i64, i64)>, n_zones: usize) -> Self {
        let dir = tempfile::tempdir().expect("create temp LOGS dir");
        let logs = Self { dir, n_models, snapshots, n_zones };

        fs::write(logs.path().join("history.data"), logs.history_text()).expect("write history");
        fs::write(logs.path().join("profiles.index"), logs.index_text()).expect("write index");

        for (ordinal, &(model, profile)) in logs.snapshots.iter().enumerate() {
            fs::write(
                logs.path().join(format!("profile{}.data", profile)),
                logs.profile_text(model, ordinal),
            )
            .expect("write profile");
        }

        logs
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Star age of `model` [yr]
    pub fn star_age(model: i64) -> f64 {
        1.0e8 * model as f64
    }

    /// log Teff of `model`
    pub fn log_teff(model: i64) -> f64 {
        3.76 - 0.002 * model as f64
    }

    /// log L of `model`
    pub fn log_l(model: i64) -> f64 {
        -0.1 + 0.01 * model as f64
    }

    /// Central hydrogen of the snapshot at position `ordinal` (0-based)
    pub fn core_hydrogen(ordinal: usize) -> f64 {
        0.70 - 0.2 * ordinal as f64
    }

    fn history_text(&self) -> String {
        let mut text = preamble(
            &["version_number", "initial_mass", "initial_z"],
            &["\"r24.03.1\"", "1.0D+00", "2.0000000000000000E-02"],
        );
        text.push_str("model_number star_age log_Teff log_L\n");

        for model in 1..=self.n_models as i64 {
            writeln!(
                text,
                "{:>8} {:.16E} {:.16E} {:.16E}",
                model,
                Self::star_age(model),
                Self::log_teff(model),
                Self::log_l(model)
            )
            .unwrap();
        }
        text
    }

    fn index_text(&self) -> String {
        let mut text = format!(
            "{:>8} models.    lines hold model number, priority, and profile number.\n",
            self.snapshots.len()
        );
        for &(model, profile) in &self.snapshots {
            writeln!(text, "{:>10} {:>10} {:>10}", model, 1, profile).unwrap();
        }
        text
    }

    fn profile_text(&self, model: i64, ordinal: usize) -> String {
        let values = [
            model.to_string(),
            self.n_zones.to_string(),
            format!("{:E}", Self::star_age(model)),
        ];
        let values: Vec<&str> = values.iter().map(String::as_str).collect();

        let mut text = preamble(&["model_number", "num_zones", "star_age"], &values);
        text.push_str("zone mass logR x_mass_fraction_H y_mass_fraction_He\n");

        let core_x = Self::core_hydrogen(ordinal);
        for zone in 1..=self.n_zones {
            // Zone 1 is the surface
            let depth = (zone - 1) as f64 / (self.n_zones - 1).max(1) as f64;
            let mass = 1.0 - 0.9 * depth;
            let log_r = -2.0 * depth;
            let x = 0.70 + (core_x - 0.70) * depth;
            let y = 0.98 - x;

            writeln!(
                text,
                "{:>6} {:.16E} {:.16E} {:.16E} {:.16E}",
                zone, mass, log_r, x, y
            )
            .unwrap();
        }
        text
    }
}

impl Default for SyntheticLogs {
    fn default() -> Self {
        Self::new()
    }
}

/// Five-line MESA preamble: indices, names, values, blank, indices
fn preamble(names: &[&str], values: &[&str]) -> String {
    let indices: Vec<String> = (1..=names.len()).map(|i| i.to_string()).collect();
    format!(
        "{}\n{}\n{}\n\n{}\n",
        indices.join(" "),
        names.join(" "),
        values.join(" "),
        indices.join(" ")
    )
}
