//! History table (`history.data`)
//!
//! One row per saved simulation step, keyed by `model_number`.

use nalgebra::DVector;
use std::path::Path;

use super::table::{read_data_file, Table};
use crate::error::Result;

/// File name of the history table inside a MESA `LOGS` directory
pub const HISTORY_FILE: &str = "history.data";

/// Monotonic step counter column
pub const MODEL_NUMBER: &str = "model_number";

/// Base-10 log of the effective temperature [K]
pub const LOG_TEFF: &str = "log_Teff";

/// Base-10 log of the luminosity [L☉]
pub const LOG_L: &str = "log_L";

/// Stellar age [yr]
pub const STAR_AGE: &str = "star_age";

/// Time series of simulation steps
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    table: Table,
}

impl History {
    /// Wrap an already-built table
    pub fn from_table(table: Table) -> Self {
        Self { table }
    }

    /// Underlying table
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Consume into the underlying table
    pub fn into_table(self) -> Table {
        self.table
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.table.n_rows()
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Model numbers in file order
    pub fn model_numbers(&self) -> Result<Vec<i64>> {
        Ok(self
            .table
            .column(MODEL_NUMBER)?
            .iter()
            .map(|m| m.round() as i64)
            .collect())
    }

    /// `log_Teff` column
    pub fn log_teff(&self) -> Result<DVector<f64>> {
        self.table.column(LOG_TEFF)
    }

    /// `log_L` column
    pub fn log_l(&self) -> Result<DVector<f64>> {
        self.table.column(LOG_L)
    }

    /// `star_age` column [yr]
    pub fn star_age(&self) -> Result<DVector<f64>> {
        self.table.column(STAR_AGE)
    }

    /// Effective temperature $T_{eff} = 10^{\log T_{eff}}$ [K]
    pub fn effective_temperature(&self) -> Result<DVector<f64>> {
        Ok(self.log_teff()?.map(|x| 10f64.powf(x)))
    }

    /// Luminosity $L = 10^{\log L}$ [L☉]
    pub fn luminosity(&self) -> Result<DVector<f64>> {
        Ok(self.log_l()?.map(|x| 10f64.powf(x)))
    }

    /// All rows whose `model_number` equals `model_number`
    ///
    /// Normally one row, but uniqueness is not enforced: MESA rewrites steps after a
    /// retry or restart, so every match is returned in file order.
    pub fn rows_for_model(&self, model_number: i64) -> Result<History> {
        let table = self
            .table
            .filter_rows(MODEL_NUMBER, |m| m.round() as i64 == model_number)?;
        Ok(Self { table })
    }

    /// Every row except the first
    ///
    /// The first history row duplicates the initial model and is left out of
    /// evolutionary tracks.
    pub fn without_first_row(&self) -> History {
        let rows: Vec<usize> = (1..self.len()).collect();
        Self {
            table: self.table.select_rows(&rows),
        }
    }
}

/// Load `history.data` from a MESA `LOGS` directory
///
/// # Errors
///
/// - [`MesaError::FileNotFound`](crate::MesaError::FileNotFound) if the file is absent
/// - [`MesaError::Parse`](crate::MesaError::Parse) if a row is malformed
///
/// # Example
///
/// ```rust,ignore
/// use mesa_rs::data::load_history_file;
///
/// let history = load_history_file("LOGS")?;
/// println!("{} steps", history.len());
/// ```
pub fn load_history_file(logs_dir: impl AsRef<Path>) -> Result<History> {
    let path = logs_dir.as_ref().join(HISTORY_FILE);
    Ok(History::from_table(read_data_file(&path)?))
}
