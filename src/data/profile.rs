//! Profile snapshots (`profile<N>.data`)
//!
//! One row per spatial zone, one file per snapshot. MESA writes zones from the
//! surface inwards; the loader keeps that order untouched.

use nalgebra::DVector;
use std::path::Path;

use super::index::get_index;
use super::table::{read_data_file, Table};
use crate::error::{MesaError, Result};

/// Base-10 log of the zone radius [R☉]
pub const LOG_R: &str = "logR";

/// Mass enclosed by the zone [M☉]
pub const MASS: &str = "mass";

/// Hydrogen mass fraction X
pub const HYDROGEN: &str = "x_mass_fraction_H";

/// Helium mass fraction Y
pub const HELIUM: &str = "y_mass_fraction_He";

/// File name of snapshot `profile_number`
pub fn profile_file_name(profile_number: i64) -> String {
    format!("profile{}.data", profile_number)
}

/// One profile snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    number: i64,
    table: Table,
}

impl Profile {
    /// Wrap an already-built table
    pub fn from_table(number: i64, table: Table) -> Self {
        Self { number, table }
    }

    /// Profile number (`N` in `profile<N>.data`)
    pub fn number(&self) -> i64 {
        self.number
    }

    /// Underlying table
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Number of zones
    pub fn len(&self) -> usize {
        self.table.n_rows()
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// `logR` column
    pub fn log_r(&self) -> Result<DVector<f64>> {
        self.table.column(LOG_R)
    }

    /// Zone radius $r = 10^{\log R}$ [R☉]
    pub fn radius(&self) -> Result<DVector<f64>> {
        Ok(self.log_r()?.map(|x| 10f64.powf(x)))
    }

    /// Enclosed mass [M☉]
    pub fn mass(&self) -> Result<DVector<f64>> {
        self.table.column(MASS)
    }

    /// Hydrogen mass fraction per zone
    pub fn hydrogen(&self) -> Result<DVector<f64>> {
        self.table.column(HYDROGEN)
    }

    /// Helium mass fraction per zone
    pub fn helium(&self) -> Result<DVector<f64>> {
        self.table.column(HELIUM)
    }

    /// `(X, Y)` of the first zone in file order
    pub fn first_zone_composition(&self) -> Result<(f64, f64)> {
        let x = self.table.value(0, HYDROGEN)?;
        let y = self.table.value(0, HELIUM)?;

        match (x, y) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(MesaError::invalid_input(format!(
                "profile {} ({}) has no zones",
                self.number,
                self.table.source().display()
            ))),
        }
    }
}

/// Load `profile<N>.data` from a MESA `LOGS` directory
///
/// Every call re-reads the file.
pub fn load_profile(logs_dir: impl AsRef<Path>, profile_number: i64) -> Result<Profile> {
    let path = logs_dir.as_ref().join(profile_file_name(profile_number));
    Ok(Profile::from_table(profile_number, read_data_file(&path)?))
}

/// Load every snapshot listed in `profiles.index`, in index order
///
/// With the `parallel` feature the files are read concurrently; the returned
/// order is still index order.
pub fn get_profiles(logs_dir: impl AsRef<Path>) -> Result<Vec<Profile>> {
    let logs_dir = logs_dir.as_ref();
    let numbers = get_index(logs_dir)?.profile_numbers();

    #[cfg(feature = "parallel")]
    let profiles: Result<Vec<Profile>> = {
        use rayon::prelude::*;

        numbers
            .par_iter()
            .map(|&n| load_profile(logs_dir, n))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let profiles: Result<Vec<Profile>> =
        numbers.iter().map(|&n| load_profile(logs_dir, n)).collect();

    profiles
}
