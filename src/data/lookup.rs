//! History lookup by profile number
//!
//! Joins `profiles.index` and `history.data`: profile number → model number →
//! history rows.

use std::path::Path;

use super::history::{load_history_file, History};
use super::index::{get_index, ProfileIndex};
use crate::error::Result;

/// History rows recorded at the model number of snapshot `profile_number`
///
/// Reads both `history.data` and `profiles.index` on every call.
///
/// # Errors
///
/// - [`MesaError::SnapshotNotFound`](crate::MesaError::SnapshotNotFound) if
///   `profile_number` is not listed in the index
/// - any loading error of the two files
///
/// # Example
///
/// ```rust,ignore
/// use mesa_rs::data::get_history;
///
/// let rows = get_history("LOGS", 3)?;
/// let age = rows.star_age()?[0];
/// ```
pub fn get_history(logs_dir: impl AsRef<Path>, profile_number: i64) -> Result<History> {
    let logs_dir = logs_dir.as_ref();
    let history = load_history_file(logs_dir)?;
    let index = get_index(logs_dir)?;

    history_for_profile(&history, &index, profile_number)
}

/// In-memory version of [`get_history`] over already-loaded tables
pub fn history_for_profile(
    history: &History,
    index: &ProfileIndex,
    profile_number: i64,
) -> Result<History> {
    let model_number = index.model_number_for(profile_number)?;
    history.rows_for_model(model_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::history::{LOG_L, LOG_TEFF, MODEL_NUMBER, STAR_AGE};
    use crate::data::index::ProfileIndexEntry;
    use crate::data::Table;
    use crate::MesaError;

    fn tables() -> (History, ProfileIndex) {
        let history = History::from_table(
            Table::from_rows(
                vec![
                    MODEL_NUMBER.to_string(),
                    LOG_TEFF.to_string(),
                    LOG_L.to_string(),
                    STAR_AGE.to_string(),
                ],
                (1..=10)
                    .map(|m| vec![m as f64, 3.76, 0.01 * m as f64, 1.0e8 * m as f64])
                    .collect(),
            )
            .unwrap(),
        );

        let index = ProfileIndex::from_entries(vec![
            ProfileIndexEntry { model_number: 1, priority: 2, profile_number: 1 },
            ProfileIndexEntry { model_number: 5, priority: 1, profile_number: 2 },
            ProfileIndexEntry { model_number: 10, priority: 1, profile_number: 3 },
        ]);

        (history, index)
    }

    #[test]
    fn test_rows_match_index_model_number() {
        let (history, index) = tables();
        let rows = history_for_profile(&history, &index, 2).unwrap();
        assert_eq!(rows.model_numbers().unwrap(), vec![5]);
    }

    #[test]
    fn test_unknown_profile_is_an_error() {
        let (history, index) = tables();
        let err = history_for_profile(&history, &index, 4).unwrap_err();
        assert!(matches!(err, MesaError::SnapshotNotFound { profile_number: 4 }));
    }
}
