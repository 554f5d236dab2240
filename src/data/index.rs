//! Profile index (`profiles.index`)
//!
//! Maps each saved profile snapshot to the model number it was taken at.
//! The file has a one-line preamble and no usable header:
//!
//! ```text
//!       3 models.    lines hold model number, priority, and profile number.
//!     1      2      1
//!    50      1      2
//!   100      1      3
//! ```

use std::fs;
use std::path::Path;

use super::table::parse_number;
use crate::error::{MesaError, Result};

/// File name of the profile index inside a MESA `LOGS` directory
pub const INDEX_FILE: &str = "profiles.index";

/// Lines before the first entry
pub const INDEX_PREAMBLE_LINES: usize = 1;

/// One saved profile snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileIndexEntry {
    /// Simulation step the snapshot was taken at (foreign key into the history)
    pub model_number: i64,

    /// Save priority assigned by MESA (informational)
    pub priority: i64,

    /// Number `N` of the `profile<N>.data` file
    pub profile_number: i64,
}

/// Ordered list of profile snapshots, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileIndex {
    entries: Vec<ProfileIndexEntry>,
}

impl ProfileIndex {
    /// Build an index from entries
    pub fn from_entries(entries: Vec<ProfileIndexEntry>) -> Self {
        Self { entries }
    }

    /// Entries in file order
    pub fn entries(&self) -> &[ProfileIndexEntry] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries
    pub fn iter(&self) -> std::slice::Iter<'_, ProfileIndexEntry> {
        self.entries.iter()
    }

    /// Profile numbers in file order
    pub fn profile_numbers(&self) -> Vec<i64> {
        self.entries.iter().map(|e| e.profile_number).collect()
    }

    /// First entry for `profile_number`
    pub fn entry_for(&self, profile_number: i64) -> Result<&ProfileIndexEntry> {
        self.entries
            .iter()
            .find(|e| e.profile_number == profile_number)
            .ok_or(MesaError::SnapshotNotFound { profile_number })
    }

    /// Model number of `profile_number`
    ///
    /// Takes the first match when a profile number is listed more than once.
    pub fn model_number_for(&self, profile_number: i64) -> Result<i64> {
        self.entry_for(profile_number).map(|e| e.model_number)
    }
}

impl<'a> IntoIterator for &'a ProfileIndex {
    type Item = &'a ProfileIndexEntry;
    type IntoIter = std::slice::Iter<'a, ProfileIndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Load `profiles.index` from a MESA `LOGS` directory
///
/// # Errors
///
/// - [`MesaError::FileNotFound`] if the file is absent
/// - [`MesaError::Parse`] if a line does not hold exactly three integers
pub fn get_index(logs_dir: impl AsRef<Path>) -> Result<ProfileIndex> {
    let path = logs_dir.as_ref().join(INDEX_FILE);
    let text = fs::read_to_string(&path).map_err(|e| MesaError::from_io(&path, e))?;
    let index = parse_index(&path, &text)?;

    log::debug!("Loaded {} ({} snapshots)", path.display(), index.len());

    Ok(index)
}

/// Parse the text of a profile index
pub(crate) fn parse_index(path: &Path, text: &str) -> Result<ProfileIndex> {
    let mut entries = Vec::new();

    for (idx, line) in text.lines().enumerate().skip(INDEX_PREAMBLE_LINES) {
        if line.trim().is_empty() {
            continue;
        }

        let line_number = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();

        let [model_number, priority, profile_number] = fields[..] else {
            return Err(MesaError::parse(
                path,
                line_number,
                format!("expected 3 fields, found {}", fields.len()),
            ));
        };

        let integer = |field: &str| -> Result<i64> {
            field
                .parse::<i64>()
                .ok()
                .or_else(|| {
                    parse_number(field)
                        .filter(|v| v.fract() == 0.0)
                        .map(|v| v as i64)
                })
                .ok_or_else(|| {
                    MesaError::parse(path, line_number, format!("'{}' is not an integer", field))
                })
        };

        entries.push(ProfileIndexEntry {
            model_number: integer(model_number)?,
            priority: integer(priority)?,
            profile_number: integer(profile_number)?,
        });
    }

    Ok(ProfileIndex::from_entries(entries))
}
