//! Readers for MESA `LOGS` directories
//!
//! # Files
//!
//! | File | Loader | Rows |
//! |------|--------|------|
//! | `history.data` | [`load_history_file`] | one per saved step |
//! | `profile<N>.data` | [`load_profile`] | one per zone |
//! | `profiles.index` | [`get_index`] | one per snapshot |
//!
//! [`get_history`] joins the index and the history: profile number → model number →
//! history rows.
//!
//! Every loader reads from disk on every call. Nothing is cached.
//!
//! # Example
//!
//! ```rust,ignore
//! use mesa_rs::data::{get_history, get_index, load_profile};
//!
//! let index = get_index("LOGS")?;
//! for entry in &index {
//!     let rows = get_history("LOGS", entry.profile_number)?;
//!     let profile = load_profile("LOGS", entry.profile_number)?;
//!     println!("profile {} has {} zones", profile.number(), profile.len());
//! }
//! ```

pub mod table;
pub mod history;
pub mod profile;
pub mod index;
pub mod lookup;

pub use table::{Preamble, Table, DATA_PREAMBLE_LINES};
pub use history::{load_history_file, History, HISTORY_FILE};
pub use profile::{get_profiles, load_profile, profile_file_name, Profile};
pub use index::{get_index, ProfileIndex, ProfileIndexEntry, INDEX_FILE};
pub use lookup::{get_history, history_for_profile};
