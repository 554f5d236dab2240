//! Export of plotted data
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module.
//!
//! # Available formats
//!
//! | Format  | Module          |
//! |---------|-----------------|
//! | CSV     | [`csv`]         |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use mesa_rs::output::export::{CsvExporter, Exporter};
//! use mesa_rs::output::visualization::{CompositionAxis, CompositionView, HrDiagram};
//!
//! let exporter = CsvExporter::default();
//!
//! let diagram = HrDiagram::load("LOGS", 3)?;
//! exporter.export_hr(&diagram, "track.csv".as_ref())?;
//!
//! let view = CompositionView::load("LOGS", 2, CompositionAxis::Mass)?;
//! exporter.export_composition(&view, "composition.csv".as_ref())?;
//! ```

pub mod csv;

pub use csv::{
    export_composition_csv,
    export_hr_snapshots_csv,
    export_hr_track_csv,
    CsvConfig,
    CsvExporter,
    CsvMetadata,
};

use std::path::Path;

use crate::output::visualization::{CompositionView, HrDiagram};

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so callers can
/// match on them without boxing.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports the evolutionary track of an HR diagram.
    ///
    /// # Errors
    ///
    /// Returns an error if the track is empty or the path cannot be written.
    fn export_hr(&self, diagram: &HrDiagram, path: &Path) -> Result<(), Self::Error>;

    /// Exports a composition profile: coordinate, hydrogen, helium.
    fn export_composition(&self, view: &CompositionView, path: &Path) -> Result<(), Self::Error>;
}
