//! Output of MESA run data
//!
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV export for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs
//! ├── visualization/      ← Plots
//! │   ├── config.rs
//! │   ├── hr.rs
//! │   └── composition.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! Both sides consume the same view types (`HrDiagram`, `CompositionView`), so a
//! plot and its CSV always hold the same numbers.

pub mod visualization;
pub mod export;

pub use visualization::{
    plot_composition,
    plot_hr,
    CompositionAxis,
    CompositionView,
    HrDiagram,
    PlotConfig,
    NO_HIGHLIGHT,
};

pub use export::{
    export_composition_csv,
    export_hr_snapshots_csv,
    export_hr_track_csv,
    CsvConfig,
    CsvExporter,
    Exporter,
};
