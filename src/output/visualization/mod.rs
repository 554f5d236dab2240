//! Visualization of MESA runs
//!
//! This module renders the two standard views of a run with the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **hr**: Hertzsprung–Russell diagram with snapshot markers
//! - **composition**: Hydrogen and helium profile of one snapshot
//!
//! Each view has a data type built from the loaded tables (`HrDiagram`,
//! `CompositionView`), a `draw_*` function that renders it on any plotters
//! `DrawingArea`, and a `plot_*` function that writes a PNG or SVG file.
//!
//! # Quick Start
//!
//! ## HR diagram
//!
//! ```rust,ignore
//! use mesa_rs::output::visualization::{plot_hr, PlotConfig};
//!
//! plot_hr("LOGS", 3, "hr.png", None)?;
//!
//! let config = PlotConfig::hr_diagram("1 Msun").size(1920, 1080);
//! plot_hr("LOGS", 3, "hr.svg", Some(&config))?;
//! ```
//!
//! ## Composition
//!
//! ```rust,ignore
//! use mesa_rs::output::visualization::{plot_composition, CompositionAxis};
//!
//! plot_composition("LOGS", 2, CompositionAxis::Radius, "composition.png", None)?;
//! ```
//!
//! ## Custom drawing area
//!
//! ```rust,ignore
//! use plotters::prelude::*;
//! use mesa_rs::output::visualization::{draw_hr_diagram, draw_composition, HrDiagram, PlotConfig};
//!
//! let root = BitMapBackend::new("both.png", (2048, 768)).into_drawing_area();
//! let (left, right) = root.split_horizontally(1024);
//! draw_hr_diagram(&left, &diagram, &PlotConfig::hr_diagram(NO_TITLE))?;
//! draw_composition(&right, &view, &PlotConfig::composition(NO_TITLE))?;
//! ```

pub mod config;
pub mod hr;
pub mod composition;

pub use config::{IntoOptionalTitle, PlotConfig, LIGHT_GRAY, NO_TITLE};

pub use hr::{
    draw_hr_diagram,
    plot_hr,
    plot_hr_diagram,
    HrDiagram,
    HrPoint,
    SnapshotMarker,
    NO_HIGHLIGHT,
};

pub use composition::{
    draw_composition,
    plot_composition,
    plot_composition_view,
    CompositionAxis,
    CompositionView,
};
