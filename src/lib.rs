//! mesa-rs: helpers for MESA stellar-evolution output
//!
//! Reads the `LOGS` directory written by a MESA run, renders its two standard
//! views and computes binary-orbit geometry.
//!
//! # Architecture
//!
//! mesa-rs is built on two layers:
//!
//! 1. **Data**
//!    - Loaders for `history.data`, `profile<N>.data` and `profiles.index`
//!    - A join from profile number to the history rows of that snapshot
//!
//! 2. **Output**
//!    - View types built from the tables (`HrDiagram`, `CompositionView`)
//!    - Rendering on any plotters drawing area, PNG/SVG files, CSV export
//!
//! The binary-orbit calculator in [`physics`] is independent of both.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mesa_rs::prelude::*;
//!
//! # fn main() -> mesa_rs::Result<()> {
//! // 1. Read the run
//! let history = load_history_file("LOGS")?;
//! let index = get_index("LOGS")?;
//! println!("{} steps, {} snapshots", history.len(), index.len());
//!
//! // 2. Plot the HR diagram with snapshot 3 highlighted
//! plot_hr("LOGS", 3, "hr.png", None)?;
//!
//! // 3. Plot the composition of the second snapshot against mass
//! plot_composition("LOGS", 2, CompositionAxis::Mass, "composition.png", None)?;
//!
//! // 4. Binary orbit
//! let (a, r_l) = calculate_semi_major_axis_and_roche_lobe(1.0, 0.5, 10.0)?;
//! println!("a = {:.1} Rsun, R_L = {:.1} Rsun", a, r_l);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`data`]: `LOGS` readers
//! - [`output`]: Visualization and CSV export
//! - [`physics`]: Constants and binary orbits
//! - [`error`]: Error type shared by the whole crate
//!
//! # Features
//!
//! - `parallel`: read profile files concurrently with rayon

pub mod error;

pub mod data;
pub mod physics;

pub mod output;

pub use error::{MesaError, Result};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use mesa_rs::prelude::*;
    //! ```
    pub use crate::data::{get_history,
                          get_index,
                          get_profiles,
                          load_history_file,
                          load_profile,
                          History,
                          Profile,
                          ProfileIndex,
                          Table};
    pub use crate::error::{MesaError, Result};
    pub use crate::output::{plot_composition,
                            plot_hr,
                            CompositionAxis,
                            CompositionView,
                            HrDiagram,
                            PlotConfig,
                            NO_HIGHLIGHT};
    pub use crate::physics::{calculate_semi_major_axis_and_roche_lobe, BinaryOrbit};
}
