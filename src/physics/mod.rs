//! Closed-form astrophysics
//!
//! - [`constants`]: G, solar mass and radius, primordial helium fraction
//! - [`orbit`]: Kepler separation and Eggleton Roche lobe of a circular binary
//!
//! Nothing here touches the filesystem.

pub mod constants;
pub mod orbit;

pub use constants::PRIMORDIAL_HELIUM;
pub use orbit::{
    calculate_semi_major_axis_and_roche_lobe,
    eggleton_roche_lobe_fraction,
    kepler_semi_major_axis,
    BinaryOrbit,
};
