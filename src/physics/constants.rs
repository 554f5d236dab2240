//! Physical constants and solar units
//!
//! SI values (CODATA 2018 for G, IAU 2015 nominal values for the Sun), with
//! `uom` conversions between solar units and SI quantities.

use uom::si::f64::{Length, Mass};
use uom::si::length::meter;
use uom::si::mass::kilogram;

/// Newtonian gravitational constant [m³ kg⁻¹ s⁻²]
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;

/// Solar mass [kg]
pub const SOLAR_MASS_KG: f64 = 1.988_409_870_698_051e30;

/// Nominal solar radius [m]
pub const SOLAR_RADIUS_M: f64 = 6.957e8;

/// Primordial (Big Bang nucleosynthesis) helium mass fraction $Y_p$
pub const PRIMORDIAL_HELIUM: f64 = 0.2463;

/// Mass from a value in solar masses
pub fn solar_masses(value: f64) -> Mass {
    Mass::new::<kilogram>(value * SOLAR_MASS_KG)
}

/// Length from a value in solar radii
pub fn solar_radii(value: f64) -> Length {
    Length::new::<meter>(value * SOLAR_RADIUS_M)
}

/// Length expressed in solar radii
pub fn in_solar_radii(length: Length) -> f64 {
    length.get::<meter>() / SOLAR_RADIUS_M
}
