//! Binary orbit geometry
//!
//! Closed-form separation and Roche-lobe size of a circular binary:
//!
//! - Kepler's third law: $a^3 = G (M_1 + M_2) P^2 / 4\pi^2$
//! - Eggleton (1983): with $q = M_1 / M_2$,
//!   $$\frac{R_L}{a} = \frac{0.49\, q^{2/3}}{0.6\, q^{2/3} + \ln(1 + q^{1/3})}$$
//!
//! The Roche lobe computed here is the primary's. For a fixed primary mass and
//! period it shrinks as the secondary grows: the separation only scales as
//! $(1 + M_2/M_1)^{1/3}$ while $R_L / a$ falls faster.

use std::f64::consts::PI;

use uom::si::f64::{Length, Mass, Time};
use uom::si::length::meter;
use uom::si::mass::kilogram;
use uom::si::time::{day, second};

use super::constants::{in_solar_radii, solar_masses, GRAVITATIONAL_CONSTANT};
use crate::error::{MesaError, Result};

/// Geometry of a circular binary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryOrbit {
    /// Primary mass [M☉]
    pub primary_mass: f64,

    /// Secondary mass [M☉]
    pub secondary_mass: f64,

    /// Orbital period [days]
    pub period_days: f64,

    /// Separation [R☉]
    pub semi_major_axis: f64,

    /// Roche-lobe radius of the primary [R☉]
    pub roche_lobe_radius: f64,
}

impl BinaryOrbit {
    /// Solve the orbit of a primary of `m1_mass` M☉ with companion `mass_ratio · m1_mass`
    ///
    /// # Errors
    ///
    /// [`MesaError::InvalidInput`] if any input is non-positive or non-finite.
    pub fn solve(m1_mass: f64, mass_ratio: f64, orbital_period_days: f64) -> Result<Self> {
        check_positive("primary mass", m1_mass)?;
        check_positive("mass ratio", mass_ratio)?;
        check_positive("orbital period", orbital_period_days)?;

        let secondary_mass = mass_ratio * m1_mass;
        let total_mass = solar_masses(m1_mass + secondary_mass);
        let period = Time::new::<day>(orbital_period_days);

        let separation = in_solar_radii(kepler_semi_major_axis(total_mass, period));
        let roche_lobe = separation * eggleton_roche_lobe_fraction(1.0 / mass_ratio);

        log::debug!(
            "Binary {} + {} Msun, P = {} d: a = {:.3} Rsun, R_L = {:.3} Rsun",
            m1_mass,
            secondary_mass,
            orbital_period_days,
            separation,
            roche_lobe
        );

        Ok(Self {
            primary_mass: m1_mass,
            secondary_mass,
            period_days: orbital_period_days,
            semi_major_axis: separation,
            roche_lobe_radius: roche_lobe,
        })
    }

    /// $R_L / a$
    pub fn filling_fraction(&self) -> f64 {
        self.roche_lobe_radius / self.semi_major_axis
    }
}

/// Semi-major axis and primary Roche-lobe radius, both in solar radii
///
/// # Arguments
///
/// * `m1_mass` - Primary mass [M☉], > 0
/// * `mass_ratio` - $M_2 / M_1$, > 0
/// * `orbital_period_days` - Orbital period [days], > 0
///
/// # Errors
///
/// [`MesaError::InvalidInput`] for non-positive or non-finite inputs.
///
/// # Example
///
/// ```rust
/// use mesa_rs::physics::calculate_semi_major_axis_and_roche_lobe;
///
/// let (a, r_l) = calculate_semi_major_axis_and_roche_lobe(1.0, 1.0, 365.25).unwrap();
/// assert!((r_l / a - 0.3789).abs() < 1e-3);
/// ```
pub fn calculate_semi_major_axis_and_roche_lobe(
    m1_mass: f64,
    mass_ratio: f64,
    orbital_period_days: f64,
) -> Result<(f64, f64)> {
    let orbit = BinaryOrbit::solve(m1_mass, mass_ratio, orbital_period_days)?;
    Ok((orbit.semi_major_axis, orbit.roche_lobe_radius))
}

/// Kepler's third law: separation of a binary of `total_mass` and `period`
pub fn kepler_semi_major_axis(total_mass: Mass, period: Time) -> Length {
    let gm = GRAVITATIONAL_CONSTANT * total_mass.get::<kilogram>();
    let p = period.get::<second>();

    Length::new::<meter>((gm * p * p / (4.0 * PI * PI)).cbrt())
}

/// Eggleton (1983) Roche-lobe radius in units of the separation
///
/// `q` is the mass of the star whose lobe is computed over its companion's mass.
/// Accurate to about 1% over the whole range of `q`.
pub fn eggleton_roche_lobe_fraction(q: f64) -> f64 {
    let q_two_thirds = q.powf(2.0 / 3.0);
    0.49 * q_two_thirds / (0.6 * q_two_thirds + (1.0 + q.cbrt()).ln())
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MesaError::invalid_input(format!(
            "{} must be positive and finite, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equal_mass_fraction() {
        // 0.49 / (0.6 + ln 2)
        assert_relative_eq!(eggleton_roche_lobe_fraction(1.0), 0.378_920_5, epsilon = 1e-6);
    }

    #[test]
    fn test_sun_earth_separation() {
        let a = kepler_semi_major_axis(solar_masses(1.0), Time::new::<day>(365.25));
        assert_relative_eq!(in_solar_radii(a), 215.03, epsilon = 0.1);
    }

    #[test]
    fn test_negligible_companion_is_one_au() {
        let (a, _) = calculate_semi_major_axis_and_roche_lobe(1.0, 1e-9, 365.25).unwrap();
        assert_relative_eq!(a, 215.03, epsilon = 0.1);
    }

    #[test]
    fn test_solve_keeps_component_masses() {
        let orbit = BinaryOrbit::solve(1.4, 0.5, 10.0).unwrap();
        assert_relative_eq!(orbit.secondary_mass, 0.7);
        assert_relative_eq!(
            orbit.filling_fraction(),
            eggleton_roche_lobe_fraction(2.0),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        for (m1, q, p) in [
            (0.0, 1.0, 1.0),
            (-1.0, 1.0, 1.0),
            (1.0, 0.0, 1.0),
            (1.0, 1.0, -5.0),
            (f64::NAN, 1.0, 1.0),
            (1.0, f64::INFINITY, 1.0),
        ] {
            let err = calculate_semi_major_axis_and_roche_lobe(m1, q, p).unwrap_err();
            assert!(matches!(err, MesaError::InvalidInput { .. }));
        }
    }
}
