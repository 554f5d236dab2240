//! Properties of the binary-orbit calculator

use approx::assert_relative_eq;

use mesa_rs::physics::{
    calculate_semi_major_axis_and_roche_lobe, eggleton_roche_lobe_fraction, BinaryOrbit,
};
use mesa_rs::MesaError;

#[test]
fn test_equal_masses_one_year() {
    let (a, r_l) = calculate_semi_major_axis_and_roche_lobe(1.0, 1.0, 365.25).unwrap();

    // Two solar masses in total: 2^(1/3) AU
    assert_relative_eq!(a, 270.92, epsilon = 0.05);
    assert_relative_eq!(r_l / a, 0.3789, epsilon = 1e-4);
}

#[test]
fn test_massless_companion_one_au() {
    let (a, _) = calculate_semi_major_axis_and_roche_lobe(1.0, 1e-12, 365.25).unwrap();
    assert_relative_eq!(a, 215.03, epsilon = 0.05);
}

#[test]
fn test_separation_scales_with_period() {
    // a ∝ P^(2/3)
    let (a1, _) = calculate_semi_major_axis_and_roche_lobe(1.2, 0.8, 10.0).unwrap();
    let (a8, _) = calculate_semi_major_axis_and_roche_lobe(1.2, 0.8, 80.0).unwrap();
    assert_relative_eq!(a8 / a1, 4.0, max_relative = 1e-12);
}

#[test]
fn test_roche_lobe_shrinks_as_companion_grows() {
    let ratios = [0.1, 0.3, 0.5, 1.0, 2.0, 5.0];
    let lobes: Vec<f64> = ratios
        .iter()
        .map(|&q| calculate_semi_major_axis_and_roche_lobe(1.0, q, 3.0).unwrap().1)
        .collect();

    for pair in lobes.windows(2) {
        assert!(pair[1] < pair[0], "{:?}", lobes);
    }
}

#[test]
fn test_roche_fraction_bounds() {
    for q in [1e-3, 0.1, 1.0, 10.0, 1e3] {
        let f = eggleton_roche_lobe_fraction(q);
        assert!(f > 0.0 && f < 1.0);
    }
}

#[test]
fn test_orbit_matches_tuple_form() {
    let orbit = BinaryOrbit::solve(8.0, 0.25, 100.0).unwrap();
    let (a, r_l) = calculate_semi_major_axis_and_roche_lobe(8.0, 0.25, 100.0).unwrap();

    assert_eq!(orbit.semi_major_axis, a);
    assert_eq!(orbit.roche_lobe_radius, r_l);
    assert_relative_eq!(orbit.secondary_mass, 2.0);
}

#[test]
fn test_invalid_period() {
    let err = calculate_semi_major_axis_and_roche_lobe(1.0, 1.0, 0.0).unwrap_err();
    assert!(matches!(err, MesaError::InvalidInput { .. }));
}
