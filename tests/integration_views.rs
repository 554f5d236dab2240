//! Integration tests for the HR diagram and composition views on a synthetic run

mod common;

use approx::assert_relative_eq;
use std::fs;

use common::SyntheticLogs;
use mesa_rs::output::export::{export_composition_csv, export_hr_track_csv};
use mesa_rs::output::visualization::{
    plot_composition, plot_hr, CompositionAxis, CompositionView, HrDiagram, NO_HIGHLIGHT,
};
use mesa_rs::MesaError;

// =================================================================================================
// HR diagram
// =================================================================================================

#[test]
fn test_hr_track_excludes_first_model() {
    let logs = SyntheticLogs::new();
    let diagram = HrDiagram::load(logs.path(), NO_HIGHLIGHT).unwrap();

    assert_eq!(diagram.track.len(), logs.n_models - 1);
    assert_relative_eq!(diagram.track[0].log_teff, SyntheticLogs::log_teff(2), epsilon = 1e-12);
}

#[test]
fn test_hr_highlight_label_is_age_in_gyr() {
    let logs = SyntheticLogs::new();
    let diagram = HrDiagram::load(logs.path(), 3).unwrap();

    // Profile 3 sits at model 10, age 1e9 yr
    let selected = diagram.highlighted().unwrap();
    assert_eq!(selected.model_number, 10);
    assert_eq!(selected.label.as_deref(), Some("1.00 Gyr"));

    let labelled = diagram.markers.iter().filter(|m| m.label.is_some()).count();
    assert_eq!(labelled, 2);
}

#[test]
fn test_hr_unknown_profile_highlights_nothing() {
    let logs = SyntheticLogs::new();
    let diagram = HrDiagram::load(logs.path(), 99).unwrap();

    assert!(diagram.highlighted().is_none());
    assert!(diagram.markers.iter().all(|m| !m.highlighted));
    assert_eq!(diagram.markers.len(), logs.snapshots.len());
}

#[test]
fn test_hr_track_csv() {
    let logs = SyntheticLogs::new();
    let diagram = HrDiagram::load(logs.path(), NO_HIGHLIGHT).unwrap();

    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("track.csv");
    export_hr_track_csv(&diagram, &path, None).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), logs.n_models);
    assert_eq!(content.lines().next(), Some("Teff (K),L (Lsun)"));
}

// =================================================================================================
// Composition
// =================================================================================================

#[test]
fn test_composition_ordinal_is_position_not_profile_number() {
    let logs = SyntheticLogs::with_layout(10, vec![(1, 5), (4, 7), (10, 9)], 6);

    let view = CompositionView::load(logs.path(), 2, CompositionAxis::Radius).unwrap();
    assert_eq!(view.profile_number, 7);

    let err = CompositionView::load(logs.path(), 5, CompositionAxis::Radius).unwrap_err();
    assert!(matches!(
        err,
        MesaError::ProfileOrdinalOutOfRange { ordinal: 5, available: 3 }
    ));
}

#[test]
fn test_composition_reference_lines_from_first_snapshot() {
    let logs = SyntheticLogs::new();
    let view = CompositionView::load(logs.path(), 3, CompositionAxis::Mass).unwrap();

    assert_relative_eq!(view.zams_hydrogen, 0.70, epsilon = 1e-12);
    assert_relative_eq!(view.zams_helium, 0.28, epsilon = 1e-12);
    assert_relative_eq!(view.primordial_helium, 0.2463);
    assert_relative_eq!(view.hydrogen[logs.n_zones - 1], SyntheticLogs::core_hydrogen(2), epsilon = 1e-12);
}

#[test]
fn test_composition_axes_are_normalized() {
    let logs = SyntheticLogs::new();

    for axis in [CompositionAxis::Radius, CompositionAxis::Mass] {
        let view = CompositionView::load(logs.path(), 1, axis).unwrap();
        let max = view.coordinate.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        assert_eq!(view.len(), logs.n_zones);
        assert_relative_eq!(max, 1.0);
        assert!(view.coordinate.iter().all(|&c| c > 0.0 && c <= 1.0));
    }

    // Innermost zone: logR = -2, mass = 0.1
    let radius = CompositionView::load(logs.path(), 1, CompositionAxis::Radius).unwrap();
    let mass = CompositionView::load(logs.path(), 1, CompositionAxis::Mass).unwrap();
    assert_relative_eq!(radius.coordinate[logs.n_zones - 1], 0.01, epsilon = 1e-12);
    assert_relative_eq!(mass.coordinate[logs.n_zones - 1], 0.1, epsilon = 1e-12);
}

#[test]
fn test_composition_csv_header_names_axis() {
    let logs = SyntheticLogs::new();
    let view = CompositionView::load(logs.path(), 2, CompositionAxis::Mass).unwrap();

    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("composition.csv");
    export_composition_csv(&view, &path, None).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().next(), Some("m / M,X,Y"));
    assert_eq!(content.lines().count(), logs.n_zones + 1);
}

// =================================================================================================
// Rendering (needs system fonts)
// =================================================================================================

#[test]
#[ignore = "requires system fonts for text layout"]
fn test_plot_hr_png_and_svg() {
    let logs = SyntheticLogs::new();
    let out = tempfile::tempdir().unwrap();

    for name in ["hr.png", "hr.svg"] {
        let path = out.path().join(name);
        plot_hr(logs.path(), 2, &path, None).unwrap();
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }
}

#[test]
#[ignore = "requires system fonts for text layout"]
fn test_plot_composition_png() {
    let logs = SyntheticLogs::new();
    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("composition.png");

    plot_composition(logs.path(), 2, CompositionAxis::Radius, &path, None).unwrap();
    assert!(path.exists());
}
