use super::*;
use crate::model::window::Confidence;

fn window(stride: usize, contact: usize) -> SwingWindow {
    SwingWindow {
        stride_frame: stride,
        contact_frame: contact,
        confidence: Confidence::High,
    }
}

fn ramp(n: usize, step: f64) -> Vec<f64> {
    (0..n).map(|i| i as f64 * step).collect()
}

#[test]
fn test_angular_velocity_backward_difference() {
    let v = angular_velocity(&[0.0, 1.0, 3.0], 100.0, 3000.0);
    assert_eq!(v, vec![0.0, 100.0, 200.0]);
}

#[test]
fn test_angular_velocity_zeroes_artifacts() {
    let v = angular_velocity(&[0.0, 50.0, 51.0], 100.0, 3000.0);
    assert_eq!(v, vec![0.0, 0.0, 100.0]);
}

#[test]
fn test_peak_in_window_uses_magnitude() {
    let values = [900.0, -5.0, -40.0, 30.0, 1000.0];
    assert_eq!(peak_in_window(&values, window(1, 3)), 40.0);
    assert_eq!(peak_in_window(&values, window(5, 9)), 0.0);
    assert_eq!(peak_in_window(&values, window(3, 9)), 1000.0);
}

#[test]
fn test_coefficient_of_variation() {
    assert_eq!(coefficient_of_variation(&[20.0, 20.0], 10.0), Some(0.0));
    let cv = coefficient_of_variation(&[10.0, -30.0], 5.0).unwrap();
    assert!((cv - 50.0).abs() < 1e-9);
    let cv = coefficient_of_variation(&[5.0, 20.0, 30.0], 10.0).unwrap();
    assert!((cv - 20.0).abs() < 1e-9);
    assert_eq!(coefficient_of_variation(&[5.0, 20.0], 10.0), None);
}

#[test]
fn test_stage3_peaks_inside_window() {
    let kin = MetricTable::from_columns(vec![
        ("pelvis_rot", ramp(20, 1.0)),
        ("torso_rot", ramp(20, 2.0)),
    ]);
    let limits = SignalLimits::default();
    let out = run_stage3(&Stage3Inputs {
        kinematics: &kin,
        window: window(5, 15),
        fps: 100.0,
        limits: &limits,
    });
    assert!((out.pelvis_velocity - 100.0).abs() < 1e-9);
    assert!((out.torso_velocity - 200.0).abs() < 1e-9);
    assert!((out.x_factor - 15.0).abs() < 1e-9);
    assert!((out.stretch_rate - 100.0).abs() < 1e-9);
    assert_eq!(out.consistency_cv, Some(0.0));
    assert!(out.missing.is_empty());
}

#[test]
fn test_stage3_missing_torso_uses_zeros() {
    let kin = MetricTable::from_columns(vec![("pelvis_rot", ramp(20, 1.0))]);
    let limits = SignalLimits::default();
    let out = run_stage3(&Stage3Inputs {
        kinematics: &kin,
        window: window(5, 15),
        fps: 100.0,
        limits: &limits,
    });
    assert_eq!(out.missing, vec!["torso_rotation"]);
    assert_eq!(out.torso_velocity, 0.0);
    assert!((out.x_factor - 15.0).abs() < 1e-9);
    assert_eq!(out.consistency_cv, Some(0.0));
}

#[test]
fn test_stage3_without_rotation_has_no_consistency() {
    let kin = MetricTable::from_columns(vec![("time", ramp(20, 0.004))]);
    let limits = SignalLimits::default();
    let out = run_stage3(&Stage3Inputs {
        kinematics: &kin,
        window: window(5, 15),
        fps: 250.0,
        limits: &limits,
    });
    assert_eq!(out.missing, vec!["pelvis_rotation", "torso_rotation"]);
    assert_eq!(out.consistency_cv, None);
    assert_eq!(out.pelvis_velocity, 0.0);
}
