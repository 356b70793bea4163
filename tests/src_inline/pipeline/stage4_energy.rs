use super::*;
use crate::model::window::Confidence;

fn window(stride: usize, contact: usize) -> SwingWindow {
    SwingWindow {
        stride_frame: stride,
        contact_frame: contact,
        confidence: Confidence::High,
    }
}

#[test]
fn test_guarded_ratio() {
    assert_eq!(guarded_ratio(10.0, 4.0, 0.01), 2.5);
    assert_eq!(guarded_ratio(10.0, 0.01, 0.01), 0.0);
    assert_eq!(guarded_ratio(10.0, 0.0, 0.01), 0.0);
}

#[test]
fn test_stage4_peaks_and_ratios() {
    let energy = MetricTable::from_columns(vec![
        ("bat_ke", vec![0.0, 50.0, 150.0, 900.0]),
        ("total_ke", vec![100.0, 400.0, 600.0, 2000.0]),
        ("legs_ke", vec![10.0, 80.0, 40.0, 0.0]),
        ("lowertorso_angular_momentum_z", vec![1.0, -4.0, 2.0, 0.0]),
        ("torso_angular_momentum_z", vec![2.0, 6.0, 3.0, 0.0]),
        ("arms_angular_momentum_z", vec![1.0, 3.0, 9.0, 0.0]),
    ]);
    let limits = SignalLimits::default();
    let out = run_stage4(&Stage4Inputs {
        energy: &energy,
        window: window(0, 2),
        limits: &limits,
    });
    assert_eq!(out.bat_ke, 150.0);
    assert_eq!(out.total_ke, 600.0);
    assert_eq!(out.legs_ke, 80.0);
    assert!((out.transfer_efficiency - 25.0).abs() < 1e-9);
    assert_eq!(out.pelvis_momentum, 4.0);
    assert!((out.torso_pelvis_ratio - 1.5).abs() < 1e-9);
    assert!((out.arms_torso_ratio - 1.5).abs() < 1e-9);
    assert!(out.has_bat_energy);
    assert!(out.missing.is_empty());
}

#[test]
fn test_legs_summed_from_sides() {
    let energy = MetricTable::from_columns(vec![
        ("lleg_ke", vec![10.0, 30.0, 5.0]),
        ("rleg_ke", vec![10.0, 40.0, 50.0]),
    ]);
    let limits = SignalLimits::default();
    let out = run_stage4(&Stage4Inputs {
        energy: &energy,
        window: window(0, 2),
        limits: &limits,
    });
    assert_eq!(out.legs_ke, 70.0);
    assert!(!out.missing.contains(&"legs_kinetic_energy"));
}

#[test]
fn test_missing_energy_columns_are_zero() {
    let energy = MetricTable::default();
    let limits = SignalLimits::default();
    let out = run_stage4(&Stage4Inputs {
        energy: &energy,
        window: window(0, 2),
        limits: &limits,
    });
    assert_eq!(out.bat_ke, 0.0);
    assert_eq!(out.transfer_efficiency, 0.0);
    assert_eq!(out.torso_pelvis_ratio, 0.0);
    assert!(!out.has_bat_energy);
    assert!(out.missing.contains(&"bat_kinetic_energy"));
    assert!(out.missing.contains(&"legs_kinetic_energy"));
}

#[test]
fn test_flat_bat_energy_is_not_usable() {
    let energy = MetricTable::from_columns(vec![
        ("bat_ke", vec![0.0, 0.0, 0.0]),
        ("total_ke", vec![5.0, 6.0, 7.0]),
    ]);
    let limits = SignalLimits::default();
    let out = run_stage4(&Stage4Inputs {
        energy: &energy,
        window: window(0, 2),
        limits: &limits,
    });
    assert!(!out.has_bat_energy);
    assert_eq!(out.transfer_efficiency, 0.0);
}
