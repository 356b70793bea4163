use super::*;

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_exact_match_wins_over_substring() {
    let h = headers(&["left_bat_ke_filtered", "bat_ke"]);
    assert_eq!(resolve_column(&h, &BAT_KE), Some(1));
}

#[test]
fn test_alias_order_decides_exact_matches() {
    let h = headers(&["pelvis_angular_momentum_z", "lowertorso_angular_momentum_z"]);
    assert_eq!(resolve_column(&h, &PELVIS_MOMENTUM), Some(1));
}

#[test]
fn test_substring_fallback() {
    let h = headers(&["frame", "pelvis_rot_z"]);
    assert_eq!(resolve_column(&h, &PELVIS_ROT), Some(1));
}

#[test]
fn test_short_alias_needs_exact_match() {
    let h = headers(&["state", "bat_ke"]);
    assert_eq!(resolve_column(&h, &TIMESTAMP), None);
    let h = headers(&["state", "t"]);
    assert_eq!(resolve_column(&h, &TIMESTAMP), Some(1));
}

#[test]
fn test_unresolved_signal() {
    let h = headers(&["frame", "value"]);
    assert_eq!(resolve_column(&h, &TORSO_ROT), None);
}

#[test]
fn test_angle_column_detection() {
    assert!(is_angle_column("pelvis_rot"));
    assert!(is_angle_column("torso_rotation"));
    assert!(is_angle_column("lead_knee_angle"));
    assert!(!is_angle_column("pelvis_rot_vel"));
    assert!(!is_angle_column("torso_rotation_momentum"));
    assert!(!is_angle_column("rotation_frame"));
    assert!(!is_angle_column("bat_ke"));
}
