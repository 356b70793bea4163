use super::*;

#[test]
fn test_parse_capture_reads_both_payloads() {
    let tables = parse_capture(
        "time,pelvis_rot\n0,1\n0.004,2\n",
        "bat_ke,total_ke\n1,2\n3,4\n5,6\n",
    );
    assert_eq!(tables.kinematics.n_rows(), 2);
    assert_eq!(tables.energy.n_rows(), 3);
}

#[test]
fn test_coercion_faults_per_column() {
    let tables = parse_capture("a,b\nx,1\ny,z\n", "bat_ke\n1\n");
    let faults = coercion_faults(&tables.kinematics, KINEMATICS);
    assert_eq!(
        faults,
        vec![
            SoftFault::MalformedValue {
                table: KINEMATICS,
                column: "a".to_string(),
                cells: 2,
            },
            SoftFault::MalformedValue {
                table: KINEMATICS,
                column: "b".to_string(),
                cells: 1,
            },
        ]
    );
    assert!(coercion_faults(&tables.energy, ENERGY).is_empty());
}
