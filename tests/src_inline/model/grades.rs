use super::*;

#[test]
fn test_grade_band_edges() {
    assert_eq!(grade_for(80), Grade::Elite);
    assert_eq!(grade_for(70), Grade::Elite);
    assert_eq!(grade_for(69), Grade::Plus);
    assert_eq!(grade_for(60), Grade::Plus);
    assert_eq!(grade_for(55), Grade::AboveAverage);
    assert_eq!(grade_for(50), Grade::Average);
    assert_eq!(grade_for(45), Grade::Average);
    assert_eq!(grade_for(44), Grade::BelowAverage);
    assert_eq!(grade_for(30), Grade::Fringe);
    assert_eq!(grade_for(20), Grade::Poor);
}

#[test]
fn test_consistency_band_edges() {
    assert_eq!(consistency_grade_for(65), ConsistencyGrade::VeryConsistent);
    assert_eq!(consistency_grade_for(64), ConsistencyGrade::Consistent);
    assert_eq!(consistency_grade_for(50), ConsistencyGrade::Moderate);
    assert_eq!(consistency_grade_for(35), ConsistencyGrade::Inconsistent);
    assert_eq!(consistency_grade_for(34), ConsistencyGrade::Erratic);
}

#[test]
fn test_grade_serializes_as_label() {
    let json = serde_json::to_string(&Grade::AboveAverage).unwrap();
    assert_eq!(json, "\"Above Average\"");
    assert_eq!(Grade::AboveAverage.as_str(), "Above Average");
}
