use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    Elite,
    Plus,
    #[serde(rename = "Above Average")]
    AboveAverage,
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
    Fringe,
    Poor,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::Elite => "Elite",
            Grade::Plus => "Plus",
            Grade::AboveAverage => "Above Average",
            Grade::Average => "Average",
            Grade::BelowAverage => "Below Average",
            Grade::Fringe => "Fringe",
            Grade::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsistencyGrade {
    #[serde(rename = "Very Consistent")]
    VeryConsistent,
    Consistent,
    Moderate,
    Inconsistent,
    Erratic,
}

impl ConsistencyGrade {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsistencyGrade::VeryConsistent => "Very Consistent",
            ConsistencyGrade::Consistent => "Consistent",
            ConsistencyGrade::Moderate => "Moderate",
            ConsistencyGrade::Inconsistent => "Inconsistent",
            ConsistencyGrade::Erratic => "Erratic",
        }
    }
}

const GRADE_BANDS: &[(i32, Grade)] = &[
    (70, Grade::Elite),
    (60, Grade::Plus),
    (55, Grade::AboveAverage),
    (45, Grade::Average),
    (40, Grade::BelowAverage),
    (30, Grade::Fringe),
];

const CONSISTENCY_BANDS: &[(i32, ConsistencyGrade)] = &[
    (65, ConsistencyGrade::VeryConsistent),
    (55, ConsistencyGrade::Consistent),
    (45, ConsistencyGrade::Moderate),
    (35, ConsistencyGrade::Inconsistent),
];

/// Grade for a composite score.
pub fn grade_for(score: i32) -> Grade {
    GRADE_BANDS
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|&(_, grade)| grade)
        .unwrap_or(Grade::Poor)
}

/// Consistency grade for a brain score.
pub fn consistency_grade_for(score: i32) -> ConsistencyGrade {
    CONSISTENCY_BANDS
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|&(_, grade)| grade)
        .unwrap_or(ConsistencyGrade::Erratic)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/grades.rs"]
mod tests;
