pub mod json;
pub mod text;

use crate::model::faults::SoftFault;
use crate::model::scores::{SessionScoreRecord, SwingScoreRecord};

#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub tool_name: &'a str,
    pub tool_version: &'a str,
    pub profile_name: &'a str,
    pub kinematics_source: &'a str,
    pub energy_source: &'a str,
    pub session: &'a SessionScoreRecord,
    pub swings: &'a [SwingScoreRecord],
    pub faults: &'a [SoftFault],
    pub converted_columns: &'a [String],
}

pub fn format_f64_1(v: f64) -> String {
    format!("{:.1}", v)
}

pub fn format_f64_2(v: f64) -> String {
    format!("{:.2}", v)
}

/// `NA` for an absent value.
pub fn format_opt_f64_1(v: Option<f64>) -> String {
    v.map(format_f64_1).unwrap_or_else(|| "NA".to_string())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
