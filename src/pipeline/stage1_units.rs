use std::f64::consts::PI;

use crate::input::columns::{TIMESTAMP, is_angle_column};
use crate::input::table::MetricTable;
use crate::model::thresholds::SignalLimits;

pub const RAD_TO_DEG: f64 = 180.0 / PI;

#[derive(Debug, Clone, Default)]
pub struct Stage1Output {
    /// Angle columns that were rescaled from radians to degrees.
    pub converted: Vec<String>,
}

/// Converts radian angle columns to degrees in place.
pub fn run_stage1(kinematics: &mut MetricTable, limits: &SignalLimits) -> Stage1Output {
    let mut converted = Vec::new();
    kinematics.map_columns(
        |header, _| is_angle_column(header),
        |header, values| {
            if convert_if_radians(values, limits.radian_peak_threshold) {
                converted.push(header.to_string());
            }
        },
    );
    if !converted.is_empty() {
        tracing::info!(columns = ?converted, "angle columns converted from radians to degrees");
    }
    Stage1Output { converted }
}

/// Scales `values` by 180/π when their peak magnitude is below `threshold`.
pub fn convert_if_radians(values: &mut [f64], threshold: f64) -> bool {
    let peak = peak_abs(values);
    if peak >= threshold {
        return false;
    }
    for v in values.iter_mut() {
        *v *= RAD_TO_DEG;
    }
    true
}

/// Sampling rate from the first two timestamps, else `limits.fallback_fps`.
pub fn detect_fps(table: &MetricTable, limits: &SignalLimits) -> f64 {
    let Some(times) = table.resolve(&TIMESTAMP) else {
        return limits.fallback_fps;
    };
    if times.len() < 2 {
        return limits.fallback_fps;
    }
    let dt = times[1] - times[0];
    if dt <= 0.0 || dt >= 1.0 || !dt.is_finite() {
        tracing::debug!(dt, "implausible frame interval; using fallback fps");
        return limits.fallback_fps;
    }
    1.0 / dt
}

pub fn peak_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_units.rs"]
mod tests;
