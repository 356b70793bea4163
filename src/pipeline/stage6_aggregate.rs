use crate::model::scores::{
    CategoryScores, RawMetrics, SessionScoreRecord, SessionStatus, SwingScoreRecord, to_scale,
};
use crate::pipeline::stage5_scores::assemble_record;

/// Averages scored swings into one session record. Every numeric field,
/// composite included, is averaged on its own; grade, consistency grade and
/// weakest link are then derived again from the averaged numbers. `None` for
/// an empty slice.
///
/// The consistency CV is averaged over the swings that had samples only.
pub fn run_stage6(swings: &[SwingScoreRecord]) -> Option<SessionScoreRecord> {
    if swings.is_empty() {
        return None;
    }

    let avg_score = |f: fn(&CategoryScores) -> i32| -> i32 {
        to_scale(running_mean(swings.iter().map(|s| f(&s.categories) as f64)))
    };
    let categories = CategoryScores {
        brain: avg_score(|c| c.brain),
        body: avg_score(|c| c.body),
        bat: avg_score(|c| c.bat),
        ball: avg_score(|c| c.ball),
        ground_flow: avg_score(|c| c.ground_flow),
        core_flow: avg_score(|c| c.core_flow),
        upper_flow: avg_score(|c| c.upper_flow),
    };

    let avg = |f: fn(&RawMetrics) -> f64| -> f64 {
        running_mean(swings.iter().map(|s| f(&s.metrics)))
    };
    let metrics = RawMetrics {
        pelvis_velocity: avg(|m| m.pelvis_velocity),
        torso_velocity: avg(|m| m.torso_velocity),
        x_factor: avg(|m| m.x_factor),
        stretch_rate: avg(|m| m.stretch_rate),
        bat_ke: avg(|m| m.bat_ke),
        total_ke: avg(|m| m.total_ke),
        legs_ke: avg(|m| m.legs_ke),
        transfer_efficiency: avg(|m| m.transfer_efficiency),
        consistency_cv: mean_present(swings.iter().map(|s| s.metrics.consistency_cv)),
        pelvis_momentum: avg(|m| m.pelvis_momentum),
        torso_momentum: avg(|m| m.torso_momentum),
        arms_momentum: avg(|m| m.arms_momentum),
        torso_pelvis_ratio: avg(|m| m.torso_pelvis_ratio),
        arms_torso_ratio: avg(|m| m.arms_torso_ratio),
    };

    let composite = to_scale(running_mean(
        swings.iter().map(|s| s.record.composite_score as f64),
    ));

    let window_confidence = swings.iter().map(|s| s.window.confidence).min();

    tracing::info!(swings = swings.len(), "aggregated swing scores");

    Some(SessionScoreRecord {
        record: assemble_record(&categories, composite, &metrics),
        swings_scored: swings.len(),
        status: SessionStatus::Scored,
        window_confidence,
    })
}

/// Mean of the `Some` values; `None` when there are none.
pub fn mean_present(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let present: Vec<f64> = values.flatten().collect();
    if present.is_empty() {
        None
    } else {
        Some(running_mean(present.into_iter()))
    }
}

/// Incremental mean; exact when every value is identical.
pub fn running_mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut mean = 0.0;
    for (i, v) in values.enumerate() {
        mean += (v - mean) / (i + 1) as f64;
    }
    mean
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_aggregate.rs"]
mod tests;
