use crate::model::grades::{consistency_grade_for, grade_for};
use crate::model::scores::{
    CategoryScores, RawMetrics, SCORE_MAX, SCORE_MIN, SCORE_NEUTRAL, ScoreRecord, round1,
    round2, to_scale,
};
use crate::model::thresholds::{Metric, MetricThreshold, ThresholdProfile};

const BAT_FALLBACK_FACTOR: f64 = 0.9;
const BALL_FALLBACK_FACTOR: f64 = 0.85;

#[derive(Debug, Clone, Copy)]
pub struct Stage5Inputs<'a> {
    /// Brain is neutral when `metrics.consistency_cv` is `None`.
    pub metrics: &'a RawMetrics,
    pub has_bat_energy: bool,
    pub thresholds: &'a ThresholdProfile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stage5Output {
    pub categories: CategoryScores,
    pub record: ScoreRecord,
}

/// Maps `value` onto 20–80 by linear min–max with clamping. NaN maps to 20
/// and a degenerate range (`max <= min`) to 50.
pub fn normalize(value: f64, t: &MetricThreshold) -> f64 {
    if value.is_nan() {
        return SCORE_MIN as f64;
    }
    if !(t.max > t.min) {
        return SCORE_NEUTRAL as f64;
    }
    let mut frac = ((value - t.min) / (t.max - t.min)).clamp(0.0, 1.0);
    if t.invert {
        frac = 1.0 - frac;
    }
    SCORE_MIN as f64 + (SCORE_MAX - SCORE_MIN) as f64 * frac
}

/// Integer metric score as reported per metric.
pub fn metric_score(value: f64, t: &MetricThreshold) -> i32 {
    to_scale(normalize(value, t))
}

pub fn run_stage5(inputs: &Stage5Inputs<'_>) -> Stage5Output {
    let m = inputs.metrics;
    let score = |metric: Metric, value: f64| -> f64 {
        metric_score(value, inputs.thresholds.threshold(metric)) as f64
    };

    let pelvis = score(Metric::PelvisVelocity, m.pelvis_velocity);
    let legs = score(Metric::LegsEnergy, m.legs_ke);
    let torso = score(Metric::TorsoVelocity, m.torso_velocity);
    let x_factor = score(Metric::XFactor, m.x_factor);
    let stretch = score(Metric::StretchRate, m.stretch_rate);
    let bat_energy = score(Metric::BatEnergy, m.bat_ke);
    let transfer = score(Metric::TransferEfficiency, m.transfer_efficiency);

    let ground_flow = (pelvis + legs) / 2.0;
    let core_flow = (torso + x_factor + stretch) / 3.0;
    let body = 0.4 * ground_flow + 0.6 * core_flow;

    let (upper_flow, bat, ball) = if inputs.has_bat_energy {
        let upper = (bat_energy + transfer) / 2.0;
        (upper, upper, transfer)
    } else {
        let bat = BAT_FALLBACK_FACTOR * (body + core_flow) / 2.0;
        (bat, bat, BALL_FALLBACK_FACTOR * to_scale(bat) as f64)
    };

    let brain = match m.consistency_cv {
        Some(cv) => score(Metric::ConsistencyCv, cv),
        None => SCORE_NEUTRAL as f64,
    };

    let categories = CategoryScores {
        brain: to_scale(brain),
        body: to_scale(body),
        bat: to_scale(bat),
        ball: to_scale(ball),
        ground_flow: to_scale(ground_flow),
        core_flow: to_scale(core_flow),
        upper_flow: to_scale(upper_flow),
    };
    let record = build_record(&categories, m);
    Stage5Output { categories, record }
}

/// Assembles a swing record. Composite, grades and weakest link are derived
/// here from the category numbers.
pub fn build_record(categories: &CategoryScores, m: &RawMetrics) -> ScoreRecord {
    assemble_record(categories, categories.composite(), m)
}

/// Record with a caller-supplied composite; the grade follows the composite.
pub fn assemble_record(
    categories: &CategoryScores,
    composite: i32,
    m: &RawMetrics,
) -> ScoreRecord {
    ScoreRecord {
        brain_score: categories.brain,
        body_score: categories.body,
        bat_score: categories.bat,
        ball_score: categories.ball,
        composite_score: composite,
        grade: grade_for(composite),
        ground_flow_score: categories.ground_flow,
        core_flow_score: categories.core_flow,
        upper_flow_score: categories.upper_flow,
        weakest_link: categories.weakest_link(),
        pelvis_velocity: m.pelvis_velocity.round() as i32,
        torso_velocity: m.torso_velocity.round() as i32,
        x_factor: round1(m.x_factor),
        stretch_rate: round1(m.stretch_rate),
        bat_ke: round1(m.bat_ke),
        total_ke: round1(m.total_ke),
        legs_ke: round1(m.legs_ke),
        transfer_efficiency: round1(m.transfer_efficiency),
        consistency_cv: m.consistency_cv.map(round1),
        consistency_grade: consistency_grade_for(categories.brain),
        pelvis_momentum: round2(m.pelvis_momentum),
        torso_momentum: round2(m.torso_momentum),
        arms_momentum: round2(m.arms_momentum),
        torso_pelvis_ratio: round2(m.torso_pelvis_ratio),
        arms_torso_ratio: round2(m.arms_torso_ratio),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_scores.rs"]
mod tests;
