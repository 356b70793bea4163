use crate::input::columns::{
    ARMS_MOMENTUM, BAT_KE, LEFT_LEG_KE, LEGS_KE, PELVIS_MOMENTUM, RIGHT_LEG_KE, SignalDef,
    TORSO_MOMENTUM, TOTAL_KE,
};
use crate::input::table::MetricTable;
use crate::model::thresholds::SignalLimits;
use crate::model::window::SwingWindow;
use crate::pipeline::stage3_kinematics::peak_in_window;

#[derive(Debug, Clone, Copy)]
pub struct Stage4Inputs<'a> {
    pub energy: &'a MetricTable,
    pub window: SwingWindow,
    pub limits: &'a SignalLimits,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stage4Output {
    pub bat_ke: f64,
    pub total_ke: f64,
    pub legs_ke: f64,
    pub pelvis_momentum: f64,
    pub torso_momentum: f64,
    pub arms_momentum: f64,
    pub transfer_efficiency: f64,
    pub torso_pelvis_ratio: f64,
    pub arms_torso_ratio: f64,
    /// A bat energy column resolved and peaked above the ratio guard.
    pub has_bat_energy: bool,
    pub missing: Vec<&'static str>,
}

pub fn run_stage4(inputs: &Stage4Inputs<'_>) -> Stage4Output {
    let mut missing = Vec::new();
    let window = inputs.window;
    let eps = inputs.limits.ratio_epsilon;

    let mut peak = |signal: &SignalDef| -> Option<f64> {
        match inputs.energy.resolve(signal) {
            Some(values) => Some(peak_in_window(values, window)),
            None => {
                missing.push(signal.id);
                None
            }
        }
    };

    let bat = peak(&BAT_KE);
    let total = peak(&TOTAL_KE).unwrap_or(0.0);
    let pelvis_momentum = peak(&PELVIS_MOMENTUM).unwrap_or(0.0);
    let torso_momentum = peak(&TORSO_MOMENTUM).unwrap_or(0.0);
    let arms_momentum = peak(&ARMS_MOMENTUM).unwrap_or(0.0);
    let legs_ke = legs_peak(inputs.energy, window, &mut missing);

    let bat_ke = bat.unwrap_or(0.0);
    Stage4Output {
        bat_ke,
        total_ke: total,
        legs_ke,
        pelvis_momentum,
        torso_momentum,
        arms_momentum,
        transfer_efficiency: guarded_ratio(bat_ke, total, eps) * 100.0,
        torso_pelvis_ratio: guarded_ratio(torso_momentum, pelvis_momentum, eps),
        arms_torso_ratio: guarded_ratio(arms_momentum, torso_momentum, eps),
        has_bat_energy: bat.is_some_and(|v| v > eps),
        missing,
    }
}

/// Combined legs column when present, else the left + right leg sum.
fn legs_peak(energy: &MetricTable, window: SwingWindow, missing: &mut Vec<&'static str>) -> f64 {
    if let Some(values) = energy.resolve(&LEGS_KE) {
        return peak_in_window(values, window);
    }
    match (energy.resolve(&LEFT_LEG_KE), energy.resolve(&RIGHT_LEG_KE)) {
        (Some(left), Some(right)) => {
            let summed: Vec<f64> = left.iter().zip(right).map(|(l, r)| l + r).collect();
            peak_in_window(&summed, window)
        }
        (Some(one), None) | (None, Some(one)) => peak_in_window(one, window),
        (None, None) => {
            missing.push(LEGS_KE.id);
            0.0
        }
    }
}

/// `num / den`, or zero when `den` is at or below `eps`.
pub fn guarded_ratio(num: f64, den: f64, eps: f64) -> f64 {
    if den <= eps { 0.0 } else { num / den }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_energy.rs"]
mod tests;
