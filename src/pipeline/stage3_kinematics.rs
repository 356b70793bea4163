use crate::input::columns::{PELVIS_ROT, SignalDef, TORSO_ROT};
use crate::input::table::MetricTable;
use crate::model::thresholds::SignalLimits;
use crate::model::window::SwingWindow;

#[derive(Debug, Clone, Copy)]
pub struct Stage3Inputs<'a> {
    pub kinematics: &'a MetricTable,
    pub window: SwingWindow,
    pub fps: f64,
    pub limits: &'a SignalLimits,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stage3Output {
    pub pelvis_velocity: f64,
    pub torso_velocity: f64,
    pub x_factor: f64,
    pub stretch_rate: f64,
    /// Mean coefficient of variation (%) of in-window rotation speeds;
    /// `None` when neither signal had enough samples above the floor.
    pub consistency_cv: Option<f64>,
    pub missing: Vec<&'static str>,
}

pub fn run_stage3(inputs: &Stage3Inputs<'_>) -> Stage3Output {
    let mut missing = Vec::new();
    let n = inputs.kinematics.n_rows();
    let pelvis = signal_or_zeros(inputs.kinematics, &PELVIS_ROT, n, &mut missing);
    let torso = signal_or_zeros(inputs.kinematics, &TORSO_ROT, n, &mut missing);

    let limits = inputs.limits;
    let pelvis_v = angular_velocity(&pelvis, inputs.fps, limits.joint_velocity_ceiling);
    let torso_v = angular_velocity(&torso, inputs.fps, limits.joint_velocity_ceiling);

    let separation: Vec<f64> = torso
        .iter()
        .zip(pelvis.iter())
        .map(|(t, p)| (t - p).abs())
        .collect();
    let stretch = angular_velocity(&separation, inputs.fps, limits.stretch_rate_ceiling);

    let window = inputs.window;
    let pelvis_samples = window_samples(&pelvis_v, window);
    let torso_samples = window_samples(&torso_v, window);
    let cvs: Vec<f64> = [pelvis_samples, torso_samples]
        .iter()
        .filter_map(|s| coefficient_of_variation(s, limits.consistency_floor))
        .collect();
    let consistency_cv = if cvs.is_empty() {
        None
    } else {
        Some(cvs.iter().sum::<f64>() / cvs.len() as f64)
    };

    Stage3Output {
        pelvis_velocity: peak_in_window(&pelvis_v, window),
        torso_velocity: peak_in_window(&torso_v, window),
        x_factor: peak_in_window(&separation, window),
        stretch_rate: peak_in_window(&stretch, window),
        consistency_cv,
        missing,
    }
}

fn signal_or_zeros(
    table: &MetricTable,
    signal: &SignalDef,
    n: usize,
    missing: &mut Vec<&'static str>,
) -> Vec<f64> {
    match table.resolve(signal) {
        Some(values) => values.to_vec(),
        None => {
            missing.push(signal.id);
            vec![0.0; n]
        }
    }
}

/// Backward difference scaled to units per second. `v[0]` is zero and
/// samples above `ceiling` are zeroed as capture artifacts.
pub fn angular_velocity(values: &[f64], fps: f64, ceiling: f64) -> Vec<f64> {
    let mut out = vec![0.0; values.len()];
    for i in 1..values.len() {
        let v = (values[i] - values[i - 1]) * fps;
        if v.is_finite() && v.abs() <= ceiling {
            out[i] = v;
        }
    }
    out
}

pub fn window_samples(values: &[f64], window: SwingWindow) -> &[f64] {
    match window.range(values.len()) {
        Some(range) => &values[range],
        None => &[],
    }
}

/// Max `|value|` inside the window.
pub fn peak_in_window(values: &[f64], window: SwingWindow) -> f64 {
    window_samples(values, window)
        .iter()
        .fold(0.0f64, |acc, v| acc.max(v.abs()))
}

/// Population CV in percent over `|samples|` above `floor`.
pub fn coefficient_of_variation(samples: &[f64], floor: f64) -> Option<f64> {
    let kept: Vec<f64> = samples
        .iter()
        .map(|v| v.abs())
        .filter(|v| *v > floor)
        .collect();
    if kept.len() < 2 {
        return None;
    }
    let n = kept.len() as f64;
    let mean = kept.iter().sum::<f64>() / n;
    let var = kept.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    Some(var.sqrt() / mean * 100.0)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_kinematics.rs"]
mod tests;
