use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUNDLED_PROFILE: &str = include_str!("../../config/thresholds.json");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read threshold profile {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid threshold profile JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing threshold for metric `{0}`")]
    MissingMetric(&'static str),
    #[error("invalid threshold for metric `{metric}`: min={min}, max={max}")]
    InvalidRange {
        metric: &'static str,
        min: f64,
        max: f64,
    },
    #[error("invalid {name}: {value} (expected {expected})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// Linear min–max mapping of one raw metric onto the 20–80 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricThreshold {
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub invert: bool,
}

impl MetricThreshold {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            invert: false,
        }
    }

    pub fn inverted(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            invert: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    PelvisVelocity,
    TorsoVelocity,
    XFactor,
    StretchRate,
    LegsEnergy,
    BatEnergy,
    TransferEfficiency,
    ConsistencyCv,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::PelvisVelocity,
        Metric::TorsoVelocity,
        Metric::XFactor,
        Metric::StretchRate,
        Metric::LegsEnergy,
        Metric::BatEnergy,
        Metric::TransferEfficiency,
        Metric::ConsistencyCv,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::PelvisVelocity => "pelvis_velocity",
            Metric::TorsoVelocity => "torso_velocity",
            Metric::XFactor => "x_factor",
            Metric::StretchRate => "stretch_rate",
            Metric::LegsEnergy => "legs_ke",
            Metric::BatEnergy => "bat_ke",
            Metric::TransferEfficiency => "transfer_efficiency",
            Metric::ConsistencyCv => "consistency_cv",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricThresholds {
    pub pelvis_velocity: MetricThreshold,
    pub torso_velocity: MetricThreshold,
    pub x_factor: MetricThreshold,
    pub stretch_rate: MetricThreshold,
    pub legs_ke: MetricThreshold,
    pub bat_ke: MetricThreshold,
    pub transfer_efficiency: MetricThreshold,
    pub consistency_cv: MetricThreshold,
}

impl MetricThresholds {
    pub fn get(&self, metric: Metric) -> &MetricThreshold {
        match metric {
            Metric::PelvisVelocity => &self.pelvis_velocity,
            Metric::TorsoVelocity => &self.torso_velocity,
            Metric::XFactor => &self.x_factor,
            Metric::StretchRate => &self.stretch_rate,
            Metric::LegsEnergy => &self.legs_ke,
            Metric::BatEnergy => &self.bat_ke,
            Metric::TransferEfficiency => &self.transfer_efficiency,
            Metric::ConsistencyCv => &self.consistency_cv,
        }
    }
}

/// Fixed-ratio fallback and early-peak guard used by the window cascade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub contact_ratio: f64,
    pub stride_ratio: f64,
    pub early_peak_guard: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            contact_ratio: 0.80,
            stride_ratio: 0.25,
            early_peak_guard: 0.20,
        }
    }
}

/// Signal-conditioning limits. These are algorithm constants, not calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalLimits {
    pub fallback_fps: f64,
    pub radian_peak_threshold: f64,
    pub joint_velocity_ceiling: f64,
    pub stretch_rate_ceiling: f64,
    pub consistency_floor: f64,
    pub ratio_epsilon: f64,
    pub min_swing_frames: usize,
}

impl Default for SignalLimits {
    fn default() -> Self {
        Self {
            fallback_fps: 240.0,
            radian_peak_threshold: 8.0,
            joint_velocity_ceiling: 3000.0,
            stretch_rate_ceiling: 5000.0,
            consistency_floor: 10.0,
            ratio_epsilon: 0.01,
            min_swing_frames: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdProfile {
    #[serde(default = "default_profile_name")]
    pub name: String,
    pub metrics: MetricThresholds,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub limits: SignalLimits,
}

fn default_profile_name() -> String {
    "custom".to_string()
}

impl ThresholdProfile {
    pub fn builder() -> ThresholdProfileBuilder {
        ThresholdProfileBuilder::default()
    }

    /// Profile shipped in `config/thresholds.json`.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_json(BUNDLED_PROFILE)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let profile: ThresholdProfile = serde_json::from_str(text)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let profile = Self::from_json(&text)?;
        tracing::info!(
            path = %path.display(),
            profile = %profile.name,
            "loaded threshold profile"
        );
        Ok(profile)
    }

    pub fn threshold(&self, metric: Metric) -> &MetricThreshold {
        self.metrics.get(metric)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for metric in Metric::ALL {
            validate_threshold(metric, self.metrics.get(metric))?;
        }
        validate_unit_ratio("window.contact_ratio", self.window.contact_ratio)?;
        validate_unit_ratio("window.stride_ratio", self.window.stride_ratio)?;
        validate_unit_ratio("window.early_peak_guard", self.window.early_peak_guard)?;
        if !(self.limits.fallback_fps > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "limits.fallback_fps",
                value: self.limits.fallback_fps,
                expected: "> 0",
            });
        }
        if self.limits.min_swing_frames < 2 {
            return Err(ConfigError::InvalidParameter {
                name: "limits.min_swing_frames",
                value: self.limits.min_swing_frames as f64,
                expected: ">= 2",
            });
        }
        Ok(())
    }
}

fn validate_threshold(metric: Metric, t: &MetricThreshold) -> Result<(), ConfigError> {
    if !t.min.is_finite() || !t.max.is_finite() || t.max <= t.min {
        return Err(ConfigError::InvalidRange {
            metric: metric.name(),
            min: t.min,
            max: t.max,
        });
    }
    Ok(())
}

fn validate_unit_ratio(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value,
            expected: "in (0, 1)",
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ThresholdProfileBuilder {
    name: Option<String>,
    metrics: [Option<MetricThreshold>; 8],
    window: WindowConfig,
    limits: SignalLimits,
}

impl ThresholdProfileBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn metric(mut self, metric: Metric, threshold: MetricThreshold) -> Self {
        self.metrics[metric.index()] = Some(threshold);
        self
    }

    pub fn window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    pub fn limits(mut self, limits: SignalLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn build(self) -> Result<ThresholdProfile, ConfigError> {
        let take = |metric: Metric| {
            self.metrics[metric.index()].ok_or(ConfigError::MissingMetric(metric.name()))
        };
        let metrics = MetricThresholds {
            pelvis_velocity: take(Metric::PelvisVelocity)?,
            torso_velocity: take(Metric::TorsoVelocity)?,
            x_factor: take(Metric::XFactor)?,
            stretch_rate: take(Metric::StretchRate)?,
            legs_ke: take(Metric::LegsEnergy)?,
            bat_ke: take(Metric::BatEnergy)?,
            transfer_efficiency: take(Metric::TransferEfficiency)?,
            consistency_cv: take(Metric::ConsistencyCv)?,
        };
        let profile = ThresholdProfile {
            name: self.name.unwrap_or_else(default_profile_name),
            metrics,
            window: self.window,
            limits: self.limits,
        };
        profile.validate()?;
        Ok(profile)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/thresholds.rs"]
mod tests;
