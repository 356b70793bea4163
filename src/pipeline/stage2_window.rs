use crate::input::columns::{BAT_KE, CONTACT_FRAME, SignalDef, TOTAL_KE};
use crate::input::table::MetricTable;
use crate::model::thresholds::WindowConfig;
use crate::model::window::{Confidence, SwingWindow};

/// What one detector found: the contact frame and how much to trust it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub contact_frame: usize,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy)]
pub struct Stage2Inputs<'a> {
    pub kinematics: &'a MetricTable,
    pub energy: &'a MetricTable,
    pub frame_count: usize,
    pub window: &'a WindowConfig,
}

/// One step of the contact-frame cascade. `None` means "no opinion".
pub trait ContactDetector: Send + Sync {
    fn name(&self) -> &'static str;
    fn detect(&self, inputs: &Stage2Inputs<'_>) -> Option<Detection>;
}

/// Reads a `contact_frame` column supplied by the capture vendor. The first
/// value that rounds to frame 1 or later wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitContactColumn;

impl ContactDetector for ExplicitContactColumn {
    fn name(&self) -> &'static str {
        "contact_frame_column"
    }

    fn detect(&self, inputs: &Stage2Inputs<'_>) -> Option<Detection> {
        let column = inputs
            .kinematics
            .resolve(&CONTACT_FRAME)
            .or_else(|| inputs.energy.resolve(&CONTACT_FRAME))?;
        // Frame 0 cannot close a stride-to-contact window.
        let frame = column.iter().map(|v| v.round()).find(|&v| v >= 1.0)?;
        Some(Detection {
            contact_frame: frame as usize,
            confidence: Confidence::High,
        })
    }
}

/// Peak-magnitude frame of an energy signal, rejected when it falls inside
/// the leading `early_peak_guard` share of the capture.
#[derive(Debug, Clone, Copy)]
pub struct EnergyPeak {
    pub label: &'static str,
    pub signal: SignalDef,
    pub confidence: Confidence,
}

impl EnergyPeak {
    pub fn bat() -> Self {
        Self {
            label: "bat_energy_peak",
            signal: BAT_KE,
            confidence: Confidence::High,
        }
    }

    pub fn total() -> Self {
        Self {
            label: "total_energy_peak",
            signal: TOTAL_KE,
            confidence: Confidence::Medium,
        }
    }
}

impl ContactDetector for EnergyPeak {
    fn name(&self) -> &'static str {
        self.label
    }

    fn detect(&self, inputs: &Stage2Inputs<'_>) -> Option<Detection> {
        let values = inputs.energy.resolve(&self.signal)?;
        let peak = argmax_abs(values)?;
        let guard = inputs.window.early_peak_guard * inputs.frame_count as f64;
        if (peak as f64) <= guard {
            tracing::debug!(
                detector = self.label,
                peak,
                guard,
                "energy peak too early; ignored"
            );
            return None;
        }
        Some(Detection {
            contact_frame: peak,
            confidence: self.confidence,
        })
    }
}

/// Places contact at a fixed share of the capture. Always has an opinion.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRatio;

impl ContactDetector for FixedRatio {
    fn name(&self) -> &'static str {
        "fixed_ratio"
    }

    fn detect(&self, inputs: &Stage2Inputs<'_>) -> Option<Detection> {
        Some(fixed_ratio_detection(inputs))
    }
}

fn fixed_ratio_detection(inputs: &Stage2Inputs<'_>) -> Detection {
    let contact = (inputs.window.contact_ratio * inputs.frame_count as f64).round() as usize;
    Detection {
        contact_frame: contact,
        confidence: Confidence::Low,
    }
}

/// Ordered list of detectors; the first opinion wins.
pub struct ContactCascade {
    detectors: Vec<Box<dyn ContactDetector>>,
}

impl Default for ContactCascade {
    fn default() -> Self {
        Self::new(vec![
            Box::new(ExplicitContactColumn),
            Box::new(EnergyPeak::bat()),
            Box::new(EnergyPeak::total()),
            Box::new(FixedRatio),
        ])
    }
}

impl std::fmt::Debug for ContactCascade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.detectors.iter().map(|d| d.name()))
            .finish()
    }
}

impl ContactCascade {
    pub fn new(detectors: Vec<Box<dyn ContactDetector>>) -> Self {
        Self { detectors }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    pub fn run(&self, inputs: &Stage2Inputs<'_>) -> SwingWindow {
        let (source, detection) = self
            .detectors
            .iter()
            .find_map(|d| d.detect(inputs).map(|det| (d.name(), det)))
            .unwrap_or_else(|| ("fixed_ratio", fixed_ratio_detection(inputs)));
        let window = bound_window(detection, inputs.frame_count, inputs.window);
        tracing::debug!(
            source,
            stride = window.stride_frame,
            contact = window.contact_frame,
            confidence = window.confidence.as_str(),
            "swing window"
        );
        window
    }
}

/// Derives the stride frame and clamps both ends into the capture.
pub fn bound_window(detection: Detection, frame_count: usize, cfg: &WindowConfig) -> SwingWindow {
    let last = frame_count.saturating_sub(1);
    let contact = detection.contact_frame.min(last);
    let stride = ((cfg.stride_ratio * contact as f64).round() as usize).min(contact);
    SwingWindow {
        stride_frame: stride,
        contact_frame: contact,
        confidence: detection.confidence,
    }
}

/// Index of the largest `|value|`; `None` for an empty or all-zero series.
/// Ties resolve to the earliest frame.
pub fn argmax_abs(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, v) in values.iter().enumerate() {
        let m = v.abs();
        if m > 0.0 && best.is_none_or(|(_, b)| m > b) {
            best = Some((idx, m));
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_window.rs"]
mod tests;
