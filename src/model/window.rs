use serde::{Deserialize, Serialize};

/// How the contact frame was found. Diagnostic only; never feeds the formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

/// Inclusive frame range `[stride_frame, contact_frame]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwingWindow {
    pub stride_frame: usize,
    pub contact_frame: usize,
    pub confidence: Confidence,
}

impl SwingWindow {
    /// Window clipped to a series of `len` samples; `None` when nothing overlaps.
    pub fn range(&self, len: usize) -> Option<std::ops::RangeInclusive<usize>> {
        if len == 0 || self.stride_frame >= len {
            return None;
        }
        let end = self.contact_frame.min(len - 1);
        Some(self.stride_frame..=end)
    }
}
