use serde::{Deserialize, Serialize};

use crate::model::grades::{ConsistencyGrade, Grade};
use crate::model::window::{Confidence, SwingWindow};

pub const SCORE_MIN: i32 = 20;
pub const SCORE_MAX: i32 = 80;
pub const SCORE_NEUTRAL: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Brain,
    Body,
    Bat,
    Ball,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Brain => "brain",
            Category::Body => "body",
            Category::Bat => "bat",
            Category::Ball => "ball",
        }
    }
}

/// Tie-break order for the weakest link.
pub fn category_order() -> &'static [Category] {
    &[
        Category::Brain,
        Category::Body,
        Category::Bat,
        Category::Ball,
    ]
}

/// Raw in-window measurements for one swing, before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawMetrics {
    pub pelvis_velocity: f64,
    pub torso_velocity: f64,
    pub x_factor: f64,
    pub stretch_rate: f64,
    pub bat_ke: f64,
    pub total_ke: f64,
    pub legs_ke: f64,
    pub transfer_efficiency: f64,
    /// `None` when no in-window velocity sample cleared the consistency floor.
    pub consistency_cv: Option<f64>,
    pub pelvis_momentum: f64,
    pub torso_momentum: f64,
    pub arms_momentum: f64,
    pub torso_pelvis_ratio: f64,
    pub arms_torso_ratio: f64,
}

/// Category and flow scores, already rounded and clamped to the 20–80 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryScores {
    pub brain: i32,
    pub body: i32,
    pub bat: i32,
    pub ball: i32,
    pub ground_flow: i32,
    pub core_flow: i32,
    pub upper_flow: i32,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> i32 {
        match category {
            Category::Brain => self.brain,
            Category::Body => self.body,
            Category::Bat => self.bat,
            Category::Ball => self.ball,
        }
    }

    pub fn composite(&self) -> i32 {
        composite(self.body, self.bat, self.brain, self.ball)
    }

    pub fn weakest_link(&self) -> Category {
        let mut weakest = Category::Brain;
        for &category in category_order() {
            if self.get(category) < self.get(weakest) {
                weakest = category;
            }
        }
        weakest
    }
}

pub fn composite(body: i32, bat: i32, brain: i32, ball: i32) -> i32 {
    let weighted =
        0.35 * body as f64 + 0.30 * bat as f64 + 0.20 * brain as f64 + 0.15 * ball as f64;
    weighted.round() as i32
}

/// Rounds and clamps a fractional score onto the 20–80 scale.
pub fn to_scale(value: f64) -> i32 {
    if value.is_nan() {
        return SCORE_MIN;
    }
    (value.round() as i32).clamp(SCORE_MIN, SCORE_MAX)
}

pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// The persisted 4B record shape, shared by swing and session records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub brain_score: i32,
    pub body_score: i32,
    pub bat_score: i32,
    pub ball_score: i32,
    pub composite_score: i32,
    pub grade: Grade,
    pub ground_flow_score: i32,
    pub core_flow_score: i32,
    pub upper_flow_score: i32,
    pub weakest_link: Category,
    pub pelvis_velocity: i32,
    pub torso_velocity: i32,
    pub x_factor: f64,
    pub stretch_rate: f64,
    pub bat_ke: f64,
    pub total_ke: f64,
    pub legs_ke: f64,
    pub transfer_efficiency: f64,
    pub consistency_cv: Option<f64>,
    pub consistency_grade: ConsistencyGrade,
    pub pelvis_momentum: f64,
    pub torso_momentum: f64,
    pub arms_momentum: f64,
    pub torso_pelvis_ratio: f64,
    pub arms_torso_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwingScoreRecord {
    pub swing_id: String,
    pub window: SwingWindow,
    pub fps: f64,
    #[serde(flatten)]
    pub record: ScoreRecord,
    #[serde(skip)]
    pub categories: CategoryScores,
    #[serde(skip)]
    pub metrics: RawMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scored,
    NeutralDefault,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionScoreRecord {
    #[serde(flatten)]
    pub record: ScoreRecord,
    pub swings_scored: usize,
    pub status: SessionStatus,
    pub window_confidence: Option<Confidence>,
}

impl SessionScoreRecord {
    /// Fixed record returned when nothing in the capture could be scored.
    pub fn neutral_default() -> Self {
        Self {
            record: ScoreRecord {
                brain_score: SCORE_NEUTRAL,
                body_score: SCORE_NEUTRAL,
                bat_score: SCORE_NEUTRAL,
                ball_score: SCORE_NEUTRAL,
                composite_score: SCORE_NEUTRAL,
                grade: Grade::Average,
                ground_flow_score: SCORE_NEUTRAL,
                core_flow_score: SCORE_NEUTRAL,
                upper_flow_score: SCORE_NEUTRAL,
                weakest_link: Category::Body,
                pelvis_velocity: 0,
                torso_velocity: 0,
                x_factor: 0.0,
                stretch_rate: 0.0,
                bat_ke: 0.0,
                total_ke: 0.0,
                legs_ke: 0.0,
                transfer_efficiency: 0.0,
                consistency_cv: None,
                consistency_grade: ConsistencyGrade::Moderate,
                pelvis_momentum: 0.0,
                torso_momentum: 0.0,
                arms_momentum: 0.0,
                torso_pelvis_ratio: 0.0,
                arms_torso_ratio: 0.0,
            },
            swings_scored: 0,
            status: SessionStatus::NeutralDefault,
            window_confidence: None,
        }
    }

    pub fn is_neutral_default(&self) -> bool {
        self.status == SessionStatus::NeutralDefault
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/scores.rs"]
mod tests;
