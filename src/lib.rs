//! 4B swing scoring engine.
//!
//! Converts a motion-capture export (inverse-kinematics angles plus
//! kinetic-energy / angular-momentum signals) into Brain, Body, Bat and Ball
//! scores on the 20–80 scale. The engine is a pure function of the two parsed
//! tables and a [`ThresholdProfile`]; see [`pipeline::score_session`].

pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod upstream;

pub use input::table::MetricTable;
pub use model::scores::{SessionScoreRecord, SwingScoreRecord};
pub use model::thresholds::{MetricThreshold, ThresholdProfile};
pub use pipeline::{Engine, EngineOutput, score_session};
