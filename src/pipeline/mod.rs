//! The scoring pipeline. Stages run in order per swing:
//! units → window → kinematics → energy → scores, then the session aggregate.

pub mod stage1_units;
pub mod stage2_window;
pub mod stage3_kinematics;
pub mod stage4_energy;
pub mod stage5_scores;
pub mod stage6_aggregate;
pub mod stage7_report;

use crate::input::columns::TIMESTAMP;
use crate::input::table::MetricTable;
use crate::input::{ENERGY, KINEMATICS, coercion_faults};
use crate::model::faults::SoftFault;
use crate::model::scores::{RawMetrics, SessionScoreRecord, SwingScoreRecord};
use crate::model::thresholds::ThresholdProfile;
use stage1_units::{detect_fps, run_stage1};
use stage2_window::{ContactCascade, ContactDetector, Stage2Inputs};
use stage3_kinematics::{Stage3Inputs, run_stage3};
use stage4_energy::{Stage4Inputs, run_stage4};
use stage5_scores::{Stage5Inputs, run_stage5};
use stage6_aggregate::run_stage6;

pub const WHOLE_CAPTURE_ID: &str = "all";

#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub session: SessionScoreRecord,
    pub swings: Vec<SwingScoreRecord>,
    pub faults: Vec<SoftFault>,
    pub converted_columns: Vec<String>,
}

/// Scores captures against one threshold profile and detector cascade.
#[derive(Debug)]
pub struct Engine {
    profile: ThresholdProfile,
    cascade: ContactCascade,
}

#[derive(Default)]
pub struct EngineBuilder {
    profile: Option<ThresholdProfile>,
    detectors: Option<Vec<Box<dyn ContactDetector>>>,
}

impl EngineBuilder {
    pub fn thresholds(mut self, profile: ThresholdProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Replaces the default contact cascade. Order is priority order.
    pub fn detectors(mut self, detectors: Vec<Box<dyn ContactDetector>>) -> Self {
        self.detectors = Some(detectors);
        self
    }

    /// `None` when no threshold profile was supplied.
    pub fn build(self) -> Option<Engine> {
        let profile = self.profile?;
        let cascade = match self.detectors {
            Some(detectors) => ContactCascade::new(detectors),
            None => ContactCascade::default(),
        };
        Some(Engine { profile, cascade })
    }
}

impl Engine {
    pub fn new(profile: ThresholdProfile) -> Self {
        Self {
            profile,
            cascade: ContactCascade::default(),
        }
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn profile(&self) -> &ThresholdProfile {
        &self.profile
    }

    pub fn cascade(&self) -> &ContactCascade {
        &self.cascade
    }

    /// Scores one capture. Never fails: unusable input degrades to the
    /// neutral default session record.
    pub fn score(&self, kinematics: &MetricTable, energy: &MetricTable) -> EngineOutput {
        let mut faults = coercion_faults(kinematics, KINEMATICS);
        faults.extend(coercion_faults(energy, ENERGY));

        let mut kinematics = kinematics.clone();
        let units = run_stage1(&mut kinematics, &self.profile.limits);

        let mut swings = Vec::new();
        let partitioned = kinematics.partition();
        if let Some(parts) = &partitioned {
            let energy_parts = energy.partition();
            if energy_parts.is_none() {
                tracing::warn!(
                    "kinematics grouped by movement but energy is not; energy ignored per swing"
                );
            }
            for (id, kin_swing) in parts {
                let energy_swing = energy_parts
                    .as_ref()
                    .and_then(|p| p.iter().find(|(eid, _)| eid == id))
                    .map(|(_, t)| t.clone())
                    .unwrap_or_default();
                if let Some(s) = self.score_swing(id, kin_swing, &energy_swing, &mut faults) {
                    swings.push(s);
                }
            }
        }

        if swings.is_empty() {
            if partitioned.is_some() {
                tracing::info!("no grouped swing scored; scoring the whole capture as one swing");
            }
            let whole_kin = kinematics.ungrouped();
            let whole_energy = energy.ungrouped();
            if let Some(s) =
                self.score_swing(WHOLE_CAPTURE_ID, &whole_kin, &whole_energy, &mut faults)
            {
                swings.push(s);
            }
        }

        let session = match run_stage6(&swings) {
            Some(session) => session,
            None => {
                push_unique(&mut faults, SoftFault::AllSwingsInvalid);
                SessionScoreRecord::neutral_default()
            }
        };

        for fault in &faults {
            fault.log();
        }
        tracing::info!(
            composite = session.record.composite_score,
            swings = session.swings_scored,
            status = ?session.status,
            "session scored"
        );

        EngineOutput {
            session,
            swings,
            faults,
            converted_columns: units.converted,
        }
    }

    /// Runs the per-swing stages; `None` when the swing has too few frames.
    pub fn score_swing(
        &self,
        id: &str,
        kinematics: &MetricTable,
        energy: &MetricTable,
        faults: &mut Vec<SoftFault>,
    ) -> Option<SwingScoreRecord> {
        let limits = &self.profile.limits;
        let frame_count = if kinematics.is_empty() {
            energy.n_rows()
        } else {
            kinematics.n_rows()
        };
        if frame_count < limits.min_swing_frames {
            push_unique(
                faults,
                SoftFault::InsufficientFrames {
                    swing: id.to_string(),
                    frames: frame_count,
                    required: limits.min_swing_frames,
                },
            );
            return None;
        }

        let fps_source = if kinematics.resolve(&TIMESTAMP).is_some() {
            kinematics
        } else {
            energy
        };
        let fps = detect_fps(fps_source, limits);

        let window = self.cascade.run(&Stage2Inputs {
            kinematics,
            energy,
            frame_count,
            window: &self.profile.window,
        });

        let s3 = run_stage3(&Stage3Inputs {
            kinematics,
            window,
            fps,
            limits,
        });
        let s4 = run_stage4(&Stage4Inputs {
            energy,
            window,
            limits,
        });
        for &signal in &s3.missing {
            push_unique(
                faults,
                SoftFault::MissingColumn {
                    table: KINEMATICS,
                    signal,
                },
            );
        }
        for &signal in &s4.missing {
            push_unique(
                faults,
                SoftFault::MissingColumn {
                    table: ENERGY,
                    signal,
                },
            );
        }

        let metrics = RawMetrics {
            pelvis_velocity: s3.pelvis_velocity,
            torso_velocity: s3.torso_velocity,
            x_factor: s3.x_factor,
            stretch_rate: s3.stretch_rate,
            bat_ke: s4.bat_ke,
            total_ke: s4.total_ke,
            legs_ke: s4.legs_ke,
            transfer_efficiency: s4.transfer_efficiency,
            consistency_cv: s3.consistency_cv,
            pelvis_momentum: s4.pelvis_momentum,
            torso_momentum: s4.torso_momentum,
            arms_momentum: s4.arms_momentum,
            torso_pelvis_ratio: s4.torso_pelvis_ratio,
            arms_torso_ratio: s4.arms_torso_ratio,
        };
        let s5 = run_stage5(&Stage5Inputs {
            metrics: &metrics,
            has_bat_energy: s4.has_bat_energy,
            thresholds: &self.profile,
        });

        tracing::debug!(
            swing = id,
            frames = frame_count,
            fps,
            composite = s5.record.composite_score,
            "swing scored"
        );

        Some(SwingScoreRecord {
            swing_id: id.to_string(),
            window,
            fps,
            record: s5.record,
            categories: s5.categories,
            metrics,
        })
    }
}

fn push_unique(faults: &mut Vec<SoftFault>, fault: SoftFault) {
    if !faults.contains(&fault) {
        faults.push(fault);
    }
}

/// `(kinematics, energy, thresholds) → session record` with the default cascade.
pub fn score_session(
    kinematics: &MetricTable,
    energy: &MetricTable,
    profile: &ThresholdProfile,
) -> SessionScoreRecord {
    Engine::new(profile.clone())
        .score(kinematics, energy)
        .session
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/engine.rs"]
mod tests;
