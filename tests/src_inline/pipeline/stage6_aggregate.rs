use super::*;
use crate::model::grades::Grade;
use crate::model::scores::{Category, composite};
use crate::model::window::{Confidence, SwingWindow};
use crate::pipeline::stage5_scores::build_record;

fn uniform(score: i32) -> CategoryScores {
    CategoryScores {
        brain: score,
        body: score,
        bat: score,
        ball: score,
        ground_flow: score,
        core_flow: score,
        upper_flow: score,
    }
}

fn swing(id: &str, categories: CategoryScores, confidence: Confidence) -> SwingScoreRecord {
    let metrics = RawMetrics {
        pelvis_velocity: 700.0,
        x_factor: 30.0,
        ..RawMetrics::default()
    };
    SwingScoreRecord {
        swing_id: id.to_string(),
        window: SwingWindow {
            stride_frame: 10,
            contact_frame: 40,
            confidence,
        },
        fps: 240.0,
        record: build_record(&categories, &metrics),
        categories,
        metrics,
    }
}

#[test]
fn test_empty_input_has_no_session() {
    assert!(run_stage6(&[]).is_none());
}

#[test]
fn test_identical_swings_are_idempotent() {
    let s = swing("1", uniform(63), Confidence::High);
    let session = run_stage6(&[s.clone(), s.clone(), s.clone()]).unwrap();
    assert_eq!(session.record, s.record);
    assert_eq!(session.swings_scored, 3);
    assert_eq!(session.status, SessionStatus::Scored);
}

#[test]
fn test_two_swings_average() {
    let session = run_stage6(&[
        swing("1", uniform(58), Confidence::High),
        swing("2", uniform(62), Confidence::High),
    ])
    .unwrap();
    assert_eq!(session.record.composite_score, 60);
    assert_eq!(session.record.body_score, 60);
}

fn four(brain: i32, body: i32, bat: i32, ball: i32) -> CategoryScores {
    CategoryScores {
        brain,
        body,
        bat,
        ball,
        ..uniform(50)
    }
}

#[test]
fn test_session_composite_is_mean_of_swing_composites() {
    let a = swing("1", four(41, 53, 69, 72), Confidence::High);
    let b = swing("2", four(56, 56, 72, 67), Confidence::Medium);
    assert_eq!(a.record.composite_score, 58);
    assert_eq!(b.record.composite_score, 62);

    let session = run_stage6(&[a, b]).unwrap();
    let r = &session.record;
    assert_eq!((r.brain_score, r.body_score, r.bat_score, r.ball_score), (49, 55, 71, 70));
    assert_eq!(r.composite_score, 60);
    assert_eq!(r.grade, Grade::Plus);
    // The formula over averaged categories would give 61.
    assert_eq!(composite(r.body_score, r.bat_score, r.brain_score, r.ball_score), 61);
    assert_eq!(r.weakest_link, Category::Brain);
}

#[test]
fn test_session_grade_follows_averaged_composite() {
    let session = run_stage6(&[
        swing("1", four(40, 70, 55, 45), Confidence::High),
        swing("2", four(60, 50, 65, 35), Confidence::High),
    ])
    .unwrap();
    let r = &session.record;
    assert_eq!(r.composite_score, 55);
    assert_eq!(r.grade, Grade::AboveAverage);
    assert_eq!(r.weakest_link, Category::Ball);
}

fn swing_with_cv(id: &str, cv: Option<f64>) -> SwingScoreRecord {
    let mut s = swing(id, uniform(50), Confidence::High);
    s.metrics.consistency_cv = cv;
    s.record.consistency_cv = cv;
    s
}

#[test]
fn test_consistency_cv_ignores_swings_without_samples() {
    let session = run_stage6(&[swing_with_cv("1", Some(40.0)), swing_with_cv("2", None)]).unwrap();
    assert_eq!(session.record.consistency_cv, Some(40.0));

    let session = run_stage6(&[swing_with_cv("1", Some(40.0)), swing_with_cv("2", Some(20.0))]).unwrap();
    assert_eq!(session.record.consistency_cv, Some(30.0));

    let session = run_stage6(&[swing_with_cv("1", None), swing_with_cv("2", None)]).unwrap();
    assert_eq!(session.record.consistency_cv, None);
}

#[test]
fn test_mean_present() {
    assert_eq!(mean_present([Some(2.0), None, Some(4.0)].into_iter()), Some(3.0));
    assert_eq!(mean_present([None, None].into_iter()), None);
    assert_eq!(mean_present(std::iter::empty()), None);
}

#[test]
fn test_window_confidence_is_lowest() {
    let session = run_stage6(&[
        swing("1", uniform(50), Confidence::High),
        swing("2", uniform(50), Confidence::Low),
        swing("3", uniform(50), Confidence::Medium),
    ])
    .unwrap();
    assert_eq!(session.window_confidence, Some(Confidence::Low));
}

#[test]
fn test_running_mean() {
    assert_eq!(running_mean([0.1, 0.1, 0.1].into_iter()), 0.1);
    assert_eq!(running_mean([1.0, 2.0, 3.0, 4.0].into_iter()), 2.5);
    assert_eq!(running_mean(std::iter::empty()), 0.0);
}
