use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::scores::SwingScoreRecord;
use crate::report::json::{render_session_json, render_summary_json};
use crate::report::text::render_report_text;
use crate::report::{ReportContext, format_f64_1, format_f64_2, format_opt_f64_1};

pub const SESSION_FILE: &str = "session.json";
pub const SUMMARY_FILE: &str = "summary.json";
pub const SWINGS_FILE: &str = "swings.tsv";
pub const REPORT_FILE: &str = "report.txt";

pub fn write_reports(ctx: &ReportContext<'_>, out_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;

    let session = render_session_json(ctx.session)?;
    write_text(&out_dir.join(SESSION_FILE), &session)?;

    let summary = render_summary_json(ctx)?;
    write_text(&out_dir.join(SUMMARY_FILE), &summary)?;

    write_swings_tsv(ctx.swings, &out_dir.join(SWINGS_FILE))?;

    let report = render_report_text(ctx);
    write_text(&out_dir.join(REPORT_FILE), &report)?;

    tracing::info!(dir = %out_dir.display(), "reports written");
    Ok(())
}

fn write_swings_tsv(swings: &[SwingScoreRecord], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "swing_id",
        "stride_frame",
        "contact_frame",
        "window_confidence",
        "fps",
        "brain_score",
        "body_score",
        "bat_score",
        "ball_score",
        "composite_score",
        "grade",
        "weakest_link",
        "pelvis_velocity",
        "torso_velocity",
        "x_factor",
        "stretch_rate",
        "bat_ke",
        "transfer_efficiency",
        "consistency_cv",
        "torso_pelvis_ratio",
        "arms_torso_ratio",
    ]
    .join("\t");
    writeln!(w, "{}", header)?;

    for swing in swings {
        let r = &swing.record;
        let row = [
            swing.swing_id.clone(),
            swing.window.stride_frame.to_string(),
            swing.window.contact_frame.to_string(),
            swing.window.confidence.as_str().to_string(),
            format_f64_1(swing.fps),
            r.brain_score.to_string(),
            r.body_score.to_string(),
            r.bat_score.to_string(),
            r.ball_score.to_string(),
            r.composite_score.to_string(),
            r.grade.as_str().to_string(),
            r.weakest_link.as_str().to_string(),
            r.pelvis_velocity.to_string(),
            r.torso_velocity.to_string(),
            format_f64_1(r.x_factor),
            format_f64_1(r.stretch_rate),
            format_f64_1(r.bat_ke),
            format_f64_1(r.transfer_efficiency),
            format_opt_f64_1(r.consistency_cv),
            format_f64_2(r.torso_pelvis_ratio),
            format_f64_2(r.arms_torso_ratio),
        ]
        .join("\t");
        writeln!(w, "{}", row)?;
    }
    w.flush()
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage7_report.rs"]
mod tests;
