use serde::Serialize;

use crate::model::scores::{SessionScoreRecord, SwingScoreRecord};
use crate::report::ReportContext;

#[derive(Debug, Serialize)]
struct ToolMeta<'a> {
    name: &'a str,
    version: &'a str,
    profile: &'a str,
}

#[derive(Debug, Serialize)]
struct InputMeta<'a> {
    kinematics: &'a str,
    energy: &'a str,
    radian_columns_converted: &'a [String],
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    tool: ToolMeta<'a>,
    input: InputMeta<'a>,
    session: &'a SessionScoreRecord,
    swings: &'a [SwingScoreRecord],
}

/// The persisted session record.
pub fn render_session_json(session: &SessionScoreRecord) -> serde_json::Result<String> {
    serde_json::to_string_pretty(session)
}

/// Session plus per-swing detail and run metadata.
pub fn render_summary_json(ctx: &ReportContext<'_>) -> serde_json::Result<String> {
    let summary = Summary {
        tool: ToolMeta {
            name: ctx.tool_name,
            version: ctx.tool_version,
            profile: ctx.profile_name,
        },
        input: InputMeta {
            kinematics: ctx.kinematics_source,
            energy: ctx.energy_source,
            radian_columns_converted: ctx.converted_columns,
        },
        session: ctx.session,
        swings: ctx.swings,
    };
    serde_json::to_string_pretty(&summary)
}
