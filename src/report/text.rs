use crate::model::scores::Category;
use crate::report::{ReportContext, format_f64_1, format_f64_2};

pub fn render_report_text(ctx: &ReportContext<'_>) -> String {
    let s = &ctx.session.record;
    let mut out = String::new();

    out.push_str("4B Swing Score Report\n");
    out.push_str("=====================\n\n");
    out.push_str(&format!(
        "Tool: {} {} (profile: {})\n",
        ctx.tool_name, ctx.tool_version, ctx.profile_name
    ));
    out.push_str(&format!("Kinematics: {}\n", ctx.kinematics_source));
    out.push_str(&format!("Energy: {}\n\n", ctx.energy_source));

    out.push_str("1. Session\n");
    if ctx.session.is_neutral_default() {
        out.push_str("No swing could be scored; values below are the neutral default.\n");
    }
    out.push_str(&format!(
        "Composite: {} ({})\n",
        s.composite_score,
        s.grade.as_str()
    ));
    out.push_str(&format!(
        "Brain {} | Body {} | Bat {} | Ball {}\n",
        s.brain_score, s.body_score, s.bat_score, s.ball_score
    ));
    out.push_str(&format!(
        "Flow: ground {} | core {} | upper {}\n",
        s.ground_flow_score, s.core_flow_score, s.upper_flow_score
    ));
    out.push_str(&format!(
        "Weakest link: {} ({})\n",
        s.weakest_link.as_str(),
        weakest_link_statement(s.weakest_link)
    ));
    out.push_str(&format!("Swings scored: {}\n", ctx.session.swings_scored));
    if let Some(conf) = ctx.session.window_confidence {
        out.push_str(&format!("Lowest window confidence: {}\n", conf.as_str()));
    }
    out.push('\n');

    out.push_str("2. Kinematics\n");
    out.push_str(&format!(
        "Pelvis peak velocity: {} deg/s\nTorso peak velocity: {} deg/s\n",
        s.pelvis_velocity, s.torso_velocity
    ));
    out.push_str(&format!(
        "X-Factor: {} deg\nStretch rate: {} deg/s\n",
        format_f64_1(s.x_factor),
        format_f64_1(s.stretch_rate)
    ));
    match s.consistency_cv {
        Some(cv) => out.push_str(&format!(
            "Consistency CV: {}% ({})\n\n",
            format_f64_1(cv),
            s.consistency_grade.as_str()
        )),
        None => out.push_str(&format!(
            "Consistency CV: no samples above the floor ({})\n\n",
            s.consistency_grade.as_str()
        )),
    }

    out.push_str("3. Energy and momentum\n");
    out.push_str(&format!(
        "Bat KE: {} J\nTotal KE: {} J\nLegs KE: {} J\n",
        format_f64_1(s.bat_ke),
        format_f64_1(s.total_ke),
        format_f64_1(s.legs_ke)
    ));
    out.push_str(&format!(
        "Transfer efficiency: {}%\n",
        format_f64_1(s.transfer_efficiency)
    ));
    out.push_str(&format!(
        "Torso:pelvis momentum ratio: {}\nArms:torso momentum ratio: {}\n\n",
        format_f64_2(s.torso_pelvis_ratio),
        format_f64_2(s.arms_torso_ratio)
    ));

    out.push_str("4. Swings\n");
    if ctx.swings.is_empty() {
        out.push_str("none\n");
    }
    for swing in ctx.swings {
        out.push_str(&format!(
            "{}: composite {} | window {}-{} ({}) | {} fps\n",
            swing.swing_id,
            swing.record.composite_score,
            swing.window.stride_frame,
            swing.window.contact_frame,
            swing.window.confidence.as_str(),
            format_f64_1(swing.fps)
        ));
    }
    out.push('\n');

    out.push_str("5. Diagnostics\n");
    if !ctx.converted_columns.is_empty() {
        out.push_str(&format!(
            "Converted from radians: {}\n",
            ctx.converted_columns.join(", ")
        ));
    }
    if ctx.faults.is_empty() {
        out.push_str("No input issues.\n");
    }
    for fault in ctx.faults {
        out.push_str(&format!("[{}] {}\n", fault.code(), fault));
    }

    out
}

fn weakest_link_statement(category: Category) -> &'static str {
    match category {
        Category::Brain => "timing and sequencing vary from swing to swing",
        Category::Body => "ground force and trunk rotation limit the swing",
        Category::Bat => "energy is not reaching the bat",
        Category::Ball => "energy transfer at contact is low",
    }
}
