use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};

use swing_4b::input::parse_capture;
use swing_4b::logging::init_logging;
use swing_4b::model::thresholds::ThresholdProfile;
use swing_4b::pipeline::Engine;
use swing_4b::pipeline::stage7_report::write_reports;
use swing_4b::report::ReportContext;
use swing_4b::report::json::render_session_json;
use swing_4b::upstream::{DEFAULT_MAX_PAYLOAD_BYTES, fetch_capture};

#[derive(Parser, Debug)]
#[command(author, version, about = "4B swing scoring from motion-capture exports")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one capture and write the session record
    Score(ScoreArgs),
    /// Validate a threshold profile without scoring
    CheckThresholds {
        /// Threshold profile JSON
        path: PathBuf,
    },
}

#[derive(Parser, Debug)]
struct ScoreArgs {
    /// Inverse-kinematics CSV export (.csv or .csv.gz)
    #[arg(long)]
    kinematics: PathBuf,

    /// Energy / momentum CSV export (.csv or .csv.gz)
    #[arg(long)]
    energy: PathBuf,

    /// Threshold profile JSON; the bundled profile is used when omitted
    #[arg(long)]
    thresholds: Option<PathBuf>,

    /// Output directory for session.json, summary.json, swings.tsv and report.txt
    #[arg(long)]
    out: Option<PathBuf>,

    /// Per-payload cap on decompressed bytes
    #[arg(long, default_value_t = DEFAULT_MAX_PAYLOAD_BYTES)]
    max_bytes: u64,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(cli.command) {
        tracing::error!("{err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Score(args) => run_score(&args),
        Command::CheckThresholds { path } => {
            let profile = ThresholdProfile::load(&path)?;
            println!("threshold profile `{}` is valid", profile.name);
            Ok(())
        }
    }
}

fn run_score(args: &ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let profile = load_profile(args.thresholds.as_deref())?;
    let payloads = fetch_capture(&args.kinematics, &args.energy, args.max_bytes)?;
    let tables = parse_capture(&payloads.kinematics, &payloads.energy);

    let engine = Engine::new(profile);
    let output = engine.score(&tables.kinematics, &tables.energy);

    println!("{}", render_session_json(&output.session)?);

    if let Some(out_dir) = &args.out {
        let kinematics_source = args.kinematics.display().to_string();
        let energy_source = args.energy.display().to_string();
        let ctx = ReportContext {
            tool_name: env!("CARGO_PKG_NAME"),
            tool_version: env!("CARGO_PKG_VERSION"),
            profile_name: &engine.profile().name,
            kinematics_source: &kinematics_source,
            energy_source: &energy_source,
            session: &output.session,
            swings: &output.swings,
            faults: &output.faults,
            converted_columns: &output.converted_columns,
        };
        write_reports(&ctx, out_dir)?;
    }
    Ok(())
}

fn load_profile(path: Option<&Path>) -> Result<ThresholdProfile, Box<dyn std::error::Error>> {
    let profile = match path {
        Some(path) => ThresholdProfile::load(path)?,
        None => {
            tracing::info!("using bundled threshold profile");
            ThresholdProfile::bundled()?
        }
    };
    Ok(profile)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
