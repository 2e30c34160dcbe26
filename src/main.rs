use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDateTime;
use clap::Parser;
use loan_report_pdf::{DEFAULT_OUTPUT, Error, RenderOptions, convert_bundle_file};

/// Render a loan application analysis bundle (JSON) into a PDF report.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// JSON bundle with applicant, salary_analysis, eligibility, obligations,
    /// documents, forms and queries
    input: PathBuf,

    /// Output PDF path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Fixed "Generated on" timestamp, e.g. "2026-10-18 15:45"
    #[arg(long)]
    timestamp: Option<String>,

    /// Report title shown on every page
    #[arg(long)]
    title: Option<String>,

    /// Write uncompressed content streams
    #[arg(long)]
    no_compress: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, Error> {
    ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw.trim(), fmt).ok())
        .ok_or_else(|| Error::Timestamp(raw.to_string()))
}

fn run(args: Args) -> Result<PathBuf, Error> {
    let mut options = RenderOptions {
        compress: !args.no_compress,
        ..RenderOptions::default()
    };
    if let Some(raw) = &args.timestamp {
        options.generated_at = Some(parse_timestamp(raw)?);
    }
    if let Some(title) = args.title {
        options.title = title;
    }
    convert_bundle_file(&args.input, &args.output, options)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match run(args) {
        Ok(path) => {
            println!("Wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
