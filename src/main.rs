use clap::Parser;
use diffscan::config::{Config, Limits};
use diffscan::{diff, report};
use std::path::PathBuf;
use tracing::{debug, info, info_span, Instrument};
use tracing_subscriber::EnvFilter;

/// diffscan — parse unified diff output (e.g. `git diff | diffscan`) and
/// summarize the changed files, hunks, and line counts.
#[derive(Parser, Debug)]
#[command(name = "diffscan", version, about)]
struct Cli {
    /// Patch file to read. Reads stdin when omitted.
    path: Option<PathBuf>,

    /// Optional output file path for markdown report
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Stop after this many files (non-positive: unlimited)
    #[arg(long, allow_negative_numbers = true)]
    max_files: Option<i64>,

    /// Stop accumulating hunks for a file after this many lines
    #[arg(long, allow_negative_numbers = true)]
    max_lines_per_file: Option<i64>,

    /// Truncate a hunk at the first line longer than this
    #[arg(long, allow_negative_numbers = true)]
    max_line_chars: Option<i64>,

    /// Parse a built-in sample patch for demo purposes
    #[arg(long)]
    sample: bool,
}

impl Cli {
    fn limits(&self) -> Limits {
        Limits {
            max_files: self.max_files,
            max_lines_per_file: self.max_lines_per_file,
            max_line_chars: self.max_line_chars,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("loading configuration");
    let config = Config::load()?;
    let limits = config.resolve_limits(Limits::from_env()?, cli.limits());
    let options = limits.to_options();
    debug!(?options, "resolved parse limits");

    let parsed = if cli.sample {
        info!("using built-in sample patch");
        diff::parse_str(include_str!("../tests/fixtures/sample_diff.patch"), &options)?
    } else if let Some(path) = &cli.path {
        let file = std::fs::File::open(path)?;
        diff::spawn_parse(file, options)
            .wait()
            .instrument(info_span!("parse_file", path = %path.display()))
            .await?
    } else {
        info!("reading diff from stdin");
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        diff::parse_async(stdin, &options).await?
    };

    let built_report = report::build(&parsed);
    report::output(&built_report, cli.output.as_deref())?;
    info!(files = built_report.files_changed(), incomplete = built_report.is_incomplete, "done");

    Ok(())
}
