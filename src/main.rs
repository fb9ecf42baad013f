mod config;
mod error;
mod preview;
mod report;
mod request;
mod scanner;
mod summary;
mod types;

use clap::Parser;
use colored::Colorize;
use config::{EmptyDirPolicy, ReportOptions};
use error::{ErrorKind, SummaryError};
use request::SummaryRequest;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Write a size and last-modified summary of a directory's top-level entries", long_about = None)]
struct Args {
    /// Directory whose direct children are summarized
    #[arg(long, short = 'i', value_name = "DIR")]
    input: PathBuf,

    /// Directory the report is written into
    #[arg(long, short = 'o', value_name = "DIR")]
    output: PathBuf,

    /// Report file name, without the .txt extension
    #[arg(long, short = 'n', value_name = "NAME")]
    name: String,

    /// Order lines by entry name instead of filesystem order
    #[arg(long, overrides_with = "no_sort")]
    sort: bool,

    /// Keep filesystem order even if the config file sets SORT
    #[arg(long, overrides_with = "sort")]
    no_sort: bool,

    /// How to handle a directory that holds no files
    #[arg(long, value_enum, value_name = "POLICY")]
    empty_dirs: Option<EmptyDirPolicy>,

    /// KEY=value defaults file (default: ./.dir_summary_config if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a table of the summarized entries after writing the report
    #[arg(long, short = 'p')]
    preview: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Args {
    /// Command-line flags win over the config file.
    fn apply_to(&self, options: &mut ReportOptions) {
        if self.sort {
            options.sort = true;
        } else if self.no_sort {
            options.sort = false;
        }
        if let Some(policy) = self.empty_dirs {
            options.empty_dirs = policy;
        }
    }
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(&args) {
        eprintln!("{} {}", title_for(&e).red().bold(), error_message(&e).red());
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), SummaryError> {
    let mut options = ReportOptions::load(args.config.as_deref())?;
    args.apply_to(&mut options);

    let request = SummaryRequest::new(&args.input, &args.output, args.name.clone());
    request.validate()?;

    let outcome = summary::summarize(&request, &options, args.preview)?;

    println!(
        "{} {} ({} entries, {})",
        "Directory summary completed successfully:".green(),
        outcome.path.display(),
        outcome.lines_written,
        human_bytes::human_bytes(outcome.total_bytes as f64)
    );

    if args.preview {
        preview::print_preview(&outcome);
    }
    Ok(())
}

fn title_for(err: &SummaryError) -> &'static str {
    match (err.kind(), err) {
        (ErrorKind::Validation, SummaryError::InvalidInputDir(_)) => "Invalid Input Directory:",
        (ErrorKind::Validation, SummaryError::InvalidOutputDir(_)) => "Invalid Output Directory:",
        (ErrorKind::Validation, _) => "Invalid File Name:",
        (ErrorKind::Config, _) => "Configuration Error:",
        (ErrorKind::Io | ErrorKind::EmptyAggregate, _) => "Error:",
    }
}

/// Only unexpected failures carry the generic prefix; rejected inputs are
/// reported as they are.
fn error_message(err: &SummaryError) -> String {
    match err.kind() {
        ErrorKind::Io | ErrorKind::EmptyAggregate => format!("An error occurred: {err}"),
        ErrorKind::Validation | ErrorKind::Config => err.to_string(),
    }
}
