//! `mdopt`: optimize a markdown file for LLM consumption.
//!
//! Usage:
//!   mdopt `<input>`            - print the optimized document
//!   mdopt `<input>` `<output>` - write it to `<output>` and print token statistics

mod error;

use clap::{ArgAction, Parser};
use error::CliError;
use mdopt_core::concepts::CANDIDATE_POOL;
use mdopt_core::{OptimizeOptions, Optimized, Optimizer, TokenStats};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Normalize headings, strip noise, and prepend generated front-matter.
#[derive(Parser, Debug)]
#[command(name = "mdopt", version, about, long_about = None)]
struct Args {
    /// Markdown file to optimize
    input: PathBuf,

    /// Where to write the result (prints to stdout when omitted)
    output: Option<PathBuf>,

    /// Print the generated metadata as JSON instead of the document
    #[arg(long)]
    metadata_json: bool,

    /// Number of concepts written into the front-matter (at most 10)
    #[arg(
        long,
        default_value_t = OptimizeOptions::standard().concept_limit as u8,
        value_parser = clap::value_parser!(u8).range(0..=CANDIDATE_POOL as i64)
    )]
    max_concepts: u8,

    /// Characters per token for the token estimate
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
    chars_per_token: u16,

    /// Do not print statistics after writing an output file
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn options(&self) -> OptimizeOptions {
        OptimizeOptions {
            concept_limit: usize::from(self.max_concepts),
            chars_per_token: usize::from(self.chars_per_token),
            ..OptimizeOptions::standard()
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "mdopt_core=debug,mdopt=debug",
        _ => "mdopt_core=trace,mdopt=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let source = fs::read_to_string(&args.input).map_err(|source| CliError::Read {
        path: args.input.clone(),
        source,
    })?;
    let identifier = document_identifier(&args.input);
    log::debug!("optimizing {} as '{}'", args.input.display(), identifier);

    let result = Optimizer::new(args.options()).optimize(&source, Some(&identifier));
    let rendered = render(&result, args.metadata_json)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            if !args.quiet {
                println!("Optimized markdown written to: {}", path.display());
                print_stats(&result.stats);
            }
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn render(result: &Optimized, metadata_json: bool) -> Result<String, CliError> {
    if metadata_json {
        Ok(serde_json::to_string_pretty(&result.metadata)?)
    } else {
        Ok(result.document.clone())
    }
}

/// File name without its extension, used as the fallback title.
fn document_identifier(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn print_stats(stats: &TokenStats) {
    let delta = stats.delta();
    let sign = if delta < 0 { '-' } else { '+' };
    println!();
    println!("Statistics:");
    println!("   Original: ~{} tokens", group_thousands(stats.original as u64));
    println!("   Optimized: ~{} tokens", group_thousands(stats.optimized as u64));
    println!("   Change: {sign}{} tokens", group_thousands(delta.unsigned_abs()));
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
