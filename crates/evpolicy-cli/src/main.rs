//! evpolicy - EV adoption-target converter
//!
//! Reads the EV sales-target and vehicle-assumption tables and generates the
//! two coefficient tables plus the RES policy XML document for the energy
//! model. One-shot batch conversion: the whole run either succeeds or leaves
//! the output directory untouched.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use evpolicy_core::{ConvertOptions, Converter, RunSummary};
use std::path::PathBuf;

/// Default file name for the target table under `--input-dir`.
const DEFAULT_TARGETS: &str = "EVTarget.csv";

/// Default file name for the assumptions table under `--input-dir`.
const DEFAULT_ASSUMPTIONS: &str =
    "Assumptions on annual travel per vehicle and load factor.csv";

#[derive(Debug, Parser)]
#[command(
    name = "evpolicy",
    version,
    about = "Convert EV sales targets into energy-model coefficient tables and RES policy XML"
)]
struct Cli {
    /// Directory containing the input tables
    #[arg(long, default_value = ".")]
    input_dir: PathBuf,

    /// Path to the EV target table (overrides the default under --input-dir)
    #[arg(long)]
    targets: Option<PathBuf>,

    /// Path to the assumptions table (overrides the default under --input-dir)
    #[arg(long)]
    assumptions: Option<PathBuf>,

    /// Directory receiving the generated files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Print the run summary as JSON instead of the readable block
    #[arg(long)]
    json_summary: bool,

    /// Suppress the run summary (errors still print)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging (same as RUST_LOG=debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            targets_path: self
                .targets
                .clone()
                .unwrap_or_else(|| self.input_dir.join(DEFAULT_TARGETS)),
            assumptions_path: self
                .assumptions
                .clone()
                .unwrap_or_else(|| self.input_dir.join(DEFAULT_ASSUMPTIONS)),
            output_dir: self.output_dir.clone(),
        }
    }

    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

fn print_summary(summary: &RunSummary) {
    println!("{}", "conversion complete".green().bold());
    // Display already indents every line
    print!("{summary}");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_level()),
    )
    .init();

    let converter = Converter::new(cli.convert_options());
    let summary = converter
        .run()
        .context("converting scenario inputs failed")?;

    if cli.json_summary {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("rendering JSON summary")?
        );
    } else if !cli.quiet {
        print_summary(&summary);
    }

    Ok(())
}
