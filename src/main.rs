//! GrayKey Password Sanitizer - command-line entry point
//!
//! Thin adapter: builds the configuration from arguments, feeds the export
//! file through the pipeline and writes the result to a numbered file.

use anyhow::Context;
use bytesize::ByteSize;
use clap::Parser;
use indicatif::ProgressIterator;
use std::process;

use gkp_sanitizer::cli::Args;
use gkp_sanitizer::config::{Mode, SanitizerConfig};
use gkp_sanitizer::output::{ensure_output_dir, write_numbered};
use gkp_sanitizer::pipeline::Pipeline;
use gkp_sanitizer::progress::{
    create_spinner, print_banner, print_bullet, print_error, print_header, print_info, print_summary,
};
use gkp_sanitizer::source::LineSource;

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if !args.quiet {
        print_banner();
    }

    let config = SanitizerConfig::from_args(&args);
    config.validate().context("Refusing to start")?;

    if !args.quiet && args.verbose {
        print_config(&args, &config);
    }

    let size = std::fs::metadata(&args.input)
        .with_context(|| format!("Cannot read source file {:?}", args.input))?
        .len();
    let mut source = LineSource::open(&args.input)?;

    if !args.quiet {
        print_header(&format!("Creating a {}...", config.mode));
        print_info(&format!("Input: {:?} ({})", args.input, ByteSize(size)));
    }

    let spinner = if args.quiet {
        indicatif::ProgressBar::hidden()
    } else {
        create_spinner("Processing...")
    };

    let mut pipeline = Pipeline::new(config);
    let report = pipeline.run(source.by_ref().progress_with(spinner.clone()));
    spinner.finish_and_clear();
    log::debug!("Pipeline {}", pipeline.state());

    if source.lossy_lines() > 0 {
        log::warn!(
            "{} line(s) were not valid UTF-8 and were decoded lossily",
            source.lossy_lines()
        );
    }

    let (records, stats) = report
        .into_result()
        .with_context(|| format!("Processing {:?} failed", args.input))?;

    let mode = pipeline.config().mode;
    let output_path = if args.dry_run || !stats.has_results() {
        None
    } else {
        let dir = args.get_output_dir();
        ensure_output_dir(&dir)?;
        Some(write_numbered(&dir, mode.file_prefix(), args.max_number, &records)?)
    };

    if !args.quiet {
        print_summary(&stats, mode, output_path.as_deref(), args.stats);
    }

    Ok(())
}

/// Print configuration summary
fn print_config(args: &Args, config: &SanitizerConfig) {
    print_header("Configuration");

    print_bullet(&format!("Input:          {:?}", args.input));
    print_bullet(&format!("Output dir:     {:?}", args.get_output_dir()));
    print_bullet(&format!("Mode:           {}", config.mode));
    print_bullet(&format!("Prefix:         {:?}", config.prefix));
    if config.mode == Mode::ComboList {
        print_bullet(&format!("Account prefix: {:?}", config.account_prefix));
        print_bullet(&format!("Email window:   {} lines", config.email_window));
    }
    print_bullet(&format!("Length:         {}..={}", config.min_length, config.max_length));
    print_bullet(&format!("Dry run:        {}", args.dry_run));
}
