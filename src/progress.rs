//! Console display module
//!
//! Banner, status lines, spinner and the end-of-run summary.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

use crate::config::Mode;
use crate::pipeline::RunStats;

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════╗
║                                                              ║
║              GrayKey Password Sanitizer [GKPS]               ║
║         password lists and email:password combo lists        ║
║                                                              ║
╚══════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// Create a styled spinner counting processed lines
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg} {pos} lines")
            .unwrap()
            .tick_chars("|/-\\ "),
    );

    pb.set_message(msg.to_string());
    pb
}

/// Print the result of a run
///
/// `output` is `None` for dry runs.
pub fn print_summary(stats: &RunStats, mode: Mode, output: Option<&Path>, detailed: bool) {
    println!();
    println!("{}", "═".repeat(60).green());
    println!("{}", "                    PROCESSING COMPLETE".green().bold());
    println!("{}", "═".repeat(60).green());
    println!();

    if !stats.has_results() {
        print_warning(&format!("No {} were processed.", mode.record_noun()));
    } else {
        match output {
            Some(path) => print_success(&format!("Results have been saved to {:?}", path)),
            None => print_info("Dry run, no output file written"),
        }
        println!();
        println!("  {} {}", format!("Unique {}:", mode.record_noun()).green().bold(),
            format_number(stats.unique).green().bold());
        println!("  {} {}", "Duplicates encountered:".yellow(), format_number(stats.duplicate));
    }

    if detailed {
        println!();
        println!("  {} {}", "Total lines:    ".green(), format_number(stats.total_lines));
        println!("  {} {}", "Without prefix: ".green(), format_number(stats.no_prefix));
        println!("  {} {}", "JSON-like:      ".green(), format_number(stats.structured));
        println!("  {} {}", "Empty values:   ".green(), format_number(stats.empty));
        println!("  {} {}", "Out of range:   ".green(), format_number(stats.out_of_range));
        if mode == Mode::ComboList {
            println!("  {} {}", "Account lines:  ".green(), format_number(stats.context));
            println!("  {} {}", "Without email:  ".green(), format_number(stats.no_email));
        }
    }

    println!();
    println!("  {} {}", "Processing time:".green(), format_elapsed(stats.elapsed));
    println!();
    println!("{}", "═".repeat(60).green());
}

/// Group digits in threes, `1234567` -> `1,234,567`
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let groups: Vec<&str> = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        // ASCII digits, every chunk is valid UTF-8
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect();
    groups.join(",")
}

/// Processing time for the summary: milliseconds for instant runs, seconds
/// with two decimals up to a minute, then minutes and hours
pub fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_secs(1) {
        return format!("{} ms", elapsed.as_millis());
    }

    let total = elapsed.as_secs();
    match (total / 3600, total % 3600 / 60, total % 60) {
        (0, 0, _) => format!("{:.2} seconds", elapsed.as_secs_f64()),
        (0, m, s) => format!("{}m {:02}s", m, s),
        (h, m, s) => format!("{}h {:02}m {:02}s", h, m, s),
    }
}
