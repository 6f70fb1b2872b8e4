//! Command-line interface definition for gkps
//!
//! Provides argument parsing for the GrayKey password sanitizer.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{
    Mode, DEFAULT_ACCOUNT_PREFIX, DEFAULT_EMAIL_WINDOW, DEFAULT_ITEM_VALUE_PREFIX,
    DEFAULT_MAX_LENGTH, DEFAULT_MAX_NUMBER, DEFAULT_MIN_LENGTH, DEFAULT_SOURCE_FILE,
};

/// GrayKey password export sanitizer
///
/// Extract deduplicated password lists or email:password combo lists from
/// GrayKey text exports.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gkps",
    version,
    about = "GrayKey Password Sanitizer - clean password and combo lists from GrayKey exports",
    long_about = r#"
Extract unique passwords (or email:password pairs) from a GrayKey text export.
Lines are selected by prefix, JSON-like noise is skipped, values outside the
length bounds are dropped and duplicates are removed. Output keeps first-seen
order and is written to the next free numbered file (passwords_clean_00.txt,
combolist_00.txt, ...).

EXAMPLES:
    # Password list from passwords.txt with default settings
    gkps

    # Password list with custom bounds
    gkps -i export.txt --min-length 6 --max-length 32

    # Combo list, emails taken from "Account:" lines
    gkps -i export.txt --mode combo-list

    # Combo list, pair only emails on the password line itself
    gkps -i export.txt --mode combo-list --email-window 0
"#
)]
pub struct Args {
    /// Input export file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_SOURCE_FILE)]
    pub input: PathBuf,

    /// Output directory (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// What to produce
    #[arg(short, long, value_enum, default_value_t = Mode::PasswordList)]
    pub mode: Mode,

    /// Prefix marking password lines
    #[arg(short, long, value_name = "PREFIX", default_value = DEFAULT_ITEM_VALUE_PREFIX)]
    pub prefix: String,

    /// Prefix marking account (email) lines in combo mode
    #[arg(short, long, value_name = "PREFIX", default_value = DEFAULT_ACCOUNT_PREFIX)]
    pub account_prefix: String,

    /// Minimum password length
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MIN_LENGTH)]
    pub min_length: usize,

    /// Maximum password length
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_LENGTH)]
    pub max_length: usize,

    /// Lines after an account line during which its email is still paired
    #[arg(long, value_name = "LINES", default_value_t = DEFAULT_EMAIL_WINDOW)]
    pub email_window: usize,

    /// Highest numbered output file to try (_00 .. _NN)
    #[arg(long, value_name = "NUM", default_value_t = DEFAULT_MAX_NUMBER)]
    pub max_number: u32,

    /// Show per-reason discard counts
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Dry run - process and report without writing files
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

impl Args {
    /// Get output directory, defaulting to current directory
    pub fn get_output_dir(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
