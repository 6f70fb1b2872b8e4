//! Run configuration
//!
//! Everything a sanitizer run needs to know, built from command-line
//! arguments or constructed directly.

use clap::ValueEnum;

use crate::cli::Args;
use crate::error::{Result, SanitizeError};

pub const DEFAULT_SOURCE_FILE: &str = "passwords.txt";
pub const DEFAULT_ITEM_VALUE_PREFIX: &str = "Item value:";
pub const DEFAULT_ACCOUNT_PREFIX: &str = "Account:";
pub const DEFAULT_FILE_PREFIX_PW: &str = "passwords_clean";
pub const DEFAULT_FILE_PREFIX_COMBO: &str = "combolist";
pub const DEFAULT_MIN_LENGTH: usize = 4;
pub const DEFAULT_MAX_LENGTH: usize = 64;
/// Highest numbered output file suffix (`_00` ..= `_99`)
pub const DEFAULT_MAX_NUMBER: u32 = 99;
/// Lines after an account line during which its email stays associated
pub const DEFAULT_EMAIL_WINDOW: usize = 8;

/// Output flavour of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Password list, one password per line
    #[value(alias = "passwords", alias = "pw")]
    PasswordList,
    /// Combo list, one `email:password` per line
    #[value(alias = "combo")]
    ComboList,
}

impl Mode {
    /// Base name used for numbered output files
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::PasswordList => DEFAULT_FILE_PREFIX_PW,
            Self::ComboList => DEFAULT_FILE_PREFIX_COMBO,
        }
    }

    /// What one output record is called in summaries
    pub fn record_noun(&self) -> &'static str {
        match self {
            Self::PasswordList => "passwords",
            Self::ComboList => "email:password pairs",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PasswordList => write!(f, "password list"),
            Self::ComboList => write!(f, "combo list"),
        }
    }
}

/// Sanitizer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizerConfig {
    /// Marker preceding the password value
    pub prefix: String,
    /// Marker preceding the account email (combo mode)
    pub account_prefix: String,
    pub min_length: usize,
    pub max_length: usize,
    pub mode: Mode,
    /// Lookback window, in lines, for pairing an account email with a password
    pub email_window: usize,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_ITEM_VALUE_PREFIX.to_string(),
            account_prefix: DEFAULT_ACCOUNT_PREFIX.to_string(),
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            mode: Mode::PasswordList,
            email_window: DEFAULT_EMAIL_WINDOW,
        }
    }
}

impl SanitizerConfig {
    pub fn new(prefix: &str, min_length: usize, max_length: usize, mode: Mode) -> Self {
        Self {
            prefix: prefix.to_string(),
            min_length,
            max_length,
            mode,
            ..Self::default()
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self {
            prefix: args.prefix.clone(),
            account_prefix: args.account_prefix.clone(),
            min_length: args.min_length,
            max_length: args.max_length,
            mode: args.mode,
            email_window: args.email_window,
        }
    }

    /// Reject configurations that cannot produce a meaningful run
    pub fn validate(&self) -> Result<()> {
        if self.prefix.trim().is_empty() {
            return Err(SanitizeError::config("prefix must not be empty"));
        }

        if self.min_length == 0 {
            return Err(SanitizeError::config("minimum length must be at least 1"));
        }

        if self.min_length > self.max_length {
            return Err(SanitizeError::config(format!(
                "minimum length ({}) must be <= maximum length ({})",
                self.min_length, self.max_length
            )));
        }

        if self.mode == Mode::ComboList {
            if self.account_prefix.trim().is_empty() {
                return Err(SanitizeError::config("account prefix must not be empty"));
            }
            if self.account_prefix == self.prefix {
                return Err(SanitizeError::config(
                    "account prefix and password prefix must differ",
                ));
            }
        }

        Ok(())
    }
}
