//! # GrayKey Password Sanitizer
//!
//! Turns raw GrayKey text exports into clean, deduplicated password lists or
//! `email:password` combo lists.
//!
//! ## Pipeline
//!
//! - **Classification**: keep lines carrying the configured prefix, skip
//!   JSON-like noise and empty values
//! - **Length filtering**: inclusive minimum and maximum, counted in characters
//! - **Email pairing** (combo lists): email on the same line, or from the most
//!   recent account line within a lookback window
//! - **Deduplication**: first-seen order, per run
//!
//! ## Usage
//!
//! ```bash
//! # Password list from passwords.txt
//! gkps
//!
//! # Combo list from a specific export
//! gkps -i export.txt --mode combo-list
//! ```
//!
//! ## Example
//!
//! ```rust
//! use gkp_sanitizer::config::{Mode, SanitizerConfig};
//! use gkp_sanitizer::pipeline::Pipeline;
//!
//! let config = SanitizerConfig::new("Item value:", 4, 64, Mode::PasswordList);
//! let mut pipeline = Pipeline::new(config);
//!
//! let report = pipeline.run_lines(["Item value: abcd", "Item value: abcd", "Item value: ab"]);
//! assert_eq!(report.records, vec!["abcd"]);
//! assert_eq!(report.stats.unique, 1);
//! assert_eq!(report.stats.duplicate, 1);
//! ```

pub mod classifier;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod email;
pub mod error;
pub mod filter;
pub mod mode;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod source;

pub use cli::Args;
pub use config::{Mode, SanitizerConfig};
pub use error::SanitizeError;
pub use pipeline::{Pipeline, PipelineState, RunReport, RunStats};
