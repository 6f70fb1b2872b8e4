//! Core sanitizing pipeline
//!
//! Drives the selected mode strategy over an input line sequence, removes
//! duplicate records and keeps per-reason counters.

use std::convert::Infallible;
use std::fmt;
use std::time::{Duration, Instant};

use crate::config::SanitizerConfig;
use crate::dedup::{Deduplicator, MemoryDeduplicator};
use crate::error::{error_chain, SanitizeError};
use crate::mode::create_strategy;

/// Why a line did not produce an output record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {
    /// The line does not carry the configured prefix
    NoPrefix,
    /// The line looks like a JSON object or array
    Structured,
    /// Nothing left after stripping the prefix
    Empty,
    /// The candidate is shorter or longer than allowed
    OutOfRange,
    /// Combo mode found no email to pair the password with
    NoEmail,
    /// Combo mode account line, consumed as context
    Context,
}

/// Lifecycle of a pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running,
    Completed,
    /// Terminal; carries the reason
    Failed(String),
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Counters of a single run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub total_lines: u64,
    pub unique: u64,
    pub duplicate: u64,
    pub no_prefix: u64,
    pub structured: u64,
    pub empty: u64,
    pub out_of_range: u64,
    pub no_email: u64,
    pub context: u64,
    pub elapsed: Duration,
}

impl RunStats {
    fn record_discard(&mut self, reason: Discard) {
        match reason {
            Discard::NoPrefix => self.no_prefix += 1,
            Discard::Structured => self.structured += 1,
            Discard::Empty => self.empty += 1,
            Discard::OutOfRange => self.out_of_range += 1,
            Discard::NoEmail => self.no_email += 1,
            Discard::Context => self.context += 1,
        }
    }

    /// Lines dropped before deduplication
    pub fn discarded(&self) -> u64 {
        self.no_prefix + self.structured + self.empty + self.out_of_range + self.no_email + self.context
    }

    /// Every line is either unique, a duplicate, or discarded for a reason
    pub fn accounted_lines(&self) -> u64 {
        self.unique + self.duplicate + self.discarded()
    }

    /// Whether anything was produced or rejected as duplicate
    pub fn has_results(&self) -> bool {
        self.unique > 0 || self.duplicate > 0
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Result of one pipeline run
#[derive(Debug)]
pub struct RunReport {
    /// Accepted records in first-seen order
    pub records: Vec<String>,
    pub stats: RunStats,
    /// Set when the run failed; `records` is then not authoritative
    pub error: Option<SanitizeError>,
}

impl RunReport {
    fn failed(error: SanitizeError) -> Self {
        Self {
            records: Vec::new(),
            stats: RunStats::default(),
            error: Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Convert into a `Result`, dropping partial output of a failed run
    pub fn into_result(self) -> Result<(Vec<String>, RunStats), SanitizeError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok((self.records, self.stats)),
        }
    }
}

/// Sanitizer pipeline
///
/// Each call to [`Pipeline::run`] starts from a fresh seen-set, so running
/// twice over the same input yields identical output.
pub struct Pipeline {
    config: SanitizerConfig,
    state: PipelineState,
}

impl Pipeline {
    pub fn new(config: SanitizerConfig) -> Self {
        Self {
            config,
            state: PipelineState::Idle,
        }
    }

    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Run over infallible lines
    pub fn run_lines<I, S>(&mut self, lines: I) -> RunReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run(lines.into_iter().map(Ok::<S, Infallible>))
    }

    /// Run over a fallible line source
    ///
    /// A read error ends the run in the failed state. Records gathered up to
    /// that point are kept in the report but flagged by `error`.
    pub fn run<I, S, E>(&mut self, lines: I) -> RunReport
    where
        I: IntoIterator<Item = Result<S, E>>,
        S: AsRef<str>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        if let Err(err) = self.config.validate() {
            log::error!("Refusing to start: {}", err);
            self.state = PipelineState::Failed(err.to_string());
            return RunReport::failed(err);
        }

        self.state = PipelineState::Running;
        log::debug!(
            "Starting {} run (prefix {:?}, length {}..={})",
            self.config.mode,
            self.config.prefix,
            self.config.min_length,
            self.config.max_length
        );

        let start = Instant::now();
        let mut strategy = create_strategy(&self.config);
        let mut dedup = MemoryDeduplicator::new();
        let mut records = Vec::new();
        let mut stats = RunStats::default();
        let mut error = None;

        for line in lines {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error = Some(SanitizeError::LineRead {
                        line: stats.total_lines + 1,
                        source: e.into(),
                    });
                    break;
                }
            };

            stats.total_lines += 1;

            match strategy.process(line.as_ref()) {
                Ok(record) => {
                    if dedup.offer(&record) {
                        stats.unique += 1;
                        records.push(record);
                    } else {
                        stats.duplicate += 1;
                    }
                }
                Err(reason) => stats.record_discard(reason),
            }
        }

        stats.elapsed = start.elapsed();
        debug_assert_eq!(stats.accounted_lines(), stats.total_lines);

        match &error {
            Some(err) => {
                let reason = error_chain(err);
                log::error!("Run failed after {} lines: {}", stats.total_lines, reason);
                self.state = PipelineState::Failed(reason);
            }
            None => {
                log::debug!(
                    "Run completed: {} lines, {} unique, {} duplicates in {:?}",
                    stats.total_lines,
                    dedup.seen(),
                    stats.duplicate,
                    stats.elapsed
                );
                self.state = PipelineState::Completed;
            }
        }

        RunReport { records, stats, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;

    fn password_pipeline() -> Pipeline {
        Pipeline::new(SanitizerConfig::new("Item value:", 4, 64, Mode::PasswordList))
    }

    #[test]
    fn test_duplicates_and_length() {
        let mut pipeline = password_pipeline();
        let report = pipeline.run_lines(["Item value: abcd", "Item value: abcd", "Item value: ab"]);

        assert!(!report.is_failed());
        assert_eq!(report.records, vec!["abcd"]);
        assert_eq!(report.stats.unique, 1);
        assert_eq!(report.stats.duplicate, 1);
        assert_eq!(report.stats.out_of_range, 1);
        assert_eq!(pipeline.state(), &PipelineState::Completed);
    }

    #[test]
    fn test_combo_same_line() {
        let config = SanitizerConfig::new("Item value:", 4, 64, Mode::ComboList);
        let mut pipeline = Pipeline::new(config);
        let report = pipeline.run_lines(["Item value: secret1 user@test.com"]);

        assert_eq!(report.records, vec!["user@test.com:secret1"]);
        assert_eq!(report.stats.unique, 1);
    }

    #[test]
    fn test_json_noise() {
        let mut pipeline = password_pipeline();
        let report = pipeline.run_lines([r#"{"key":"value"}"#]);

        assert!(!report.is_failed());
        assert!(report.records.is_empty());
        assert_eq!(report.stats.structured, 1);
        assert_eq!(report.stats.duplicate, 0);
    }

    #[test]
    fn test_inverted_bounds_fail_before_running() {
        let mut pipeline = Pipeline::new(SanitizerConfig::new("Item value:", 10, 5, Mode::PasswordList));
        let report = pipeline.run_lines(["Item value: abcdefg"]);

        assert!(report.is_failed());
        assert!(report.error.as_ref().is_some_and(|e| e.is_configuration()));
        assert_eq!(report.stats.total_lines, 0);
        assert!(report.records.is_empty());
        assert!(matches!(pipeline.state(), PipelineState::Failed(_)));
    }

    #[test]
    fn test_first_seen_order() {
        let mut pipeline = password_pipeline();
        let report = pipeline.run_lines([
            "Item value: zzzz",
            "Item value: aaaa",
            "Item value: zzzz",
            "Item value: mmmm",
        ]);

        assert_eq!(report.records, vec!["zzzz", "aaaa", "mmmm"]);
    }

    #[test]
    fn test_idempotent_runs() {
        let input = [
            "Account: a@test.com",
            "Item value: hunter22",
            "Item value: hunter22",
            "Account: b@test.com",
            "Item value: hunter22",
            "Item value: x",
        ];
        let config = SanitizerConfig::new("Item value:", 4, 64, Mode::ComboList);
        let mut pipeline = Pipeline::new(config);

        let first = pipeline.run_lines(input);
        let second = pipeline.run_lines(input);

        assert_eq!(first.records, vec!["a@test.com:hunter22", "b@test.com:hunter22"]);
        assert_eq!(first.records, second.records);
        assert_eq!(first.stats.unique, second.stats.unique);
        assert_eq!(first.stats.duplicate, second.stats.duplicate);
        assert_eq!(first.stats.duplicate, 1);
    }

    #[test]
    fn test_every_line_is_accounted() {
        let input = [
            "Account: a@test.com",
            "Service: mail",
            "Item value: hunter22",
            "Item value: hunter22",
            "Item value: ab",
            "Item value:",
            r#"{"Item value:": 1}"#,
            "Account: nobody",
            "Item value: orphan-pass",
            "",
        ];
        let config = SanitizerConfig::new("Item value:", 4, 64, Mode::ComboList);
        let report = Pipeline::new(config).run_lines(input);
        let stats = &report.stats;

        assert_eq!(stats.total_lines, input.len() as u64);
        assert_eq!(stats.accounted_lines(), stats.total_lines);
        assert_eq!(stats.unique, 1);
        assert_eq!(stats.duplicate, 1);
        assert_eq!(stats.context, 2);
        assert_eq!(stats.no_prefix, 2);
        assert_eq!(stats.out_of_range, 1);
        assert_eq!(stats.empty, 1);
        assert_eq!(stats.structured, 1);
        assert_eq!(stats.no_email, 1);
    }

    #[test]
    fn test_combo_records_have_email() {
        let input = [
            "Item value: lonely-pass",
            "Account: someone@example.org",
            "Item value: paired-pass",
        ];
        let config = SanitizerConfig::new("Item value:", 4, 64, Mode::ComboList);
        let report = Pipeline::new(config).run_lines(input);

        assert_eq!(report.records, vec!["someone@example.org:paired-pass"]);
        for record in &report.records {
            let (email, _) = record.split_once(':').unwrap();
            assert!(!email.is_empty());
        }
    }

    #[test]
    fn test_read_error_marks_failed() {
        let lines: Vec<Result<&str, String>> = vec![
            Ok("Item value: first-pass"),
            Err("disk on fire".to_string()),
            Ok("Item value: never-read"),
        ];
        let mut pipeline = password_pipeline();
        let report = pipeline.run(lines);

        assert!(report.is_failed());
        assert_eq!(report.records, vec!["first-pass"]);
        assert_eq!(report.stats.total_lines, 1);
        assert!(matches!(
            report.error,
            Some(SanitizeError::LineRead { line: 2, .. })
        ));
        assert_eq!(
            pipeline.state(),
            &PipelineState::Failed("Failed to read input line 2: disk on fire".to_string())
        );
    }

    #[test]
    fn test_read_error_keeps_io_cause() {
        let lines: Vec<Result<String, SanitizeError>> = vec![Err(SanitizeError::SourceRead {
            path: "export.txt".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        })];
        let mut pipeline = password_pipeline();
        let report = pipeline.run(lines);

        let err = report.error.expect("run should fail");
        let cause = std::error::Error::source(&err).map(|e| e.to_string());
        assert_eq!(cause.as_deref(), Some(r#"Failed to read source "export.txt""#));
        assert!(error_chain(&err).ends_with("permission denied"));
        match pipeline.state() {
            PipelineState::Failed(reason) => assert!(reason.contains("permission denied")),
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_quoted_values_in_password_list() {
        let mut pipeline = password_pipeline();
        let report = pipeline.run_lines([
            "Item value: hunter2'",
            r#"Item value: "abc""def"#,
            r#"Item value: "hunter2'""#,
        ]);

        assert_eq!(report.records, vec!["hunter2'", r#""abc""def"#]);
        assert_eq!(report.stats.duplicate, 1);
    }

    #[test]
    fn test_combo_email_shaped_passwords_keep_account() {
        let config = SanitizerConfig::new("Item value:", 4, 64, Mode::ComboList);
        let report = Pipeline::new(config).run_lines([
            "Account: user@x.com",
            "Item value: Summer@Home.de2023",
            "Item value: P@ssw0rd.com1",
        ]);

        assert_eq!(
            report.records,
            vec!["user@x.com:Summer@Home.de2023", "user@x.com:P@ssw0rd.com1"]
        );
        assert_eq!(report.stats.out_of_range, 0);
    }

    #[test]
    fn test_into_result() {
        let report = password_pipeline().run_lines(["Item value: abcd"]);
        let (records, stats) = report.into_result().unwrap();

        assert_eq!(records, vec!["abcd"]);
        assert!(stats.has_results());
        assert!(stats.elapsed_seconds() >= 0.0);
    }
}
