//! Output mode strategies
//!
//! A strategy turns one raw line into an output record or a discard reason.
//! The password list strategy is stateless; the combo list strategy carries
//! the most recent account email across lines.

use crate::classifier::LineClassifier;
use crate::config::{Mode, SanitizerConfig};
use crate::email::EmailExtractor;
use crate::filter::LengthFilter;
use crate::pipeline::Discard;

/// Per-line processing for one output mode
pub trait ModeStrategy {
    /// Turn a raw line into an output record, or say why it was dropped
    fn process(&mut self, line: &str) -> Result<String, Discard>;

    /// The mode this strategy implements
    fn mode(&self) -> Mode;
}

/// Emits bare passwords
#[derive(Debug, Clone)]
pub struct PasswordListMode {
    classifier: LineClassifier,
    filter: LengthFilter,
}

impl PasswordListMode {
    pub fn new(classifier: LineClassifier, filter: LengthFilter) -> Self {
        Self { classifier, filter }
    }
}

impl ModeStrategy for PasswordListMode {
    fn process(&mut self, line: &str) -> Result<String, Discard> {
        let candidate = self.classifier.inspect(line)?;

        if !self.filter.accept(candidate) {
            return Err(Discard::OutOfRange);
        }

        Ok(candidate.to_string())
    }

    fn mode(&self) -> Mode {
        Mode::PasswordList
    }
}

/// Email remembered from an account line
#[derive(Debug, Clone)]
struct AccountContext {
    email: String,
    line: u64,
}

/// Emits `email:password` pairs
///
/// An email token on the password line itself wins. Otherwise the email of the
/// last account line is used, as long as it was seen at most `window` lines
/// earlier. An account line without a recognizable email clears the context.
#[derive(Debug, Clone)]
pub struct ComboListMode {
    classifier: LineClassifier,
    filter: LengthFilter,
    extractor: EmailExtractor,
    account_prefix: String,
    window: u64,
    line: u64,
    context: Option<AccountContext>,
}

impl ComboListMode {
    pub fn new(
        classifier: LineClassifier,
        filter: LengthFilter,
        extractor: EmailExtractor,
        account_prefix: &str,
        window: usize,
    ) -> Self {
        Self {
            classifier,
            filter,
            extractor,
            account_prefix: account_prefix.to_string(),
            window: window as u64,
            line: 0,
            context: None,
        }
    }

    /// Email of the current account, if still within the window
    fn context_email(&self) -> Option<&str> {
        self.context
            .as_ref()
            .filter(|ctx| self.line - ctx.line <= self.window)
            .map(|ctx| ctx.email.as_str())
    }

    fn update_context(&mut self, rest: &str) {
        self.context = self.extractor.extract(rest).map(|email| AccountContext {
            email: email.to_string(),
            line: self.line,
        });

        match &self.context {
            Some(ctx) => log::trace!("line {}: account {}", self.line, ctx.email),
            None => log::trace!("line {}: account line without email", self.line),
        }
    }
}

impl ModeStrategy for ComboListMode {
    fn process(&mut self, line: &str) -> Result<String, Discard> {
        self.line += 1;

        // Account lines always replace the context, even when they carry noise
        if let Some(pos) = line.find(self.account_prefix.as_str()) {
            let rest = &line[pos + self.account_prefix.len()..];
            self.update_context(rest);
            return Err(Discard::Context);
        }

        let candidate = self.classifier.inspect(line)?;
        let (password, inline_email) = self.extractor.split(candidate);

        if !self.filter.accept(&password) {
            return Err(Discard::OutOfRange);
        }

        let email = inline_email
            .or_else(|| self.context_email())
            .ok_or(Discard::NoEmail)?;

        Ok(format!("{}:{}", email, password))
    }

    fn mode(&self) -> Mode {
        Mode::ComboList
    }
}

/// Build the strategy selected by the configuration
pub fn create_strategy(config: &SanitizerConfig) -> Box<dyn ModeStrategy> {
    let classifier = LineClassifier::new(&config.prefix);
    let filter = LengthFilter::new(config.min_length, config.max_length);

    match config.mode {
        Mode::PasswordList => Box::new(PasswordListMode::new(classifier, filter)),
        Mode::ComboList => Box::new(ComboListMode::new(
            classifier,
            filter,
            EmailExtractor::new(),
            &config.account_prefix,
            config.email_window,
        )),
    }
}
