//! Conversion configuration.
//!
//! All tuning knobs are carried explicitly per invocation so concurrent
//! callers never interfere; there are no process-wide defaults hidden in the
//! engine.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default wall-clock bound on reading one spreadsheet workbook.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

/// Minimum fraction of non-null values that must parse numerically for a
/// column to classify as Integer/Float.
pub const DEFAULT_NUMERIC_THRESHOLD: f64 = 0.90;

/// Minimum fraction of non-null values that must parse as dates for a column
/// to classify as DateTime.
pub const DEFAULT_DATE_THRESHOLD: f64 = 0.50;

/// Fraction of time-only-looking values that vetoes date classification.
pub const DEFAULT_TIME_ONLY_THRESHOLD: f64 = 0.50;

/// Sentinel strings meaning "missing value".
pub const DEFAULT_NULL_TOKENS: [&str; 10] = [
    "NA", "N/A", "NULL", "null", "na", "n/a", "None", "NONE", "-", "",
];

/// Naming policy for output tables derived from sheet names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputNaming {
    /// Filesystem-safe transform of the source sheet name.
    #[default]
    HumanReadable,
    /// Opaque unique identifier; avoids collisions and avoids leaking sheet
    /// names into public datasets.
    Anonymized,
}

/// Explicit per-call configuration for the conversion engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Raw strings (post-trim, exact match) treated as missing.
    pub null_tokens: BTreeSet<String>,
    /// See [`DEFAULT_NUMERIC_THRESHOLD`].
    pub numeric_threshold: f64,
    /// See [`DEFAULT_DATE_THRESHOLD`].
    pub date_threshold: f64,
    /// See [`DEFAULT_TIME_ONLY_THRESHOLD`].
    pub time_only_threshold: f64,
    /// Wall-clock bound on reading one spreadsheet workbook.
    pub read_timeout: Duration,
    /// Sheet/file naming policy for outputs.
    pub naming: OutputNaming,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            null_tokens: default_null_tokens(),
            numeric_threshold: DEFAULT_NUMERIC_THRESHOLD,
            date_threshold: DEFAULT_DATE_THRESHOLD,
            time_only_threshold: DEFAULT_TIME_ONLY_THRESHOLD,
            read_timeout: DEFAULT_READ_TIMEOUT,
            naming: OutputNaming::default(),
        }
    }
}

impl ConvertOptions {
    /// Replace the null-token vocabulary.
    #[must_use]
    pub fn with_null_tokens(mut self, tokens: BTreeSet<String>) -> Self {
        self.null_tokens = tokens;
        self
    }

    /// Set the numeric classification threshold.
    #[must_use]
    pub fn with_numeric_threshold(mut self, threshold: f64) -> Self {
        self.numeric_threshold = threshold;
        self
    }

    /// Set the date classification threshold.
    #[must_use]
    pub fn with_date_threshold(mut self, threshold: f64) -> Self {
        self.date_threshold = threshold;
        self
    }

    /// Set the time-only rejection threshold.
    #[must_use]
    pub fn with_time_only_threshold(mut self, threshold: f64) -> Self {
        self.time_only_threshold = threshold;
        self
    }

    /// Set the spreadsheet read timeout.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the output naming policy.
    #[must_use]
    pub fn with_naming(mut self, naming: OutputNaming) -> Self {
        self.naming = naming;
        self
    }

    /// True when the raw string (post-trim) is a null token.
    #[must_use]
    pub fn is_null_token(&self, raw: &str) -> bool {
        self.null_tokens.contains(raw.trim())
    }
}

/// The default null-token vocabulary as an owned set.
#[must_use]
pub fn default_null_tokens() -> BTreeSet<String> {
    DEFAULT_NULL_TOKENS.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.numeric_threshold, 0.90);
        assert_eq!(options.date_threshold, 0.50);
        assert_eq!(options.time_only_threshold, 0.50);
        assert_eq!(options.read_timeout, Duration::from_secs(60));
        assert_eq!(options.naming, OutputNaming::HumanReadable);
        assert_eq!(options.null_tokens.len(), 10);
    }

    #[test]
    fn test_is_null_token_trims() {
        let options = ConvertOptions::default();
        assert!(options.is_null_token("  NA  "));
        assert!(options.is_null_token(""));
        assert!(options.is_null_token("   "));
        assert!(!options.is_null_token("0"));
        assert!(!options.is_null_token("nan"));
    }

    #[test]
    fn test_builders() {
        let options = ConvertOptions::default()
            .with_numeric_threshold(0.8)
            .with_read_timeout(Duration::from_secs(5))
            .with_naming(OutputNaming::Anonymized);
        assert_eq!(options.numeric_threshold, 0.8);
        assert_eq!(options.read_timeout, Duration::from_secs(5));
        assert_eq!(options.naming, OutputNaming::Anonymized);
    }

    #[test]
    fn test_custom_null_tokens() {
        let tokens: BTreeSet<String> = ["missing".to_string()].into_iter().collect();
        let options = ConvertOptions::default().with_null_tokens(tokens);
        assert!(options.is_null_token("missing"));
        assert!(!options.is_null_token("NA"));
    }
}
