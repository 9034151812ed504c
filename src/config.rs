use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::matching::matcher::{MatcherConfig, DEFAULT_MAX_CANDIDATES, DEFAULT_MIN_MATCH_LEN};
use crate::pipeline::compare::CompareOptions;
use crate::similarity::scores::Metric;

/// Default n-gram window, in tokens.
pub const DEFAULT_NGRAM_SIZE: usize = 3;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every value
/// has a default; CLI flags override whatever the environment set.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Shortest matched segment worth reporting (DOCSIM_MIN_MATCH_LEN)
    pub min_match_len: usize,
    /// Token window for the n-gram metric (DOCSIM_NGRAM_SIZE)
    pub ngram_size: usize,
    /// Unconsumed candidates the matcher tries per position (DOCSIM_MAX_CANDIDATES)
    pub max_candidates: usize,
    /// Case-insensitive segment matching (DOCSIM_IGNORE_CASE)
    pub ignore_case: bool,
    /// Skip stop-word removal during tokenization (DOCSIM_KEEP_STOP_WORDS)
    pub keep_stop_words: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_match_len: DEFAULT_MIN_MATCH_LEN,
            ngram_size: DEFAULT_NGRAM_SIZE,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            ignore_case: false,
            keep_stop_words: false,
        }
    }
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub min_match_len: Option<usize>,
    pub ngram_size: Option<usize>,
    pub ignore_case: bool,
    pub keep_stop_words: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. `load` uses the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            min_match_len: parse_var(&lookup, "DOCSIM_MIN_MATCH_LEN", defaults.min_match_len)?,
            ngram_size: parse_var(&lookup, "DOCSIM_NGRAM_SIZE", defaults.ngram_size)?,
            max_candidates: parse_var(&lookup, "DOCSIM_MAX_CANDIDATES", defaults.max_candidates)?,
            ignore_case: parse_flag(&lookup, "DOCSIM_IGNORE_CASE")?,
            keep_stop_words: parse_flag(&lookup, "DOCSIM_KEEP_STOP_WORDS")?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI overrides and re-validate.
    pub fn apply_overrides(mut self, overrides: &Overrides) -> Result<Self> {
        if let Some(len) = overrides.min_match_len {
            self.min_match_len = len;
        }
        if let Some(size) = overrides.ngram_size {
            self.ngram_size = size;
        }
        // Flags can only switch behavior on
        self.ignore_case |= overrides.ignore_case;
        self.keep_stop_words |= overrides.keep_stop_words;
        self.validate()?;
        Ok(self)
    }

    /// Reject sizes the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.min_match_len == 0 {
            anyhow::bail!(
                "Minimum match length must be at least 1 (DOCSIM_MIN_MATCH_LEN / --min-match-len)"
            );
        }
        if self.ngram_size == 0 {
            anyhow::bail!("N-gram size must be at least 1 (DOCSIM_NGRAM_SIZE / --ngram-size)");
        }
        if self.max_candidates == 0 {
            anyhow::bail!("DOCSIM_MAX_CANDIDATES must be at least 1");
        }
        Ok(())
    }

    pub fn matcher_config(&self) -> MatcherConfig {
        MatcherConfig {
            min_match_len: self.min_match_len,
            max_candidates_per_anchor: self.max_candidates,
            ignore_case: self.ignore_case,
        }
    }

    pub fn compare_options(&self, metrics: Vec<Metric>) -> CompareOptions {
        CompareOptions {
            metrics,
            ngram_size: self.ngram_size,
            matcher: self.matcher_config(),
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {key}: {raw:?}")),
        _ => Ok(default),
    }
}

fn parse_flag<F>(lookup: &F, key: &str) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    const TRUTHY: [&str; 4] = ["1", "true", "yes", "on"];
    const FALSY: [&str; 4] = ["0", "false", "no", "off"];

    match lookup(key).as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if TRUTHY.iter().any(|t| v.eq_ignore_ascii_case(t)) => Ok(true),
        Some(v) if FALSY.iter().any(|f| v.eq_ignore_ascii_case(f)) => Ok(false),
        Some(v) => anyhow::bail!("Invalid value for {key}: {v:?} (expected true or false)"),
    }
}
