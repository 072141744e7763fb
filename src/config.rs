//! Configuration management for sort operations

use crate::error::{SortError, SortResult};
use std::str::FromStr;

/// Main configuration structure for one sort invocation.
///
/// Built once from the command line and never mutated afterwards; every
/// component (sorter, merger, checker) reads the same instance, so runs
/// written under it always merge under identical ordering rules.
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// Primary comparison mode
    pub mode: SortMode,
    /// Reverse the result of comparisons
    pub reverse: bool,
    /// Output only the first of an equal run
    pub unique: bool,
    /// Key column for comparisons (1-based; 0 means the whole line)
    pub key_column: usize,
    /// Trim leading and trailing blanks from keys before comparing
    pub ignore_blanks: bool,
    /// Check whether input is sorted instead of sorting
    pub check: bool,
}

/// Comparison mode enumeration.
///
/// The typed modes are mutually exclusive by construction; when none is
/// selected comparison is raw byte-wise lexicographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Standard lexicographic sorting
    Lexicographic,
    /// Numeric sorting on a leading decimal/float prefix
    Numeric,
    /// Month name sorting (Jan..Dec)
    Month,
    /// Human-readable numeric sorting (with suffixes like K, M, G)
    HumanNumeric,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            mode: SortMode::Lexicographic,
            reverse: false,
            unique: false,
            key_column: 0,
            ignore_blanks: false,
            check: false,
        }
    }
}

impl SortConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the comparison mode
    pub fn with_mode(mut self, mode: SortMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable reverse sorting
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Enable unique output
    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Set the key column (1-based; 0 selects the whole line)
    pub fn with_key_column(mut self, column: usize) -> Self {
        self.key_column = column;
        self
    }

    /// Enable blank trimming around keys
    pub fn with_ignore_blanks(mut self, ignore_blanks: bool) -> Self {
        self.ignore_blanks = ignore_blanks;
        self
    }

    /// Enable check mode
    pub fn with_check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> SortResult<()> {
        if self.check && self.unique {
            return Err(SortError::conflicting_options(
                "--check is incompatible with --unique",
            ));
        }
        Ok(())
    }

    /// Whether a typed comparison mode (numeric, month, human) is active
    pub fn typed_mode(&self) -> bool {
        self.mode != SortMode::Lexicographic
    }
}

impl FromStr for SortMode {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lexicographic" | "text" | "default" => Ok(SortMode::Lexicographic),
            "numeric" | "n" => Ok(SortMode::Numeric),
            "month" | "m" => Ok(SortMode::Month),
            "human-numeric" | "h" => Ok(SortMode::HumanNumeric),
            _ => Err(SortError::conflicting_options(&format!(
                "unknown sort mode: {s}"
            ))),
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortMode::Lexicographic => "lexicographic",
            SortMode::Numeric => "numeric",
            SortMode::Month => "month",
            SortMode::HumanNumeric => "human-numeric",
        };
        write!(f, "{name}")
    }
}

/// Builder pattern for creating configurations
pub struct SortConfigBuilder {
    config: SortConfig,
}

impl SortConfigBuilder {
    /// Start building a new configuration
    pub fn new() -> Self {
        Self {
            config: SortConfig::default(),
        }
    }

    /// Set comparison mode
    pub fn mode(mut self, mode: SortMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Enable reverse sorting
    pub fn reverse(mut self) -> Self {
        self.config.reverse = true;
        self
    }

    /// Enable unique output
    pub fn unique(mut self) -> Self {
        self.config.unique = true;
        self
    }

    /// Set key column
    pub fn key_column(mut self, column: usize) -> Self {
        self.config.key_column = column;
        self
    }

    /// Enable blank trimming
    pub fn ignore_blanks(mut self) -> Self {
        self.config.ignore_blanks = true;
        self
    }

    /// Enable check mode
    pub fn check(mut self) -> Self {
        self.config.check = true;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SortResult<SortConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SortConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
