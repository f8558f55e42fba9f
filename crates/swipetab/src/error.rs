//! Error types for swipetab.
//!
//! Runtime navigation never fails: bad jumps and racing requests are dropped.
//! The only surfaced error is [`ConfigError`]; [`ScrollToIndexError`] is
//! recovered inside the auto-scroll controller.

use thiserror::Error;

/// Errors from loading or validating a [`crate::TabViewConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parse or serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// TOML parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A field holds a value outside its valid range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted field path
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// The tab strip cannot scroll to an index directly, typically because the
/// tab has not been measured yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot scroll to tab {index}: not measured")]
pub struct ScrollToIndexError {
    /// Requested tab index
    pub index: usize,
}
