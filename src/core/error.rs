// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Monitoring parameters were rejected before anything was armed.
    ///
    /// Examples:
    /// - zero interval passed to `start`
    /// - interval too large to express in milliseconds
    InvalidConfig(ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The idle interval must be strictly positive.
    NonPositiveInterval,

    /// The idle interval does not fit in a `u64` millisecond count.
    IntervalOverflow,
}

// ---------------- Display ----------------

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveInterval =>
                write!(f, "idle interval must be greater than zero"),
            ConfigError::IntervalOverflow =>
                write!(f, "idle interval is too large"),
        }
    }
}

impl std::error::Error for Error {}
impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::InvalidConfig(e)
    }
}
