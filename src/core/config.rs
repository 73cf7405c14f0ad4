// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::str::FromStr;

/// What `resume` does when the store has no last-action record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingRecordPolicy {
    /// Time out immediately on resume.
    #[default]
    Timeout,

    /// Pretend the last action happened at the moment of resume.
    AssumeNoElapsed,
}

impl MissingRecordPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissingRecordPolicy::Timeout => "timeout",
            MissingRecordPolicy::AssumeNoElapsed => "assume-now",
        }
    }
}

impl fmt::Display for MissingRecordPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissingRecordPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('_', "-");
        match norm.as_str() {
            "timeout" | "expire" => Ok(MissingRecordPolicy::Timeout),
            "assume-now" | "now" | "no-elapsed" => Ok(MissingRecordPolicy::AssumeNoElapsed),
            other => Err(format!(
                "unknown missing-record policy '{other}' (expected 'timeout' or 'assume-now')"
            )),
        }
    }
}
