use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DispatchError;

/// Host selection policy.
///
/// The integer encoding (`1` and `2`) is the external representation used by
/// configuration; anything else is rejected when converting into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "PolicyRepr")]
pub enum Policy {
    /// Strict round-robin: serve the front host, then move it to the back
    Sequential,
    /// First host under the load threshold, otherwise the least loaded one
    Optimized,
}

impl Policy {
    pub const SEQUENTIAL_CODE: i64 = 1;
    pub const OPTIMIZED_CODE: i64 = 2;

    pub fn code(self) -> i64 {
        match self {
            Policy::Sequential => Self::SEQUENTIAL_CODE,
            Policy::Optimized => Self::OPTIMIZED_CODE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Policy::Sequential => "sequential",
            Policy::Optimized => "optimized",
        }
    }

    /// Whether dispatching under this policy changes the pool order
    pub fn rotates(self) -> bool {
        matches!(self, Policy::Sequential)
    }
}

impl TryFrom<i64> for Policy {
    type Error = DispatchError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            Self::SEQUENTIAL_CODE => Ok(Policy::Sequential),
            Self::OPTIMIZED_CODE => Ok(Policy::Optimized),
            other => Err(DispatchError::invalid_configuration(format!(
                "unknown balancing policy {} (expected 1 = sequential or 2 = optimized)",
                other
            ))),
        }
    }
}

impl FromStr for Policy {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Policy::try_from(code);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "sequential" => Ok(Policy::Sequential),
            "optimized" => Ok(Policy::Optimized),
            _ => Err(DispatchError::invalid_configuration(format!(
                "unknown balancing policy '{}'",
                trimmed
            ))),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepted on-disk forms of a policy: the integer code or its name.
#[derive(Deserialize)]
#[serde(untagged)]
enum PolicyRepr {
    Code(i64),
    Name(String),
}

impl TryFrom<PolicyRepr> for Policy {
    type Error = DispatchError;

    fn try_from(repr: PolicyRepr) -> Result<Self, Self::Error> {
        match repr {
            PolicyRepr::Code(code) => Policy::try_from(code),
            PolicyRepr::Name(name) => name.parse(),
        }
    }
}
