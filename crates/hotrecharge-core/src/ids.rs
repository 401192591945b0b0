//! Agent reference identifiers.
//!
//! Every request carries an `x-agent-reference` header the service uses to
//! identify and deduplicate it. A new reference is generated for each call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest reference the service accepts.
pub const MAX_REFERENCE_LEN: usize = 50;

/// A per-request correlation reference.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentReference(String);

impl AgentReference {
    /// Generate a fresh reference: a random UUID without hyphens.
    #[must_use]
    pub fn generate() -> Self {
        let reference = Self(uuid::Uuid::new_v4().simple().to_string());
        tracing::debug!(reference = %reference, "Generated agent reference");
        reference
    }

    /// Return the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AgentReference {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IdError::Empty);
        }
        let len = s.chars().count();
        if len > MAX_REFERENCE_LEN {
            return Err(IdError::TooLong { len });
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Debug for AgentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentReference({})", self.0)
    }
}

impl fmt::Display for AgentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AgentReference {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AgentReference> for String {
    fn from(reference: AgentReference) -> Self {
        reference.0
    }
}

impl AsRef<str> for AgentReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors that can occur when parsing an agent reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The reference is empty.
    #[error("agent reference must not be empty")]
    Empty,

    /// The reference exceeds [`MAX_REFERENCE_LEN`] characters.
    #[error("agent reference must not exceed {max} characters (got {len})", max = MAX_REFERENCE_LEN)]
    TooLong {
        /// Length of the rejected reference.
        len: usize,
    },
}
