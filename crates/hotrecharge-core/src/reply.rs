//! The body-level reply code.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Application-level status returned in every response body as `ReplyCode`.
///
/// The service sends it either as a JSON number or as a numeric string; both
/// are accepted and compared by value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "i64")]
pub struct ReplyCode(i64);

impl ReplyCode {
    /// The only code that means success.
    pub const SUCCESS: Self = Self(2);

    /// Create a reply code from its integer value.
    #[must_use]
    pub const fn new(code: i64) -> Self {
        Self(code)
    }

    /// The integer value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Whether this is the success code.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == Self::SUCCESS.0
    }

    /// Read a code from a JSON value.
    ///
    /// Integers, integral floats and strings holding an integer are usable.
    /// Everything else (fractions, booleans, non-numeric text, null) is not.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().or_else(|| integral(n.as_f64()?)),
            serde_json::Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| integral(s.parse::<f64>().ok()?))
            }
            _ => None,
        }
        .map(Self)
    }

    /// Read the `ReplyCode` field of a response object, if it is usable.
    #[must_use]
    pub fn from_response(response: &serde_json::Value) -> Option<Self> {
        response.get("ReplyCode").and_then(Self::from_json)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15).then_some(f as i64)
}

impl TryFrom<serde_json::Value> for ReplyCode {
    type Error = String;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Self::from_json(&value).ok_or_else(|| format!("invalid reply code: {value}"))
    }
}

impl From<ReplyCode> for i64 {
    fn from(code: ReplyCode) -> Self {
        code.0
    }
}

impl fmt::Debug for ReplyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReplyCode({})", self.0)
    }
}

impl fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
