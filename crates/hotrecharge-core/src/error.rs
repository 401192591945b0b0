//! Error types for Hot Recharge operations.

use std::fmt;

use serde::Serialize;

/// Result type for operations that surface a classified service error.
pub type Result<T> = std::result::Result<T, HotRechargeError>;

/// The failure categories the Hot Recharge service can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// ZESA has not yet verified the transaction. It may still complete;
    /// poll it with a transaction query (at most four requests per minute).
    PendingVerification,
    /// The network operator's prepaid platform failed the recharge.
    PlatformFailure,
    /// The agent wallet does not hold enough funds.
    InsufficientBalance,
    /// The provider has no stock to fulfil the request.
    OutOfStock,
    /// The request was already received and is being processed.
    DuplicateRequest,
    /// Wrong number to recharge, or a number on an unsupported network.
    InvalidContact,
    /// Access code or password rejected.
    Unauthorized,
    /// The upstream web service failed.
    WebServiceFailure,
    /// End-user balance lookup failed (contract line, invalid number or format).
    BalanceRequestFailure,
    /// Recharge amount too small or too large.
    RechargeAmountLimit,
    /// The agent reference was already used; each request needs a unique one.
    DuplicateReference,
    /// The original transaction could not be located, or the query came after
    /// the 30 day window.
    TransactionNotFound,
    /// Anything else: unknown codes, network errors, timeouts.
    Generic,
}

impl ErrorKind {
    /// Map a reply code or HTTP status code to its error kind.
    ///
    /// Returns `None` for codes the service does not document, including the
    /// success code `2`.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            4 => Some(Self::PendingVerification),
            206 | 210 => Some(Self::PlatformFailure),
            208 => Some(Self::InsufficientBalance),
            209 => Some(Self::OutOfStock),
            216 => Some(Self::DuplicateRequest),
            217 => Some(Self::InvalidContact),
            218 | 220 | 401 => Some(Self::Unauthorized),
            219 => Some(Self::WebServiceFailure),
            221 => Some(Self::BalanceRequestFailure),
            222 => Some(Self::RechargeAmountLimit),
            429 => Some(Self::DuplicateReference),
            800 => Some(Self::TransactionNotFound),
            _ => None,
        }
    }

    /// Stable snake_case name, suitable for log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingVerification => "pending_verification",
            Self::PlatformFailure => "platform_failure",
            Self::InsufficientBalance => "insufficient_balance",
            Self::OutOfStock => "out_of_stock",
            Self::DuplicateRequest => "duplicate_request",
            Self::InvalidContact => "invalid_contact",
            Self::Unauthorized => "unauthorized",
            Self::WebServiceFailure => "web_service_failure",
            Self::BalanceRequestFailure => "balance_request_failure",
            Self::RechargeAmountLimit => "recharge_amount_limit",
            Self::DuplicateReference => "duplicate_reference",
            Self::TransactionNotFound => "transaction_not_found",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed Hot Recharge call, classified.
///
/// Carries the kind, a human-readable message and the response that produced
/// it. Fields are read-only once constructed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct HotRechargeError {
    kind: ErrorKind,
    message: String,
    raw_response: serde_json::Value,
}

impl HotRechargeError {
    /// Create a new error.
    #[must_use]
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        raw_response: serde_json::Value,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            raw_response,
        }
    }

    /// Create a [`ErrorKind::Generic`] error.
    #[must_use]
    pub fn generic(message: impl Into<String>, raw_response: serde_json::Value) -> Self {
        Self::new(ErrorKind::Generic, message, raw_response)
    }

    /// The error category.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The message reported by the service, or a fallback.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The response exactly as it was classified.
    #[must_use]
    pub const fn raw_response(&self) -> &serde_json::Value {
        &self.raw_response
    }

    /// Consume the error, returning the raw response.
    #[must_use]
    pub fn into_raw_response(self) -> serde_json::Value {
        self.raw_response
    }
}
