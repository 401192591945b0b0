//! Core types for the Hot Recharge agent web service client.
//!
//! This crate holds the parts of the client that do no I/O:
//!
//! - **Classification**: [`classify`] and [`classify_failure`] turn a failed
//!   response into a typed [`HotRechargeError`]
//! - **Errors**: [`ErrorKind`], [`HotRechargeError`]
//! - **Reply codes**: [`ReplyCode`], the body-level status the service returns
//! - **References**: [`AgentReference`], the per-request correlation id
//!
//! # Reply codes
//!
//! Every response body carries a `ReplyCode`. `2` means success; anything else
//! is looked up in a fixed table:
//!
//! ```
//! use hotrecharge_core::{classify, ErrorKind};
//! use serde_json::json;
//!
//! let response = json!({ "ReplyCode": 208, "data": { "ReplyMsg": "Insufficient balance" } });
//! let err = classify(&response, None).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InsufficientBalance);
//! assert_eq!(err.message(), "Insufficient balance");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod classify;
pub mod error;
pub mod ids;
pub mod reply;

pub use classify::{classify, classify_failure, envelope, extract_message, FALLBACK_MESSAGE};
pub use error::{ErrorKind, HotRechargeError, Result};
pub use ids::{AgentReference, IdError, MAX_REFERENCE_LEN};
pub use reply::ReplyCode;
