//! Hot Recharge Client SDK.
//!
//! This crate provides a client library for agents of the Hot Recharge web
//! service: wallet balances, airtime, data bundle and ZESA electricity top-ups,
//! and transaction queries.
//!
//! # Example
//!
//! ```no_run
//! use hotrecharge_client::{Credentials, Currency, HotRechargeClient, PinlessRecharge};
//! use hotrecharge_client::ErrorKind;
//!
//! # async fn example() -> Result<(), hotrecharge_client::ClientError> {
//! let client = HotRechargeClient::new(Credentials::new("agent@example.com", "password"))?;
//!
//! let balance = client.wallet_balance().await?;
//! println!("Wallet balance: {}", balance.wallet_balance);
//!
//! match client
//!     .pinless_recharge(&PinlessRecharge::new(1.0, "0777000000"), Currency::Usd)
//!     .await
//! {
//!     Ok(recharge) => println!("Recharged, final balance {}", recharge.final_balance),
//!     Err(err) if err.kind() == Some(ErrorKind::InsufficientBalance) => {
//!         println!("Top up the wallet first");
//!     }
//!     Err(err) => return Err(err),
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod config;
pub mod endpoints;
mod error;
mod types;

pub use client::HotRechargeClient;
pub use config::{ClientOptions, Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
pub use error::ClientError;
pub use hotrecharge_core::{AgentReference, ErrorKind, HotRechargeError, ReplyCode, FALLBACK_MESSAGE};
pub use types::*;
