//! canpay - Canpay payment API client
//!
//! An async client for the Canpay service: log in, keep the session tokens in
//! memory, and call wallet, invoice, transfer, card and bank-account
//! endpoints. All authenticated operations flow through a [`Client`].
//!
//! Responses are returned as [`serde_json::Value`] exactly as the service
//! sent them.
//!
//! # Example
//!
//! ```no_run
//! use canpay::{Client, Credentials};
//! use canpay::api::HistoryQuery;
//!
//! # async fn example() -> Result<(), canpay::Error> {
//! let client = Client::new()?;
//! client.login(&Credentials::new("alice@example.com", "hunter2")).await?;
//!
//! let invoice = client.get_invoice("5b1f0c2e9d").await?;
//! println!("{}", invoice["status"]);
//!
//! let paid = HistoryQuery { paid_only: true, ..Default::default() };
//! let history = client.get_payment_history("mona", &paid).await?;
//! println!("{history}");
//!
//! // Later, when the service rejects the access token:
//! client.renew_token().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod insight;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, Registration, SessionState};
pub use client::Client;
pub use config::ClientConfig;
pub use error::Error;
pub use types::{BaseUrl, Currency};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
