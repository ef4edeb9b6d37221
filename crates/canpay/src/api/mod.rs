//! Canpay API endpoints.
//!
//! The builders here produce [`ApiRequest`](crate::http::ApiRequest)s without
//! doing any I/O. [`Client`](crate::Client) dispatches them.

pub mod endpoints;

pub use endpoints::{BankAccount, CardExpiry, CreditCard, HistoryQuery, NewInvoice, Transfer};
pub(crate) use endpoints::CredentialGrant;
