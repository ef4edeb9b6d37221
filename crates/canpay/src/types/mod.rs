//! Validated value types.

mod base_url;
mod currency;

pub use base_url::BaseUrl;
pub use currency::Currency;
