//! Authentication types and session state.
//!
//! Credentials live only in memory, inside a [`SessionState`] owned by the
//! client. Nothing here touches the network.

mod credentials;
mod session;
mod tokens;

pub use credentials::{Credentials, Registration};
pub use session::SessionState;
pub use tokens::{AccessToken, RefreshToken};
