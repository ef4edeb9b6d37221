//! Currency code type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A currency code as it appears in request paths, e.g. `mona`, `xrp`, `jpy`.
///
/// Codes are trimmed and lower-cased on construction; no list of supported
/// currencies is enforced, the service decides what it accepts.
///
/// ```
/// use canpay::Currency;
///
/// assert_eq!(Currency::new(" XRP ").as_str(), "xrp");
/// assert!(Currency::new("Xrp").is_xrp());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Monacoin.
    pub const MONA: &'static str = "mona";
    /// BitZeny.
    pub const ZNY: &'static str = "zny";
    /// Ripple.
    pub const XRP: &'static str = "xrp";
    /// Japanese yen.
    pub const JPY: &'static str = "jpy";

    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_xrp(&self) -> bool {
        self.0 == Self::XRP
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Currency {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<Currency> for String {
    fn from(c: Currency) -> Self {
        c.0
    }
}

impl AsRef<str> for Currency {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
