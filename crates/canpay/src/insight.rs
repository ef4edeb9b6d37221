//! Block-explorer ("insight") client.
//!
//! **Experimental.** This talks to a separate service that indexes the
//! Monacoin chain, not to the Canpay API, and has not been exercised against
//! production. It sends no credentials and does not go through the
//! [`RequestPipeline`](crate::http::RequestPipeline).

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::Result;
use crate::http::read_json;
use crate::types::BaseUrl;

/// Path of the multi-address transaction listing.
pub const ADDRS_TXS: &str = "/addrs/txs";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddressTxsForm<'a> {
    no_asm: u8,
    no_script_sig: u8,
    no_spent: u8,
    from: u32,
    to: u32,
    addrs: &'a str,
}

/// Which items of an address's transaction list to fetch.
///
/// Items are numbered newest first. The default is the first page the
/// insight service itself returns, items `0..30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositRange {
    pub from: u32,
    pub to: u32,
}

impl Default for DepositRange {
    fn default() -> Self {
        Self { from: 0, to: 30 }
    }
}

/// Client for an insight API instance.
#[derive(Debug, Clone)]
pub struct InsightClient {
    client: reqwest::Client,
    base: BaseUrl,
}

impl InsightClient {
    pub fn new(client: reqwest::Client, base: BaseUrl) -> Self {
        Self { client, base }
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base
    }

    /// List transactions touching any of `addrs` within `range`.
    ///
    /// The body is sent URL-encoded with the addresses comma-joined.
    #[instrument(skip(self), fields(insight = %self.base))]
    pub async fn address_transactions(&self, addrs: &[&str], range: DepositRange) -> Result<Value> {
        let joined = addrs.join(",");
        let url = self.base.join(ADDRS_TXS);
        debug!(%url, "insight request");

        let response = self
            .client
            .post(&url)
            .form(&form(&joined, range))
            .send()
            .await?;

        read_json(response).await
    }
}

fn form(addrs: &str, range: DepositRange) -> AddressTxsForm<'_> {
    AddressTxsForm {
        no_asm: 1,
        no_script_sig: 1,
        no_spent: 0,
        from: range.from,
        to: range.to,
        addrs,
    }
}

/// Pull the first wallet's deposit address out of a wallet listing.
pub(crate) fn first_wallet_address(wallets: &Value) -> Option<&str> {
    wallets.get(0)?.get("address")?.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn form_field_names() {
        let value = serde_json::to_value(form("MAddr1,MAddr2", DepositRange::default())).unwrap();
        assert_eq!(
            value,
            json!({
                "noAsm": 1,
                "noScriptSig": 1,
                "noSpent": 0,
                "from": 0,
                "to": 30,
                "addrs": "MAddr1,MAddr2"
            })
        );
    }

    #[test]
    fn custom_range_goes_into_form() {
        let range = DepositRange { from: 30, to: 60 };
        let value = serde_json::to_value(form("MAddr1", range)).unwrap();
        assert_eq!(value["from"], 30);
        assert_eq!(value["to"], 60);
    }

    #[test]
    fn first_wallet_address_reads_index_zero() {
        let wallets = json!([{ "address": "MAddr1" }, { "address": "MAddr2" }]);
        assert_eq!(first_wallet_address(&wallets), Some("MAddr1"));
        assert_eq!(first_wallet_address(&json!([])), None);
        assert_eq!(first_wallet_address(&json!({ "address": "x" })), None);
    }
}
