//! Endpoint paths, request bodies, and descriptor builders.
//!
//! Each builder maps its inputs straight onto a method, path and body. Only
//! the credential endpoints are anonymous.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;
use crate::auth::{AccessToken, RefreshToken};
use crate::error::{Error, InvalidInputError};
use crate::http::ApiRequest;
use crate::types::Currency;

// ============================================================================
// Paths
// ============================================================================

pub const LOGIN: &str = "/users/login";
pub const REGISTER: &str = "/users/register";
pub const REFRESH_TOKEN: &str = "/refresh_token";
pub const WALLETS: &str = "/wallets";
pub const PAYMENTS: &str = "/payments";
pub const CARD_TOKENS: &str = "/card_tokens";
pub const CHARGE_JPY: &str = "/wallets/charge_jpy";
pub const BANK_ACCOUNTS: &str = "/bank_accounts";

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Serialize)]
struct EmptyBody {}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    screen_name: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshTokenRequest<'a> {
    token: &'a str,
}

#[derive(Debug, Serialize)]
struct IssueInvoiceRequest<'a> {
    currency: &'a Currency,
    fee: f64,
}

#[derive(Debug, Serialize)]
struct TransferRequest<'a> {
    amount: f64,
    to: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<u32>,
}

#[derive(Debug, Serialize)]
struct RegisterCardRequest<'a> {
    number: &'a str,
    exp_month: u8,
    exp_year: u16,
    cvc: &'a str,
}

#[derive(Debug, Serialize)]
struct ChargeJpyRequest<'a> {
    amount: u64,
    source: &'a str,
}

// ============================================================================
// Public inputs
// ============================================================================

/// A new invoice to issue.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub currency: Currency,
    /// Sent to the service as `fee`.
    pub amount: f64,
}

/// Filters for [`payment_history`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Only list invoices that were paid.
    pub paid_only: bool,
    /// Continue after this record ID.
    pub last_id: Option<String>,
}

/// A fund transfer out of one of the user's wallets.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub currency: Currency,
    pub amount: f64,
    /// Destination address.
    pub to: String,
    /// Destination tag. Required for XRP.
    pub tag: Option<u32>,
}

/// Card expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardExpiry {
    pub month: u8,
    /// Four-digit year.
    pub year: u16,
}

/// Credit card details to register with the card processor.
#[derive(Clone, PartialEq, Eq)]
pub struct CreditCard {
    pub number: String,
    pub expiry: CardExpiry,
    pub cvc: String,
}

impl std::fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditCard")
            .field("number", &"[REDACTED]")
            .field("expiry", &self.expiry)
            .field("cvc", &"[REDACTED]")
            .finish()
    }
}

/// A payout bank account.
///
/// ```
/// use canpay::api::BankAccount;
///
/// let account = BankAccount {
///     branch_code: "123".into(),
///     company: "Mizuho Bank".into(),
///     company_code: "0001".into(),
///     name: "YAMAMOTO KANTA".into(),
///     number: "1234567".into(),
///     account_type: "0".into(),
/// };
/// let body = serde_json::to_value(&account).unwrap();
/// assert_eq!(body["branchCode"], "123");
/// assert_eq!(body["type"], "0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub branch_code: String,
    pub company: String,
    pub company_code: String,
    pub name: String,
    pub number: String,
    #[serde(rename = "type")]
    pub account_type: String,
}

// ============================================================================
// Credential responses
// ============================================================================

/// Credentials and payload extracted from a login, registration or renewal
/// response.
#[derive(Debug)]
pub(crate) struct CredentialGrant {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
    pub payload: Value,
}

impl CredentialGrant {
    /// Both `jwt` and `refreshToken` must be non-empty strings. `payload` may
    /// be absent and reads as `null`.
    pub fn from_response(mut response: Value) -> Result<Self> {
        let access = take_token(&response, "jwt")?;
        let refresh = take_token(&response, "refreshToken")?;
        let payload = response
            .get_mut("payload")
            .map(Value::take)
            .unwrap_or(Value::Null);

        Ok(Self {
            access_token: AccessToken::new(access),
            refresh_token: RefreshToken::new(refresh),
            payload,
        })
    }
}

fn take_token(response: &Value, field: &'static str) -> Result<String> {
    match response.get(field).and_then(Value::as_str) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(Error::MalformedCredentialResponse { field }),
    }
}

// ============================================================================
// Descriptor builders
// ============================================================================

pub fn login(email: &str, password: &str) -> Result<ApiRequest> {
    Ok(ApiRequest::post(LOGIN)
        .json(&LoginRequest { email, password })?
        .anonymous())
}

pub fn register(email: &str, password: &str, screen_name: &str) -> Result<ApiRequest> {
    Ok(ApiRequest::post(REGISTER)
        .json(&RegisterRequest {
            email,
            password,
            screen_name,
        })?
        .anonymous())
}

/// Renewal stays anonymous so it works after the access token has expired.
pub fn refresh_token(token: &str) -> Result<ApiRequest> {
    Ok(ApiRequest::post(REFRESH_TOKEN)
        .json(&RefreshTokenRequest { token })?
        .anonymous())
}

/// `None` lists every wallet.
pub fn get_wallet(currency: Option<&Currency>) -> ApiRequest {
    let code = currency.map(Currency::as_str).unwrap_or_default();
    ApiRequest::get(format!("{WALLETS}/{code}"))
}

pub fn create_wallet(currency: &Currency) -> Result<ApiRequest> {
    ApiRequest::post(format!("{WALLETS}/{currency}")).json(&EmptyBody {})
}

pub fn get_invoice(id: &str) -> ApiRequest {
    ApiRequest::get(format!("{PAYMENTS}/{id}"))
}

pub fn pay_invoice(id: &str) -> Result<ApiRequest> {
    ApiRequest::post(format!("{PAYMENTS}/{id}/execute")).json(&EmptyBody {})
}

pub fn issue_invoice(invoice: &NewInvoice) -> Result<ApiRequest> {
    ApiRequest::post(PAYMENTS).json(&IssueInvoiceRequest {
        currency: &invoice.currency,
        fee: invoice.amount,
    })
}

pub fn payment_history(currency: &Currency, query: &HistoryQuery) -> ApiRequest {
    let mut path = format!(
        "{PAYMENTS}/history/{currency}?paidOnly={}",
        u8::from(query.paid_only)
    );
    if let Some(last_id) = query.last_id.as_deref().filter(|id| !id.is_empty()) {
        path.push_str("&lastId=");
        path.push_str(last_id);
    }
    ApiRequest::get(path)
}

/// Fails locally when an XRP transfer has no destination tag.
pub fn transfer(transfer: &Transfer) -> Result<ApiRequest> {
    if transfer.currency.is_xrp() && transfer.tag.is_none() {
        return Err(InvalidInputError::MissingTransferTag.into());
    }

    ApiRequest::post(format!("{WALLETS}/transfer_{}", transfer.currency)).json(
        &TransferRequest {
            amount: transfer.amount,
            to: &transfer.to,
            tag: transfer.tag,
        },
    )
}

pub fn get_credit_card() -> ApiRequest {
    ApiRequest::get(CARD_TOKENS)
}

pub fn register_credit_card(card: &CreditCard) -> Result<ApiRequest> {
    ApiRequest::post(CARD_TOKENS).json(&RegisterCardRequest {
        number: &card.number,
        exp_month: card.expiry.month,
        exp_year: card.expiry.year,
        cvc: &card.cvc,
    })
}

/// `source` is a card processor token (`tok_...`).
pub fn charge_jpy(amount: u64, source: &str) -> Result<ApiRequest> {
    ApiRequest::post(CHARGE_JPY).json(&ChargeJpyRequest { amount, source })
}

pub fn get_bank_account() -> ApiRequest {
    ApiRequest::get(BANK_ACCOUNTS)
}

pub fn update_bank_account(account: &BankAccount) -> Result<ApiRequest> {
    ApiRequest::put(BANK_ACCOUNTS).json(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn credential_endpoints_are_anonymous() {
        let login = login("a@b.com", "pw").unwrap();
        assert!(login.allow_anonymous());
        assert_eq!(login.path(), "/users/login");
        assert_eq!(
            login.body(),
            Some(&json!({ "email": "a@b.com", "password": "pw" }))
        );

        let register = register("a@b.com", "pw", "alice").unwrap();
        assert!(register.allow_anonymous());
        assert_eq!(
            register.body(),
            Some(&json!({ "email": "a@b.com", "password": "pw", "screenName": "alice" }))
        );

        let refresh = refresh_token("R1").unwrap();
        assert!(refresh.allow_anonymous());
        assert_eq!(refresh.path(), "/refresh_token");
        assert_eq!(refresh.body(), Some(&json!({ "token": "R1" })));
    }

    #[test]
    fn domain_endpoints_require_session() {
        let mona = Currency::new("mona");
        let invoice = NewInvoice {
            currency: mona.clone(),
            amount: 1.0,
        };
        let payout = Transfer {
            currency: mona.clone(),
            amount: 1.0,
            to: "MAddr".to_string(),
            tag: None,
        };
        let card = CreditCard {
            number: "4242424242424242".to_string(),
            expiry: CardExpiry {
                month: 12,
                year: 2030,
            },
            cvc: "123".to_string(),
        };
        let account = BankAccount {
            branch_code: "123".to_string(),
            company: "Mizuho Bank".to_string(),
            company_code: "0001".to_string(),
            name: "YAMAMOTO KANTA".to_string(),
            number: "1234567".to_string(),
            account_type: "0".to_string(),
        };

        let requests = vec![
            get_wallet(None),
            get_wallet(Some(&mona)),
            create_wallet(&mona).unwrap(),
            get_invoice("inv42"),
            pay_invoice("inv42").unwrap(),
            issue_invoice(&invoice).unwrap(),
            payment_history(&mona, &HistoryQuery::default()),
            transfer(&payout).unwrap(),
            get_credit_card(),
            register_credit_card(&card).unwrap(),
            charge_jpy(1000, "tok_visa").unwrap(),
            get_bank_account(),
            update_bank_account(&account).unwrap(),
        ];
        for request in &requests {
            assert!(!request.allow_anonymous(), "{} is anonymous", request.path());
        }
    }

    #[test]
    fn wallet_paths() {
        assert_eq!(get_wallet(None).path(), "/wallets/");
        let req = get_wallet(Some(&Currency::new("MONA")));
        assert_eq!(*req.method(), Method::GET);
        assert_eq!(req.path(), "/wallets/mona");
        assert!(req.body().is_none());

        let req = create_wallet(&Currency::new("zny")).unwrap();
        assert_eq!(*req.method(), Method::POST);
        assert_eq!(req.path(), "/wallets/zny");
        assert_eq!(req.body(), Some(&json!({})));
    }

    #[test]
    fn invoice_paths() {
        assert_eq!(get_invoice("inv42").path(), "/payments/inv42");
        assert_eq!(pay_invoice("inv42").unwrap().path(), "/payments/inv42/execute");

        let req = issue_invoice(&NewInvoice {
            currency: Currency::new("Mona"),
            amount: 1.5,
        })
        .unwrap();
        assert_eq!(req.path(), "/payments");
        assert_eq!(req.body(), Some(&json!({ "currency": "mona", "fee": 1.5 })));
    }

    #[test]
    fn payment_history_query() {
        let mona = Currency::new("mona");
        assert_eq!(
            payment_history(&mona, &HistoryQuery::default()).path(),
            "/payments/history/mona?paidOnly=0"
        );
        let query = HistoryQuery {
            paid_only: true,
            last_id: Some("5b1f".to_string()),
        };
        assert_eq!(
            payment_history(&mona, &query).path(),
            "/payments/history/mona?paidOnly=1&lastId=5b1f"
        );
        let query = HistoryQuery {
            paid_only: false,
            last_id: Some(String::new()),
        };
        assert_eq!(
            payment_history(&mona, &query).path(),
            "/payments/history/mona?paidOnly=0"
        );
    }

    #[test]
    fn xrp_transfer_requires_tag() {
        let mut t = Transfer {
            currency: Currency::new("XRP"),
            amount: 20.0,
            to: "rEb8TK3gBgk5auZkwc6sHnwrGVJH8DuaLh".to_string(),
            tag: None,
        };
        assert!(matches!(
            transfer(&t),
            Err(Error::InvalidInput(InvalidInputError::MissingTransferTag))
        ));

        t.tag = Some(12345);
        let req = transfer(&t).unwrap();
        assert_eq!(req.path(), "/wallets/transfer_xrp");
        assert_eq!(
            req.body(),
            Some(&json!({
                "amount": 20.0,
                "to": "rEb8TK3gBgk5auZkwc6sHnwrGVJH8DuaLh",
                "tag": 12345
            }))
        );
    }

    #[test]
    fn non_xrp_transfer_omits_missing_tag() {
        let req = transfer(&Transfer {
            currency: Currency::new("Mona"),
            amount: 0.5,
            to: "MLm4y3RrhvnK4BHAW4sVRbPHpHNgvkfVBe".to_string(),
            tag: None,
        })
        .unwrap();
        assert_eq!(req.path(), "/wallets/transfer_mona");
        assert_eq!(
            req.body(),
            Some(&json!({ "amount": 0.5, "to": "MLm4y3RrhvnK4BHAW4sVRbPHpHNgvkfVBe" }))
        );
    }

    #[test]
    fn card_and_bank_bodies() {
        let card = CreditCard {
            number: "4242424242424242".to_string(),
            expiry: CardExpiry {
                month: 12,
                year: 2030,
            },
            cvc: "123".to_string(),
        };
        let req = register_credit_card(&card).unwrap();
        assert_eq!(req.path(), "/card_tokens");
        assert_eq!(
            req.body(),
            Some(&json!({
                "number": "4242424242424242",
                "exp_month": 12,
                "exp_year": 2030,
                "cvc": "123"
            }))
        );
        assert!(!format!("{:?}", card).contains("4242"));

        let req = charge_jpy(1000, "tok_visa").unwrap();
        assert_eq!(req.path(), "/wallets/charge_jpy");
        assert_eq!(req.body(), Some(&json!({ "amount": 1000, "source": "tok_visa" })));

        let req = update_bank_account(&BankAccount {
            branch_code: "123".to_string(),
            company: "Mizuho Bank".to_string(),
            company_code: "0001".to_string(),
            name: "YAMAMOTO KANTA".to_string(),
            number: "1234567".to_string(),
            account_type: "0".to_string(),
        })
        .unwrap();
        assert_eq!(*req.method(), Method::PUT);
        assert_eq!(
            req.body(),
            Some(&json!({
                "branchCode": "123",
                "company": "Mizuho Bank",
                "companyCode": "0001",
                "name": "YAMAMOTO KANTA",
                "number": "1234567",
                "type": "0"
            }))
        );
    }

    #[test]
    fn credential_grant_extracts_fields() {
        let grant = CredentialGrant::from_response(json!({
            "jwt": "J1",
            "refreshToken": "R1",
            "payload": { "id": "u1" }
        }))
        .unwrap();
        assert_eq!(grant.access_token.as_str(), "J1");
        assert_eq!(grant.refresh_token.as_str(), "R1");
        assert_eq!(grant.payload, json!({ "id": "u1" }));
    }

    #[test]
    fn credential_grant_rejects_missing_or_empty_tokens() {
        let err = CredentialGrant::from_response(json!({ "refreshToken": "R1" })).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedCredentialResponse { field: "jwt" }
        ));

        let err =
            CredentialGrant::from_response(json!({ "jwt": "J1", "refreshToken": "" })).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedCredentialResponse {
                field: "refreshToken"
            }
        ));

        let err = CredentialGrant::from_response(json!({ "jwt": 7, "refreshToken": "R1" }))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedCredentialResponse { field: "jwt" }
        ));
    }

    #[test]
    fn credential_grant_missing_payload_is_null() {
        let grant =
            CredentialGrant::from_response(json!({ "jwt": "J2", "refreshToken": "R2" })).unwrap();
        assert_eq!(grant.payload, Value::Null);
    }
}
