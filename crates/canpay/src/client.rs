//! The Canpay client: credential lifecycle and domain operations.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::Result;
use crate::api::endpoints;
use crate::api::{BankAccount, CreditCard, CredentialGrant, HistoryQuery, NewInvoice, Transfer};
use crate::auth::{Credentials, Registration, SessionState};
use crate::config::ClientConfig;
use crate::error::Error;
use crate::http::{ApiRequest, RequestPipeline};
use crate::insight::{DepositRange, InsightClient, first_wallet_address};
use crate::types::{BaseUrl, Currency};

/// A client for one Canpay account.
///
/// Log in (or register) first; every domain operation fails with
/// [`Error::Unauthenticated`] until the client holds an access token.
///
/// Clones share the same session. Login, registration and renewal are
/// serialized per client so concurrent renewals never spend the same
/// refresh token twice.
///
/// # Example
///
/// ```no_run
/// use canpay::{Client, Credentials};
///
/// # async fn example() -> Result<(), canpay::Error> {
/// let client = Client::new()?;
/// let profile = client.login(&Credentials::new("alice@example.com", "hunter2")).await?;
/// println!("logged in: {profile}");
///
/// let wallets = client.get_wallet("mona").await?;
/// println!("{wallets}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    pipeline: RequestPipeline,
    insight: InsightClient,
    credential_lock: Mutex<()>,
}

impl Client {
    /// Create a client against the production endpoints.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http = config.http_client()?;
        let session = Arc::new(SessionState::new());

        Ok(Self {
            inner: Arc::new(ClientInner {
                pipeline: RequestPipeline::new(http.clone(), config.base_url, session),
                insight: InsightClient::new(http, config.insight_url),
                credential_lock: Mutex::new(()),
            }),
        })
    }

    pub fn base_url(&self) -> &BaseUrl {
        self.inner.pipeline.base_url()
    }

    pub fn session(&self) -> &Arc<SessionState> {
        self.inner.pipeline.session()
    }

    /// The pipeline, for endpoints this crate does not wrap.
    pub fn pipeline(&self) -> &RequestPipeline {
        &self.inner.pipeline
    }

    /// The experimental block-explorer client.
    pub fn insight(&self) -> &InsightClient {
        &self.inner.insight
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session().is_authenticated().await
    }

    /// Export the current access token.
    ///
    /// # Security
    ///
    /// Handle the returned token securely. It grants access to the account.
    pub async fn export_access_token(&self) -> Option<String> {
        self.session()
            .access_token()
            .await
            .map(|t| t.as_str().to_string())
    }

    /// Export the current refresh token.
    ///
    /// # Security
    ///
    /// Handle the returned token securely. It can be used to obtain new access tokens.
    pub async fn export_refresh_token(&self) -> Option<String> {
        self.session()
            .refresh_token()
            .await
            .map(|t| t.as_str().to_string())
    }

    // ========================================================================
    // Credential Lifecycle
    // ========================================================================

    /// Log in and store the returned tokens.
    ///
    /// Returns the response's `payload` field.
    ///
    /// # Errors
    ///
    /// On any error the stored tokens are left as they were.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Value> {
        info!("Logging in");
        let request = endpoints::login(credentials.email(), credentials.password())?;
        let _guard = self.inner.credential_lock.lock().await;
        let payload = self.acquire(&request).await?;
        debug!("Logged in successfully");
        Ok(payload)
    }

    /// Create an account. The service logs the new account in, so the
    /// returned tokens are stored just as for [`Client::login`].
    #[instrument(skip(self, registration), fields(email = %registration.email()))]
    pub async fn register(&self, registration: &Registration) -> Result<Value> {
        info!("Registering account");
        let request = endpoints::register(
            registration.email(),
            registration.password(),
            registration.screen_name(),
        )?;
        let _guard = self.inner.credential_lock.lock().await;
        let payload = self.acquire(&request).await?;
        debug!("Account registered");
        Ok(payload)
    }

    /// Exchange the refresh token for a new token pair.
    ///
    /// Runs without an access token, so it works after the access token has
    /// expired. There is no automatic retry; on failure the old tokens stay
    /// in place and the caller decides whether to log in again.
    #[instrument(skip(self))]
    pub async fn renew_token(&self) -> Result<()> {
        info!("Renewing access token");
        let _guard = self.inner.credential_lock.lock().await;

        let refresh_token = self.session().refresh_token().await;
        let token = refresh_token.as_ref().map(|t| t.as_str()).unwrap_or_default();
        self.acquire(&endpoints::refresh_token(token)?).await?;

        debug!("Access token renewed");
        Ok(())
    }

    /// Forget both tokens. Sends nothing to the service.
    pub async fn logout(&self) {
        let _guard = self.inner.credential_lock.lock().await;
        self.session().clear().await;
    }

    /// Dispatch a credential request and store its tokens if, and only if,
    /// it succeeds and carries both of them. Callers hold `credential_lock`.
    async fn acquire(&self, request: &ApiRequest) -> Result<Value> {
        let response = self.inner.pipeline.dispatch(request).await?;
        let grant = CredentialGrant::from_response(response)?;
        self.session()
            .replace(grant.access_token, grant.refresh_token)
            .await;

        Ok(grant.payload)
    }

    // ========================================================================
    // Wallets
    // ========================================================================

    /// List every wallet.
    ///
    /// Wallet records can include an XRP secret key.
    #[instrument(skip(self))]
    pub async fn get_wallets(&self) -> Result<Value> {
        self.send(endpoints::get_wallet(None)).await
    }

    /// Get the wallets for one currency.
    #[instrument(skip(self, currency))]
    pub async fn get_wallet(&self, currency: impl Into<Currency>) -> Result<Value> {
        let currency = currency.into();
        self.send(endpoints::get_wallet(Some(&currency))).await
    }

    #[instrument(skip(self, currency))]
    pub async fn create_wallet(&self, currency: impl Into<Currency>) -> Result<Value> {
        self.send(endpoints::create_wallet(&currency.into())?).await
    }

    /// Send funds out of a wallet.
    ///
    /// # Errors
    ///
    /// XRP transfers without a destination tag fail with
    /// [`Error::InvalidInput`] before anything is sent.
    #[instrument(skip(self, transfer), fields(currency = %transfer.currency))]
    pub async fn transfer(&self, transfer: &Transfer) -> Result<Value> {
        self.send(endpoints::transfer(transfer)?).await
    }

    // ========================================================================
    // Invoices
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn get_invoice(&self, id: &str) -> Result<Value> {
        self.send(endpoints::get_invoice(id)).await
    }

    #[instrument(skip(self))]
    pub async fn pay_invoice(&self, id: &str) -> Result<Value> {
        self.send(endpoints::pay_invoice(id)?).await
    }

    #[instrument(skip(self, invoice), fields(currency = %invoice.currency))]
    pub async fn issue_invoice(&self, invoice: &NewInvoice) -> Result<Value> {
        self.send(endpoints::issue_invoice(invoice)?).await
    }

    /// List invoices in one currency.
    #[instrument(skip(self, currency))]
    pub async fn get_payment_history(
        &self,
        currency: impl Into<Currency>,
        query: &HistoryQuery,
    ) -> Result<Value> {
        self.send(endpoints::payment_history(&currency.into(), query))
            .await
    }

    // ========================================================================
    // Cards and Bank Accounts
    // ========================================================================

    #[instrument(skip(self))]
    pub async fn get_credit_card(&self) -> Result<Value> {
        self.send(endpoints::get_credit_card()).await
    }

    /// Register a card. The response comes from the card processor.
    #[instrument(skip(self, card))]
    pub async fn register_credit_card(&self, card: &CreditCard) -> Result<Value> {
        self.send(endpoints::register_credit_card(card)?).await
    }

    /// Deposit yen by charging a card token (`tok_...`).
    #[instrument(skip(self, source))]
    pub async fn charge_jpy_via_credit_card(&self, amount: u64, source: &str) -> Result<Value> {
        self.send(endpoints::charge_jpy(amount, source)?).await
    }

    #[instrument(skip(self))]
    pub async fn get_bank_account(&self) -> Result<Value> {
        self.send(endpoints::get_bank_account()).await
    }

    #[instrument(skip(self, account))]
    pub async fn update_bank_account(&self, account: &BankAccount) -> Result<Value> {
        self.send(endpoints::update_bank_account(account)?).await
    }

    // ========================================================================
    // Deposit History (experimental)
    // ========================================================================

    /// Monacoin deposits to the user's first `mona` wallet, read from the
    /// insight service.
    ///
    /// Pass [`DepositRange::default()`] for the latest 30 transactions.
    /// Experimental: see [`crate::insight`].
    pub async fn monacoin_deposit_history(&self, range: DepositRange) -> Result<Value> {
        self.deposit_history(Currency::new(Currency::MONA), range)
            .await
    }

    /// BitZeny deposits to the user's first `zny` wallet, read from the
    /// insight service.
    ///
    /// Pass [`DepositRange::default()`] for the latest 30 transactions.
    /// Experimental: see [`crate::insight`].
    pub async fn bitzeny_deposit_history(&self, range: DepositRange) -> Result<Value> {
        self.deposit_history(Currency::new(Currency::ZNY), range)
            .await
    }

    #[instrument(skip(self, currency), fields(%currency))]
    async fn deposit_history(&self, currency: Currency, range: DepositRange) -> Result<Value> {
        let wallets = self.get_wallet(currency.clone()).await?;
        let address = first_wallet_address(&wallets).ok_or_else(|| Error::UnexpectedResponse {
            reason: format!("wallet listing for {currency} has no address"),
        })?;

        self.inner
            .insight
            .address_transactions(&[address], range)
            .await
    }

    async fn send(&self, request: ApiRequest) -> Result<Value> {
        self.inner.pipeline.dispatch(&request).await
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", self.base_url())
            .field("insight_url", self.inner.insight.base_url())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
