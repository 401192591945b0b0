//! Hot Recharge HTTP client implementation.

use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use hotrecharge_core::{classify_failure, envelope, AgentReference, HotRechargeError, ReplyCode};

use crate::config::{ClientOptions, Credentials};
use crate::endpoints::{self, API_ROOT};
use crate::error::ClientError;
use crate::types::{
    Currency, DataBundleRecharge, DataBundles, PinlessRecharge, RechargeResponse,
    TransactionQuery, WalletBalance, ZesaCustomer, ZesaCustomerQuery, ZesaRecharge,
    ZesaTransaction, ZesaTransactionQuery, MAX_CUSTOMER_SMS_LEN, MAX_ZESA_AMOUNT,
    MIN_ZESA_AMOUNT,
};

/// Hot Recharge agent API client.
///
/// Holds the agent credentials; every call sends them along with a freshly
/// generated `x-agent-reference`. Failed calls come back as
/// [`ClientError::Remote`] carrying the classified error.
#[derive(Debug, Clone)]
pub struct HotRechargeClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
    timeout_seconds: u64,
}

impl HotRechargeClient {
    /// Create a client against the production service.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the HTTP client cannot be built.
    pub fn new(credentials: Credentials) -> Result<Self, ClientError> {
        Self::with_options(credentials, ClientOptions::default())
    }

    /// Create a client with custom options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the base URL is empty or the
    /// HTTP client cannot be built.
    pub fn with_options(
        credentials: Credentials,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let base_url = options.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration(
                "base URL must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Configuration(format!("failed to build HTTP client: {e}")))?;

        tracing::info!(base_url = %base_url, "Hot Recharge client initialized");

        Ok(Self {
            client,
            base_url,
            credentials,
            timeout_seconds: options.timeout_seconds,
        })
    }

    /// Create a client from `HOTRECHARGE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if credentials are missing or the
    /// client cannot be built.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::with_options(Credentials::from_env()?, ClientOptions::from_env())
    }

    /// Get the agent's airtime wallet balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service reports a failure.
    pub async fn wallet_balance(&self) -> Result<WalletBalance, ClientError> {
        let request = self.request(Method::GET, endpoints::WALLET_BALANCE);
        self.send(endpoints::WALLET_BALANCE, request).await
    }

    /// Get an end user's airtime balance.
    ///
    /// # Errors
    ///
    /// Returns an error if `mobile_number` is empty, the request fails or the
    /// service reports a failure.
    pub async fn end_user_balance(&self, mobile_number: &str) -> Result<WalletBalance, ClientError> {
        require("mobile number", mobile_number)?;

        let request = self
            .request(Method::GET, endpoints::END_USER_BALANCE)
            .query(&[("targetmobile", mobile_number)]);
        self.send(endpoints::END_USER_BALANCE, request).await
    }

    /// Recharge airtime directly onto a mobile number.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] for a non-positive amount, an empty
    /// mobile number or an over-long customer SMS; otherwise an error if the
    /// request fails or the service reports a failure.
    pub async fn pinless_recharge(
        &self,
        recharge: &PinlessRecharge,
        currency: Currency,
    ) -> Result<RechargeResponse, ClientError> {
        require_positive("amount", recharge.amount)?;
        require("mobile number", &recharge.target_mobile)?;
        check_customer_sms(recharge.customer_sms.as_deref())?;

        let endpoint = match currency {
            Currency::Zwl => endpoints::RECHARGE_PINLESS,
            Currency::Usd => endpoints::RECHARGE_PINLESS_USD,
        };
        tracing::info!(
            amount = recharge.amount,
            currency = ?currency,
            target_mobile = %recharge.target_mobile,
            "Pinless recharge"
        );

        let request = self.request(Method::POST, endpoint).json(recharge);
        self.send(endpoint, request).await
    }

    /// Recharge a data bundle onto a mobile number.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] for an empty product code or mobile
    /// number or an over-long customer SMS; otherwise an error if the request
    /// fails or the service reports a failure.
    pub async fn data_bundle_recharge(
        &self,
        recharge: &DataBundleRecharge,
    ) -> Result<RechargeResponse, ClientError> {
        require("product code", &recharge.product_code)?;
        require("mobile number", &recharge.target_mobile)?;
        check_customer_sms(recharge.customer_sms.as_deref())?;

        tracing::info!(
            product_code = %recharge.product_code,
            target_mobile = %recharge.target_mobile,
            "Data bundle recharge"
        );

        let request = self
            .request(Method::POST, endpoints::RECHARGE_DATA)
            .json(recharge);
        self.send(endpoints::RECHARGE_DATA, request).await
    }

    /// List the data bundles on offer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service reports a failure.
    pub async fn data_bundles(&self) -> Result<DataBundles, ClientError> {
        let request = self.request(Method::GET, endpoints::DATA_BUNDLES);
        self.send(endpoints::DATA_BUNDLES, request).await
    }

    /// Query a previous transaction by the agent reference it was sent with.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidReference`] if the reference is empty or
    /// longer than 50 characters; otherwise an error if the request fails or
    /// the service reports a failure.
    pub async fn query_transaction(
        &self,
        agent_reference: &str,
    ) -> Result<TransactionQuery, ClientError> {
        let original: AgentReference = agent_reference.parse()?;

        tracing::info!(original_reference = %original, "Querying transaction");

        let request = self
            .request(Method::GET, endpoints::TRANSACTION_QUERY)
            .query(&[("agentReference", original.as_str())]);
        self.send(endpoints::TRANSACTION_QUERY, request).await
    }

    /// Get the agent's ZESA wallet balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service reports a failure.
    pub async fn zesa_wallet_balance(&self) -> Result<WalletBalance, ClientError> {
        let request = self.request(Method::GET, endpoints::ZESA_BALANCE);
        self.send(endpoints::ZESA_BALANCE, request).await
    }

    /// Look up the customer behind a ZESA meter.
    ///
    /// Confirm these details with the customer before calling
    /// [`recharge_zesa`](Self::recharge_zesa).
    ///
    /// # Errors
    ///
    /// Returns an error if `meter_number` is empty, the request fails or the
    /// service reports a failure.
    pub async fn enquire_zesa_customer(
        &self,
        meter_number: &str,
    ) -> Result<ZesaCustomer, ClientError> {
        require("meter number", meter_number)?;

        tracing::info!(meter_number = %meter_number, "Checking ZESA customer");

        let request = self
            .request(Method::POST, endpoints::ZESA_CUSTOMER)
            .json(&ZesaCustomerQuery { meter_number });
        self.send(endpoints::ZESA_CUSTOMER, request).await
    }

    /// Buy ZESA electricity tokens.
    ///
    /// A [`PendingVerification`](hotrecharge_core::ErrorKind::PendingVerification)
    /// failure may still complete; poll it with
    /// [`query_zesa_transaction`](Self::query_zesa_transaction).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] for an amount outside 21..=50000,
    /// empty numbers or an over-long customer SMS; otherwise an error if the
    /// request fails or the service reports a failure.
    pub async fn recharge_zesa(
        &self,
        recharge: &ZesaRecharge,
    ) -> Result<ZesaTransaction, ClientError> {
        if !(MIN_ZESA_AMOUNT..=MAX_ZESA_AMOUNT).contains(&recharge.amount) {
            return Err(ClientError::InvalidInput(format!(
                "amount must be between {MIN_ZESA_AMOUNT} and {MAX_ZESA_AMOUNT}"
            )));
        }
        require("notify mobile number", &recharge.notify_mobile)?;
        require("meter number", &recharge.meter_number)?;
        check_customer_sms(recharge.customer_sms.as_deref())?;

        tracing::info!(
            amount = recharge.amount,
            meter_number = %recharge.meter_number,
            notify_mobile = %recharge.notify_mobile,
            "ZESA recharge"
        );

        let request = self
            .request(Method::POST, endpoints::RECHARGE_ZESA)
            .json(recharge);
        self.send(endpoints::RECHARGE_ZESA, request).await
    }

    /// Query a ZESA transaction for reconciliation, ideally within 30 days of it.
    ///
    /// # Errors
    ///
    /// Returns an error if `recharge_id` is empty, the request fails or the
    /// service reports a failure.
    pub async fn query_zesa_transaction(
        &self,
        recharge_id: &str,
    ) -> Result<ZesaTransaction, ClientError> {
        require("recharge id", recharge_id)?;

        tracing::info!(recharge_id = %recharge_id, "Querying ZESA transaction");

        let request = self
            .request(Method::POST, endpoints::QUERY_ZESA)
            .json(&ZesaTransactionQuery { recharge_id });
        self.send(endpoints::QUERY_ZESA, request).await
    }

    /// Build a request carrying the credential headers and a new reference.
    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}{API_ROOT}{endpoint}", self.base_url);
        let reference = AgentReference::generate();

        self.client
            .request(method, url)
            .header("x-access-code", self.credentials.access_code())
            .header("x-access-password", self.credentials.access_password())
            .header("x-agent-reference", reference.as_str())
            .header(CONTENT_TYPE, "application/json")
            .header(CACHE_CONTROL, "no-cache")
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let (client, request) = request.build_split();
        let request = match request {
            Ok(request) => request,
            Err(err) => return Err(self.transport_failure(endpoint, &err).into()),
        };
        tracing::info!(endpoint, method = %request.method(), "Sending Hot Recharge request");

        match client.execute(request).await {
            Ok(response) => self.handle_response(endpoint, response).await,
            Err(err) => Err(self.transport_failure(endpoint, &err).into()),
        }
    }

    /// Decode a success reply or classify the failure.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return Err(self.transport_failure(endpoint, &err).into()),
        };
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if status.is_success() && ReplyCode::from_response(&body).is_some_and(ReplyCode::is_success) {
            return Ok(serde_json::from_value(body)?);
        }

        let status = (!status.is_success()).then(|| status.as_u16());
        let error = classify_failure(&envelope(body), status);

        tracing::warn!(
            endpoint,
            kind = %error.kind(),
            status,
            message = %error.message(),
            "Hot Recharge request failed"
        );

        Err(error.into())
    }

    /// Map a transport error (no usable response) to a generic failure.
    fn transport_failure(&self, endpoint: &'static str, err: &reqwest::Error) -> HotRechargeError {
        tracing::warn!(endpoint, error = %err, timeout = err.is_timeout(), "Hot Recharge transport error");

        if err.is_timeout() {
            return HotRechargeError::generic(
                format!(
                    "Request timed out ({} seconds). Try again!",
                    self.timeout_seconds
                ),
                envelope(Value::Null),
            );
        }

        classify_failure(
            &envelope(Value::Null),
            err.status().map(|status| status.as_u16()),
        )
    }
}

fn require(field: &str, value: &str) -> Result<(), ClientError> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_positive(field: &str, value: f64) -> Result<(), ClientError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ClientError::InvalidInput(format!("{field} must be a positive number")));
    }
    Ok(())
}

fn check_customer_sms(sms: Option<&str>) -> Result<(), ClientError> {
    match sms {
        Some(sms) if sms.chars().count() > MAX_CUSTOMER_SMS_LEN => Err(ClientError::InvalidInput(
            format!("customer SMS exceeds {MAX_CUSTOMER_SMS_LEN} characters"),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("agent@example.com", "secret")
    }

    #[test]
    fn client_creation() {
        let client = HotRechargeClient::new(credentials()).unwrap();
        assert_eq!(client.base_url, "https://ssl.hot.co.zw");
        assert_eq!(client.timeout_seconds, 60);
    }

    #[test]
    fn client_trims_trailing_slash() {
        let options = ClientOptions::with_base_url("http://localhost:8080/");
        let client = HotRechargeClient::with_options(credentials(), options).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn client_rejects_empty_base_url() {
        let options = ClientOptions::with_base_url(" / ");
        let err = HotRechargeClient::with_options(credentials(), options).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn request_carries_headers() {
        let client = HotRechargeClient::new(credentials()).unwrap();
        let request = client
            .request(Method::GET, endpoints::WALLET_BALANCE)
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://ssl.hot.co.zw/api/v1/agents/wallet-balance"
        );
        let headers = request.headers();
        assert_eq!(headers["x-access-code"], "agent@example.com");
        assert_eq!(headers["x-access-password"], "secret");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers[CACHE_CONTROL], "no-cache");
        assert_eq!(headers["x-agent-reference"].len(), 32);
    }

    #[test]
    fn each_request_gets_a_new_reference() {
        let client = HotRechargeClient::new(credentials()).unwrap();
        let first = client.request(Method::GET, endpoints::DATA_BUNDLES).build().unwrap();
        let second = client.request(Method::GET, endpoints::DATA_BUNDLES).build().unwrap();
        assert_ne!(
            first.headers()["x-agent-reference"],
            second.headers()["x-agent-reference"]
        );
    }

    #[test]
    fn customer_sms_limit() {
        assert!(check_customer_sms(None).is_ok());
        assert!(check_customer_sms(Some("a".repeat(MAX_CUSTOMER_SMS_LEN).as_str())).is_ok());
        assert!(check_customer_sms(Some("a".repeat(MAX_CUSTOMER_SMS_LEN + 1).as_str())).is_err());
    }

    #[test]
    fn amount_must_be_positive() {
        assert!(require_positive("amount", 0.5).is_ok());
        assert!(require_positive("amount", 0.0).is_err());
        assert!(require_positive("amount", -1.0).is_err());
        assert!(require_positive("amount", f64::NAN).is_err());
    }
}
