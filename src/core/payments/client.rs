//! HTTP client for the payments API
//!
//! Every method issues exactly one request and never retries.

use super::error::PaymentsError;
use super::models::*;
use super::PaymentsEnvironment;
use crate::config::PaymentsConfig;
use crate::utils::logging::mask_secret;
use crate::utils::truncate_string;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Header carrying the payments API secret
pub const API_SECRET_HEADER: &str = "x-payman-api-secret";

/// Payments API client
#[derive(Debug, Clone)]
pub struct PaymentsClient {
    http: Client,
    base_url: String,
    api_secret: String,
}

impl PaymentsClient {
    /// Create a client against an explicit base URL
    pub fn new(
        base_url: impl Into<String>,
        api_secret: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, PaymentsError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PaymentsError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_secret: api_secret.into(),
        })
    }

    /// Create a client for an environment from configuration
    pub fn from_config(
        config: &PaymentsConfig,
        environment: PaymentsEnvironment,
        api_secret: impl Into<String>,
    ) -> Result<Self, PaymentsError> {
        Self::new(
            config.base_url(environment),
            api_secret,
            Duration::from_secs(config.timeout),
        )
    }

    /// Base URL requests go to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, PaymentsError> {
        let response = request
            .header(API_SECRET_HEADER, &self.api_secret)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body);
            warn!(
                status = status.as_u16(),
                api_key = %mask_secret(&self.api_secret),
                "Payments API request failed: {}",
                message
            );
            return Err(PaymentsError::api(status.as_u16(), message));
        }

        Ok(success_body(&body))
    }

    /// Send a payment
    pub async fn send_payment(&self, request: &SendPaymentRequest) -> Result<Value, PaymentsError> {
        debug!(amount = %request.amount_decimal, "Sending payment");
        self.send(self.http.post(self.url("/payments/send-payment")).json(request))
            .await
    }

    /// Balance for one currency, as the raw balance value
    pub async fn get_balance(&self, currency: &str) -> Result<Value, PaymentsError> {
        let segment: String = url::form_urlencoded::byte_serialize(currency.as_bytes()).collect();
        let body: Value = self
            .send(self.http.get(self.url(&format!("/balances/currencies/{}", segment))))
            .await?;

        extract_balance(&body)
            .ok_or_else(|| PaymentsError::parsing(format!("no balance in response: {}", body)))
    }

    /// Search payees; returns whatever list the API gave back
    pub async fn search_payees(&self, query: &SearchPayeesQuery) -> Result<Value, PaymentsError> {
        self.send(self.http.get(self.url("/payments/search-payees")).query(query))
            .await
    }

    /// Create a payee
    pub async fn create_payee(&self, request: &CreatePayeeRequest) -> Result<Payee, PaymentsError> {
        debug!(payee_type = %request.payee_type, "Creating payee");
        let body = self
            .send(self.http.post(self.url("/payments/payees")).json(request))
            .await?;
        Ok(lenient(body))
    }

    /// Create a customer deposit link
    pub async fn initiate_deposit(
        &self,
        request: &CustomerDepositRequest,
    ) -> Result<DepositLink, PaymentsError> {
        let body = self
            .send(
                self.http
                    .post(self.url("/payments/customer-deposit-link"))
                    .json(request),
            )
            .await?;
        Ok(lenient(body))
    }
}

/// A 2xx body means the call went through; an empty or non-JSON body becomes `Null`
fn success_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|e| {
        warn!("Payments API returned a non-JSON success body: {}", e);
        Value::Null
    })
}

/// Typed view of a success body, with absent fields left at their defaults
fn lenient<T: DeserializeOwned + Default>(body: Value) -> T {
    if body.is_null() {
        return T::default();
    }
    serde_json::from_value(body).unwrap_or_else(|e| {
        debug!("Unexpected payments response shape: {}", e);
        T::default()
    })
}

/// Best readable message from an error body
fn error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let from_json = parsed.as_ref().and_then(|v| {
        ["message", "error", "errorMessage"]
            .iter()
            .find_map(|key| v.get(*key))
            .map(|m| match m {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
    });

    match from_json {
        Some(message) => truncate_string(&message, 300),
        None if body.trim().is_empty() => "empty response".to_string(),
        None => truncate_string(body.trim(), 300),
    }
}
