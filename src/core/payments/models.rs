//! Payments API request and response bodies

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// `POST /payments/send-payment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPaymentRequest {
    /// Amount exactly as the model or user gave it
    pub amount_decimal: Number,
    pub customer_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub memo: String,
}

/// Query of `GET /payments/search-payees`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayeesQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub payee_type: Option<String>,
}

/// Contact block of a new payee
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub contact_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
}

impl ContactDetails {
    /// Whether no contact field is set
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.phone_number.is_none()
            && self.address.is_none()
            && self.tax_id.is_none()
    }
}

/// `POST /payments/payees`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayeeRequest {
    /// `US_ACH`, `CRYPTO_ADDRESS`, ...
    #[serde(rename = "type")]
    pub payee_type: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_holder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_details: Option<ContactDetails>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Payee as returned by the API; unknown fields are kept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payee {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `POST /payments/customer-deposit-link`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDepositRequest {
    pub amount_decimal: Number,
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Deposit link response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositLink {
    #[serde(default)]
    pub checkout_url: Option<String>,
}

const BALANCE_FIELDS: [&str; 4] = ["spendableBalance", "balance", "amount", "available"];

/// Pull the balance out of a balance response.
///
/// Accepts a bare number, a numeric string, or an object carrying one of the usual
/// balance fields (searched one level deep).
pub fn extract_balance(value: &Value) -> Option<Value> {
    match value {
        Value::Number(_) => Some(value.clone()),
        Value::String(s) if s.trim().parse::<f64>().is_ok() => Some(value.clone()),
        Value::Object(map) => BALANCE_FIELDS
            .iter()
            .find_map(|field| map.get(*field).and_then(extract_balance))
            .or_else(|| map.values().filter(|v| v.is_object()).find_map(extract_balance)),
        _ => None,
    }
}

/// Render a balance the way it arrived: `123.45`, not `"123.45"`
pub fn format_balance(balance: &Value) -> String {
    match balance {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}
