//! Typed tool arguments
//!
//! The model sends a loose JSON object. Each executor tool parses it into its own
//! struct here, so a missing required field fails before any payments request.

use super::error::ToolError;
use super::types::ToolName;
use crate::core::types::ToolArguments;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// A monetary amount passed through exactly as given
///
/// Models and forms send either a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Amount(pub Number);

impl Amount {
    /// Parse a user-entered amount
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Number(n)) => Some(Self(n)),
            _ => None,
        }
    }

    /// The number sent to the payments API
    pub fn as_number(&self) -> &Number {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => Ok(Self(n)),
            Value::String(s) => {
                Self::parse(&s).ok_or_else(|| de::Error::custom(format!("invalid amount: {}", s)))
            }
            other => Err(de::Error::custom(format!("invalid amount: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentArgs {
    pub initial_amount: Option<Amount>,
    pub recipient_email: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPaymentArgs {
    pub amount: Amount,
    pub currency: String,
    pub description: String,
    pub recipient_email: String,
    pub recipient_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetBalanceArgs {
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayeesArgs {
    pub name: Option<String>,
    pub contact_email: Option<String>,
    #[serde(rename = "type")]
    pub payee_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AddPayeeArgs {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub payee_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayeeArgs {
    #[serde(rename = "type")]
    pub payee_type: String,
    pub name: String,
    pub account_holder_name: Option<String>,
    pub account_number: Option<String>,
    pub routing_number: Option<String>,
    pub account_type: Option<String>,
    pub address: Option<String>,
    pub currency: Option<String>,
    pub chain: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone_number: Option<String>,
    pub contact_address: Option<String>,
    pub contact_tax_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateDepositArgs {
    pub amount: Amount,
    pub customer_id: String,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    pub memo: Option<String>,
}

/// Parsed arguments of one call, one variant per tool
#[derive(Debug, Clone, PartialEq)]
pub enum ToolArgs {
    InitiatePayment(InitiatePaymentArgs),
    ProcessPayment(ProcessPaymentArgs),
    GetBalance(GetBalanceArgs),
    SearchPayees(SearchPayeesArgs),
    AddPayee(AddPayeeArgs),
    CreatePayee(CreatePayeeArgs),
    InitiateDeposit(InitiateDepositArgs),
    /// Client-deferred tools keep their raw arguments
    ConfirmPayment(ToolArguments),
    GetPaymentMethod(ToolArguments),
}

impl ToolArgs {
    /// Parse raw arguments for a tool
    pub fn parse(name: ToolName, args: &ToolArguments) -> Result<Self, ToolError> {
        Ok(match name {
            ToolName::InitiatePayment => Self::InitiatePayment(decode(name, args)?),
            ToolName::ProcessPayment => Self::ProcessPayment(decode(name, args)?),
            ToolName::GetBalance => Self::GetBalance(decode(name, args)?),
            ToolName::SearchPayees => Self::SearchPayees(decode(name, args)?),
            ToolName::AddPayee => Self::AddPayee(decode(name, args)?),
            ToolName::CreatePayee => Self::CreatePayee(decode(name, args)?),
            ToolName::InitiateDeposit => Self::InitiateDeposit(decode(name, args)?),
            ToolName::ConfirmPayment => Self::ConfirmPayment(args.clone()),
            ToolName::GetPaymentMethod => Self::GetPaymentMethod(args.clone()),
        })
    }
}

fn decode<T: DeserializeOwned>(name: ToolName, args: &ToolArguments) -> Result<T, ToolError> {
    // Models sometimes send null for omitted optionals
    let cleaned: ToolArguments = args
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    serde_json::from_value(Value::Object(cleaned))
        .map_err(|e| ToolError::invalid_arguments(name.as_str(), e.to_string()))
}
