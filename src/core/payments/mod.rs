//! Payments API integration
//!
//! Client for balances, payees, payments and deposits.

mod client;
mod error;
pub mod models;

pub use client::{API_SECRET_HEADER, PaymentsClient};
pub use error::PaymentsError;
pub use models::*;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Payments API environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentsEnvironment {
    #[default]
    Sandbox,
    Production,
}

impl PaymentsEnvironment {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Production => "production",
        }
    }
}

impl FromStr for PaymentsEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Self::Sandbox),
            "production" => Ok(Self::Production),
            other => Err(format!("Unknown payments environment: {}", other)),
        }
    }
}

impl std::fmt::Display for PaymentsEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
