//! Tool registry
//!
//! Declares every tool's schema and execution mode. The registry does not validate
//! arguments; the executor and the form renderer do.

use super::types::*;
use crate::core::function_calling::ToolError;
use std::collections::HashMap;

impl ToolDefinition {
    /// The declaration of one tool
    pub fn for_tool(name: ToolName) -> Self {
        use ParamType::{Number, String};
        use ParameterSpec as P;

        let (description, parameters, execution_mode, api, submit_to) = match name {
            ToolName::InitiatePayment => (
                "Start the process of making a payment by collecting necessary information",
                vec![
                    P::optional("initialAmount", Number, "Initial amount if known"),
                    P::optional("recipientEmail", String, "Recipient email if known"),
                    P::optional("description", String, "Payment description if known"),
                ],
                ExecutionMode::ServerExecuted,
                ApiInfo::new("POST", "/payments/send-payment"),
                Some(ToolName::ProcessPayment),
            ),
            ToolName::ProcessPayment => (
                "Process a payment with complete information",
                vec![
                    P::required("amount", Number, "The amount to pay"),
                    P::required("currency", String, "The currency code (e.g., USD)"),
                    P::required("description", String, "Description of the payment"),
                    P::required("recipientEmail", String, "Email of the payment recipient"),
                    P::optional("recipientName", String, "Name of the payment recipient"),
                ],
                ExecutionMode::ServerExecuted,
                ApiInfo::new("POST", "/payments/send-payment"),
                None,
            ),
            ToolName::GetBalance => (
                "Get the available balance",
                vec![P::required("currency", String, "The currency code (e.g., USD)")],
                ExecutionMode::ServerExecuted,
                ApiInfo::new("GET", "/balances/currencies/{currency}"),
                None,
            ),
            ToolName::SearchPayees => (
                "Search for payees the user can pay",
                vec![
                    P::optional("name", String, "Name to filter by (partial match)"),
                    P::optional("contactEmail", String, "Email to filter by"),
                    P::optional("type", String, "Payee type (e.g., US_ACH)"),
                ],
                ExecutionMode::ServerExecuted,
                ApiInfo::new("GET", "/payments/search-payees"),
                None,
            ),
            ToolName::AddPayee => (
                "Start adding a new payee by collecting necessary information",
                vec![
                    P::optional("name", String, "Payee name if known"),
                    P::optional("email", String, "Payee contact email if known"),
                    P::optional("type", String, "Payee type if known (e.g., US_ACH)"),
                ],
                ExecutionMode::ServerExecuted,
                ApiInfo::new("POST", "/payments/payees"),
                Some(ToolName::CreatePayee),
            ),
            ToolName::CreatePayee => (
                "Create a new payee",
                vec![
                    P::required("type", String, "Payee type")
                        .one_of(&["US_ACH", "CRYPTO_ADDRESS", "WIRE", "SEPA"]),
                    P::required("name", String, "Full name of the payee"),
                    P::optional("accountHolderName", String, "Bank account holder name"),
                    P::optional("accountNumber", String, "Bank account number"),
                    P::optional("routingNumber", String, "Bank routing number"),
                    P::optional("accountType", String, "Account type")
                        .one_of(&["checking", "savings"]),
                    P::optional("address", String, "Crypto wallet address"),
                    P::optional("currency", String, "Currency of the crypto address"),
                    P::optional("chain", String, "Blockchain of the crypto address"),
                    P::optional("contactEmail", String, "Contact email"),
                    P::optional("contactPhoneNumber", String, "Contact phone number"),
                    P::optional("contactAddress", String, "Physical address"),
                    P::optional("contactTaxId", String, "Tax ID (SSN/EIN)"),
                ],
                ExecutionMode::ServerExecuted,
                ApiInfo::new("POST", "/payments/payees"),
                None,
            ),
            ToolName::InitiateDeposit => (
                "Request money from someone",
                vec![
                    P::required("amount", Number, "Amount to deposit"),
                    P::required("customerId", String, "Customer ID"),
                    P::optional("customerEmail", String, "Customer email"),
                    P::optional("customerName", String, "Customer name"),
                    P::optional("memo", String, "Deposit memo"),
                ],
                ExecutionMode::ServerExecuted,
                ApiInfo::new("POST", "/payments/customer-deposit-link"),
                None,
            ),
            ToolName::ConfirmPayment => (
                "Ask the user to confirm a payment before processing",
                vec![
                    P::required("amount", Number, "The amount to pay"),
                    P::required("currency", String, "The currency code"),
                    P::required("description", String, "Description of the payment"),
                ],
                ExecutionMode::ClientDeferred,
                ApiInfo::new("CLIENT", "client://confirmPayment"),
                None,
            ),
            ToolName::GetPaymentMethod => (
                "Get the user's preferred payment method",
                vec![],
                ExecutionMode::ClientDeferred,
                ApiInfo::new("CLIENT", "client://getPaymentMethod"),
                None,
            ),
        };

        Self {
            name,
            description: description.to_string(),
            parameters,
            execution_mode,
            api,
            submit_to,
        }
    }
}

/// Registry of all tools
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
    by_name: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    /// The standard payments tool set
    pub fn standard() -> Self {
        let tools: Vec<ToolDefinition> =
            ToolName::ALL.into_iter().map(ToolDefinition::for_tool).collect();
        let by_name = tools
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.as_str(), i))
            .collect();
        Self { tools, by_name }
    }

    /// Look up a tool by the name the model used
    pub fn lookup(&self, name: &str) -> Result<&ToolDefinition, ToolError> {
        self.by_name
            .get(name)
            .map(|i| &self.tools[*i])
            .ok_or_else(|| ToolError::NotFound(name.to_string()))
    }

    /// Definition of a known tool
    pub fn get(&self, name: ToolName) -> Option<&ToolDefinition> {
        self.lookup(name.as_str()).ok()
    }

    /// All definitions
    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Definitions in the shape sent to models
    pub fn function_definitions(&self) -> Vec<FunctionDefinition> {
        self.tools.iter().map(|t| t.function_definition()).collect()
    }

    /// HTTP mapping shown for a tool name; unknown tools get a placeholder
    pub fn api_info(&self, name: &str) -> ApiInfo {
        self.lookup(name)
            .map(|t| t.api.clone())
            .unwrap_or_else(|_| ApiInfo::new("UNKNOWN", name))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
