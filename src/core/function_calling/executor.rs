//! Tool executor
//!
//! Runs one tool call to completion and always produces a `ToolResult`. Failures
//! become error results so the model can recover; nothing here is retried.

use super::args::*;
use super::registry::ToolRegistry;
use super::types::ToolName;
use crate::core::payments::{
    ContactDetails, CreatePayeeRequest, CustomerDepositRequest, PaymentsClient,
    SearchPayeesQuery, SendPaymentRequest, format_balance,
};
use crate::core::types::{ToolArguments, ToolCall, ToolResult};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Executes tool calls against the payments API
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    payments: PaymentsClient,
}

impl ToolExecutor {
    /// Create an executor
    pub fn new(registry: Arc<ToolRegistry>, payments: PaymentsClient) -> Self {
        Self { registry, payments }
    }

    /// The registry calls are resolved against
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute one call
    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        let definition = match self.registry.lookup(&call.tool_name) {
            Ok(definition) => definition,
            Err(e) => {
                warn!(
                    tool = %call.tool_name,
                    tool_call_id = %call.tool_call_id,
                    "Model called an unknown tool"
                );
                return ToolResult::error(e.to_string());
            }
        };

        let args = match ToolArgs::parse(definition.name, &call.args) {
            Ok(args) => args,
            Err(e) => {
                warn!(tool = %call.tool_name, "Rejected tool arguments: {}", e);
                return ToolResult::error(e.to_string());
            }
        };

        debug!(tool = %call.tool_name, tool_call_id = %call.tool_call_id, "Executing tool");

        match args {
            ToolArgs::InitiatePayment(args) => {
                let mut fields = ToolArguments::new();
                if let Some(amount) = args.initial_amount {
                    fields.insert("amount".to_string(), json!(amount));
                }
                insert_opt(&mut fields, "recipientEmail", args.recipient_email);
                insert_opt(&mut fields, "description", args.description);
                form_request(call, ToolName::ProcessPayment, fields)
            }
            ToolArgs::AddPayee(args) => {
                let mut fields = ToolArguments::new();
                insert_opt(&mut fields, "name", args.name);
                insert_opt(&mut fields, "contactEmail", args.email);
                insert_opt(&mut fields, "type", args.payee_type);
                form_request(call, ToolName::CreatePayee, fields)
            }
            ToolArgs::ConfirmPayment(args) => form_request(call, ToolName::ConfirmPayment, args),
            ToolArgs::GetPaymentMethod(args) => {
                form_request(call, ToolName::GetPaymentMethod, args)
            }
            ToolArgs::ProcessPayment(args) => self.process_payment(args).await,
            ToolArgs::GetBalance(args) => self.get_balance(args).await,
            ToolArgs::SearchPayees(args) => self.search_payees(args).await,
            ToolArgs::CreatePayee(args) => self.create_payee(args).await,
            ToolArgs::InitiateDeposit(args) => self.initiate_deposit(args).await,
        }
    }

    async fn process_payment(&self, args: ProcessPaymentArgs) -> ToolResult {
        let request = SendPaymentRequest {
            amount_decimal: args.amount.as_number().clone(),
            customer_email: args.recipient_email,
            customer_name: args.recipient_name,
            memo: args.description.clone(),
        };
        match self.payments.send_payment(&request).await {
            Ok(_) => {
                info!(amount = %args.amount, currency = %args.currency, "Payment processed");
                ToolResult::text(format!(
                    "Payment of {} {} successfully processed for {}",
                    args.amount, args.currency, args.description
                ))
            }
            Err(e) => ToolResult::error(format!("Failed to process payment: {}", e)),
        }
    }

    async fn get_balance(&self, args: GetBalanceArgs) -> ToolResult {
        match self.payments.get_balance(&args.currency).await {
            Ok(balance) => ToolResult::text(format!(
                "Available balance: {} {}",
                format_balance(&balance),
                args.currency
            )),
            Err(e) => ToolResult::error(format!("Failed to retrieve balance: {}", e)),
        }
    }

    async fn search_payees(&self, args: SearchPayeesArgs) -> ToolResult {
        let query = SearchPayeesQuery {
            name: args.name,
            contact_email: args.contact_email,
            payee_type: args.payee_type,
        };
        match self.payments.search_payees(&query).await {
            Ok(payees) => ToolResult::text(format!("Found payees: {}", payees)),
            Err(e) => ToolResult::error(format!("Failed to search payees: {}", e)),
        }
    }

    async fn create_payee(&self, args: CreatePayeeArgs) -> ToolResult {
        let contact = ContactDetails {
            contact_type: "individual".to_string(),
            email: args.contact_email,
            phone_number: args.contact_phone_number,
            address: args.contact_address,
            tax_id: args.contact_tax_id,
        };
        let request = CreatePayeeRequest {
            payee_type: args.payee_type,
            name: args.name.clone(),
            account_holder_name: args.account_holder_name,
            account_number: args.account_number,
            routing_number: args.routing_number,
            account_type: args.account_type,
            address: args.address,
            currency: args.currency,
            chain: args.chain,
            contact_details: (!contact.is_empty()).then_some(contact),
            tags: vec!["api_created".to_string()],
        };
        match self.payments.create_payee(&request).await {
            Ok(payee) => {
                let name = payee.name.unwrap_or(args.name);
                info!(payee_id = ?payee.id, "Payee created");
                ToolResult::text(format!("Successfully created payee: {}", name))
            }
            Err(e) => ToolResult::error(format!("Failed to create payee: {}", e)),
        }
    }

    async fn initiate_deposit(&self, args: InitiateDepositArgs) -> ToolResult {
        let request = CustomerDepositRequest {
            amount_decimal: args.amount.as_number().clone(),
            customer_id: args.customer_id,
            customer_email: args.customer_email,
            customer_name: args.customer_name,
            memo: args.memo,
        };
        match self.payments.initiate_deposit(&request).await {
            Ok(link) => match link.checkout_url {
                Some(url) => ToolResult::text(format!("Deposit initiated. Checkout URL: {}", url)),
                None => {
                    warn!("Deposit link response carried no checkout URL");
                    ToolResult::text("Deposit initiated. No checkout URL was returned.")
                }
            },
            Err(e) => ToolResult::error(format!("Failed to initiate deposit: {}", e)),
        }
    }
}

fn insert_opt(fields: &mut ToolArguments, key: &str, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        fields.insert(key.to_string(), Value::String(value));
    }
}

fn form_request(call: &ToolCall, submit_to: ToolName, args: ToolArguments) -> ToolResult {
    ToolResult::FormRequest {
        tool_call_id: call.tool_call_id.clone(),
        tool_name: call.tool_name.clone(),
        submit_to: submit_to.as_str().to_string(),
        args,
    }
}
