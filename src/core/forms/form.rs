//! Forms for collecting tool arguments from the user

use crate::core::function_calling::{Amount, ToolName};
use crate::core::types::{ToolArguments, ToolResult};
use crate::utils::is_valid_email;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Payee types offered by the payee form
pub const PAYEE_TYPES: [&str; 4] = ["US_ACH", "WIRE", "SEPA", "CRYPTO_ADDRESS"];

/// Form errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    /// No form exists for the tool
    #[error("No form available for tool: {0}")]
    Unrenderable(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("{0} is required")]
    MissingField(String),

    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

impl FormError {
    fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// The forms the client knows how to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Payment,
    Payee,
    Confirmation,
}

impl FormKind {
    /// Form for a tool, by either the collector's or the executor's name
    pub fn for_tool(name: &str) -> Option<Self> {
        match name.parse::<ToolName>().ok()? {
            ToolName::InitiatePayment | ToolName::ProcessPayment => Some(Self::Payment),
            ToolName::AddPayee | ToolName::CreatePayee => Some(Self::Payee),
            ToolName::ConfirmPayment => Some(Self::Confirmation),
            ToolName::GetBalance
            | ToolName::SearchPayees
            | ToolName::InitiateDeposit
            | ToolName::GetPaymentMethod => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Payment => "Send Payment",
            Self::Payee => "Add New Payee",
            Self::Confirmation => "Confirm Payment",
        }
    }

    fn fields(&self) -> Vec<FormField> {
        match self {
            Self::Payment => vec![
                FormField::new("amount", "Amount", FieldKind::Number, true),
                FormField::new("currency", "Currency", FieldKind::Text, false).with_default("USD"),
                FormField::new("description", "Description", FieldKind::Text, true),
                FormField::new("recipientEmail", "Recipient Email", FieldKind::Email, true),
                FormField::new("recipientName", "Recipient Name", FieldKind::Text, false),
            ],
            Self::Payee => vec![
                FormField::new("name", "Name", FieldKind::Text, true),
                FormField::new("contactEmail", "Email", FieldKind::Email, true),
                FormField::new(
                    "type",
                    "Payment Type",
                    FieldKind::Select(PAYEE_TYPES.iter().map(|s| s.to_string()).collect()),
                    false,
                )
                .with_default("US_ACH"),
            ],
            Self::Confirmation => vec![
                FormField::new("amount", "Amount", FieldKind::Number, true),
                FormField::new("currency", "Currency", FieldKind::Text, true),
                FormField::new("description", "Description", FieldKind::Text, true),
            ],
        }
    }
}

/// Input widget of a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Select(Vec<String>),
}

/// One form field and its current value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub value: String,
    /// Used on submit when an optional field is left empty
    pub default: Option<String>,
}

impl FormField {
    fn new(name: &str, label: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required,
            value: String::new(),
            default: None,
        }
    }

    fn with_default(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    /// The value that will be submitted
    pub fn effective_value(&self) -> &str {
        let value = self.value.trim();
        match &self.default {
            Some(default) if value.is_empty() => default.as_str(),
            _ => value,
        }
    }

    fn to_json(&self) -> Result<Option<Value>, FormError> {
        let value = self.effective_value();
        if value.is_empty() {
            return if self.required {
                Err(FormError::MissingField(self.label.clone()))
            } else {
                Ok(None)
            };
        }

        match &self.kind {
            FieldKind::Text => Ok(Some(Value::String(value.to_string()))),
            FieldKind::Number => Amount::parse(value)
                .map(|amount| Some(Value::Number(amount.as_number().clone())))
                .ok_or_else(|| FormError::invalid(&self.name, "must be a number")),
            FieldKind::Email if is_valid_email(value) => Ok(Some(Value::String(value.to_string()))),
            FieldKind::Email => Err(FormError::invalid(&self.name, "must be an email address")),
            FieldKind::Select(options) if options.iter().any(|o| o == value) => {
                Ok(Some(Value::String(value.to_string())))
            }
            FieldKind::Select(options) => Err(FormError::invalid(
                &self.name,
                format!("must be one of {}", options.join(", ")),
            )),
        }
    }
}

/// A rendered form for one pending tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub kind: FormKind,
    /// Tool the submission is destined for
    pub submit_to: String,
    pub fields: Vec<FormField>,
    /// Arguments the form was rendered from; carried into the submission
    #[serde(default)]
    pub args: ToolArguments,
}

impl Form {
    /// Render the form for `tool_name`, pre-filled from `args`
    pub fn render(tool_name: &str, args: &ToolArguments) -> Result<Self, FormError> {
        let kind = FormKind::for_tool(tool_name)
            .ok_or_else(|| FormError::Unrenderable(tool_name.to_string()))?;

        let mut fields = kind.fields();
        for field in &mut fields {
            if let Some(value) = args.get(&field.name) {
                field.value = prefill(value);
            }
        }

        Ok(Self {
            kind,
            submit_to: tool_name.to_string(),
            fields,
            args: args.clone(),
        })
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Set a field's value
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        field.value = value.into();
        Ok(())
    }

    /// Required fields still empty
    pub fn missing_fields(&self) -> Vec<&FormField> {
        self.fields
            .iter()
            .filter(|f| f.required && f.effective_value().is_empty())
            .collect()
    }

    /// Validate and build the submission
    ///
    /// Field values override the rendered arguments; empty optional fields are omitted.
    pub fn submit(&self) -> Result<ToolResult, FormError> {
        let mut args = self.args.clone();
        for field in &self.fields {
            match field.to_json()? {
                Some(value) => args.insert(field.name.clone(), value),
                None => args.remove(&field.name),
            };
        }
        if self.kind == FormKind::Confirmation {
            args.insert("confirmed".to_string(), Value::Bool(true));
        }

        Ok(ToolResult::FormSubmission {
            tool_name: self.submit_to.clone(),
            args,
        })
    }
}

fn prefill(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
