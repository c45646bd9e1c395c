//! Type definitions for function calling
//!
//! This module contains the tool vocabulary and the schema types sent to models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::str::FromStr;

/// Function definition for AI models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Function name
    pub name: String,
    /// Function description
    pub description: Option<String>,
    /// Function parameters schema (JSON Schema)
    pub parameters: Value,
}

/// Tool definition in the OpenAI wire format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionTool {
    /// Tool type (currently only "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function definition
    pub function: FunctionDefinition,
}

/// Every tool the assistant can call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolName {
    InitiatePayment,
    ProcessPayment,
    GetBalance,
    SearchPayees,
    AddPayee,
    CreatePayee,
    InitiateDeposit,
    ConfirmPayment,
    GetPaymentMethod,
}

impl ToolName {
    /// All tools, in registry order
    pub const ALL: [ToolName; 9] = [
        ToolName::InitiatePayment,
        ToolName::ProcessPayment,
        ToolName::GetBalance,
        ToolName::SearchPayees,
        ToolName::AddPayee,
        ToolName::CreatePayee,
        ToolName::InitiateDeposit,
        ToolName::ConfirmPayment,
        ToolName::GetPaymentMethod,
    ];

    /// Name as the model sees it
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::InitiatePayment => "initiatePayment",
            ToolName::ProcessPayment => "processPayment",
            ToolName::GetBalance => "getBalance",
            ToolName::SearchPayees => "searchPayees",
            ToolName::AddPayee => "addPayee",
            ToolName::CreatePayee => "createPayee",
            ToolName::InitiateDeposit => "initiateDeposit",
            ToolName::ConfirmPayment => "confirmPayment",
            ToolName::GetPaymentMethod => "getPaymentMethod",
        }
    }
}

impl FromStr for ToolName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .iter()
            .copied()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| format!("Unknown tool: {}", s))
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a tool runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionMode {
    /// The chat route runs it inline
    ServerExecuted,
    /// The route relays it to the client unexecuted
    ClientDeferred,
}

/// Primitive parameter types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
}

/// One field of a tool's parameter schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub required: bool,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
}

impl ParameterSpec {
    /// Required field
    pub fn required(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type,
            required: true,
            description: description.to_string(),
            allowed_values: Vec::new(),
        }
    }

    /// Optional field
    pub fn optional(name: &str, param_type: ParamType, description: &str) -> Self {
        Self {
            required: false,
            ..Self::required(name, param_type, description)
        }
    }

    /// Restrict to a closed set of values
    pub fn one_of(mut self, values: &[&str]) -> Self {
        self.allowed_values = values.iter().map(|v| v.to_string()).collect();
        self
    }

    fn json_schema(&self) -> Value {
        let mut schema = json!({
            "type": self.param_type,
            "description": self.description,
        });
        if !self.allowed_values.is_empty() {
            schema["enum"] = json!(self.allowed_values);
        }
        schema
    }
}

/// HTTP call a tool maps to, shown in the tool-call panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInfo {
    pub method: String,
    pub endpoint: String,
}

impl ApiInfo {
    pub fn new(method: &str, endpoint: &str) -> Self {
        Self {
            method: method.to_string(),
            endpoint: endpoint.to_string(),
        }
    }
}

/// Declaration of one tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: ToolName,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
    pub execution_mode: ExecutionMode,
    pub api: ApiInfo,
    /// For collectors, the executor their form submits to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_to: Option<ToolName>,
}

impl ToolDefinition {
    /// Names of the required fields
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
    }

    /// Whether this tool only gathers input for another tool
    pub fn is_collector(&self) -> bool {
        self.submit_to.is_some()
    }

    /// JSON Schema of the parameters
    pub fn json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.json_schema()))
            .collect();
        let required: Vec<&str> = self.required_fields().collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Definition sent to the model
    pub fn function_definition(&self) -> FunctionDefinition {
        FunctionDefinition {
            name: self.name.as_str().to_string(),
            description: Some(self.description.clone()),
            parameters: self.json_schema(),
        }
    }
}
