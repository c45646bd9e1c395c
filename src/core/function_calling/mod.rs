//! Function calling support for the payments assistant
//!
//! This module declares the closed tool set, converts it to provider wire formats,
//! and executes calls the model makes.

pub mod args;
mod conversion;
mod error;
pub mod executor;
mod registry;
pub mod types;

pub use args::{Amount, ToolArgs};
pub use conversion::convert_tools_for_provider;
pub use error::ToolError;
pub use executor::ToolExecutor;
pub use registry::ToolRegistry;
pub use types::*;
