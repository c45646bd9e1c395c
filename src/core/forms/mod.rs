//! Tool forms
//!
//! Renders a pending form request as fields the user can fill in, validates the
//! input, and builds the submission that goes back to the model.

mod form;
mod view;

pub use form::{FieldKind, Form, FormError, FormField, FormKind, PAYEE_TYPES};
pub use view::{ResultBody, ResultItem, ResultStatus, ToolResultView, render_tool_result};
