//! Chat turn orchestration
//!
//! One turn streams the model's answer, runs the tools it calls in order, and feeds
//! their results back until the model stops, a form is needed, or the step limit is
//! reached.

mod conversation;
mod turn;

pub use conversation::to_model_messages;
pub use turn::ChatTurn;
