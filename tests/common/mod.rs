//! Common test utilities for paygent
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{fixtures, mocks};
//!
//! #[actix_web::test]
//! async fn my_test() {
//!     let llm = mocks::MockLlm::start().await;
//!     let payments = mocks::MockPayments::start().await;
//!     let config = fixtures::test_config(&llm.uri(), &payments.uri());
//!     // ...
//! }
//! ```

pub mod fixtures;
pub mod mocks;

// Re-export commonly used items
pub use fixtures::{LLM_KEY, PAYMENTS_KEY, chat_body, test_config, user_message};
pub use mocks::{MockLlm, MockPayments, decode_parts, post_chat};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
