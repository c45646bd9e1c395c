//! Authentication support
//!
//! The service itself is stateless; the only flow it takes part in is the OAuth
//! authorization code exchange behind `POST /api/auth/token`.

pub mod oauth;

pub use oauth::OAuthClient;
