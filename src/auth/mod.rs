// file: src/auth/mod.rs
// description: authentication module exports
// reference: internal module structure

pub mod credential;
pub mod policy;
pub mod strategy;

pub use credential::{AccessToken, DefaultCredential, KeyCredential, SEARCH_SCOPE, TokenCredential};
pub use policy::{API_KEY_HEADER, AuthPolicy};
pub use strategy::AuthStrategy;
