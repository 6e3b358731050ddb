//! Credentials and the request-signing policies the pipeline applies.

pub mod client_secret;
pub mod connection_string;
pub mod credential;
pub mod hmac;
pub mod policy;
pub mod sas_token_generator;
pub mod token_cache;

pub use client_secret::ClientSecretCredential;
pub use connection_string::ConnectionString;
pub use credential::{AccessToken, StaticTokenCredential, TokenCredential};
pub use hmac::{HmacCredentialPolicy, SignedHeaders};
pub use policy::{AuthPolicy, BearerTokenPolicy, NoAuth};
pub use sas_token_generator::{SasTokenGenerator, SasTokenPolicy};
pub use token_cache::{CachedToken, TokenCache};
