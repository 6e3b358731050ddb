//! # azrest
//!
//! Typed clients for a handful of Azure REST services, built on one shared
//! HTTP pipeline, plus Service Bus session receipt.
//!
//! ## Modules
//!
//! - [`pipeline`] - Endpoint declarations, retries, status mapping and pagination
//! - [`auth`] - Credentials and request-signing policies (bearer, HMAC, SAS)
//! - [`models`] - Request and response bodies per service
//! - [`services`] - Inner clients: App Configuration, Event Hubs DR, Data Lake Store, Import/Export, Container Instance
//! - [`fluent`] - Wrapper types over the inner clients
//! - [`messaging`] - Receiving from Service Bus sessions
//! - [`secrets`] - Encrypting connection strings at rest
//! - [`config`] - Client options
//! - [`common`] - Errors, validation, resource ids, rate limiting
//! - [`utils`] - Environment variable helpers

pub mod auth;
pub mod common;
pub mod config;
pub mod fluent;
pub mod messaging;
pub mod models;
pub mod pipeline;
pub mod secrets;
pub mod services;
pub mod utils;

pub use common::{SdkError, SdkResult};
pub use config::ClientOptions;
pub use pipeline::{Page, Pager, Pipeline, Response};
