//! # azrest samples
//!
//! Runnable samples for the azrest SDK. The binary wires these modules to
//! `clap` subcommands; the library exists so tests can reach them.
//!
//! ## Modules
//!
//! - [`commands`] - One module per sample
//! - [`config`] - Layered configuration (`config.toml`, `.env`, `AZREST__*`)
//! - [`constants`] - Environment variable names
//! - [`error`] - Sample error type
//! - [`logger`] - `fern` logger setup

pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod logger;

pub use error::{SampleError, SampleResult};
