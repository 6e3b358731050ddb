//! Validated access to environment variables.

use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvVarError {
    #[error(
        "Environment variable '{name}' not found. Set it in your .env file or environment."
    )]
    NotFound { name: String },

    #[error("Environment variable '{name}' contains invalid UTF-8 characters.")]
    InvalidUtf8 { name: String },

    #[error("Environment variable '{name}' is empty.")]
    Empty { name: String },

    #[error("Environment variable '{name}' has an invalid value: {reason}")]
    Invalid { name: String, reason: String },
}

/// Environment lookups that trim whitespace and treat blank values as unset.
pub struct EnvUtils;

impl EnvUtils {
    pub fn has_non_empty_var(name: &str) -> bool {
        std::env::var(name)
            .map(|value| !value.trim().is_empty())
            .unwrap_or(false)
    }

    /// The trimmed value of `name`, which must be set and non-blank.
    pub fn get_validated_var(name: &str) -> Result<String, EnvVarError> {
        match std::env::var(name) {
            Ok(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    Err(EnvVarError::Empty {
                        name: name.to_string(),
                    })
                } else {
                    Ok(trimmed.to_string())
                }
            }
            Err(std::env::VarError::NotPresent) => Err(EnvVarError::NotFound {
                name: name.to_string(),
            }),
            Err(std::env::VarError::NotUnicode(_)) => Err(EnvVarError::InvalidUtf8 {
                name: name.to_string(),
            }),
        }
    }

    pub fn get_optional_var(name: &str) -> Option<String> {
        Self::get_validated_var(name).ok()
    }

    /// Parse `name` into `T`; unset or blank yields `None`.
    pub fn get_parsed_var<T>(name: &str) -> Result<Option<T>, EnvVarError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match Self::get_validated_var(name) {
            Ok(value) => value.parse().map(Some).map_err(|e: T::Err| EnvVarError::Invalid {
                name: name.to_string(),
                reason: e.to_string(),
            }),
            Err(EnvVarError::NotFound { .. } | EnvVarError::Empty { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
