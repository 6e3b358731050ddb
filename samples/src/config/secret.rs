use crate::constants::env_vars::MASTER_PASSWORD;
use crate::error::{SampleError, SampleResult};
use azrest::secrets::EncryptedSecret;
use azrest::utils::EnvUtils;
use serde::Deserialize;

/// A secret that may be written in plain text or sealed with the master
/// password:
///
/// ```toml
/// connection_string = "Endpoint=..."
/// # or
/// encrypted_connection_string = { value = "...", salt = "..." }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretSetting {
    plain: Option<String>,
    encrypted: Option<EncryptedSecret>,
}

impl SecretSetting {
    pub fn new(plain: Option<String>, encrypted: Option<EncryptedSecret>) -> Self {
        Self { plain, encrypted }
    }

    pub fn is_configured(&self) -> bool {
        self.plain.as_deref().is_some_and(|s| !s.trim().is_empty()) || self.encrypted.is_some()
    }

    /// The plain value, or the decrypted one when only a sealed value is set.
    pub fn resolve(&self) -> SampleResult<Option<String>> {
        if let Some(plain) = self.plain.as_deref().filter(|s| !s.trim().is_empty()) {
            return Ok(Some(plain.to_string()));
        }
        let Some(encrypted) = &self.encrypted else {
            return Ok(None);
        };
        let password = EnvUtils::get_validated_var(MASTER_PASSWORD).map_err(|_| {
            SampleError::MissingSetting(format!(
                "an encrypted secret is configured but {MASTER_PASSWORD} is not set"
            ))
        })?;
        let value = encrypted.open(&password)?;
        Ok(Some(value.to_string()))
    }
}
