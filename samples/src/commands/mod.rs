//! One module per sample subcommand.

pub mod encrypt_secret;
pub mod list_dr_configs;
pub mod list_locations;
pub mod list_settings;
pub mod receive_named_session;

use crate::config::{SampleConfig, SecretSetting};
use crate::constants::env_vars::{
    AZURE_CLIENT_ID, AZURE_CLIENT_SECRET, AZURE_SUBSCRIPTION_ID, AZURE_TENANT_ID,
};
use crate::error::{SampleError, SampleResult};
use azrest::auth::{ClientSecretCredential, TokenCredential};
use azrest::utils::EnvUtils;
use std::sync::Arc;

/// A configured secret, falling back to `env_var`.
pub fn resolve_secret(setting: &SecretSetting, name: &str, env_var: &str) -> SampleResult<String> {
    if let Some(value) = setting.resolve()? {
        return Ok(value);
    }
    EnvUtils::get_optional_var(env_var).ok_or_else(|| SampleError::missing(name, env_var))
}

fn setting_or_env(value: Option<&str>, name: &str, env_var: &str) -> SampleResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .or_else(|| EnvUtils::get_optional_var(env_var))
        .ok_or_else(|| SampleError::missing(name, env_var))
}

/// Service principal credential for the ARM samples.
pub fn arm_credential(config: &SampleConfig) -> SampleResult<Arc<dyn TokenCredential>> {
    let azure = config.azure();
    let tenant_id = setting_or_env(azure.tenant_id(), "azure.tenant_id", AZURE_TENANT_ID)?;
    let client_id = setting_or_env(azure.client_id(), "azure.client_id", AZURE_CLIENT_ID)?;
    let client_secret = resolve_secret(
        &azure.client_secret(),
        "azure.client_secret",
        AZURE_CLIENT_SECRET,
    )?;

    let mut credential = ClientSecretCredential::new(tenant_id, client_id, client_secret)?;
    if let Some(host) = azure.authority_host() {
        credential = credential.with_authority_host(host);
    }
    Ok(Arc::new(credential))
}

pub fn subscription_id(config: &SampleConfig) -> SampleResult<String> {
    setting_or_env(
        config.azure().subscription_id(),
        "azure.subscription_id",
        AZURE_SUBSCRIPTION_ID,
    )
}
