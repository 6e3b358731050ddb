use azrest::SdkError;
use azrest::secrets::EncryptionError;
use thiserror::Error;

/// Failures the samples report before handing off to `anyhow` in `main`.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("Configuration loading failed: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Missing setting: {0}")]
    MissingSetting(String),

    #[error("Secret could not be decrypted: {0}")]
    Secret(#[from] EncryptionError),

    #[error(transparent)]
    Sdk(#[from] SdkError),

    #[error("Service Bus error: {0}")]
    ServiceBus(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SampleError {
    pub fn missing(setting: &str, env_var: &str) -> Self {
        SampleError::MissingSetting(format!(
            "{setting} is not configured; set it in config.toml or export {env_var}"
        ))
    }
}

pub type SampleResult<T> = Result<T, SampleError>;
