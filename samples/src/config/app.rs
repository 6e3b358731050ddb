use super::secret::SecretSetting;
use azrest::ClientOptions;
use azrest::secrets::EncryptedSecret;
use serde::Deserialize;

/// Everything the samples read from `config.toml` and `AZREST__*`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SampleConfig {
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    client: ClientOptions,
    #[serde(default)]
    servicebus: ServiceBusConfig,
    #[serde(default)]
    app_configuration: AppConfigurationConfig,
    #[serde(default)]
    azure: AzureConfig,
}

impl SampleConfig {
    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn client(&self) -> &ClientOptions {
        &self.client
    }

    pub fn servicebus(&self) -> &ServiceBusConfig {
        &self.servicebus
    }

    pub fn app_configuration(&self) -> &AppConfigurationConfig {
        &self.app_configuration
    }

    pub fn azure(&self) -> &AzureConfig {
        &self.azure
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref().filter(|f| !f.trim().is_empty())
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ServiceBusConfig {
    connection_string: Option<String>,
    encrypted_connection_string: Option<EncryptedSecret>,
    queue_name: Option<String>,
}

impl ServiceBusConfig {
    pub fn connection_string(&self) -> SecretSetting {
        SecretSetting::new(
            self.connection_string.clone(),
            self.encrypted_connection_string.clone(),
        )
    }

    pub fn queue_name(&self) -> Option<&str> {
        self.queue_name.as_deref()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfigurationConfig {
    connection_string: Option<String>,
    encrypted_connection_string: Option<EncryptedSecret>,
}

impl AppConfigurationConfig {
    pub fn connection_string(&self) -> SecretSetting {
        SecretSetting::new(
            self.connection_string.clone(),
            self.encrypted_connection_string.clone(),
        )
    }
}

/// Service principal used for the ARM samples.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct AzureConfig {
    tenant_id: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    encrypted_client_secret: Option<EncryptedSecret>,
    subscription_id: Option<String>,
    authority_host: Option<String>,
}

impl AzureConfig {
    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn client_secret(&self) -> SecretSetting {
        SecretSetting::new(
            self.client_secret.clone(),
            self.encrypted_client_secret.clone(),
        )
    }

    pub fn subscription_id(&self) -> Option<&str> {
        self.subscription_id.as_deref()
    }

    pub fn authority_host(&self) -> Option<&str> {
        self.authority_host.as_deref()
    }
}
