/// Environment variable names read by the samples.
///
/// Everything under the `AZREST__` prefix is also picked up by the layered
/// configuration loader; the rest are conventional Azure SDK names used as
/// fallbacks.
//
// Service Bus
pub const SERVICEBUS_CONNECTION_STRING: &str = "AZURE_SERVICEBUS_NAMESPACE_CONNECTION_STRING";

// App Configuration
pub const APP_CONFIGURATION_CONNECTION_STRING: &str = "AZURE_APPCONFIG_CONNECTION_STRING";

// Azure AD service principal
pub const AZURE_TENANT_ID: &str = "AZURE_TENANT_ID";
pub const AZURE_CLIENT_ID: &str = "AZURE_CLIENT_ID";
pub const AZURE_CLIENT_SECRET: &str = "AZURE_CLIENT_SECRET";
pub const AZURE_SUBSCRIPTION_ID: &str = "AZURE_SUBSCRIPTION_ID";

// Decrypts `encrypted_*` values in config.toml
pub const MASTER_PASSWORD: &str = "AZREST_MASTER_PASSWORD";

// Layered configuration
pub const CONFIG_ENV_PREFIX: &str = "AZREST";
pub const CONFIG_ENV_SEPARATOR: &str = "__";
