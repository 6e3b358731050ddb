use super::resolve_secret;
use crate::config::SampleConfig;
use crate::constants::env_vars::APP_CONFIGURATION_CONNECTION_STRING;
use crate::error::SampleResult;
use azrest::models::{ConfigurationSetting, SettingSelector};
use azrest::services::ConfigurationClient;
use futures::TryStreamExt;

pub fn format_setting(setting: &ConfigurationSetting) -> String {
    format!(
        "{} [{}] = {}{}",
        setting.key,
        setting.label.as_deref().unwrap_or("(no label)"),
        setting.value.as_deref().unwrap_or_default(),
        if setting.is_locked() { " (locked)" } else { "" }
    )
}

pub async fn run(config: &SampleConfig, key: Option<String>, label: Option<String>) -> SampleResult<usize> {
    let connection_string = resolve_secret(
        &config.app_configuration().connection_string(),
        "app_configuration.connection_string",
        APP_CONFIGURATION_CONNECTION_STRING,
    )?;
    let client = ConfigurationClient::from_connection_string(&connection_string, config.client())?;

    let mut selector = SettingSelector::new();
    if let Some(key) = key {
        selector = selector.with_keys([key]);
    }
    if let Some(label) = label {
        selector = selector.with_labels([label]);
    }

    let mut settings = client.list_settings(&selector).items();
    let mut count = 0;
    while let Some(setting) = settings.try_next().await? {
        println!("{}", format_setting(&setting));
        count += 1;
    }
    log::info!("Listed {count} setting(s) from {}", client.endpoint());
    Ok(count)
}
