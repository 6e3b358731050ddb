use crate::constants::env_vars::{CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR};
use crate::error::SampleResult;
use ::config::{Config, Environment, File};
use std::path::{Path, PathBuf};

pub mod app;
pub mod secret;

pub use app::{AppConfigurationConfig, AzureConfig, LoggingConfig, SampleConfig, ServiceBusConfig};
pub use secret::SecretSetting;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// `config.toml` in the working directory, else `$CONFIG_DIR/azrest/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|dir| dir.join("azrest").join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

/// Load configuration: `.env`, then the config file (optional), then
/// `AZREST__*` environment variables, later sources overriding earlier ones.
pub fn load_config(path: Option<&Path>) -> SampleResult<SampleConfig> {
    dotenv::dotenv().ok();

    let mut builder = Config::builder();
    match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => {
            log::debug!("Reading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(false));
        }
        None => log::debug!("No {CONFIG_FILE_NAME} found, using environment only"),
    }

    let config = builder
        .add_source(
            Environment::with_prefix(CONFIG_ENV_PREFIX)
                .prefix_separator(CONFIG_ENV_SEPARATOR)
                .separator(CONFIG_ENV_SEPARATOR),
        )
        .build()?;

    Ok(config.try_deserialize::<SampleConfig>()?)
}
