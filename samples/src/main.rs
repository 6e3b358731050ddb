use anyhow::Context;
use azrest::utils::EnvUtils;
use azrest_samples::commands::{
    encrypt_secret, list_dr_configs, list_locations, list_settings, receive_named_session,
};
use azrest_samples::config::{self, SampleConfig};
use azrest_samples::constants::env_vars::MASTER_PASSWORD;
use azrest_samples::logger;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "azrest-samples", version, about = "Runnable samples for the azrest SDK")]
struct Cli {
    /// Configuration file (defaults to ./config.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Receive messages from one session of a session-enabled queue
    ReceiveNamedSession {
        #[arg(long)]
        queue: Option<String>,
        #[arg(long)]
        session_id: String,
        #[arg(long, default_value_t = 20)]
        duration_secs: u64,
        #[arg(long, default_value_t = 10)]
        max_messages: u32,
    },
    /// List App Configuration settings
    ListSettings {
        #[arg(long)]
        key: Option<String>,
        #[arg(long)]
        label: Option<String>,
    },
    /// List Event Hubs disaster recovery configs of a namespace
    ListDrConfigs {
        #[arg(long)]
        resource_group: String,
        #[arg(long)]
        namespace: String,
    },
    /// List Import/Export shipping locations
    ListImportExportLocations,
    /// Encrypt a secret for use in config.toml
    EncryptSecret {
        #[arg(long)]
        secret: String,
        /// Falls back to AZREST_MASTER_PASSWORD
        #[arg(long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    logger::setup_logger(config.logging()).context("Failed to initialize logger")?;

    run(cli.command, &config).await
}

async fn run(command: Command, config: &SampleConfig) -> anyhow::Result<()> {
    match command {
        Command::ReceiveNamedSession {
            queue,
            session_id,
            duration_secs,
            max_messages,
        } => {
            let queue_name = queue
                .or_else(|| config.servicebus().queue_name().map(str::to_string))
                .context("No queue given; pass --queue or set servicebus.queue_name")?;
            let summary = receive_named_session::run(
                config,
                receive_named_session::ReceiveOptions {
                    queue_name,
                    session_id,
                    duration: Duration::from_secs(duration_secs),
                    max_messages,
                    poll_interval: Duration::from_secs(5),
                },
            )
            .await?;
            log::info!(
                "Completed {} message(s), abandoned {}",
                summary.completed,
                summary.abandoned
            );
        }
        Command::ListSettings { key, label } => {
            list_settings::run(config, key, label).await?;
        }
        Command::ListDrConfigs {
            resource_group,
            namespace,
        } => {
            list_dr_configs::run(config, &resource_group, &namespace).await?;
        }
        Command::ListImportExportLocations => {
            let count = list_locations::run(config).await?;
            log::info!("Listed {count} location(s)");
        }
        Command::EncryptSecret { secret, password } => {
            let password = password
                .or_else(|| EnvUtils::get_optional_var(MASTER_PASSWORD))
                .with_context(|| format!("Pass --password or set {MASTER_PASSWORD}"))?;
            println!("{}", encrypt_secret::run(&secret, &password)?);
        }
    }
    Ok(())
}
