use super::{arm_credential, subscription_id};
use crate::config::SampleConfig;
use crate::error::SampleResult;
use azrest::fluent::{ArmDisasterRecovery, EventHubManager};
use futures::TryStreamExt;

pub fn format_config(config: &ArmDisasterRecovery) -> String {
    format!(
        "{} role={:?} state={:?} partner={}",
        config.name().unwrap_or_default(),
        config.role(),
        config.provisioning_state(),
        config.partner_namespace().unwrap_or("-")
    )
}

pub async fn run(config: &SampleConfig, resource_group: &str, namespace: &str) -> SampleResult<usize> {
    let manager = EventHubManager::authenticate(
        arm_credential(config)?,
        subscription_id(config)?,
        config.client(),
    )?;

    let configs: Vec<ArmDisasterRecovery> = manager
        .disaster_recovery_configs()
        .list(resource_group, namespace)
        .try_collect()
        .await?;

    for dr in &configs {
        println!("{}", format_config(dr));
    }
    log::info!(
        "Found {} disaster recovery config(s) on {resource_group}/{namespace}",
        configs.len()
    );
    Ok(configs.len())
}
