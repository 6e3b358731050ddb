use super::arm_credential;
use crate::config::SampleConfig;
use crate::error::SampleResult;
use azrest::Pipeline;
use azrest::auth::BearerTokenPolicy;
use azrest::models::LocationInner;
use azrest::services::LocationsClient;
use std::sync::Arc;

pub fn format_location(location: &LocationInner) -> String {
    format!(
        "{}: {}",
        location.name.as_deref().unwrap_or_default(),
        location.city().unwrap_or("-")
    )
}

pub async fn run(config: &SampleConfig) -> SampleResult<usize> {
    let policy = BearerTokenPolicy::management(arm_credential(config)?);
    let pipeline = Pipeline::with_reqwest(Arc::new(policy), config.client())?;
    let client = LocationsClient::new(pipeline);

    let locations = client.list().collect_all().await?;
    for location in &locations {
        println!("{}", format_location(location));
    }
    Ok(locations.len())
}
