use super::DisasterRecoveryConfigs;
use crate::auth::{BearerTokenPolicy, TokenCredential};
use crate::common::SdkResult;
use crate::config::ClientOptions;
use crate::pipeline::Pipeline;
use crate::services::DisasterRecoveryConfigsInner;
use std::sync::Arc;

/// Entry point for Event Hubs management. Cloning is cheap and every clone
/// shares the same pipeline.
#[derive(Debug, Clone)]
pub struct EventHubManager {
    inner: Arc<ManagerInner>,
}

#[derive(Debug)]
struct ManagerInner {
    pipeline: Pipeline,
    subscription_id: String,
    disaster_recovery_configs: DisasterRecoveryConfigsInner,
}

impl EventHubManager {
    pub fn new(pipeline: Pipeline, subscription_id: impl Into<String>) -> Self {
        let subscription_id = subscription_id.into();
        let disaster_recovery_configs =
            DisasterRecoveryConfigsInner::new(pipeline.clone(), subscription_id.clone());
        Self {
            inner: Arc::new(ManagerInner {
                pipeline,
                subscription_id,
                disaster_recovery_configs,
            }),
        }
    }

    /// Manager authenticated against ARM with `credential`.
    pub fn authenticate(
        credential: Arc<dyn TokenCredential>,
        subscription_id: impl Into<String>,
        options: &ClientOptions,
    ) -> SdkResult<Self> {
        let policy = BearerTokenPolicy::management(credential);
        let pipeline = Pipeline::with_reqwest(Arc::new(policy), options)?;
        Ok(Self::new(pipeline, subscription_id))
    }

    /// Same manager talking to a different ARM endpoint.
    pub fn with_endpoint(self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        let disaster_recovery_configs = self
            .inner
            .disaster_recovery_configs
            .clone()
            .with_endpoint(endpoint);
        Self {
            inner: Arc::new(ManagerInner {
                pipeline: self.inner.pipeline.clone(),
                subscription_id: self.inner.subscription_id.clone(),
                disaster_recovery_configs,
            }),
        }
    }

    pub fn subscription_id(&self) -> &str {
        &self.inner.subscription_id
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.inner.pipeline
    }

    pub fn disaster_recovery_configs(&self) -> DisasterRecoveryConfigs {
        DisasterRecoveryConfigs::new(self.clone())
    }

    pub(crate) fn disaster_recovery_configs_inner(&self) -> &DisasterRecoveryConfigsInner {
        &self.inner.disaster_recovery_configs
    }
}
