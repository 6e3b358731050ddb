use super::models::{
    AccessKeys, ArmDisasterRecovery, ArmDisasterRecoveryDefinition, CheckNameAvailabilityResult,
    DisasterRecoveryConfigNamespaceAuthorizationRule,
};
use super::EventHubManager;
use crate::common::{ResourceId, SdkResult};
use crate::services::DisasterRecoveryConfigsInner;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};

/// Geo-DR aliases of Event Hubs namespaces.
#[derive(Debug, Clone)]
pub struct DisasterRecoveryConfigs {
    manager: EventHubManager,
}

impl DisasterRecoveryConfigs {
    pub(crate) fn new(manager: EventHubManager) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &EventHubManager {
        &self.manager
    }

    fn inner(&self) -> &DisasterRecoveryConfigsInner {
        self.manager.disaster_recovery_configs_inner()
    }

    /// Start defining a new alias named `name`.
    pub fn define(&self, name: impl Into<String>) -> ArmDisasterRecoveryDefinition {
        ArmDisasterRecoveryDefinition::new(name.into(), self.manager.clone())
    }

    pub async fn check_name_availability(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        name: &str,
    ) -> SdkResult<CheckNameAvailabilityResult> {
        let inner = self
            .inner()
            .check_name_availability(resource_group_name, namespace_name, name)
            .await?;
        Ok(CheckNameAvailabilityResult::new(inner, self.manager.clone()))
    }

    pub async fn break_pairing(&self, resource_group_name: &str, namespace_name: &str, alias: &str) -> SdkResult<()> {
        self.inner()
            .break_pairing(resource_group_name, namespace_name, alias)
            .await
    }

    pub async fn fail_over(&self, resource_group_name: &str, namespace_name: &str, alias: &str) -> SdkResult<()> {
        self.inner()
            .fail_over(resource_group_name, namespace_name, alias)
            .await
    }

    /// Every alias of the namespace, across all pages.
    pub fn list(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
    ) -> BoxStream<'static, SdkResult<ArmDisasterRecovery>> {
        let manager = self.manager.clone();
        self.inner()
            .list(resource_group_name, namespace_name)
            .items()
            .map_ok(move |inner| ArmDisasterRecovery::new(inner, manager.clone()))
            .boxed()
    }

    pub async fn get(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
    ) -> SdkResult<ArmDisasterRecovery> {
        let inner = self
            .inner()
            .get(resource_group_name, namespace_name, alias)
            .await?;
        Ok(ArmDisasterRecovery::new(inner, self.manager.clone()))
    }

    pub async fn delete(&self, resource_group_name: &str, namespace_name: &str, alias: &str) -> SdkResult<()> {
        self.inner()
            .delete(resource_group_name, namespace_name, alias)
            .await
    }

    pub async fn get_authorization_rule(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
        authorization_rule_name: &str,
    ) -> SdkResult<DisasterRecoveryConfigNamespaceAuthorizationRule> {
        let inner = self
            .inner()
            .get_authorization_rule(resource_group_name, namespace_name, alias, authorization_rule_name)
            .await?;
        Ok(DisasterRecoveryConfigNamespaceAuthorizationRule::new(
            inner,
            self.manager.clone(),
        ))
    }

    /// Look an authorization rule up by its full ARM id.
    pub async fn get_authorization_rule_by_id(
        &self,
        id: &str,
    ) -> SdkResult<DisasterRecoveryConfigNamespaceAuthorizationRule> {
        let id = ResourceId::parse(id)?;
        self.get_authorization_rule(
            id.require("resourceGroups")?,
            id.require("namespaces")?,
            id.require("disasterRecoveryConfigs")?,
            id.require("AuthorizationRules")?,
        )
        .await
    }

    pub fn list_authorization_rules(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
    ) -> BoxStream<'static, SdkResult<DisasterRecoveryConfigNamespaceAuthorizationRule>> {
        let manager = self.manager.clone();
        self.inner()
            .list_authorization_rules(resource_group_name, namespace_name, alias)
            .items()
            .map_ok(move |inner| {
                DisasterRecoveryConfigNamespaceAuthorizationRule::new(inner, manager.clone())
            })
            .boxed()
    }

    pub async fn list_keys(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
        authorization_rule_name: &str,
    ) -> SdkResult<AccessKeys> {
        let inner = self
            .inner()
            .list_keys(resource_group_name, namespace_name, alias, authorization_rule_name)
            .await?;
        Ok(AccessKeys::new(inner, self.manager.clone()))
    }
}
