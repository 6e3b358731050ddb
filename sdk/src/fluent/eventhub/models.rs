use super::EventHubManager;
use crate::common::{ResourceId, SdkError, SdkResult};
use crate::models::{
    AccessKeysInner, AccessRights, ArmDisasterRecoveryInner, AuthorizationRuleInner,
    CheckNameAvailabilityResultInner, ProvisioningStateDR, RoleDisasterRecovery,
    UnavailableReason,
};

/// Namespace coordinates of a nested resource, read from its ARM id.
fn parent_of(id: Option<&str>, kind: &str) -> SdkResult<(String, String, ResourceId)> {
    let id = id.ok_or_else(|| SdkError::Validation(format!("{kind} has no resource id")))?;
    let id = ResourceId::parse(id)?;
    let resource_group = id.require("resourceGroups")?.to_string();
    let namespace = id.require("namespaces")?.to_string();
    Ok((resource_group, namespace, id))
}

#[derive(Debug, Clone)]
pub struct CheckNameAvailabilityResult {
    inner: CheckNameAvailabilityResultInner,
    manager: EventHubManager,
}

impl CheckNameAvailabilityResult {
    pub(crate) fn new(inner: CheckNameAvailabilityResultInner, manager: EventHubManager) -> Self {
        Self { inner, manager }
    }

    pub fn manager(&self) -> &EventHubManager {
        &self.manager
    }

    pub fn inner(&self) -> &CheckNameAvailabilityResultInner {
        &self.inner
    }

    pub fn message(&self) -> Option<&str> {
        self.inner.message.as_deref()
    }

    pub fn name_available(&self) -> Option<bool> {
        self.inner.name_available
    }

    pub fn reason(&self) -> Option<UnavailableReason> {
        self.inner.reason
    }
}

/// A Geo-DR alias pairing a primary and a secondary namespace.
#[derive(Debug, Clone)]
pub struct ArmDisasterRecovery {
    inner: ArmDisasterRecoveryInner,
    manager: EventHubManager,
}

impl ArmDisasterRecovery {
    pub(crate) fn new(inner: ArmDisasterRecoveryInner, manager: EventHubManager) -> Self {
        Self { inner, manager }
    }

    pub fn manager(&self) -> &EventHubManager {
        &self.manager
    }

    pub fn inner(&self) -> &ArmDisasterRecoveryInner {
        &self.inner
    }

    pub fn id(&self) -> Option<&str> {
        self.inner.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.inner.resource_type.as_deref()
    }

    pub fn provisioning_state(&self) -> Option<ProvisioningStateDR> {
        self.inner.provisioning_state()
    }

    pub fn partner_namespace(&self) -> Option<&str> {
        self.inner.partner_namespace()
    }

    pub fn alternate_name(&self) -> Option<&str> {
        self.inner.alternate_name()
    }

    pub fn role(&self) -> Option<RoleDisasterRecovery> {
        self.inner.role()
    }

    pub fn pending_replication_operations_count(&self) -> Option<i64> {
        self.inner.pending_replication_operations_count()
    }

    /// Re-read the alias from the service.
    pub async fn refresh(&mut self) -> SdkResult<()> {
        let (resource_group, namespace, _) = parent_of(self.id(), "ArmDisasterRecovery")?;
        let alias = self
            .name()
            .ok_or_else(|| SdkError::Validation("ArmDisasterRecovery has no name".to_string()))?
            .to_string();
        self.inner = self
            .manager
            .disaster_recovery_configs_inner()
            .get(&resource_group, &namespace, &alias)
            .await?;
        Ok(())
    }
}

/// First stage of [`DisasterRecoveryConfigs::define`](super::DisasterRecoveryConfigs::define):
/// only the owning namespace can be set.
#[derive(Debug, Clone)]
pub struct ArmDisasterRecoveryDefinition {
    name: String,
    manager: EventHubManager,
}

impl ArmDisasterRecoveryDefinition {
    pub(crate) fn new(name: String, manager: EventHubManager) -> Self {
        Self { name, manager }
    }

    pub fn with_existing_namespace(
        self,
        resource_group_name: impl Into<String>,
        namespace_name: impl Into<String>,
    ) -> ArmDisasterRecoveryCreatable {
        ArmDisasterRecoveryCreatable {
            name: self.name,
            resource_group_name: resource_group_name.into(),
            namespace_name: namespace_name.into(),
            inner: ArmDisasterRecoveryInner::default(),
            manager: self.manager,
        }
    }
}

/// A definition with its namespace set, ready to [`create`](Self::create).
#[derive(Debug, Clone)]
pub struct ArmDisasterRecoveryCreatable {
    name: String,
    resource_group_name: String,
    namespace_name: String,
    inner: ArmDisasterRecoveryInner,
    manager: EventHubManager,
}

impl ArmDisasterRecoveryCreatable {
    /// ARM id of the secondary namespace.
    pub fn with_partner_namespace(mut self, partner_namespace: impl Into<String>) -> Self {
        self.inner = self.inner.with_partner_namespace(partner_namespace);
        self
    }

    /// Needed when the alias equals the primary namespace name.
    pub fn with_alternate_name(mut self, alternate_name: impl Into<String>) -> Self {
        self.inner = self.inner.with_alternate_name(alternate_name);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn create(self) -> SdkResult<ArmDisasterRecovery> {
        log::info!(
            "Creating disaster recovery config {} on namespace {}/{}",
            self.name,
            self.resource_group_name,
            self.namespace_name
        );
        let inner = self
            .manager
            .disaster_recovery_configs_inner()
            .create_or_update(
                &self.resource_group_name,
                &self.namespace_name,
                &self.name,
                &self.inner,
            )
            .await?;
        Ok(ArmDisasterRecovery::new(inner, self.manager))
    }
}

/// An authorization rule reachable through a Geo-DR alias.
#[derive(Debug, Clone)]
pub struct DisasterRecoveryConfigNamespaceAuthorizationRule {
    inner: AuthorizationRuleInner,
    manager: EventHubManager,
}

impl DisasterRecoveryConfigNamespaceAuthorizationRule {
    pub(crate) fn new(inner: AuthorizationRuleInner, manager: EventHubManager) -> Self {
        Self { inner, manager }
    }

    pub fn manager(&self) -> &EventHubManager {
        &self.manager
    }

    pub fn inner(&self) -> &AuthorizationRuleInner {
        &self.inner
    }

    pub fn id(&self) -> Option<&str> {
        self.inner.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.inner.resource_type.as_deref()
    }

    pub fn rights(&self) -> &[AccessRights] {
        self.inner.rights()
    }

    fn coordinates(&self) -> SdkResult<[String; 4]> {
        let (resource_group, namespace, id) =
            parent_of(self.id(), "DisasterRecoveryConfigNamespaceAuthorizationRule")?;
        Ok([
            resource_group,
            namespace,
            id.require("disasterRecoveryConfigs")?.to_string(),
            id.require("AuthorizationRules")?.to_string(),
        ])
    }

    pub async fn refresh(&mut self) -> SdkResult<()> {
        let [resource_group, namespace, alias, rule] = self.coordinates()?;
        self.inner = self
            .manager
            .disaster_recovery_configs_inner()
            .get_authorization_rule(&resource_group, &namespace, &alias, &rule)
            .await?;
        Ok(())
    }

    pub async fn list_keys(&self) -> SdkResult<AccessKeys> {
        let [resource_group, namespace, alias, rule] = self.coordinates()?;
        let inner = self
            .manager
            .disaster_recovery_configs_inner()
            .list_keys(&resource_group, &namespace, &alias, &rule)
            .await?;
        Ok(AccessKeys::new(inner, self.manager.clone()))
    }
}

/// Connection strings and keys of an authorization rule.
#[derive(Clone)]
pub struct AccessKeys {
    inner: AccessKeysInner,
    manager: EventHubManager,
}

impl AccessKeys {
    pub(crate) fn new(inner: AccessKeysInner, manager: EventHubManager) -> Self {
        Self { inner, manager }
    }

    pub fn manager(&self) -> &EventHubManager {
        &self.manager
    }

    pub fn inner(&self) -> &AccessKeysInner {
        &self.inner
    }

    pub fn primary_connection_string(&self) -> Option<&str> {
        self.inner.primary_connection_string.as_deref()
    }

    pub fn secondary_connection_string(&self) -> Option<&str> {
        self.inner.secondary_connection_string.as_deref()
    }

    pub fn alias_primary_connection_string(&self) -> Option<&str> {
        self.inner.alias_primary_connection_string.as_deref()
    }

    pub fn alias_secondary_connection_string(&self) -> Option<&str> {
        self.inner.alias_secondary_connection_string.as_deref()
    }

    pub fn primary_key(&self) -> Option<&str> {
        self.inner.primary_key.as_deref()
    }

    pub fn secondary_key(&self) -> Option<&str> {
        self.inner.secondary_key.as_deref()
    }

    pub fn key_name(&self) -> Option<&str> {
        self.inner.key_name.as_deref()
    }
}

impl std::fmt::Debug for AccessKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessKeys")
            .field("key_name", &self.inner.key_name)
            .field("keys", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::NoAuth;
    use crate::config::ClientOptions;
    use crate::pipeline::Pipeline;
    use std::sync::Arc;

    fn manager() -> EventHubManager {
        let pipeline = Pipeline::with_reqwest(Arc::new(NoAuth), &ClientOptions::default()).unwrap();
        EventHubManager::new(pipeline, "sub")
    }

    #[test]
    fn rule_coordinates_come_from_the_id() {
        let inner: AuthorizationRuleInner = serde_json::from_str(
            r#"{"id":"/subscriptions/sub/resourceGroups/rg/providers/Microsoft.EventHub/namespaces/ns/disasterRecoveryConfigs/dr/authorizationRules/Root","name":"Root","properties":{"rights":["Listen"]}}"#,
        )
        .unwrap();
        let rule = DisasterRecoveryConfigNamespaceAuthorizationRule::new(inner, manager());
        assert_eq!(
            rule.coordinates().unwrap(),
            ["rg", "ns", "dr", "Root"].map(String::from)
        );
        assert_eq!(rule.rights(), &[AccessRights::Listen]);
    }

    #[test]
    fn coordinates_need_an_id() {
        let rule =
            DisasterRecoveryConfigNamespaceAuthorizationRule::new(AuthorizationRuleInner::default(), manager());
        assert!(matches!(rule.coordinates(), Err(SdkError::Validation(_))));
    }

    #[test]
    fn access_keys_debug_hides_keys() {
        let keys = AccessKeys::new(
            AccessKeysInner {
                primary_key: Some("super-secret".into()),
                key_name: Some("Root".into()),
                ..Default::default()
            },
            manager(),
        );
        let debug = format!("{keys:?}");
        assert!(!debug.contains("super-secret"));
        assert_eq!(keys.primary_key(), Some("super-secret"));
    }
}
