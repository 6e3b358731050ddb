use crate::common::{SdkResult, Validate, require};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvisioningStateDR {
    Accepted,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleDisasterRecovery {
    Primary,
    PrimaryNotReplicating,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessRights {
    Manage,
    Send,
    Listen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnavailableReason {
    None,
    InvalidName,
    SubscriptionIsDisabled,
    NameInUse,
    NameInLockdown,
    TooManyNamespaceInCurrentSubscription,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmDisasterRecoveryProperties {
    #[serde(default, skip_serializing)]
    pub provisioning_state: Option<ProvisioningStateDR>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_name: Option<String>,
    #[serde(default, skip_serializing)]
    pub role: Option<RoleDisasterRecovery>,
    #[serde(default, skip_serializing)]
    pub pending_replication_operations_count: Option<i64>,
}

/// A Geo-DR alias (`disasterRecoveryConfigs/{alias}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmDisasterRecoveryInner {
    #[serde(default, skip_serializing)]
    pub id: Option<String>,
    #[serde(default, skip_serializing)]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing)]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ArmDisasterRecoveryProperties>,
}

impl ArmDisasterRecoveryInner {
    fn props(&self) -> Option<&ArmDisasterRecoveryProperties> {
        self.properties.as_ref()
    }

    fn props_mut(&mut self) -> &mut ArmDisasterRecoveryProperties {
        self.properties.get_or_insert_with(Default::default)
    }

    pub fn provisioning_state(&self) -> Option<ProvisioningStateDR> {
        self.props().and_then(|p| p.provisioning_state)
    }

    pub fn partner_namespace(&self) -> Option<&str> {
        self.props().and_then(|p| p.partner_namespace.as_deref())
    }

    pub fn alternate_name(&self) -> Option<&str> {
        self.props().and_then(|p| p.alternate_name.as_deref())
    }

    pub fn role(&self) -> Option<RoleDisasterRecovery> {
        self.props().and_then(|p| p.role)
    }

    pub fn pending_replication_operations_count(&self) -> Option<i64> {
        self.props().and_then(|p| p.pending_replication_operations_count)
    }

    pub fn with_partner_namespace(mut self, partner_namespace: impl Into<String>) -> Self {
        self.props_mut().partner_namespace = Some(partner_namespace.into());
        self
    }

    pub fn with_alternate_name(mut self, alternate_name: impl Into<String>) -> Self {
        self.props_mut().alternate_name = Some(alternate_name.into());
        self
    }
}

impl Validate for ArmDisasterRecoveryInner {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationRuleProperties {
    #[serde(default)]
    pub rights: Option<Vec<AccessRights>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationRuleInner {
    #[serde(default, skip_serializing)]
    pub id: Option<String>,
    #[serde(default, skip_serializing)]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing)]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<AuthorizationRuleProperties>,
}

impl AuthorizationRuleInner {
    pub fn rights(&self) -> &[AccessRights] {
        self.properties
            .as_ref()
            .and_then(|p| p.rights.as_deref())
            .unwrap_or_default()
    }

    pub fn with_rights(mut self, rights: Vec<AccessRights>) -> Self {
        self.properties = Some(AuthorizationRuleProperties {
            rights: Some(rights),
        });
        self
    }
}

impl Validate for AuthorizationRuleInner {
    fn validate(&self) -> SdkResult<()> {
        if let Some(properties) = &self.properties {
            require(&properties.rights, "rights", "AuthorizationRuleInner")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKeysInner {
    #[serde(default)]
    pub primary_connection_string: Option<String>,
    #[serde(default)]
    pub secondary_connection_string: Option<String>,
    #[serde(default)]
    pub alias_primary_connection_string: Option<String>,
    #[serde(default)]
    pub alias_secondary_connection_string: Option<String>,
    #[serde(default)]
    pub primary_key: Option<String>,
    #[serde(default)]
    pub secondary_key: Option<String>,
    #[serde(default)]
    pub key_name: Option<String>,
}

impl Validate for AccessKeysInner {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckNameAvailabilityParameter {
    pub name: Option<String>,
}

impl CheckNameAvailabilityParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

impl Validate for CheckNameAvailabilityParameter {
    fn validate(&self) -> SdkResult<()> {
        require(&self.name, "name", "CheckNameAvailabilityParameter").map(|_| ())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckNameAvailabilityResultInner {
    #[serde(default, skip_serializing)]
    pub message: Option<String>,
    #[serde(default)]
    pub name_available: Option<bool>,
    #[serde(default)]
    pub reason: Option<UnavailableReason>,
}

impl Validate for CheckNameAvailabilityResultInner {}
