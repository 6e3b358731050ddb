use crate::common::Validate;
use serde::{Deserialize, Serialize};

/// Base shape of App Service proxy resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProxyOnlyResource {
    #[serde(skip_serializing)]
    id: Option<String>,
    #[serde(skip_serializing)]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(rename = "type", skip_serializing)]
    resource_type: Option<String>,
}

impl ProxyOnlyResource {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.resource_type.as_deref()
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

impl Validate for ProxyOnlyResource {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllowedAudiencesProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    allowed_audiences: Option<Vec<String>>,
}

/// Allowed token audiences for App Service authentication.
///
/// On the wire the audiences sit under `properties.allowedAudiences`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllowedAudiencesValidation {
    #[serde(flatten)]
    resource: ProxyOnlyResource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    properties: Option<AllowedAudiencesProperties>,
}

impl AllowedAudiencesValidation {
    pub fn resource(&self) -> &ProxyOnlyResource {
        &self.resource
    }

    pub fn allowed_audiences(&self) -> Option<&[String]> {
        self.properties
            .as_ref()
            .and_then(|p| p.allowed_audiences.as_deref())
    }

    pub fn with_allowed_audiences(mut self, audiences: Vec<String>) -> Self {
        self.properties
            .get_or_insert_with(Default::default)
            .allowed_audiences = Some(audiences);
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.resource = self.resource.with_kind(kind);
        self
    }
}

impl Validate for AllowedAudiencesValidation {
    fn validate(&self) -> crate::common::SdkResult<()> {
        self.resource.validate()
    }
}
