use crate::common::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeverityTypes {
    Warning,
    Error,
    Info,
    SevereWarning,
    Deprecated,
    UserWarning,
}

/// Inner error of a Data Lake Analytics job failure. Populated by the
/// service only, so it has getters and no setters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInnerError {
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostic_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    severity: Option<SeverityTypes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    help_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    internal_diagnostics: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl JobInnerError {
    pub fn diagnostic_code(&self) -> Option<i32> {
        self.diagnostic_code
    }

    pub fn severity(&self) -> Option<SeverityTypes> {
        self.severity
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    pub fn error_id(&self) -> Option<&str> {
        self.error_id.as_deref()
    }

    pub fn help_link(&self) -> Option<&str> {
        self.help_link.as_deref()
    }

    pub fn internal_diagnostics(&self) -> Option<&str> {
        self.internal_diagnostics.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn resolution(&self) -> Option<&str> {
        self.resolution.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Validate for JobInnerError {}
