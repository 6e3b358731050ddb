use crate::common::{SdkError, SdkResult, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A key-value in an App Configuration store.
///
/// The service uses snake_case property names, unlike ARM.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationSetting {
    #[serde(default)]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing)]
    pub etag: Option<String>,
    #[serde(default, skip_serializing)]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub locked: Option<bool>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, String>,
}

impl ConfigurationSetting {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }

    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(name.into(), value.into());
        self
    }

    pub fn is_locked(&self) -> bool {
        self.locked.unwrap_or(false)
    }
}

impl Validate for ConfigurationSetting {
    fn validate(&self) -> SdkResult<()> {
        if self.key.trim().is_empty() {
            return Err(SdkError::Validation(
                "Parameter key is required and cannot be empty".to_string(),
            ));
        }
        if self.key == "." || self.key == ".." || self.key.contains('%') {
            return Err(SdkError::Validation(format!(
                "Key '{}' is not allowed",
                self.key
            )));
        }
        Ok(())
    }
}

/// Filters for listing settings and revisions.
///
/// Key and label filters accept `*` wildcards and comma-separated lists;
/// `\0` as a label selects settings without a label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingSelector {
    pub keys: Vec<String>,
    pub labels: Vec<String>,
    pub fields: Vec<SettingFields>,
    pub accept_datetime: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingFields {
    Key,
    Label,
    Value,
    ContentType,
    Etag,
    LastModified,
    Locked,
    Tags,
}

impl SettingFields {
    pub fn as_str(self) -> &'static str {
        match self {
            SettingFields::Key => "key",
            SettingFields::Label => "label",
            SettingFields::Value => "value",
            SettingFields::ContentType => "content_type",
            SettingFields::Etag => "etag",
            SettingFields::LastModified => "last_modified",
            SettingFields::Locked => "locked",
            SettingFields::Tags => "tags",
        }
    }
}

impl SettingSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fields(mut self, fields: Vec<SettingFields>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_accept_datetime(mut self, at: DateTime<Utc>) -> Self {
        self.accept_datetime = Some(at);
        self
    }

    pub fn key_filter(&self) -> Option<String> {
        join_filter(&self.keys)
    }

    pub fn label_filter(&self) -> Option<String> {
        join_filter(&self.labels)
    }

    pub fn fields_filter(&self) -> Option<String> {
        if self.fields.is_empty() {
            return None;
        }
        Some(
            self.fields
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(","),
        )
    }

    /// `Accept-Datetime` header value (RFC 1123).
    pub fn accept_datetime_header(&self) -> Option<String> {
        self.accept_datetime
            .map(|at| at.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
    }
}

fn join_filter(values: &[String]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}
