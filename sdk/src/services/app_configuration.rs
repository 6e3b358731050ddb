use crate::auth::{ConnectionString, HmacCredentialPolicy};
use crate::common::{ErrorKind, SdkResult, Validate};
use crate::config::ClientOptions;
use crate::models::{ConfigurationSetting, SettingSelector};
use crate::pipeline::{ErrorMapping, OperationRequest, Pager, Pipeline, Response, RestOperation, Verb};
use std::sync::Arc;

/// App Configuration data-plane endpoints.
pub struct ConfigurationService;

impl ConfigurationService {
    /// `GET kv/{key}`: one setting. 404 when the key/label pair does not exist.
    pub const GET_KEY_VALUE: RestOperation = RestOperation {
        name: "get_key_value",
        verb: Verb::Get,
        path: "kv/{key}",
        expected: &[200],
        errors: &[ErrorMapping::new(&[404], ErrorKind::ResourceNotFound)],
    };

    /// `PUT kv/{key}`: create or replace a setting. 409 when it is locked, 412 when
    /// an `If-Match` / `If-None-Match` precondition fails.
    pub const SET_KEY: RestOperation = RestOperation {
        name: "set_key",
        verb: Verb::Put,
        path: "kv/{key}",
        expected: &[200],
        errors: &[
            ErrorMapping::new(&[409], ErrorKind::ResourceModified),
            ErrorMapping::new(&[412], ErrorKind::ResourceNotFound),
        ],
    };

    /// `DELETE kv/{key}`: 200 with the removed setting, 204 when there was nothing
    /// to remove.
    pub const DELETE: RestOperation = RestOperation {
        name: "delete_key_value",
        verb: Verb::Delete,
        path: "kv/{key}",
        expected: &[200, 204],
        errors: &[
            ErrorMapping::new(&[409], ErrorKind::ResourceModified),
            ErrorMapping::new(&[412], ErrorKind::ResourceNotFound),
        ],
    };

    /// `PUT locks/{key}`: make a setting read-only.
    pub const LOCK_KEY_VALUE: RestOperation = RestOperation {
        name: "lock_key_value",
        verb: Verb::Put,
        path: "locks/{key}",
        expected: &[200],
        errors: &[ErrorMapping::new(&[404], ErrorKind::ResourceNotFound)],
    };

    /// `DELETE locks/{key}`: make a setting writable again.
    pub const UNLOCK_KEY_VALUE: RestOperation = RestOperation {
        name: "unlock_key_value",
        verb: Verb::Delete,
        path: "locks/{key}",
        expected: &[200],
        errors: &[ErrorMapping::new(&[404], ErrorKind::ResourceNotFound)],
    };

    /// `GET kv`: first page of settings matching a [`SettingSelector`].
    pub const LIST_KEY_VALUES: RestOperation = RestOperation {
        name: "list_key_values",
        verb: Verb::Get,
        path: "kv",
        expected: &[200],
        errors: &[],
    };

    /// Follow-up pages; `{nextLink}` is the pre-encoded `@nextLink`.
    pub const LIST_KEY_VALUES_NEXT: RestOperation = RestOperation {
        name: "list_key_values_next",
        verb: Verb::Get,
        path: "{nextLink}",
        expected: &[200],
        errors: &[],
    };

    /// `GET revisions`: setting history. 206 answers a `Range` request.
    pub const LIST_KEY_VALUE_REVISIONS: RestOperation = RestOperation {
        name: "list_key_value_revisions",
        verb: Verb::Get,
        path: "revisions",
        expected: &[200, 206],
        errors: &[],
    };

    /// Follow-up pages of revisions.
    pub const LIST_KEY_VALUE_REVISIONS_NEXT: RestOperation = RestOperation {
        name: "list_key_value_revisions_next",
        verb: Verb::Get,
        path: "{nextLink}",
        expected: &[200, 206],
        errors: &[],
    };
}

/// Conditional request headers for writes and deletes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    pub if_match: Option<String>,
    pub if_none_match: Option<String>,
}

impl Conditions {
    pub fn if_match(etag: impl Into<String>) -> Self {
        Self {
            if_match: Some(etag.into()),
            if_none_match: None,
        }
    }

    pub fn if_none_match(etag: impl Into<String>) -> Self {
        Self {
            if_match: None,
            if_none_match: Some(etag.into()),
        }
    }

    fn apply(&self, request: OperationRequest) -> OperationRequest {
        request
            .header_opt("If-Match", self.if_match.as_deref().map(quote_etag))
            .header_opt("If-None-Match", self.if_none_match.as_deref().map(quote_etag))
    }
}

fn quote_etag(etag: &str) -> String {
    if etag == "*" || etag.starts_with('"') {
        etag.to_string()
    } else {
        format!("\"{etag}\"")
    }
}

/// Client for an App Configuration store, signing every request with the
/// store's HMAC access key.
#[derive(Debug, Clone)]
pub struct ConfigurationClient {
    pipeline: Pipeline,
    endpoint: String,
}

impl ConfigurationClient {
    pub fn new(endpoint: impl Into<String>, pipeline: Pipeline) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            pipeline,
        }
    }

    /// Build a client from an `Endpoint=…;Id=…;Secret=…` connection string.
    pub fn from_connection_string(connection_string: &str, options: &ClientOptions) -> SdkResult<Self> {
        let connection_string = ConnectionString::parse(connection_string)?;
        let endpoint = connection_string.require("Endpoint")?.to_string();
        let policy = HmacCredentialPolicy::from_connection_string(&connection_string)?;
        let pipeline = Pipeline::with_reqwest(Arc::new(policy), options)?;
        log::debug!("Created App Configuration client for {endpoint}");
        Ok(Self::new(endpoint, pipeline))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self) -> OperationRequest {
        OperationRequest::new(&self.endpoint)
    }

    pub async fn get_setting(
        &self,
        key: &str,
        label: Option<&str>,
        selector: Option<&SettingSelector>,
        conditions: &Conditions,
    ) -> SdkResult<Response<ConfigurationSetting>> {
        let request = self
            .request()
            .path("key", key)
            .query_opt("label", label)
            .query_opt("$select", selector.and_then(SettingSelector::fields_filter))
            .header_opt(
                "Accept-Datetime",
                selector.and_then(SettingSelector::accept_datetime_header),
            );
        self.pipeline
            .send_json(&ConfigurationService::GET_KEY_VALUE, conditions.apply(request))
            .await
    }

    pub async fn set_setting(
        &self,
        setting: &ConfigurationSetting,
        conditions: &Conditions,
    ) -> SdkResult<Response<ConfigurationSetting>> {
        setting.validate()?;
        let request = self
            .request()
            .path("key", &setting.key)
            .query_opt("label", setting.label.as_deref())
            .json(setting)?;
        self.pipeline
            .send_json(&ConfigurationService::SET_KEY, conditions.apply(request))
            .await
    }

    /// Create a setting, failing if the key and label already exist.
    pub async fn add_setting(&self, setting: &ConfigurationSetting) -> SdkResult<Response<ConfigurationSetting>> {
        self.set_setting(setting, &Conditions::if_none_match("*")).await
    }

    /// Replace an existing setting. The setting's etag, when present, must
    /// still match the stored one.
    pub async fn update_setting(&self, setting: &ConfigurationSetting) -> SdkResult<Response<ConfigurationSetting>> {
        let etag = setting.etag.clone().unwrap_or_else(|| "*".to_string());
        self.set_setting(setting, &Conditions::if_match(etag)).await
    }

    /// Delete a setting. `None` when the service answers 204 (nothing to delete).
    pub async fn delete_setting(
        &self,
        key: &str,
        label: Option<&str>,
        conditions: &Conditions,
    ) -> SdkResult<Response<Option<ConfigurationSetting>>> {
        let request = self.request().path("key", key).query_opt("label", label);
        let response = self
            .pipeline
            .send(&ConfigurationService::DELETE, conditions.apply(request))
            .await?;
        if response.status() == 204 {
            return Ok(response.map(|_| None));
        }
        response.deserialize(ConfigurationService::DELETE.name)
    }

    pub async fn lock_setting(&self, key: &str, label: Option<&str>) -> SdkResult<Response<ConfigurationSetting>> {
        let request = self.request().path("key", key).query_opt("label", label);
        self.pipeline
            .send_json(&ConfigurationService::LOCK_KEY_VALUE, request)
            .await
    }

    pub async fn unlock_setting(&self, key: &str, label: Option<&str>) -> SdkResult<Response<ConfigurationSetting>> {
        let request = self.request().path("key", key).query_opt("label", label);
        self.pipeline
            .send_json(&ConfigurationService::UNLOCK_KEY_VALUE, request)
            .await
    }

    fn selector_request(&self, selector: &SettingSelector) -> OperationRequest {
        self.request()
            .query_opt("key", selector.key_filter())
            .query_opt("label", selector.label_filter())
            .query_opt("$select", selector.fields_filter())
            .header_opt("Accept-Datetime", selector.accept_datetime_header())
    }

    /// Settings matching `selector`, following `@nextLink` continuations.
    pub fn list_settings(&self, selector: &SettingSelector) -> Pager<ConfigurationSetting> {
        self.pipeline.pager(
            ConfigurationService::LIST_KEY_VALUES,
            self.selector_request(selector),
            ConfigurationService::LIST_KEY_VALUES_NEXT,
        )
    }

    /// Revision history of the settings matching `selector`. `range` is sent
    /// as the `Range` header, e.g. `items=0-9`.
    pub fn list_revisions(&self, selector: &SettingSelector, range: Option<&str>) -> Pager<ConfigurationSetting> {
        self.pipeline.pager(
            ConfigurationService::LIST_KEY_VALUE_REVISIONS,
            self.selector_request(selector).header_opt("Range", range),
            ConfigurationService::LIST_KEY_VALUE_REVISIONS_NEXT,
        )
    }
}
