use super::connection_string::ConnectionString;
use super::policy::{AuthPolicy, header_value};
use crate::common::{SdkError, SdkResult};
use crate::pipeline::HttpRequest;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use reqwest::header::AUTHORIZATION;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Generator for Service Bus / Event Hubs shared access signatures.
///
/// The key is used as given (its UTF-8 bytes), not base64-decoded.
#[derive(Clone)]
pub struct SasTokenGenerator {
    resource_uri: String,
}

impl SasTokenGenerator {
    pub fn new(resource_uri: impl Into<String>) -> Self {
        Self {
            resource_uri: resource_uri.into(),
        }
    }

    /// Generator scoped to a whole Service Bus namespace.
    pub fn for_namespace(namespace: &str) -> Self {
        Self::new(format!("sb://{namespace}.servicebus.windows.net/"))
    }

    pub fn resource_uri(&self) -> &str {
        &self.resource_uri
    }

    /// Token valid for `duration_hours` from now.
    pub fn generate_sas_token(
        &self,
        key_name: &str,
        key: &str,
        duration_hours: i64,
    ) -> SdkResult<String> {
        let expiry = Utc::now() + Duration::hours(duration_hours);
        self.generate_with_expiry(key_name, key, expiry.timestamp())
    }

    /// Token expiring at the given unix timestamp.
    pub fn generate_with_expiry(
        &self,
        key_name: &str,
        key: &str,
        expiry_timestamp: i64,
    ) -> SdkResult<String> {
        if key_name.is_empty() || key.is_empty() {
            return Err(SdkError::Authentication(
                "Shared access key name and key are required".to_string(),
            ));
        }

        let encoded_uri = urlencoding::encode(&self.resource_uri);
        let string_to_sign = format!("{encoded_uri}\n{expiry_timestamp}");

        let mut mac = HmacSha256::new_from_slice(key.as_bytes())
            .map_err(|e| SdkError::Authentication(format!("Failed to create HMAC: {e}")))?;
        mac.update(string_to_sign.as_bytes());
        let signature = general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        Ok(format!(
            "SharedAccessSignature sr={}&sig={}&se={}&skn={}",
            encoded_uri,
            urlencoding::encode(&signature),
            expiry_timestamp,
            key_name
        ))
    }
}

/// Sets `Authorization: SharedAccessSignature ...`, minting a fresh token per
/// request.
#[derive(Clone)]
pub struct SasTokenPolicy {
    generator: SasTokenGenerator,
    key_name: String,
    key: String,
    validity_hours: i64,
}

impl SasTokenPolicy {
    pub fn new(
        generator: SasTokenGenerator,
        key_name: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            key_name: key_name.into(),
            key: key.into(),
            validity_hours: 1,
        }
    }

    /// Policy for the entity (or whole namespace) named by a Service Bus /
    /// Event Hubs connection string.
    pub fn from_connection_string(connection_string: &ConnectionString) -> SdkResult<Self> {
        let endpoint = connection_string.https_endpoint()?;
        let resource_uri = match connection_string.entity_path() {
            Some(entity) => format!("{endpoint}/{entity}"),
            None => endpoint,
        };
        Ok(Self::new(
            SasTokenGenerator::new(resource_uri),
            connection_string.require("SharedAccessKeyName")?,
            connection_string.require("SharedAccessKey")?,
        ))
    }

    pub fn with_validity_hours(mut self, hours: i64) -> Self {
        self.validity_hours = hours.max(1);
        self
    }
}

#[async_trait]
impl AuthPolicy for SasTokenPolicy {
    async fn authorize(&self, request: &mut HttpRequest) -> SdkResult<()> {
        let token =
            self.generator
                .generate_sas_token(&self.key_name, &self.key, self.validity_hours)?;
        request.headers.insert(AUTHORIZATION, header_value(&token)?);
        Ok(())
    }
}
