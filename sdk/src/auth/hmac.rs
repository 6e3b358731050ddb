//! HMAC-SHA256 request signing used by App Configuration.

use super::connection_string::ConnectionString;
use super::policy::{AuthPolicy, header_value};
use crate::common::{SdkError, SdkResult};
use crate::pipeline::HttpRequest;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::header::AUTHORIZATION;
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const DATE_HEADER: &str = "x-ms-date";
const CONTENT_HASH_HEADER: &str = "x-ms-content-sha256";
const SIGNED_HEADERS: &str = "x-ms-date;host;x-ms-content-sha256";

/// Header values produced by signing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub date: String,
    pub content_hash: String,
    pub authorization: String,
}

/// Signs requests with an App Configuration access key (`Id` + `Secret`).
#[derive(Clone)]
pub struct HmacCredentialPolicy {
    credential: String,
    secret: Vec<u8>,
}

impl HmacCredentialPolicy {
    pub fn new(credential: impl Into<String>, base64_secret: &str) -> SdkResult<Self> {
        let secret = general_purpose::STANDARD
            .decode(base64_secret)
            .map_err(|e| SdkError::Authentication(format!("Failed to decode secret: {e}")))?;
        Ok(Self {
            credential: credential.into(),
            secret,
        })
    }

    pub fn from_connection_string(connection_string: &ConnectionString) -> SdkResult<Self> {
        Self::new(
            connection_string.require("Id")?,
            connection_string.require("Secret")?,
        )
    }

    /// Compute the signature headers for a request at a fixed instant.
    pub fn sign(
        &self,
        method: &str,
        path_and_query: &str,
        host: &str,
        body: &[u8],
        now: DateTime<Utc>,
    ) -> SdkResult<SignedHeaders> {
        let date = now.format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        let content_hash = general_purpose::STANDARD.encode(Sha256::digest(body));

        let string_to_sign = format!("{method}\n{path_and_query}\n{date};{host};{content_hash}");

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| SdkError::Authentication(format!("Failed to create HMAC: {e}")))?;
        mac.update(string_to_sign.as_bytes());
        let signature = general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        Ok(SignedHeaders {
            authorization: format!(
                "HMAC-SHA256 Credential={}&SignedHeaders={}&Signature={}",
                self.credential, SIGNED_HEADERS, signature
            ),
            date,
            content_hash,
        })
    }
}

impl std::fmt::Debug for HmacCredentialPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacCredentialPolicy")
            .field("credential", &self.credential)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AuthPolicy for HmacCredentialPolicy {
    async fn authorize(&self, request: &mut HttpRequest) -> SdkResult<()> {
        let signed = self.sign(
            request.method.as_str(),
            &request.path_and_query(),
            &request.host_header(),
            request.body_bytes(),
            Utc::now(),
        )?;

        request.headers.insert(DATE_HEADER, header_value(&signed.date)?);
        request
            .headers
            .insert(CONTENT_HASH_HEADER, header_value(&signed.content_hash)?);
        request
            .headers
            .insert(AUTHORIZATION, header_value(&signed.authorization)?);
        Ok(())
    }
}
