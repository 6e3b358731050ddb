use super::credential::TokenCredential;
use crate::common::{SdkError, SdkResult};
use crate::pipeline::HttpRequest;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use std::sync::Arc;

/// Authorizes an outgoing request. Runs once per attempt, after the URL and
/// body are final.
#[async_trait]
pub trait AuthPolicy: Send + Sync {
    async fn authorize(&self, request: &mut HttpRequest) -> SdkResult<()>;
}

/// Leaves requests untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

#[async_trait]
impl AuthPolicy for NoAuth {
    async fn authorize(&self, _request: &mut HttpRequest) -> SdkResult<()> {
        Ok(())
    }
}

pub(crate) fn header_value(value: &str) -> SdkResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| SdkError::Authentication(format!("Invalid authorization header value: {e}")))
}

/// Sets `Authorization: Bearer <token>` from a [`TokenCredential`].
#[derive(Clone)]
pub struct BearerTokenPolicy {
    credential: Arc<dyn TokenCredential>,
    scopes: Vec<String>,
}

impl BearerTokenPolicy {
    pub fn new(credential: Arc<dyn TokenCredential>, scopes: Vec<String>) -> Self {
        Self { credential, scopes }
    }

    /// Policy for Azure Resource Manager calls.
    pub fn management(credential: Arc<dyn TokenCredential>) -> Self {
        Self::new(
            credential,
            vec![super::client_secret::MANAGEMENT_SCOPE.to_string()],
        )
    }
}

#[async_trait]
impl AuthPolicy for BearerTokenPolicy {
    async fn authorize(&self, request: &mut HttpRequest) -> SdkResult<()> {
        let token = self.credential.get_token(&self.scopes).await?;
        request
            .headers
            .insert(AUTHORIZATION, header_value(&format!("Bearer {}", token.token))?);
        Ok(())
    }
}
