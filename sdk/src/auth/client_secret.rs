use super::credential::{AccessToken, TokenCredential};
use super::token_cache::{CachedToken, TokenCache};
use crate::common::{SdkError, SdkResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
pub const MANAGEMENT_SCOPE: &str = "https://management.azure.com/.default";
pub const DEFAULT_TOKEN_TIMEOUT: Duration = Duration::from_secs(30);

fn token_client(timeout: Duration) -> SdkResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| SdkError::Configuration(format!("Failed to create token HTTP client: {e}")))
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    expires_in: u64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
    error_description: Option<String>,
}

/// OAuth2 client-credentials flow against Azure AD.
///
/// Tokens are cached per scope set and fetched again once less than five
/// minutes of lifetime remain.
#[derive(Clone)]
pub struct ClientSecretCredential {
    tenant_id: String,
    client_id: String,
    client_secret: String,
    authority_host: String,
    http_client: reqwest::Client,
    cache: TokenCache,
}

impl ClientSecretCredential {
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> SdkResult<Self> {
        let tenant_id = tenant_id.into();
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if tenant_id.trim().is_empty() {
            return Err(SdkError::Configuration(
                "Azure AD tenant_id is required".to_string(),
            ));
        }
        if client_id.trim().is_empty() {
            return Err(SdkError::Configuration(
                "Azure AD client_id is required".to_string(),
            ));
        }
        if client_secret.is_empty() {
            return Err(SdkError::Configuration(
                "Azure AD client_secret is required for client credentials flow".to_string(),
            ));
        }

        Ok(Self {
            tenant_id,
            client_id,
            client_secret,
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            http_client: token_client(DEFAULT_TOKEN_TIMEOUT)?,
            cache: TokenCache::new(),
        })
    }

    pub fn with_authority_host(mut self, authority_host: impl Into<String>) -> Self {
        self.authority_host = authority_host.into().trim_end_matches('/').to_string();
        self
    }

    /// Bound on each token request; the default is 30 seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> SdkResult<Self> {
        self.http_client = token_client(timeout)?;
        Ok(self)
    }

    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    fn token_url(&self) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.authority_host, self.tenant_id)
    }

    async fn request_token(&self, scope: &str) -> SdkResult<TokenResponse> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", scope),
        ];

        let response = self
            .http_client
            .post(self.token_url())
            .form(&params)
            .send()
            .await
            .map_err(|e| SdkError::Authentication(format!("Failed to request token: {e}")))?;

        if !response.status().is_success() {
            let error_info = response
                .json::<ErrorResponse>()
                .await
                .unwrap_or(ErrorResponse {
                    error: "unknown_error".to_string(),
                    error_description: Some("Failed to parse error response".to_string()),
                });

            let message = match error_info.error.as_str() {
                "invalid_client" => {
                    "Invalid client credentials. Check the client ID and client secret."
                }
                "unauthorized_client" => {
                    "This application is not authorized for the client credentials flow."
                }
                "invalid_grant" => "The client secret has expired or been revoked.",
                "invalid_scope" => "The requested scope is not valid for this application.",
                _ => error_info
                    .error_description
                    .as_deref()
                    .unwrap_or(&error_info.error),
            };

            return Err(SdkError::Authentication(format!(
                "Authentication failed: {message}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SdkError::Authentication(format!("Failed to parse token response: {e}")))
    }
}

impl std::fmt::Debug for ClientSecretCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSecretCredential")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("authority_host", &self.authority_host)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenCredential for ClientSecretCredential {
    async fn get_token(&self, scopes: &[String]) -> SdkResult<AccessToken> {
        let scope = if scopes.is_empty() {
            MANAGEMENT_SCOPE.to_string()
        } else {
            scopes.join(" ")
        };

        if let Some(cached) = self.cache.get(&scope).await {
            return Ok(AccessToken {
                expires_in_secs: Some(cached.remaining().as_secs()),
                token: cached.token,
                token_type: cached.token_type,
            });
        }

        log::debug!("Requesting Azure AD token for scope {scope}");
        let response = self.request_token(&scope).await?;

        self.cache
            .set(
                scope,
                CachedToken::new(
                    response.access_token.clone(),
                    Duration::from_secs(response.expires_in),
                    response.token_type.clone(),
                ),
            )
            .await;

        Ok(AccessToken {
            token: response.access_token,
            token_type: response.token_type,
            expires_in_secs: Some(response.expires_in),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_all_identifiers() {
        assert!(ClientSecretCredential::new("", "client", "secret").is_err());
        assert!(ClientSecretCredential::new("tenant", " ", "secret").is_err());
        assert!(ClientSecretCredential::new("tenant", "client", "").is_err());
    }

    #[test]
    fn token_url_uses_tenant_and_authority() {
        let credential = ClientSecretCredential::new("tenant", "client", "secret")
            .unwrap()
            .with_authority_host("http://localhost:1234/");
        assert_eq!(
            credential.token_url(),
            "http://localhost:1234/tenant/oauth2/v2.0/token"
        );
    }

    #[test]
    fn debug_hides_secret() {
        let credential = ClientSecretCredential::new("tenant", "client", "hunter2").unwrap();
        assert!(!format!("{credential:?}").contains("hunter2"));
    }
}
