use crate::common::SdkResult;
use async_trait::async_trait;

/// Bearer token handed out by a [`TokenCredential`].
#[derive(Clone, Debug)]
pub struct AccessToken {
    pub token: String,
    pub token_type: String,
    pub expires_in_secs: Option<u64>,
}

impl AccessToken {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_type: "Bearer".to_string(),
            expires_in_secs: None,
        }
    }
}

/// Source of OAuth2 access tokens for a set of scopes.
#[async_trait]
pub trait TokenCredential: Send + Sync {
    async fn get_token(&self, scopes: &[String]) -> SdkResult<AccessToken>;
}

/// Credential that always returns the same token. Handy for tokens obtained
/// out of band (`az account get-access-token`) and for tests.
#[derive(Clone)]
pub struct StaticTokenCredential {
    token: String,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for StaticTokenCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticTokenCredential")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    async fn get_token(&self, _scopes: &[String]) -> SdkResult<AccessToken> {
        Ok(AccessToken::bearer(self.token.clone()))
    }
}
