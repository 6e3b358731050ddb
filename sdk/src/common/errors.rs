use serde::Deserialize;
use thiserror::Error;

use crate::secrets::EncryptionError;
use crate::utils::EnvVarError;

/// Result alias used by every fallible SDK call.
pub type SdkResult<T> = Result<T, SdkError>;

/// Classification of an unexpected HTTP status for a given operation.
///
/// Each [`RestOperation`](crate::pipeline::RestOperation) declares which
/// status codes map to which kind; anything not declared falls back to
/// [`ErrorKind::HttpResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The addressed resource does not exist (or a precondition on it failed)
    ResourceNotFound,
    /// The resource changed since it was read (etag / lock conflicts)
    ResourceModified,
    /// The resource already exists
    ResourceExists,
    /// The caller is not authenticated or not authorized
    ClientAuthentication,
    /// Any other unexpected response
    HttpResponse,
}

impl ErrorKind {
    /// Default classification used when no per-operation mapping applies.
    pub fn classify(status: u16) -> Self {
        match status {
            401 | 403 => ErrorKind::ClientAuthentication,
            404 => ErrorKind::ResourceNotFound,
            409 => ErrorKind::ResourceExists,
            412 => ErrorKind::ResourceModified,
            _ => ErrorKind::HttpResponse,
        }
    }
}

/// Error body returned by Azure services.
///
/// ARM services wrap the payload in `{"error": {...}}`, App Configuration
/// answers with an RFC 7807 problem document and WebHDFS endpoints with
/// `{"RemoteException": {...}}`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CloudErrorEnvelope {
    error: ServiceErrorBody,
}

#[derive(Debug, Deserialize)]
struct RemoteExceptionEnvelope {
    #[serde(rename = "RemoteException")]
    remote_exception: RemoteException,
}

#[derive(Debug, Deserialize)]
struct RemoteException {
    #[serde(default)]
    exception: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "javaClassName", default)]
    java_class_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProblemDocument {
    #[serde(rename = "type", default)]
    problem_type: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl ServiceErrorBody {
    /// Parse an error payload, falling back to the raw text as the message.
    pub fn parse(body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::default();
        }

        if let Ok(envelope) = serde_json::from_slice::<CloudErrorEnvelope>(body) {
            return envelope.error;
        }

        if let Ok(envelope) = serde_json::from_slice::<RemoteExceptionEnvelope>(body) {
            let remote = envelope.remote_exception;
            return Self {
                code: remote.exception,
                message: remote.message,
                target: remote.java_class_name,
            };
        }

        if let Ok(problem) = serde_json::from_slice::<ProblemDocument>(body) {
            if problem.title.is_some() || problem.detail.is_some() {
                let code = problem
                    .problem_type
                    .as_deref()
                    .and_then(|t| t.rsplit('/').next())
                    .map(str::to_string);
                return Self {
                    code,
                    message: problem.detail.or(problem.title),
                    target: None,
                };
            }
        }

        Self {
            code: None,
            message: Some(String::from_utf8_lossy(body).trim().to_string()),
            target: None,
        }
    }
}

/// Transport-level failures, before any response status is known.
#[derive(Debug, Error)]
pub enum HttpError {
    /// HTTP client initialization failed.
    #[error("HTTP client creation failed: {reason}")]
    ClientCreation { reason: String },

    /// The request could not be sent or the response could not be read.
    #[error("Request failed: {url} - {reason}")]
    RequestFailed { url: String, reason: String },

    /// The request exceeded the configured timeout.
    #[error("Request timeout after {seconds}s: {url}")]
    Timeout { url: String, seconds: u64 },
}

impl HttpError {
    /// Whether the same request may succeed when sent again.
    pub fn is_transient(&self) -> bool {
        matches!(self, HttpError::RequestFailed { .. } | HttpError::Timeout { .. })
    }
}

fn request_id_suffix(request_id: &Option<String>) -> String {
    match request_id {
        Some(id) => format!(" [Request ID: {id}]"),
        None => String::new(),
    }
}

/// Top-level SDK error.
#[derive(Debug, Error)]
pub enum SdkError {
    /// The service answered with a status the operation does not expect.
    #[error(
        "Azure API error during {operation}: {code} (HTTP {status_code}) - {message}{}",
        request_id_suffix(.request_id)
    )]
    AzureApiError {
        kind: ErrorKind,
        code: String,
        status_code: u16,
        message: String,
        request_id: Option<String>,
        operation: String,
    },

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("Failed to deserialize response of {operation}: {reason}")]
    Deserialize { operation: String, reason: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Messaging error: {0}")]
    Messaging(String),

    #[error(transparent)]
    Encryption(#[from] EncryptionError),

    #[error(transparent)]
    Environment(#[from] EnvVarError),
}

impl SdkError {
    /// Build an [`SdkError::AzureApiError`] using the default status classification.
    pub fn azure_api_error(
        operation: impl Into<String>,
        code: impl Into<String>,
        status_code: u16,
        message: impl Into<String>,
    ) -> Self {
        SdkError::AzureApiError {
            kind: ErrorKind::classify(status_code),
            code: code.into(),
            status_code,
            message: message.into(),
            request_id: None,
            operation: operation.into(),
        }
    }

    pub fn azure_api_error_with_request_id(
        operation: impl Into<String>,
        code: impl Into<String>,
        status_code: u16,
        message: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        SdkError::AzureApiError {
            kind: ErrorKind::classify(status_code),
            code: code.into(),
            status_code,
            message: message.into(),
            request_id: Some(request_id.into()),
            operation: operation.into(),
        }
    }

    /// Build an error from a raw unexpected response.
    pub(crate) fn from_response(
        operation: &str,
        kind: ErrorKind,
        status_code: u16,
        body: &[u8],
        request_id: Option<String>,
    ) -> Self {
        let parsed = ServiceErrorBody::parse(body);
        SdkError::AzureApiError {
            kind,
            code: parsed.code.unwrap_or_else(|| format!("Http{status_code}")),
            status_code,
            message: parsed
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Status code indicates failure".to_string()),
            request_id,
            operation: operation.to_string(),
        }
    }

    pub fn is_azure_api_error(&self) -> bool {
        matches!(self, SdkError::AzureApiError { .. })
    }

    pub fn azure_error_code(&self) -> Option<&str> {
        match self {
            SdkError::AzureApiError { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn azure_request_id(&self) -> Option<&str> {
        match self {
            SdkError::AzureApiError { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            SdkError::AzureApiError { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            SdkError::AzureApiError { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ErrorKind::ResourceNotFound)
    }

    /// Whether repeating the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SdkError::Http(e) => e.is_transient(),
            SdkError::AzureApiError { status_code, .. } => {
                crate::pipeline::retry::is_retryable_status(*status_code)
            }
            _ => false,
        }
    }
}
