use crate::common::{SdkError, SdkResult};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

pub const REQUEST_ID_HEADER: &str = "x-ms-request-id";
pub const CLIENT_REQUEST_ID_HEADER: &str = "x-ms-client-request-id";

/// A successful response: status, headers and the typed value.
#[derive(Debug, Clone)]
pub struct Response<T> {
    status: u16,
    headers: HeaderMap,
    request_id: Option<String>,
    value: T,
}

impl<T> Response<T> {
    pub fn new(status: u16, headers: HeaderMap, value: T) -> Self {
        let request_id = request_id_from(&headers);
        Self {
            status,
            headers,
            request_id,
            value,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            status: self.status,
            headers: self.headers,
            request_id: self.request_id,
            value: f(self.value),
        }
    }

    pub fn try_map<U>(self, f: impl FnOnce(T) -> SdkResult<U>) -> SdkResult<Response<U>> {
        let value = f(self.value)?;
        Ok(Response {
            status: self.status,
            headers: self.headers,
            request_id: self.request_id,
            value,
        })
    }
}

impl Response<Vec<u8>> {
    pub fn deserialize<T: DeserializeOwned>(self, operation: &str) -> SdkResult<Response<T>> {
        self.try_map(|body| deserialize_body(operation, &body))
    }
}

pub fn request_id_from(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .or_else(|| headers.get(CLIENT_REQUEST_ID_HEADER))
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Deserialize a response body; an empty body is read as JSON `null`.
pub fn deserialize_body<T: DeserializeOwned>(operation: &str, body: &[u8]) -> SdkResult<T> {
    let result = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(serde_json::Value::Null)
    } else {
        serde_json::from_slice(body)
    };
    result.map_err(|e| SdkError::Deserialize {
        operation: operation.to_string(),
        reason: e.to_string(),
    })
}
