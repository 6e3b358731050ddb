//! Declarative description of REST endpoints and the per-call request builder.

use crate::common::{ErrorKind, SdkError, SdkResult};
use reqwest::Url;
use serde::Serialize;

/// HTTP verb of a [`RestOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Put,
    Post,
    Patch,
    Delete,
    Head,
}

impl Verb {
    pub fn as_method(self) -> reqwest::Method {
        match self {
            Verb::Get => reqwest::Method::GET,
            Verb::Put => reqwest::Method::PUT,
            Verb::Post => reqwest::Method::POST,
            Verb::Patch => reqwest::Method::PATCH,
            Verb::Delete => reqwest::Method::DELETE,
            Verb::Head => reqwest::Method::HEAD,
        }
    }
}

/// Maps a set of unexpected status codes onto an [`ErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorMapping {
    pub codes: &'static [u16],
    pub kind: ErrorKind,
}

impl ErrorMapping {
    pub const fn new(codes: &'static [u16], kind: ErrorKind) -> Self {
        Self { codes, kind }
    }
}

/// A REST endpoint declaration: verb, path template, expected statuses and
/// how the unexpected ones are reported.
///
/// ```ignore
/// pub static GET_KEY_VALUE: RestOperation = RestOperation {
///     name: "get_key_value",
///     verb: Verb::Get,
///     path: "kv/{key}",
///     expected: &[200],
///     errors: &[ErrorMapping::new(&[404], ErrorKind::ResourceNotFound)],
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestOperation {
    /// Operation name used in logs and error messages
    pub name: &'static str,
    /// HTTP method
    pub verb: Verb,
    /// Path template relative to the host; `{name}` marks a path parameter
    pub path: &'static str,
    /// Statuses that count as success
    pub expected: &'static [u16],
    /// Error kinds for specific failure statuses; others are `HttpResponse`
    pub errors: &'static [ErrorMapping],
}

impl RestOperation {
    /// Whether `status` is one of the declared success statuses.
    pub fn is_expected(&self, status: u16) -> bool {
        self.expected.contains(&status)
    }

    /// Kind for a failed `status`, falling back to [`ErrorKind::HttpResponse`].
    pub fn error_kind(&self, status: u16) -> ErrorKind {
        self.errors
            .iter()
            .find(|mapping| mapping.codes.contains(&status))
            .map(|mapping| mapping.kind)
            .unwrap_or(ErrorKind::HttpResponse)
    }
}

/// How a path parameter value is placed into the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEncoding {
    /// Percent-encode the whole value, including `/`
    Component,
    /// Percent-encode each `/`-separated segment, keeping the separators
    Segments,
    /// Insert verbatim; used for continuation links
    Raw,
}

#[derive(Debug, Clone)]
struct PathParam {
    name: &'static str,
    value: String,
    encoding: PathEncoding,
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(Vec<u8>),
    Bytes {
        data: Vec<u8>,
        content_type: &'static str,
    },
}

impl RequestBody {
    pub fn data(&self) -> &[u8] {
        match self {
            RequestBody::Json(data) => data,
            RequestBody::Bytes { data, .. } => data,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Json(_) => "application/json",
            RequestBody::Bytes { content_type, .. } => content_type,
        }
    }
}

/// Arguments of a single call to a [`RestOperation`].
///
/// Optional query and header parameters given as `None` are left out of the
/// request entirely.
#[derive(Debug, Clone)]
pub struct OperationRequest {
    host: String,
    path_params: Vec<PathParam>,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<RequestBody>,
}

impl OperationRequest {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path_params: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_with(name, value, PathEncoding::Component)
    }

    pub fn path_segments(self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_with(name, value, PathEncoding::Segments)
    }

    pub fn path_encoded(self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_with(name, value, PathEncoding::Raw)
    }

    fn path_with(mut self, name: &'static str, value: impl Into<String>, encoding: PathEncoding) -> Self {
        self.path_params.push(PathParam {
            name,
            value: value.into(),
            encoding,
        });
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    pub fn query_opt<T: ToString>(self, name: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.headers.push((name.into(), value.to_string()));
        self
    }

    pub fn header_opt<T: ToString>(self, name: impl Into<String>, value: Option<T>) -> Self {
        match value {
            Some(value) => self.header(name, value),
            None => self,
        }
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> SdkResult<Self> {
        let data = serde_json::to_vec(body)
            .map_err(|e| SdkError::Validation(format!("Failed to serialize request body: {e}")))?;
        self.body = Some(RequestBody::Json(data));
        Ok(self)
    }

    pub fn bytes(mut self, data: Vec<u8>, content_type: &'static str) -> Self {
        self.body = Some(RequestBody::Bytes { data, content_type });
        self
    }

    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Request for the page behind `link`: same host and headers, no query.
    pub fn next_page(&self, link: impl Into<String>) -> Self {
        Self {
            host: self.host.clone(),
            path_params: Vec::new(),
            query: Vec::new(),
            headers: self.headers.clone(),
            body: None,
        }
        .path_encoded("nextLink", link)
    }

    /// Resolve the path template of `op` against this request.
    pub fn build_url(&self, op: &RestOperation) -> SdkResult<Url> {
        let mut path = op.path.to_string();
        for param in &self.path_params {
            let placeholder = format!("{{{}}}", param.name);
            if !path.contains(&placeholder) {
                continue;
            }
            if param.value.is_empty() {
                return Err(SdkError::Validation(format!(
                    "Parameter {} is required and cannot be empty",
                    param.name
                )));
            }
            let has_dot_segment = match param.encoding {
                PathEncoding::Component => is_dot_segment(&param.value),
                PathEncoding::Segments => param.value.split('/').any(is_dot_segment),
                PathEncoding::Raw => false,
            };
            if has_dot_segment {
                return Err(SdkError::Validation(format!(
                    "Parameter {} cannot contain '.' or '..' path segments",
                    param.name
                )));
            }
            let encoded = match param.encoding {
                PathEncoding::Component => urlencoding::encode(&param.value).into_owned(),
                PathEncoding::Segments => param
                    .value
                    .split('/')
                    .map(|segment| urlencoding::encode(segment).into_owned())
                    .collect::<Vec<_>>()
                    .join("/"),
                PathEncoding::Raw => param.value.clone(),
            };
            path = path.replace(&placeholder, &encoded);
        }

        if let Some(start) = path.find('{') {
            let name = path[start + 1..].split('}').next().unwrap_or_default();
            return Err(SdkError::Validation(format!(
                "Parameter {name} is required and cannot be empty"
            )));
        }

        let full = if path.starts_with("http://") || path.starts_with("https://") {
            path
        } else {
            format!(
                "{}/{}",
                self.host.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        };

        let mut url = Url::parse(&full)
            .map_err(|e| SdkError::Configuration(format!("Invalid request URL '{full}': {e}")))?;

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }
}

/// `.` and `..` are collapsed by URL normalization and would change the target.
fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

#[cfg(test)]
mod tests {
    use super::*;

    static GET_KEY: RestOperation = RestOperation {
        name: "get_key",
        verb: Verb::Get,
        path: "kv/{key}",
        expected: &[200],
        errors: &[
            ErrorMapping::new(&[404], ErrorKind::ResourceNotFound),
            ErrorMapping::new(&[409, 412], ErrorKind::ResourceModified),
        ],
    };

    static NEXT: RestOperation = RestOperation {
        name: "next",
        verb: Verb::Get,
        path: "{nextLink}",
        expected: &[200],
        errors: &[],
    };

    #[test]
    fn substitutes_and_encodes_path_params() {
        let url = OperationRequest::new("https://store.azconfig.io/")
            .path("key", "app/color scheme")
            .query_opt("label", Some("prod"))
            .query_opt::<String>("$select", None)
            .build_url(&GET_KEY)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://store.azconfig.io/kv/app%2Fcolor%20scheme?label=prod"
        );
    }

    #[test]
    fn segment_encoding_keeps_separators() {
        static OPEN: RestOperation = RestOperation {
            name: "open",
            verb: Verb::Get,
            path: "webhdfs/v1/{path}",
            expected: &[200],
            errors: &[],
        };
        let url = OperationRequest::new("https://acct.azuredatalakestore.net")
            .path_segments("path", "dir one/file#1.txt")
            .build_url(&OPEN)
            .unwrap();
        assert_eq!(url.path(), "/webhdfs/v1/dir%20one/file%231.txt");
    }

    #[test]
    fn absolute_next_link_is_used_verbatim() {
        let first = OperationRequest::new("https://management.azure.com").header("Accept", "x");
        let next = first.next_page("https://management.azure.com/subscriptions?$skiptoken=abc&api-version=2022-12-01");
        let url = next.build_url(&NEXT).unwrap();
        assert_eq!(url.query(), Some("$skiptoken=abc&api-version=2022-12-01"));
        assert_eq!(next.headers().len(), 1);
    }

    #[test]
    fn relative_next_link_is_resolved_against_host() {
        let next = OperationRequest::new("https://store.azconfig.io").next_page("/kv?after=k5");
        let url = next.build_url(&NEXT).unwrap();
        assert_eq!(url.as_str(), "https://store.azconfig.io/kv?after=k5");
    }

    #[test]
    fn empty_or_missing_path_param_is_rejected() {
        let err = OperationRequest::new("https://h").path("key", "").build_url(&GET_KEY);
        assert!(matches!(err, Err(SdkError::Validation(_))));

        let err = OperationRequest::new("https://h").build_url(&GET_KEY);
        assert!(matches!(err, Err(SdkError::Validation(msg)) if msg.contains("key")));
    }

    #[test]
    fn dot_segments_are_rejected() {
        static OPEN: RestOperation = RestOperation {
            name: "open",
            verb: Verb::Get,
            path: "webhdfs/v1{path}",
            expected: &[200],
            errors: &[],
        };
        for key in [".", ".."] {
            let err = OperationRequest::new("https://store.azconfig.io").path("key", key).build_url(&GET_KEY);
            assert!(matches!(err, Err(SdkError::Validation(msg)) if msg.contains("key")));
        }
        for path in ["/../../x", "/a/./b", "/a/.."] {
            let err = OperationRequest::new("https://acct.azuredatalakestore.net")
                .path_segments("path", path)
                .build_url(&OPEN);
            assert!(matches!(err, Err(SdkError::Validation(_))), "{path}");
        }

        let url = OperationRequest::new("https://store.azconfig.io")
            .path("key", "...")
            .build_url(&GET_KEY)
            .unwrap();
        assert_eq!(url.path(), "/kv/...");
        let url = OperationRequest::new("https://acct.azuredatalakestore.net")
            .path_segments("path", "/.hidden/a..b")
            .build_url(&OPEN)
            .unwrap();
        assert_eq!(url.path(), "/webhdfs/v1/.hidden/a..b");
    }

    #[test]
    fn error_mapping_falls_back_to_http_response() {
        assert_eq!(GET_KEY.error_kind(404), ErrorKind::ResourceNotFound);
        assert_eq!(GET_KEY.error_kind(412), ErrorKind::ResourceModified);
        assert_eq!(GET_KEY.error_kind(500), ErrorKind::HttpResponse);
        assert!(GET_KEY.is_expected(200));
        assert!(!GET_KEY.is_expected(204));
    }
}
