//! HTTP pipeline shared by every service client.
//!
//! A call goes through the same steps regardless of service:
//!
//! 1. the [`RestOperation`] path template is resolved against the
//!    [`OperationRequest`] arguments;
//! 2. the [`AuthPolicy`] signs the request (on every attempt, since some
//!    schemes sign the current date);
//! 3. the client-side [`RateLimiter`] is awaited;
//! 4. the [`HttpTransport`] sends it, retrying transient failures with
//!    exponential backoff;
//! 5. the final status is checked against the operation's expected
//!    statuses and mapped to an [`SdkError`] otherwise.

pub mod operation;
pub mod pager;
pub mod response;
pub mod retry;
pub mod transport;

pub use operation::{ErrorMapping, OperationRequest, PathEncoding, RequestBody, RestOperation, Verb};
pub use pager::{Page, Pager};
pub use response::Response;
pub use retry::RetryOptions;
pub use transport::{HttpRequest, HttpTransport, RawResponse, ReqwestTransport};

use crate::auth::AuthPolicy;
use crate::common::{RateLimiter, SdkError, SdkResult};
use crate::config::ClientOptions;
use futures::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

struct PipelineInner {
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthPolicy>,
    retry: RetryOptions,
    rate_limiter: Option<RateLimiter>,
    user_agent: String,
}

/// Cheaply cloneable handle to a configured HTTP pipeline.
#[derive(Clone)]
pub struct Pipeline {
    inner: Arc<PipelineInner>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("retry", &self.inner.retry)
            .field("rate_limited", &self.inner.rate_limiter.is_some())
            .field("user_agent", &self.inner.user_agent)
            .finish()
    }
}

impl Pipeline {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        auth: Arc<dyn AuthPolicy>,
        options: &ClientOptions,
    ) -> Self {
        Self {
            inner: Arc::new(PipelineInner {
                transport,
                auth,
                retry: options.retry.clone(),
                rate_limiter: options.rate_limit.build(),
                user_agent: options.user_agent(),
            }),
        }
    }

    /// Pipeline backed by a `reqwest` client honouring `options.timeout_secs`.
    pub fn with_reqwest(auth: Arc<dyn AuthPolicy>, options: &ClientOptions) -> SdkResult<Self> {
        let transport = ReqwestTransport::new(Duration::from_secs(options.timeout_secs))?;
        Ok(Self::new(Arc::new(transport), auth, options))
    }

    fn build_request(&self, op: &RestOperation, request: &OperationRequest) -> SdkResult<HttpRequest> {
        let url = request.build_url(op)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(agent) = HeaderValue::from_str(&self.inner.user_agent) {
            headers.insert(USER_AGENT, agent);
        }
        if let Ok(id) = HeaderValue::from_str(&uuid::Uuid::new_v4().to_string()) {
            headers.insert(response::CLIENT_REQUEST_ID_HEADER, id);
        }
        if let Some(body) = request.body() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(body.content_type()));
        }
        for (name, value) in request.headers() {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                SdkError::Validation(format!("Invalid header name '{name}': {e}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                SdkError::Validation(format!("Invalid value for header '{name}': {e}"))
            })?;
            headers.insert(name, value);
        }

        Ok(HttpRequest {
            method: op.verb.as_method(),
            url,
            headers,
            body: request.body().map(|b| b.data().to_vec()),
        })
    }

    /// Send `request` for `op` and return the raw body on an expected status.
    pub async fn send(
        &self,
        op: &RestOperation,
        request: OperationRequest,
    ) -> SdkResult<Response<Vec<u8>>> {
        let template = self.build_request(op, &request)?;
        let max_retries = self.inner.retry.max_retries;
        let mut attempt: u32 = 0;

        loop {
            let mut http_request = template.clone();
            self.inner.auth.authorize(&mut http_request).await?;

            if let Some(limiter) = &self.inner.rate_limiter {
                limiter.wait_until_ready().await;
            }

            log::debug!(
                "{} {} {} (attempt {})",
                op.name,
                http_request.method,
                http_request.url,
                attempt + 1
            );

            match self.inner.transport.execute(http_request).await {
                Ok(raw) if retry::is_retryable_status(raw.status) && attempt < max_retries => {
                    let retry_after = retry::parse_retry_after(raw.header("retry-after"));
                    let delay = self.inner.retry.delay_for(attempt, retry_after);
                    log::debug!(
                        "{} returned HTTP {}, retrying in {:?}",
                        op.name,
                        raw.status,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Ok(raw) => return Self::check_status(op, raw),
                Err(e) if attempt < max_retries && e.is_transient() => {
                    let delay = self.inner.retry.delay_for(attempt, None);
                    log::debug!("{} failed, retrying in {:?}: {}", op.name, delay, e);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    log::warn!("{} failed after {} attempt(s): {}", op.name, attempt + 1, e);
                    return Err(e.into());
                }
            }
        }
    }

    fn check_status(op: &RestOperation, raw: RawResponse) -> SdkResult<Response<Vec<u8>>> {
        if op.is_expected(raw.status) {
            return Ok(Response::new(raw.status, raw.headers, raw.body));
        }

        let request_id = response::request_id_from(&raw.headers);
        let error = SdkError::from_response(
            op.name,
            op.error_kind(raw.status),
            raw.status,
            &raw.body,
            request_id,
        );
        log::warn!("{}", error);
        Err(error)
    }

    /// Send and deserialize the body as JSON.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        op: &RestOperation,
        request: OperationRequest,
    ) -> SdkResult<Response<T>> {
        self.send(op, request).await?.deserialize(op.name)
    }

    /// Send and discard the body.
    pub async fn send_empty(
        &self,
        op: &RestOperation,
        request: OperationRequest,
    ) -> SdkResult<Response<()>> {
        Ok(self.send(op, request).await?.map(|_| ()))
    }

    /// Walk a list operation page by page.
    ///
    /// The first page comes from `first_op`; each continuation link is then
    /// fetched with `next_op`, whose path must be `{nextLink}`. Walking stops
    /// when a page has no continuation, or when a service hands back the
    /// link it was just called with.
    pub fn pager<T>(
        &self,
        first_op: RestOperation,
        first_request: OperationRequest,
        next_op: RestOperation,
    ) -> Pager<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        enum Cursor {
            First(OperationRequest),
            Next {
                link: String,
                template: OperationRequest,
                visited: HashSet<String>,
            },
        }

        let pipeline = self.clone();
        let stream = futures::stream::try_unfold(Some(Cursor::First(first_request)), move |cursor| {
            let pipeline = pipeline.clone();
            async move {
                let Some(cursor) = cursor else {
                    return Ok(None);
                };

                let (op, request, template, visited) = match cursor {
                    Cursor::First(request) => (first_op, request.clone(), request, HashSet::new()),
                    Cursor::Next {
                        link,
                        template,
                        mut visited,
                    } => {
                        let request = template.next_page(link.clone());
                        visited.insert(link);
                        (next_op, request, template, visited)
                    }
                };

                let page = pipeline
                    .send_json::<Page<T>>(&op, request)
                    .await?
                    .into_value();

                let next = match page.continuation() {
                    Some(link) if visited.contains(link) => {
                        log::warn!("{} returned an already visited link as continuation, stopping", op.name);
                        None
                    }
                    Some(link) => Some(Cursor::Next {
                        link: link.to_string(),
                        template,
                        visited,
                    }),
                    None => None,
                };

                Ok(Some((page, next)))
            }
        });

        Pager::new(stream.boxed())
    }
}
