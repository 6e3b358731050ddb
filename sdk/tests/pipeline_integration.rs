use azrest::auth::{BearerTokenPolicy, NoAuth, StaticTokenCredential};
use azrest::common::{ErrorKind, SdkError};
use azrest::config::ClientOptions;
use azrest::pipeline::{ErrorMapping, OperationRequest, Pipeline, RestOperation, RetryOptions, Verb};
use claims::*;
use serde::Deserialize;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GET_WIDGET: RestOperation = RestOperation {
    name: "get_widget",
    verb: Verb::Get,
    path: "widgets/{name}",
    expected: &[200],
    errors: &[ErrorMapping::new(&[404], ErrorKind::ResourceNotFound)],
};

const PUT_WIDGET: RestOperation = RestOperation {
    name: "put_widget",
    verb: Verb::Put,
    path: "widgets/{name}",
    expected: &[200, 201],
    errors: &[ErrorMapping::new(&[409, 412], ErrorKind::ResourceModified)],
};

#[derive(Debug, Deserialize, PartialEq)]
struct Widget {
    name: String,
    size: u32,
}

mod helpers {
    use super::*;

    pub fn fast_options(max_retries: u32) -> ClientOptions {
        ClientOptions::default()
            .without_rate_limit()
            .with_timeout_secs(5)
            .with_retry(RetryOptions {
                max_retries,
                initial_delay_ms: 1,
                max_delay_ms: 20,
            })
    }

    pub fn pipeline(max_retries: u32) -> Pipeline {
        Pipeline::with_reqwest(Arc::new(NoAuth), &fast_options(max_retries))
            .expect("pipeline should build")
    }
}

#[cfg(test)]
mod pipeline_tests {
    use super::helpers::*;
    use super::*;

    #[tokio::test]
    async fn test_get_deserializes_expected_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/widgets/gear"))
            .and(query_param("api-version", "2020-01-01"))
            .and(header("accept", "application/json"))
            .and(header_exists("x-ms-client-request-id"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("x-ms-request-id", "req-1")
                    .set_body_json(serde_json::json!({"name": "gear", "size": 3})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let request = OperationRequest::new(server.uri())
            .path("name", "gear")
            .query("api-version", "2020-01-01");
        let response = assert_ok!(pipeline(0).send_json::<Widget>(&GET_WIDGET, request).await);

        assert_eq!(response.status(), 200);
        assert_eq!(response.request_id(), Some("req-1"));
        assert_eq!(
            response.into_value(),
            Widget {
                name: "gear".into(),
                size: 3
            }
        );
    }

    #[tokio::test]
    async fn test_mapped_status_becomes_typed_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/widgets/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .insert_header("x-ms-request-id", "req-404")
                    .set_body_json(serde_json::json!({
                        "error": {"code": "WidgetNotFound", "message": "No such widget"}
                    })),
            )
            .mount(&server)
            .await;

        let request = OperationRequest::new(server.uri()).path("name", "missing");
        let error = assert_err!(pipeline(0).send_json::<Widget>(&GET_WIDGET, request).await);

        assert!(error.is_not_found());
        assert_eq!(error.status_code(), Some(404));
        assert_eq!(error.azure_error_code(), Some("WidgetNotFound"));
        assert_eq!(error.azure_request_id(), Some("req-404"));
        assert!(error.to_string().contains("get_widget"));
    }

    #[tokio::test]
    async fn test_unmapped_status_is_http_response_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad widget"))
            .mount(&server)
            .await;

        let request = OperationRequest::new(server.uri()).path("name", "x");
        let error = assert_err!(pipeline(0).send(&GET_WIDGET, request).await);

        assert_eq!(error.kind(), Some(ErrorKind::HttpResponse));
        assert_matches!(error, SdkError::AzureApiError { ref message, .. } if message == "bad widget");
    }

    #[tokio::test]
    async fn test_unexpected_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let request = OperationRequest::new(server.uri()).path("name", "x");
        let error = assert_err!(pipeline(0).send(&GET_WIDGET, request).await);
        assert_eq!(error.status_code(), Some(202));
        assert_eq!(error.kind(), Some(ErrorKind::HttpResponse));
    }

    #[tokio::test]
    async fn test_retries_transient_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"name": "gear", "size": 1})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let request = OperationRequest::new(server.uri()).path("name", "gear");
        let widget = assert_ok!(pipeline(3).send_json::<Widget>(&GET_WIDGET, request).await);
        assert_eq!(widget.value().size, 1);
    }

    #[tokio::test]
    async fn test_throttling_honours_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"name": "gear", "size": 2})),
            )
            .mount(&server)
            .await;

        let request = OperationRequest::new(server.uri()).path("name", "gear");
        assert_ok!(pipeline(1).send_json::<Widget>(&GET_WIDGET, request).await);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;

        let request = OperationRequest::new(server.uri()).path("name", "gear");
        let error = assert_err!(pipeline(2).send(&GET_WIDGET, request).await);
        assert_eq!(error.status_code(), Some(500));
        assert!(error.is_transient());
    }

    #[tokio::test]
    async fn test_put_sends_json_body_and_custom_headers() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/widgets/gear"))
            .and(header("content-type", "application/json"))
            .and(header("if-match", "\"etag-1\""))
            .and(body_json(serde_json::json!({"name": "gear", "size": 9})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let request = assert_ok!(
            OperationRequest::new(server.uri())
                .path("name", "gear")
                .header("If-Match", "\"etag-1\"")
                .json(&serde_json::json!({"name": "gear", "size": 9}))
        );
        let response = assert_ok!(pipeline(0).send_empty(&PUT_WIDGET, request).await);
        assert_eq!(response.status(), 201);
    }

    #[tokio::test]
    async fn test_conflict_maps_to_resource_modified() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(412))
            .mount(&server)
            .await;

        let request = OperationRequest::new(server.uri()).path("name", "gear");
        let error = assert_err!(pipeline(0).send_empty(&PUT_WIDGET, request).await);
        assert_eq!(error.kind(), Some(ErrorKind::ResourceModified));
    }

    #[tokio::test]
    async fn test_bearer_policy_adds_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer token-123"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"name": "gear", "size": 1})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let policy = BearerTokenPolicy::management(Arc::new(StaticTokenCredential::new("token-123")));
        let pipeline = Pipeline::with_reqwest(Arc::new(policy), &fast_options(0)).unwrap();
        let request = OperationRequest::new(server.uri()).path("name", "gear");
        assert_ok!(pipeline.send_json::<Widget>(&GET_WIDGET, request).await);
    }

    #[tokio::test]
    async fn test_missing_path_parameter_fails_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let request = OperationRequest::new(server.uri()).path("name", "");
        let error = assert_err!(pipeline(0).send(&GET_WIDGET, request).await);
        assert_matches!(error, SdkError::Validation(_));
    }

    #[tokio::test]
    async fn test_malformed_body_is_deserialize_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let request = OperationRequest::new(server.uri()).path("name", "gear");
        let error = assert_err!(pipeline(0).send_json::<Widget>(&GET_WIDGET, request).await);
        assert_matches!(error, SdkError::Deserialize { ref operation, .. } if operation == "get_widget");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let request = OperationRequest::new("http://127.0.0.1:1").path("name", "gear");
        let error = assert_err!(pipeline(0).send(&GET_WIDGET, request).await);
        assert_matches!(error, SdkError::Http(_));
        assert!(error.is_transient());
    }

    #[tokio::test]
    async fn test_zero_timeout_means_no_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/widgets/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"name": "slow", "size": 1}))
                    .set_delay(std::time::Duration::from_millis(200)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let options = fast_options(0).with_timeout_secs(0);
        let pipeline = assert_ok!(Pipeline::with_reqwest(Arc::new(NoAuth), &options));
        let request = OperationRequest::new(server.uri()).path("name", "slow");
        assert_ok!(pipeline.send(&GET_WIDGET, request).await);
    }
}
