use azrest::common::ErrorKind;
use azrest::config::ClientOptions;
use azrest::models::{ConfigurationSetting, SettingSelector};
use azrest::pipeline::RetryOptions;
use azrest::services::{Conditions, ConfigurationClient};
use claims::*;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// base64("secret")
const SECRET: &str = "c2VjcmV0";

fn client(server: &MockServer) -> ConfigurationClient {
    let options = ClientOptions::default()
        .without_rate_limit()
        .with_retry(RetryOptions::none());
    let connection_string = format!("Endpoint={};Id=test-id;Secret={}", server.uri(), SECRET);
    ConfigurationClient::from_connection_string(&connection_string, &options)
        .expect("connection string should be accepted")
}

fn setting_json(key: &str, label: Option<&str>, value: &str, etag: &str) -> serde_json::Value {
    serde_json::json!({
        "key": key,
        "label": label,
        "value": value,
        "etag": etag,
        "locked": false,
        "tags": {}
    })
}

#[cfg(test)]
mod app_configuration_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_setting_is_hmac_signed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/kv/app%3Acolor"))
            .and(query_param("label", "prod"))
            .and(header_exists("x-ms-date"))
            .and(header_exists("x-ms-content-sha256"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(setting_json("app:color", Some("prod"), "blue", "e1")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = assert_ok!(
            client(&server)
                .get_setting("app:color", Some("prod"), None, &Conditions::default())
                .await
        );
        let setting = response.into_value();
        assert_eq!(setting.value.as_deref(), Some("blue"));
        assert_eq!(setting.etag.as_deref(), Some("e1"));

        let requests = server.received_requests().await.unwrap_or_default();
        let authorization = requests[0]
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(authorization.starts_with("HMAC-SHA256 Credential=test-id&SignedHeaders=x-ms-date;host;x-ms-content-sha256&Signature="));
    }

    #[tokio::test]
    async fn test_missing_setting_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "type": "https://azconfig.io/errors/key-not-found",
                "title": "Key not found"
            })))
            .mount(&server)
            .await;

        let error = assert_err!(
            client(&server)
                .get_setting("missing", None, None, &Conditions::default())
                .await
        );
        assert!(error.is_not_found());
        assert_eq!(error.azure_error_code(), Some("key-not-found"));
    }

    #[tokio::test]
    async fn test_add_setting_requires_absence() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/kv/feature"))
            .and(header("if-none-match", "*"))
            .and(body_partial_json(serde_json::json!({"key": "feature", "value": "on"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(setting_json("feature", None, "on", "e2")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let setting = ConfigurationSetting::new("feature", "on");
        let stored = assert_ok!(client(&server).add_setting(&setting).await).into_value();
        assert_eq!(stored.etag.as_deref(), Some("e2"));
    }

    #[tokio::test]
    async fn test_update_with_stale_etag_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(header("if-match", "\"old\""))
            .respond_with(ResponseTemplate::new(412))
            .mount(&server)
            .await;

        let setting = ConfigurationSetting::new("feature", "off").with_etag("old");
        let error = assert_err!(client(&server).update_setting(&setting).await);
        assert_eq!(error.kind(), Some(ErrorKind::ResourceNotFound));
        assert_eq!(error.status_code(), Some(412));
    }

    #[tokio::test]
    async fn test_locked_setting_conflict_is_modified() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let setting = ConfigurationSetting::new("feature", "off");
        let error = assert_err!(client(&server).set_setting(&setting, &Conditions::default()).await);
        assert_eq!(error.kind(), Some(ErrorKind::ResourceModified));
    }

    #[tokio::test]
    async fn test_delete_returns_none_when_nothing_was_deleted() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/kv/gone"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let response = assert_ok!(
            client(&server)
                .delete_setting("gone", None, &Conditions::default())
                .await
        );
        assert_eq!(response.status(), 204);
        assert_none!(response.into_value());
    }

    #[tokio::test]
    async fn test_delete_returns_removed_setting() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/kv/feature"))
            .and(query_param("label", "dev"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(setting_json("feature", Some("dev"), "on", "e3")),
            )
            .mount(&server)
            .await;

        let response = assert_ok!(
            client(&server)
                .delete_setting("feature", Some("dev"), &Conditions::default())
                .await
        );
        let removed = assert_some!(response.into_value());
        assert_eq!(removed.label.as_deref(), Some("dev"));
    }

    #[tokio::test]
    async fn test_dot_segment_keys_never_leave_the_client() {
        let server = MockServer::start().await;
        let client = client(&server);

        let error = assert_err!(client.delete_setting("..", None, &Conditions::default()).await);
        assert_matches!(error, azrest::SdkError::Validation(_));
        assert_err!(client.get_setting(".", None, None, &Conditions::default()).await);
        assert_err!(client.lock_setting("..", None).await);
        assert_err!(client.unlock_setting("..", None).await);

        let received = server.received_requests().await.unwrap_or_default();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn test_lock_and_unlock() {
        let server = MockServer::start().await;
        let mut locked = setting_json("feature", None, "on", "e4");
        locked["locked"] = serde_json::Value::Bool(true);
        Mock::given(method("PUT"))
            .and(path("/locks/feature"))
            .respond_with(ResponseTemplate::new(200).set_body_json(locked))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/locks/feature"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(setting_json("feature", None, "on", "e5")),
            )
            .mount(&server)
            .await;

        let client = client(&server);
        assert!(assert_ok!(client.lock_setting("feature", None).await).value().is_locked());
        assert!(!assert_ok!(client.unlock_setting("feature", None).await).value().is_locked());
    }

    #[tokio::test]
    async fn test_list_settings_follows_next_link() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/kv"))
            .and(query_param("key", "app:*"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [setting_json("app:a", None, "1", "a")],
                "@nextLink": "/kv?key=app%3A*&after=app%3Aa"
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/kv"))
            .and(query_param("after", "app:a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [setting_json("app:b", None, "2", "b")]
            })))
            .mount(&server)
            .await;

        let selector = SettingSelector::new().with_keys(["app:*"]);
        let settings = assert_ok!(client(&server).list_settings(&selector).collect_all().await);
        let keys: Vec<_> = settings.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["app:a", "app:b"]);
    }

    #[tokio::test]
    async fn test_list_revisions_accepts_partial_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/revisions"))
            .and(header("range", "items=0-1"))
            .respond_with(ResponseTemplate::new(206).set_body_json(serde_json::json!({
                "items": [
                    setting_json("app:a", None, "2", "r2"),
                    setting_json("app:a", None, "1", "r1")
                ]
            })))
            .mount(&server)
            .await;

        let selector = SettingSelector::new().with_keys(["app:a"]);
        let revisions = assert_ok!(
            client(&server)
                .list_revisions(&selector, Some("items=0-1"))
                .collect_all()
                .await
        );
        assert_eq!(revisions.len(), 2);
    }

    #[test]
    fn test_connection_string_without_secret_is_rejected() {
        let result = ConfigurationClient::from_connection_string(
            "Endpoint=https://store.azconfig.io;Id=abc",
            &ClientOptions::default(),
        );
        assert_err!(result);
    }
}
