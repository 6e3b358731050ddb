use async_trait::async_trait;
use azrest::auth::NoAuth;
use azrest::common::{HttpError, SdkError};
use azrest::config::ClientOptions;
use azrest::models::{AppendModeType, FileType};
use azrest::pipeline::{HttpRequest, HttpTransport, Pipeline, RawResponse, ReqwestTransport, RetryOptions};
use azrest::services::FileSystemClient;
use claims::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{body_bytes, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Sends every request to the mock server while remembering which
/// account host it was meant for.
struct RedirectTransport {
    target: reqwest::Url,
    inner: ReqwestTransport,
    hosts: Mutex<Vec<String>>,
}

impl RedirectTransport {
    fn new(server: &MockServer) -> Self {
        Self {
            target: reqwest::Url::parse(&server.uri()).expect("mock uri"),
            inner: ReqwestTransport::new(Duration::from_secs(5)).expect("transport"),
            hosts: Mutex::new(Vec::new()),
        }
    }

    fn hosts(&self) -> Vec<String> {
        self.hosts.lock().map(|h| h.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl HttpTransport for RedirectTransport {
    async fn execute(&self, mut request: HttpRequest) -> Result<RawResponse, HttpError> {
        if let Ok(mut hosts) = self.hosts.lock() {
            hosts.push(request.host_header());
        }
        let _ = request.url.set_scheme(self.target.scheme());
        let _ = request.url.set_host(self.target.host_str());
        let _ = request.url.set_port(self.target.port());
        self.inner.execute(request).await
    }
}

fn client(transport: Arc<RedirectTransport>) -> FileSystemClient {
    let options = ClientOptions::default()
        .without_rate_limit()
        .with_retry(RetryOptions::none());
    let pipeline = Pipeline::new(transport, Arc::new(NoAuth), &options);
    FileSystemClient::new(pipeline)
}

#[cfg(test)]
mod datalake_store_tests {
    use super::*;

    #[tokio::test]
    async fn test_requests_target_the_account_host() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/webhdfs/v1/data/raw"))
            .and(query_param("op", "MKDIRS"))
            .and(query_param("api-version", "2016-11-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"boolean": true})))
            .expect(1)
            .mount(&server)
            .await;

        let transport = Arc::new(RedirectTransport::new(&server));
        let result = assert_ok!(client(transport.clone()).mkdirs("myaccount", "data/raw").await);

        assert!(result.succeeded());
        assert_eq!(transport.hosts(), vec!["myaccount.azuredatalakestore.net".to_string()]);
    }

    #[tokio::test]
    async fn test_create_then_append_then_open() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/webhdfs/v1/logs/app.log"))
            .and(query_param("op", "CREATE"))
            .and(query_param("write", "true"))
            .and(query_param("overwrite", "true"))
            .and(header("content-type", "application/octet-stream"))
            .and(body_bytes(b"first line\n".to_vec()))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/webhdfs/v1/logs/app.log"))
            .and(query_param("op", "APPEND"))
            .and(query_param("append", "true"))
            .and(body_bytes(b"second line\n".to_vec()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/webhdfs/v1/logs/app.log"))
            .and(query_param("op", "OPEN"))
            .and(query_param("offset", "0"))
            .and(header("accept", "application/octet-stream"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"first line\nsecond line\n".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let fs = client(Arc::new(RedirectTransport::new(&server)));
        assert_ok!(
            fs.create("acct", "/logs/app.log", Some(b"first line\n".to_vec()), Some(true))
                .await
        );
        assert_ok!(fs.append("acct", "/logs/app.log", b"second line\n".to_vec()).await);
        let contents = assert_ok!(fs.open("acct", "/logs/app.log", None, Some(0)).await);
        assert_eq!(contents, b"first line\nsecond line\n".to_vec());
    }

    #[tokio::test]
    async fn test_create_rejects_plain_ok() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let fs = client(Arc::new(RedirectTransport::new(&server)));
        let error = assert_err!(fs.create("acct", "/f", None, None).await);
        assert_eq!(error.status_code(), Some(200));
    }

    #[tokio::test]
    async fn test_concurrent_append_uses_extension_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/WebHdfsExt/streams/s1"))
            .and(query_param("op", "CONCURRENTAPPEND"))
            .and(query_param("appendMode", "autocreate"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let fs = client(Arc::new(RedirectTransport::new(&server)));
        assert_ok!(
            fs.concurrent_append("acct", "streams/s1", b"x".to_vec(), Some(AppendModeType::Autocreate))
                .await
        );
    }

    #[tokio::test]
    async fn test_list_file_status_pages_with_list_after() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/webhdfs/v1/data"))
            .and(query_param("op", "LISTSTATUS"))
            .and(query_param("listSize", "2"))
            .and(query_param("listAfter", "b.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "FileStatuses": {
                    "FileStatus": [
                        {"pathSuffix": "c.csv", "type": "FILE", "length": 10},
                        {"pathSuffix": "nested", "type": "DIRECTORY", "childrenNum": 3}
                    ],
                    "continuationToken": "nested"
                }
            })))
            .mount(&server)
            .await;

        let fs = client(Arc::new(RedirectTransport::new(&server)));
        let page = assert_ok!(
            fs.list_file_status("acct", "/data", Some(2), Some("b.csv"), None)
                .await
        );

        let entries = page.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file_type, Some(FileType::File));
        assert!(entries[1].is_directory());
        assert_eq!(page.continuation(), Some("nested"));
    }

    #[tokio::test]
    async fn test_content_summary_and_acl_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/webhdfs/va/data"))
            .and(query_param("op", "GETCONTENTSUMMARY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ContentSummary": {"directoryCount": 2, "fileCount": 5, "length": 1024, "spaceConsumed": 1024}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/webhdfs/v1/data"))
            .and(query_param("op", "GETACLSTATUS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "AclStatus": {
                    "entries": ["user:alice:rwx"],
                    "owner": "owner-id",
                    "group": "group-id",
                    "permission": "770",
                    "stickyBit": false
                }
            })))
            .mount(&server)
            .await;

        let fs = client(Arc::new(RedirectTransport::new(&server)));
        let summary = assert_ok!(fs.get_content_summary("acct", "/data").await);
        let summary = assert_some!(summary.content_summary);
        assert_eq!(summary.file_count, Some(5));
        assert_eq!(summary.directory_count, Some(2));

        let acl = assert_ok!(fs.get_acl_status("acct", "/data").await);
        let acl = assert_some!(acl.acl_status);
        assert_eq!(acl.entries, vec!["user:alice:rwx".to_string()]);
        assert_eq!(acl.sticky_bit, Some(false));
    }

    #[tokio::test]
    async fn test_rename_and_delete_report_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(query_param("op", "RENAME"))
            .and(query_param("destination", "/archive/a.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"boolean": true})))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(query_param("op", "DELETE"))
            .and(query_param("recursive", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"boolean": false})))
            .mount(&server)
            .await;

        let fs = client(Arc::new(RedirectTransport::new(&server)));
        assert!(assert_ok!(fs.rename("acct", "/a.csv", "/archive/a.csv").await).succeeded());
        assert!(!assert_ok!(fs.delete("acct", "/missing", Some(true)).await).succeeded());
    }

    #[tokio::test]
    async fn test_acl_and_ownership_updates() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(query_param("op", "SETACL"))
            .and(query_param("aclspec", "user::rwx,group::r-x,other::---"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(query_param("op", "SETOWNER"))
            .and(query_param("owner", "alice"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(query_param("op", "SETPERMISSION"))
            .and(query_param("permission", "750"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let fs = client(Arc::new(RedirectTransport::new(&server)));
        assert_ok!(fs.set_acl("acct", "/d", "user::rwx,group::r-x,other::---").await);
        assert_ok!(fs.set_owner("acct", "/d", Some("alice"), None).await);
        assert_ok!(fs.set_permission("acct", "/d", Some("750")).await);
    }

    #[tokio::test]
    async fn test_remote_exception_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "RemoteException": {
                    "exception": "FileNotFoundException",
                    "message": "File/Folder does not exist: /nope",
                    "javaClassName": "java.io.FileNotFoundException"
                }
            })))
            .mount(&server)
            .await;

        let fs = client(Arc::new(RedirectTransport::new(&server)));
        let error = assert_err!(fs.get_file_status("acct", "/nope").await);
        assert!(error.is_not_found());
        assert_eq!(error.azure_error_code(), Some("FileNotFoundException"));
    }

    #[tokio::test]
    async fn test_dot_segments_cannot_escape_the_filesystem_root() {
        let server = MockServer::start().await;
        let transport = Arc::new(RedirectTransport::new(&server));
        let fs = client(transport.clone());

        let error = assert_err!(fs.open("acct", "/../../x", None, None).await);
        assert_matches!(error, SdkError::Validation(_));
        assert_err!(fs.delete("acct", "/data/..", Some(true)).await);

        assert!(transport.hosts().is_empty());
    }

    #[tokio::test]
    async fn test_concat_needs_sources() {
        let server = MockServer::start().await;
        let fs = client(Arc::new(RedirectTransport::new(&server)));
        let error = assert_err!(fs.concat("acct", "/joined", &[]).await);
        assert_matches!(error, SdkError::Validation(_));
    }
}
