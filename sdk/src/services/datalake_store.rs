//! Data Lake Store filesystem (WebHDFS) operations.
//!
//! Every call targets `https://{account}.{dns_suffix}` and names the
//! filesystem operation in the `op` query parameter.

use super::ARM_ERRORS;
use crate::common::{SdkError, SdkResult};
use crate::models::{
    AclStatusResult, AppendModeType, ContentSummaryResult, FileOperationResult, FileStatusResult,
    FileStatusesResult,
};
use crate::pipeline::{OperationRequest, Pipeline, RestOperation, Verb};

pub const API_VERSION: &str = "2016-11-01";
pub const DEFAULT_DNS_SUFFIX: &str = "azuredatalakestore.net";
pub const DATALAKE_SCOPE: &str = "https://datalake.azure.net/.default";

const OCTET_STREAM: &str = "application/octet-stream";

macro_rules! webhdfs_op {
    ($name:literal, $verb:ident, $path:literal) => {
        webhdfs_op!($name, $verb, $path, &[200])
    };
    ($name:literal, $verb:ident, $path:literal, $expected:expr) => {
        RestOperation {
            name: $name,
            verb: Verb::$verb,
            path: $path,
            expected: $expected,
            errors: ARM_ERRORS,
        }
    };
}

/// WebHDFS endpoints. Paths are rooted, so `{path}` always begins with `/`.
pub struct FileSystemService;

impl FileSystemService {
    /// Append from many writers at once; lives under `WebHdfsExt`, not `webhdfs/v1`.
    pub const CONCURRENT_APPEND: RestOperation = webhdfs_op!("file_system.concurrent_append", Post, "WebHdfsExt{path}");
    pub const CHECK_ACCESS: RestOperation = webhdfs_op!("file_system.check_access", Get, "webhdfs/v1{path}");
    pub const MKDIRS: RestOperation = webhdfs_op!("file_system.mkdirs", Put, "webhdfs/v1{path}");
    pub const CONCAT: RestOperation = webhdfs_op!("file_system.concat", Post, "webhdfs/v1{path}");
    pub const MS_CONCAT: RestOperation = webhdfs_op!("file_system.ms_concat", Post, "webhdfs/v1{path}");
    pub const LIST_FILE_STATUS: RestOperation = webhdfs_op!("file_system.list_file_status", Get, "webhdfs/v1{path}");
    /// Served under `webhdfs/va`.
    pub const GET_CONTENT_SUMMARY: RestOperation = webhdfs_op!("file_system.get_content_summary", Get, "webhdfs/va{path}");
    pub const GET_FILE_STATUS: RestOperation = webhdfs_op!("file_system.get_file_status", Get, "webhdfs/v1{path}");
    pub const APPEND: RestOperation = webhdfs_op!("file_system.append", Post, "webhdfs/v1{path}");
    /// Expects 201; a plain 200 is an error.
    pub const CREATE: RestOperation = webhdfs_op!("file_system.create", Put, "webhdfs/v1{path}", &[201]);
    /// Returns the raw file bytes.
    pub const OPEN: RestOperation = webhdfs_op!("file_system.open", Get, "webhdfs/v1{path}");
    pub const SET_ACL: RestOperation = webhdfs_op!("file_system.set_acl", Put, "webhdfs/v1{path}");
    pub const MODIFY_ACL_ENTRIES: RestOperation = webhdfs_op!("file_system.modify_acl_entries", Put, "webhdfs/v1{path}");
    pub const REMOVE_ACL_ENTRIES: RestOperation = webhdfs_op!("file_system.remove_acl_entries", Put, "webhdfs/v1{path}");
    pub const REMOVE_ACL: RestOperation = webhdfs_op!("file_system.remove_acl", Put, "webhdfs/v1{path}");
    pub const GET_ACL_STATUS: RestOperation = webhdfs_op!("file_system.get_acl_status", Get, "webhdfs/v1{path}");
    pub const DELETE: RestOperation = webhdfs_op!("file_system.delete", Delete, "webhdfs/v1{path}");
    pub const RENAME: RestOperation = webhdfs_op!("file_system.rename", Put, "webhdfs/v1{path}");
    pub const SET_OWNER: RestOperation = webhdfs_op!("file_system.set_owner", Put, "webhdfs/v1{path}");
    pub const SET_PERMISSION: RestOperation = webhdfs_op!("file_system.set_permission", Put, "webhdfs/v1{path}");
}

/// Client for Data Lake Store accounts. The account is chosen per call.
#[derive(Debug, Clone)]
pub struct FileSystemClient {
    pipeline: Pipeline,
    dns_suffix: String,
    scheme: String,
}

impl FileSystemClient {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            dns_suffix: DEFAULT_DNS_SUFFIX.to_string(),
            scheme: "https".to_string(),
        }
    }

    pub fn with_dns_suffix(mut self, dns_suffix: impl Into<String>) -> Self {
        self.dns_suffix = dns_suffix.into();
        self
    }

    /// Talk plain `http`; only useful against local emulators and mocks.
    pub fn with_insecure_scheme(mut self) -> Self {
        self.scheme = "http".to_string();
        self
    }

    pub fn dns_suffix(&self) -> &str {
        &self.dns_suffix
    }

    fn request(&self, account_name: &str, path: &str, op: &'static str) -> SdkResult<OperationRequest> {
        if account_name.trim().is_empty() {
            return Err(SdkError::Validation(
                "Parameter accountName is required and cannot be null".to_string(),
            ));
        }
        let host = format!("{}://{}.{}", self.scheme, account_name, self.dns_suffix);
        Ok(OperationRequest::new(host)
            .path_segments("path", rooted(path))
            .query("op", op)
            .query("api-version", API_VERSION))
    }

    async fn send_empty(&self, op: &RestOperation, request: OperationRequest) -> SdkResult<()> {
        self.pipeline.send_empty(op, request).await?;
        Ok(())
    }

    /// Append to a file that several writers may be appending to at once.
    pub async fn concurrent_append(
        &self,
        account_name: &str,
        file_path: &str,
        contents: Vec<u8>,
        append_mode: Option<AppendModeType>,
    ) -> SdkResult<()> {
        let request = self
            .request(account_name, file_path, "CONCURRENTAPPEND")?
            .query_opt("appendMode", append_mode.map(AppendModeType::as_str))
            .bytes(contents, OCTET_STREAM);
        self.send_empty(&FileSystemService::CONCURRENT_APPEND, request).await
    }

    /// Fails unless the caller has `fsaction` (e.g. `r-x`) on `path`.
    pub async fn check_access(&self, account_name: &str, path: &str, fsaction: Option<&str>) -> SdkResult<()> {
        let request = self
            .request(account_name, path, "CHECKACCESS")?
            .query_opt("fsaction", fsaction);
        self.send_empty(&FileSystemService::CHECK_ACCESS, request).await
    }

    pub async fn mkdirs(&self, account_name: &str, path: &str) -> SdkResult<FileOperationResult> {
        let request = self.request(account_name, path, "MKDIRS")?;
        Ok(self
            .pipeline
            .send_json(&FileSystemService::MKDIRS, request)
            .await?
            .into_value())
    }

    /// Concatenate `sources` into `destination_path`.
    pub async fn concat(&self, account_name: &str, destination_path: &str, sources: &[String]) -> SdkResult<()> {
        if sources.is_empty() {
            return Err(SdkError::Validation(
                "Parameter sources is required and cannot be null".to_string(),
            ));
        }
        let request = self
            .request(account_name, destination_path, "CONCAT")?
            .query("sources", sources.join(","));
        self.send_empty(&FileSystemService::CONCAT, request).await
    }

    /// Concatenate with the source list in the body (`sources=a,b`), which
    /// lifts the URL length limit on large source lists.
    pub async fn ms_concat(
        &self,
        account_name: &str,
        destination_path: &str,
        contents: Vec<u8>,
        delete_source_directory: Option<bool>,
    ) -> SdkResult<()> {
        let request = self
            .request(account_name, destination_path, "MSCONCAT")?
            .query_opt("deleteSourceDirectory", delete_source_directory)
            .bytes(contents, OCTET_STREAM);
        self.send_empty(&FileSystemService::MS_CONCAT, request).await
    }

    /// One page of a directory listing. Pass the previous page's
    /// continuation as `list_after` to get the next one.
    pub async fn list_file_status(
        &self,
        account_name: &str,
        path: &str,
        list_size: Option<u32>,
        list_after: Option<&str>,
        list_before: Option<&str>,
    ) -> SdkResult<FileStatusesResult> {
        let request = self
            .request(account_name, path, "LISTSTATUS")?
            .query_opt("listSize", list_size)
            .query_opt("listAfter", list_after)
            .query_opt("listBefore", list_before);
        Ok(self
            .pipeline
            .send_json(&FileSystemService::LIST_FILE_STATUS, request)
            .await?
            .into_value())
    }

    pub async fn get_content_summary(&self, account_name: &str, path: &str) -> SdkResult<ContentSummaryResult> {
        let request = self.request(account_name, path, "GETCONTENTSUMMARY")?;
        Ok(self
            .pipeline
            .send_json(&FileSystemService::GET_CONTENT_SUMMARY, request)
            .await?
            .into_value())
    }

    pub async fn get_file_status(&self, account_name: &str, path: &str) -> SdkResult<FileStatusResult> {
        let request = self.request(account_name, path, "GETFILESTATUS")?;
        Ok(self
            .pipeline
            .send_json(&FileSystemService::GET_FILE_STATUS, request)
            .await?
            .into_value())
    }

    pub async fn append(&self, account_name: &str, file_path: &str, contents: Vec<u8>) -> SdkResult<()> {
        let request = self
            .request(account_name, file_path, "APPEND")?
            .query("append", "true")
            .bytes(contents, OCTET_STREAM);
        self.send_empty(&FileSystemService::APPEND, request).await
    }

    /// Create a file, optionally with initial contents.
    pub async fn create(
        &self,
        account_name: &str,
        file_path: &str,
        contents: Option<Vec<u8>>,
        overwrite: Option<bool>,
    ) -> SdkResult<()> {
        let mut request = self
            .request(account_name, file_path, "CREATE")?
            .query("write", "true")
            .query_opt("overwrite", overwrite);
        if let Some(contents) = contents {
            request = request.bytes(contents, OCTET_STREAM);
        }
        self.send_empty(&FileSystemService::CREATE, request).await
    }

    /// Read `length` bytes from `offset`; the whole file when both are `None`.
    pub async fn open(
        &self,
        account_name: &str,
        file_path: &str,
        length: Option<u64>,
        offset: Option<u64>,
    ) -> SdkResult<Vec<u8>> {
        let request = self
            .request(account_name, file_path, "OPEN")?
            .query("read", "true")
            .query_opt("length", length)
            .query_opt("offset", offset)
            .header("Accept", OCTET_STREAM);
        Ok(self
            .pipeline
            .send(&FileSystemService::OPEN, request)
            .await?
            .into_value())
    }

    /// Replace the ACL of `path` with `aclspec` (`user::rwx,group::r-x,...`).
    pub async fn set_acl(&self, account_name: &str, path: &str, aclspec: &str) -> SdkResult<()> {
        let request = self
            .request(account_name, path, "SETACL")?
            .query("aclspec", aclspec);
        self.send_empty(&FileSystemService::SET_ACL, request).await
    }

    pub async fn modify_acl_entries(&self, account_name: &str, path: &str, aclspec: &str) -> SdkResult<()> {
        let request = self
            .request(account_name, path, "MODIFYACLENTRIES")?
            .query("aclspec", aclspec);
        self.send_empty(&FileSystemService::MODIFY_ACL_ENTRIES, request).await
    }

    pub async fn remove_acl_entries(&self, account_name: &str, path: &str, aclspec: &str) -> SdkResult<()> {
        let request = self
            .request(account_name, path, "REMOVEACLENTRIES")?
            .query("aclspec", aclspec);
        self.send_empty(&FileSystemService::REMOVE_ACL_ENTRIES, request).await
    }

    /// Drop every non-base ACL entry.
    pub async fn remove_acl(&self, account_name: &str, path: &str) -> SdkResult<()> {
        let request = self.request(account_name, path, "REMOVEACL")?;
        self.send_empty(&FileSystemService::REMOVE_ACL, request).await
    }

    pub async fn get_acl_status(&self, account_name: &str, path: &str) -> SdkResult<AclStatusResult> {
        let request = self.request(account_name, path, "GETACLSTATUS")?;
        Ok(self
            .pipeline
            .send_json(&FileSystemService::GET_ACL_STATUS, request)
            .await?
            .into_value())
    }

    pub async fn delete(&self, account_name: &str, path: &str, recursive: Option<bool>) -> SdkResult<FileOperationResult> {
        let request = self
            .request(account_name, path, "DELETE")?
            .query_opt("recursive", recursive);
        Ok(self
            .pipeline
            .send_json(&FileSystemService::DELETE, request)
            .await?
            .into_value())
    }

    pub async fn rename(&self, account_name: &str, path: &str, destination: &str) -> SdkResult<FileOperationResult> {
        let request = self
            .request(account_name, path, "RENAME")?
            .query("destination", destination);
        Ok(self
            .pipeline
            .send_json(&FileSystemService::RENAME, request)
            .await?
            .into_value())
    }

    pub async fn set_owner(
        &self,
        account_name: &str,
        path: &str,
        owner: Option<&str>,
        group: Option<&str>,
    ) -> SdkResult<()> {
        let request = self
            .request(account_name, path, "SETOWNER")?
            .query_opt("owner", owner)
            .query_opt("group", group);
        self.send_empty(&FileSystemService::SET_OWNER, request).await
    }

    /// Set octal permissions, e.g. `"755"`.
    pub async fn set_permission(&self, account_name: &str, path: &str, permission: Option<&str>) -> SdkResult<()> {
        let request = self
            .request(account_name, path, "SETPERMISSION")?
            .query_opt("permission", permission);
        self.send_empty(&FileSystemService::SET_PERMISSION, request).await
    }
}

fn rooted(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}
