use crate::common::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileType {
    #[serde(rename = "FILE")]
    File,
    #[serde(rename = "DIRECTORY")]
    Directory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppendModeType {
    Autocreate,
}

impl AppendModeType {
    pub fn as_str(self) -> &'static str {
        match self {
            AppendModeType::Autocreate => "autocreate",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStatusProperties {
    #[serde(default)]
    pub access_time: Option<i64>,
    #[serde(default)]
    pub block_size: Option<i64>,
    #[serde(default)]
    pub children_num: Option<i64>,
    #[serde(default)]
    pub ms_expiration_time: Option<i64>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub length: Option<i64>,
    #[serde(default)]
    pub modification_time: Option<i64>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub path_suffix: Option<String>,
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(rename = "type", default)]
    pub file_type: Option<FileType>,
    #[serde(default)]
    pub acl_bit: Option<bool>,
}

impl FileStatusProperties {
    pub fn is_directory(&self) -> bool {
        self.file_type == Some(FileType::Directory)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileStatusResult {
    #[serde(rename = "FileStatus", default)]
    pub file_status: Option<FileStatusProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileStatuses {
    #[serde(rename = "FileStatus", default)]
    pub file_status: Vec<FileStatusProperties>,
    #[serde(rename = "continuationToken", default)]
    pub continuation_token: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileStatusesResult {
    #[serde(rename = "FileStatuses", default)]
    pub file_statuses: Option<FileStatuses>,
}

impl FileStatusesResult {
    pub fn entries(&self) -> &[FileStatusProperties] {
        self.file_statuses
            .as_ref()
            .map(|s| s.file_status.as_slice())
            .unwrap_or_default()
    }

    /// Name of the last entry, for use as the next `listAfter`.
    pub fn continuation(&self) -> Option<&str> {
        self.file_statuses
            .as_ref()
            .and_then(|s| s.continuation_token.as_deref())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    #[serde(default)]
    pub directory_count: Option<i64>,
    #[serde(default)]
    pub file_count: Option<i64>,
    #[serde(default)]
    pub length: Option<i64>,
    #[serde(default)]
    pub space_consumed: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentSummaryResult {
    #[serde(rename = "ContentSummary", default)]
    pub content_summary: Option<ContentSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AclStatus {
    #[serde(default)]
    pub entries: Vec<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub sticky_bit: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AclStatusResult {
    #[serde(rename = "AclStatus", default)]
    pub acl_status: Option<AclStatus>,
}

/// `{"boolean": true}` answer of mkdirs, delete and rename.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileOperationResult {
    #[serde(rename = "boolean", default)]
    pub operation_result: Option<bool>,
}

impl FileOperationResult {
    pub fn succeeded(&self) -> bool {
        self.operation_result.unwrap_or(false)
    }
}

impl Validate for FileStatusResult {}
impl Validate for FileStatusesResult {}
impl Validate for ContentSummaryResult {}
impl Validate for AclStatusResult {}
impl Validate for FileOperationResult {}
