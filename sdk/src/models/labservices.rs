use crate::common::{SdkResult, Validate, require};
use serde::{Deserialize, Serialize};

/// Request body for polling the status of a batch of lab operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationBatchStatusPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
}

impl OperationBatchStatusPayload {
    pub fn with_urls(mut self, urls: Vec<String>) -> Self {
        self.urls = Some(urls);
        self
    }
}

impl Validate for OperationBatchStatusPayload {
    fn validate(&self) -> SdkResult<()> {
        require(&self.urls, "urls", "OperationBatchStatusPayload").map(|_| ())
    }
}
