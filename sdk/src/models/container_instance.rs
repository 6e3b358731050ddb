use crate::common::{SdkResult, Validate, require};
use crate::pipeline::Page;
use serde::{Deserialize, Serialize};

/// An image cached in a region for faster container group start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedImages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CachedImages {
    pub fn with_os_type(mut self, os_type: impl Into<String>) -> Self {
        self.os_type = Some(os_type.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

impl Validate for CachedImages {
    fn validate(&self) -> SdkResult<()> {
        require(&self.os_type, "osType", "CachedImages")?;
        require(&self.image, "image", "CachedImages")?;
        Ok(())
    }
}

/// `value` + `nextLink`; validating it validates every image.
pub type CachedImagesListResult = Page<CachedImages>;
