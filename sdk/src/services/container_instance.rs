use super::{ARM_ERRORS, MANAGEMENT_ENDPOINT};
use crate::models::CachedImages;
use crate::pipeline::{OperationRequest, Pager, Pipeline, RestOperation, Verb};

pub const API_VERSION: &str = "2019-12-01";

pub struct ContainerInstanceService;

impl ContainerInstanceService {
    /// Images cached in a location, paged. Every item must carry `osType` and `image`.
    pub const LIST_CACHED_IMAGES: RestOperation = RestOperation {
        name: "container_instance_locations.list_cached_images",
        verb: Verb::Get,
        path: "subscriptions/{subscriptionId}/providers/Microsoft.ContainerInstance/locations/{location}/cachedImages",
        expected: &[200],
        errors: ARM_ERRORS,
    };

    pub const LIST_CACHED_IMAGES_NEXT: RestOperation = RestOperation {
        name: "container_instance_locations.list_cached_images_next",
        verb: Verb::Get,
        path: "{nextLink}",
        expected: &[200],
        errors: ARM_ERRORS,
    };
}

/// Per-location queries of the Container Instance resource provider.
#[derive(Debug, Clone)]
pub struct ContainerInstanceLocationsClient {
    pipeline: Pipeline,
    subscription_id: String,
    endpoint: String,
}

impl ContainerInstanceLocationsClient {
    pub fn new(pipeline: Pipeline, subscription_id: impl Into<String>) -> Self {
        Self {
            pipeline,
            subscription_id: subscription_id.into(),
            endpoint: MANAGEMENT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Images cached in `location`, usable for faster container group
    /// start-up. Each page is validated as it arrives.
    pub fn list_cached_images(&self, location: &str) -> Pager<CachedImages> {
        let request = OperationRequest::new(&self.endpoint)
            .path("subscriptionId", &self.subscription_id)
            .path("location", location)
            .query("api-version", API_VERSION);
        self.pipeline
            .pager(
                ContainerInstanceService::LIST_CACHED_IMAGES,
                request,
                ContainerInstanceService::LIST_CACHED_IMAGES_NEXT,
            )
            .validated()
    }
}
