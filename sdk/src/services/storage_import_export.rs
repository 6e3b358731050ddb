use super::{ARM_ERRORS, MANAGEMENT_ENDPOINT};
use crate::common::SdkResult;
use crate::models::LocationInner;
use crate::pipeline::{OperationRequest, Pager, Pipeline, Response, RestOperation, Verb};

pub const API_VERSION: &str = "2021-01-01";

/// Import/Export shipping location endpoints. These are tenant level and
/// take no subscription.
pub struct LocationsService;

impl LocationsService {
    /// Every shipping location.
    pub const LIST: RestOperation = RestOperation {
        name: "locations.list",
        verb: Verb::Get,
        path: "providers/Microsoft.ImportExport/locations",
        expected: &[200],
        errors: ARM_ERRORS,
    };

    pub const LIST_NEXT: RestOperation = RestOperation {
        name: "locations.list_next",
        verb: Verb::Get,
        path: "{nextLink}",
        expected: &[200],
        errors: ARM_ERRORS,
    };

    /// One shipping location by name.
    pub const GET: RestOperation = RestOperation {
        name: "locations.get",
        verb: Verb::Get,
        path: "providers/Microsoft.ImportExport/locations/{locationName}",
        expected: &[200],
        errors: ARM_ERRORS,
    };
}

#[derive(Debug, Clone)]
pub struct LocationsClient {
    pipeline: Pipeline,
    endpoint: String,
    accept_language: Option<String>,
}

impl LocationsClient {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            endpoint: MANAGEMENT_ENDPOINT.to_string(),
            accept_language: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Preferred language for localized address fields.
    pub fn with_accept_language(mut self, language: impl Into<String>) -> Self {
        self.accept_language = Some(language.into());
        self
    }

    fn request(&self) -> OperationRequest {
        OperationRequest::new(&self.endpoint)
            .query("api-version", API_VERSION)
            .header_opt("Accept-Language", self.accept_language.as_deref())
    }

    /// All shipping locations. The service answers in one page today, but a
    /// `nextLink` is followed if one shows up.
    pub fn list(&self) -> Pager<LocationInner> {
        self.pipeline
            .pager(LocationsService::LIST, self.request(), LocationsService::LIST_NEXT)
    }

    pub async fn get(&self, location_name: &str) -> SdkResult<LocationInner> {
        Ok(self.get_with_response(location_name).await?.into_value())
    }

    pub async fn get_with_response(&self, location_name: &str) -> SdkResult<Response<LocationInner>> {
        let request = self.request().path("locationName", location_name);
        self.pipeline.send_json(&LocationsService::GET, request).await
    }
}
