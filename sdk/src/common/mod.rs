pub mod errors;
pub mod rate_limiter;
pub mod resource_id;
pub mod validate;

pub use errors::{ErrorKind, HttpError, SdkError, SdkResult, ServiceErrorBody};
pub use rate_limiter::{RateLimitError, RateLimiter, RateLimiterConfig};
pub use resource_id::ResourceId;
pub use validate::{Validate, require};
