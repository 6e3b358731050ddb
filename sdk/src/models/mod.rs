//! Request and response bodies, grouped by service.

pub mod app_configuration;
pub mod appservice;
pub mod container_instance;
pub mod datalake_analytics;
pub mod datalake_store;
pub mod eventhub;
pub mod labservices;
pub mod resourcemover;
pub mod storage_import_export;

pub use app_configuration::{ConfigurationSetting, SettingFields, SettingSelector};
pub use appservice::{AllowedAudiencesValidation, ProxyOnlyResource};
pub use container_instance::{CachedImages, CachedImagesListResult};
pub use datalake_analytics::{JobInnerError, SeverityTypes};
pub use datalake_store::{
    AclStatus, AclStatusResult, AppendModeType, ContentSummary, ContentSummaryResult,
    FileOperationResult, FileStatusProperties, FileStatusResult, FileStatuses, FileStatusesResult,
    FileType,
};
pub use eventhub::{
    AccessKeysInner, AccessRights, ArmDisasterRecoveryInner, ArmDisasterRecoveryProperties,
    AuthorizationRuleInner, AuthorizationRuleProperties, CheckNameAvailabilityParameter,
    CheckNameAvailabilityResultInner, ProvisioningStateDR, RoleDisasterRecovery,
    UnavailableReason,
};
pub use labservices::OperationBatchStatusPayload;
pub use resourcemover::Summary;
pub use storage_import_export::{LocationInner, LocationProperties};
