//! REST endpoint declarations and the inner clients that call them.
//!
//! Each service lists its endpoints as [`RestOperation`](crate::pipeline::RestOperation)
//! constants on a unit struct and exposes a client that fills an
//! [`OperationRequest`](crate::pipeline::OperationRequest) per call.

pub mod app_configuration;
pub mod container_instance;
pub mod datalake_store;
pub mod eventhub;
pub mod storage_import_export;

pub use app_configuration::{Conditions, ConfigurationClient, ConfigurationService};
pub use container_instance::{ContainerInstanceLocationsClient, ContainerInstanceService};
pub use datalake_store::{FileSystemClient, FileSystemService};
pub use eventhub::{DisasterRecoveryConfigsInner, DisasterRecoveryConfigsService};
pub use storage_import_export::{LocationsClient, LocationsService};

use crate::common::ErrorKind;
use crate::pipeline::ErrorMapping;

/// ARM-hosted management endpoint.
pub const MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";

/// Status mapping shared by the ARM resource providers.
pub(crate) const ARM_ERRORS: &[ErrorMapping] = &[
    ErrorMapping::new(&[401, 403], ErrorKind::ClientAuthentication),
    ErrorMapping::new(&[404], ErrorKind::ResourceNotFound),
];
