//! Public-facing wrappers over the inner service clients.
//!
//! A wrapper holds the inner DTO plus a handle to the manager that produced
//! it, so follow-up calls (`refresh`, `list_keys`) need no extra arguments.

pub mod eventhub;

pub use eventhub::{
    AccessKeys, ArmDisasterRecovery, ArmDisasterRecoveryCreatable, ArmDisasterRecoveryDefinition,
    CheckNameAvailabilityResult, DisasterRecoveryConfigNamespaceAuthorizationRule,
    DisasterRecoveryConfigs, EventHubManager,
};
