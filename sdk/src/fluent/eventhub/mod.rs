mod disaster_recovery_configs;
mod manager;
mod models;

pub use disaster_recovery_configs::DisasterRecoveryConfigs;
pub use manager::EventHubManager;
pub use models::{
    AccessKeys, ArmDisasterRecovery, ArmDisasterRecoveryCreatable, ArmDisasterRecoveryDefinition,
    CheckNameAvailabilityResult, DisasterRecoveryConfigNamespaceAuthorizationRule,
};
