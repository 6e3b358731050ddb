use super::{ARM_ERRORS, MANAGEMENT_ENDPOINT};
use crate::common::{SdkResult, Validate};
use crate::models::{
    AccessKeysInner, ArmDisasterRecoveryInner, AuthorizationRuleInner,
    CheckNameAvailabilityParameter, CheckNameAvailabilityResultInner,
};
use crate::pipeline::{OperationRequest, Pager, Pipeline, RestOperation, Verb};

pub const API_VERSION: &str = "2017-04-01";

macro_rules! dr_path {
    ($suffix:literal) => {
        concat!(
            "subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}/providers/Microsoft.EventHub/namespaces/{namespaceName}/disasterRecoveryConfigs",
            $suffix
        )
    };
}

/// Event Hubs Geo-DR (`disasterRecoveryConfigs`) endpoints.
pub struct DisasterRecoveryConfigsService;

impl DisasterRecoveryConfigsService {
    /// `POST .../disasterRecoveryConfigs/CheckNameAvailability`
    pub const CHECK_NAME_AVAILABILITY: RestOperation = RestOperation {
        name: "disaster_recovery_configs.check_name_availability",
        verb: Verb::Post,
        path: dr_path!("/CheckNameAvailability"),
        expected: &[200],
        errors: ARM_ERRORS,
    };

    /// All aliases of a namespace, paged.
    pub const LIST: RestOperation = RestOperation {
        name: "disaster_recovery_configs.list",
        verb: Verb::Get,
        path: dr_path!(""),
        expected: &[200],
        errors: ARM_ERRORS,
    };

    pub const LIST_NEXT: RestOperation = RestOperation {
        name: "disaster_recovery_configs.list_next",
        verb: Verb::Get,
        path: "{nextLink}",
        expected: &[200],
        errors: ARM_ERRORS,
    };

    /// `PUT` an alias; 200 on update, 201 on create.
    pub const CREATE_OR_UPDATE: RestOperation = RestOperation {
        name: "disaster_recovery_configs.create_or_update",
        verb: Verb::Put,
        path: dr_path!("/{alias}"),
        expected: &[200, 201],
        errors: ARM_ERRORS,
    };

    /// One alias by name.
    pub const GET: RestOperation = RestOperation {
        name: "disaster_recovery_configs.get",
        verb: Verb::Get,
        path: dr_path!("/{alias}"),
        expected: &[200],
        errors: ARM_ERRORS,
    };

    /// Remove an alias. Only valid once pairing is broken.
    pub const DELETE: RestOperation = RestOperation {
        name: "disaster_recovery_configs.delete",
        verb: Verb::Delete,
        path: dr_path!("/{alias}"),
        expected: &[200, 204],
        errors: ARM_ERRORS,
    };

    /// Stop replication between the primary and secondary namespaces.
    pub const BREAK_PAIRING: RestOperation = RestOperation {
        name: "disaster_recovery_configs.break_pairing",
        verb: Verb::Post,
        path: dr_path!("/{alias}/breakPairing"),
        expected: &[200],
        errors: ARM_ERRORS,
    };

    /// Promote the secondary namespace. Sent to the secondary.
    pub const FAIL_OVER: RestOperation = RestOperation {
        name: "disaster_recovery_configs.fail_over",
        verb: Verb::Post,
        path: dr_path!("/{alias}/failover"),
        expected: &[200],
        errors: ARM_ERRORS,
    };

    /// Authorization rules reachable through the alias, paged.
    pub const LIST_AUTHORIZATION_RULES: RestOperation = RestOperation {
        name: "disaster_recovery_configs.list_authorization_rules",
        verb: Verb::Get,
        path: dr_path!("/{alias}/authorizationRules"),
        expected: &[200],
        errors: ARM_ERRORS,
    };

    pub const LIST_AUTHORIZATION_RULES_NEXT: RestOperation = RestOperation {
        name: "disaster_recovery_configs.list_authorization_rules_next",
        verb: Verb::Get,
        path: "{nextLink}",
        expected: &[200],
        errors: ARM_ERRORS,
    };

    /// One authorization rule by name.
    pub const GET_AUTHORIZATION_RULE: RestOperation = RestOperation {
        name: "disaster_recovery_configs.get_authorization_rule",
        verb: Verb::Get,
        path: dr_path!("/{alias}/authorizationRules/{authorizationRuleName}"),
        expected: &[200],
        errors: ARM_ERRORS,
    };

    /// `POST .../listKeys`: primary and secondary keys plus alias connection strings.
    pub const LIST_KEYS: RestOperation = RestOperation {
        name: "disaster_recovery_configs.list_keys",
        verb: Verb::Post,
        path: dr_path!("/{alias}/authorizationRules/{authorizationRuleName}/listKeys"),
        expected: &[200],
        errors: ARM_ERRORS,
    };
}

/// Inner client for Event Hubs disaster recovery configurations.
#[derive(Debug, Clone)]
pub struct DisasterRecoveryConfigsInner {
    pipeline: Pipeline,
    subscription_id: String,
    endpoint: String,
}

impl DisasterRecoveryConfigsInner {
    pub fn new(pipeline: Pipeline, subscription_id: impl Into<String>) -> Self {
        Self {
            pipeline,
            subscription_id: subscription_id.into(),
            endpoint: MANAGEMENT_ENDPOINT.to_string(),
        }
    }

    /// Point the client at another ARM endpoint (sovereign clouds, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    fn namespace_request(&self, resource_group_name: &str, namespace_name: &str) -> OperationRequest {
        OperationRequest::new(&self.endpoint)
            .path("subscriptionId", &self.subscription_id)
            .path("resourceGroupName", resource_group_name)
            .path("namespaceName", namespace_name)
            .query("api-version", API_VERSION)
    }

    fn alias_request(&self, resource_group_name: &str, namespace_name: &str, alias: &str) -> OperationRequest {
        self.namespace_request(resource_group_name, namespace_name)
            .path("alias", alias)
    }

    /// Check whether `name` is free to use as a Geo-DR alias.
    pub async fn check_name_availability(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        name: &str,
    ) -> SdkResult<CheckNameAvailabilityResultInner> {
        let parameters = CheckNameAvailabilityParameter::new(name);
        parameters.validate()?;
        let request = self
            .namespace_request(resource_group_name, namespace_name)
            .json(&parameters)?;
        Ok(self
            .pipeline
            .send_json(&DisasterRecoveryConfigsService::CHECK_NAME_AVAILABILITY, request)
            .await?
            .into_value())
    }

    pub fn list(&self, resource_group_name: &str, namespace_name: &str) -> Pager<ArmDisasterRecoveryInner> {
        self.pipeline.pager(
            DisasterRecoveryConfigsService::LIST,
            self.namespace_request(resource_group_name, namespace_name),
            DisasterRecoveryConfigsService::LIST_NEXT,
        )
    }

    pub async fn create_or_update(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
        parameters: &ArmDisasterRecoveryInner,
    ) -> SdkResult<ArmDisasterRecoveryInner> {
        parameters.validate()?;
        let request = self
            .alias_request(resource_group_name, namespace_name, alias)
            .json(parameters)?;
        Ok(self
            .pipeline
            .send_json(&DisasterRecoveryConfigsService::CREATE_OR_UPDATE, request)
            .await?
            .into_value())
    }

    pub async fn get(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
    ) -> SdkResult<ArmDisasterRecoveryInner> {
        let request = self.alias_request(resource_group_name, namespace_name, alias);
        Ok(self
            .pipeline
            .send_json(&DisasterRecoveryConfigsService::GET, request)
            .await?
            .into_value())
    }

    pub async fn delete(&self, resource_group_name: &str, namespace_name: &str, alias: &str) -> SdkResult<()> {
        let request = self.alias_request(resource_group_name, namespace_name, alias);
        self.pipeline
            .send_empty(&DisasterRecoveryConfigsService::DELETE, request)
            .await?;
        Ok(())
    }

    /// Stop replication; both namespaces become stand-alone.
    pub async fn break_pairing(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
    ) -> SdkResult<()> {
        let request = self.alias_request(resource_group_name, namespace_name, alias);
        self.pipeline
            .send_empty(&DisasterRecoveryConfigsService::BREAK_PAIRING, request)
            .await?;
        Ok(())
    }

    /// Promote the secondary namespace. Must be called against the secondary.
    pub async fn fail_over(&self, resource_group_name: &str, namespace_name: &str, alias: &str) -> SdkResult<()> {
        let request = self.alias_request(resource_group_name, namespace_name, alias);
        self.pipeline
            .send_empty(&DisasterRecoveryConfigsService::FAIL_OVER, request)
            .await?;
        Ok(())
    }

    pub fn list_authorization_rules(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
    ) -> Pager<AuthorizationRuleInner> {
        self.pipeline.pager(
            DisasterRecoveryConfigsService::LIST_AUTHORIZATION_RULES,
            self.alias_request(resource_group_name, namespace_name, alias),
            DisasterRecoveryConfigsService::LIST_AUTHORIZATION_RULES_NEXT,
        )
    }

    pub async fn get_authorization_rule(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
        authorization_rule_name: &str,
    ) -> SdkResult<AuthorizationRuleInner> {
        let request = self
            .alias_request(resource_group_name, namespace_name, alias)
            .path("authorizationRuleName", authorization_rule_name);
        Ok(self
            .pipeline
            .send_json(&DisasterRecoveryConfigsService::GET_AUTHORIZATION_RULE, request)
            .await?
            .into_value())
    }

    /// Alias connection strings and keys of an authorization rule.
    pub async fn list_keys(
        &self,
        resource_group_name: &str,
        namespace_name: &str,
        alias: &str,
        authorization_rule_name: &str,
    ) -> SdkResult<AccessKeysInner> {
        let request = self
            .alias_request(resource_group_name, namespace_name, alias)
            .path("authorizationRuleName", authorization_rule_name);
        Ok(self
            .pipeline
            .send_json(&DisasterRecoveryConfigsService::LIST_KEYS, request)
            .await?
            .into_value())
    }
}
