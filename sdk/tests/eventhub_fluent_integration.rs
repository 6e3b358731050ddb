use azrest::auth::{BearerTokenPolicy, StaticTokenCredential};
use azrest::config::ClientOptions;
use azrest::fluent::EventHubManager;
use azrest::models::{AccessRights, ProvisioningStateDR, RoleDisasterRecovery, UnavailableReason};
use azrest::pipeline::{Pipeline, RetryOptions};
use claims::*;
use futures::TryStreamExt;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_VERSION: &str = "2017-04-01";
const DR_CONFIGS: &str =
    "/subscriptions/sub-1/resourceGroups/rg/providers/Microsoft.EventHub/namespaces/ns-primary/disasterRecoveryConfigs";

mod helpers {
    use super::*;

    pub fn manager(server: &MockServer) -> EventHubManager {
        let options = ClientOptions::default()
            .without_rate_limit()
            .with_retry(RetryOptions::none());
        let policy = BearerTokenPolicy::management(Arc::new(StaticTokenCredential::new("arm-token")));
        let pipeline = Pipeline::with_reqwest(Arc::new(policy), &options).expect("pipeline should build");
        EventHubManager::new(pipeline, "sub-1").with_endpoint(server.uri())
    }

    pub fn alias_json(alias: &str) -> serde_json::Value {
        serde_json::json!({
            "id": format!("{DR_CONFIGS}/{alias}"),
            "name": alias,
            "type": "Microsoft.EventHub/Namespaces/disasterrecoveryconfigs",
            "properties": {
                "provisioningState": "Succeeded",
                "partnerNamespace": "/subscriptions/sub-1/resourceGroups/rg/providers/Microsoft.EventHub/namespaces/ns-secondary",
                "role": "Primary",
                "pendingReplicationOperationsCount": 0
            }
        })
    }

    pub fn rule_json(alias: &str, rule: &str) -> serde_json::Value {
        serde_json::json!({
            "id": format!("{DR_CONFIGS}/{alias}/AuthorizationRules/{rule}"),
            "name": rule,
            "type": "Microsoft.EventHub/Namespaces/DisasterRecoveryConfig/AuthorizationRules",
            "properties": {"rights": ["Listen", "Send"]}
        })
    }
}

#[cfg(test)]
mod eventhub_fluent_tests {
    use super::helpers::*;
    use super::*;

    #[tokio::test]
    async fn test_define_and_create_alias() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(format!("{DR_CONFIGS}/my-alias")))
            .and(query_param("api-version", API_VERSION))
            .and(header("authorization", "Bearer arm-token"))
            .and(body_json(serde_json::json!({
                "properties": {
                    "partnerNamespace": "/subscriptions/sub-1/resourceGroups/rg/providers/Microsoft.EventHub/namespaces/ns-secondary"
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(alias_json("my-alias")))
            .expect(1)
            .mount(&server)
            .await;

        let created = assert_ok!(
            manager(&server)
                .disaster_recovery_configs()
                .define("my-alias")
                .with_existing_namespace("rg", "ns-primary")
                .with_partner_namespace(
                    "/subscriptions/sub-1/resourceGroups/rg/providers/Microsoft.EventHub/namespaces/ns-secondary",
                )
                .create()
                .await
        );

        assert_eq!(created.name(), Some("my-alias"));
        assert_eq!(created.provisioning_state(), Some(ProvisioningStateDR::Succeeded));
        assert_eq!(created.role(), Some(RoleDisasterRecovery::Primary));
        assert_eq!(created.pending_replication_operations_count(), Some(0));
    }

    #[tokio::test]
    async fn test_refresh_rereads_alias_from_its_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{DR_CONFIGS}/my-alias")))
            .respond_with(ResponseTemplate::new(200).set_body_json(alias_json("my-alias")))
            .expect(2)
            .mount(&server)
            .await;

        let configs = manager(&server).disaster_recovery_configs();
        let mut alias = assert_ok!(configs.get("rg", "ns-primary", "my-alias").await);
        assert_ok!(alias.refresh().await);
        assert_eq!(alias.alternate_name(), None);
    }

    #[tokio::test]
    async fn test_check_name_availability() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("{DR_CONFIGS}/CheckNameAvailability")))
            .and(body_json(serde_json::json!({"name": "taken"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "nameAvailable": false,
                "reason": "NameInUse",
                "message": "Name is already in use"
            })))
            .mount(&server)
            .await;

        let result = assert_ok!(
            manager(&server)
                .disaster_recovery_configs()
                .check_name_availability("rg", "ns-primary", "taken")
                .await
        );
        assert_eq!(result.name_available(), Some(false));
        assert_eq!(result.reason(), Some(UnavailableReason::NameInUse));
    }

    #[tokio::test]
    async fn test_list_walks_all_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DR_CONFIGS))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [alias_json("a1")],
                "nextLink": format!("{}{DR_CONFIGS}?api-version={API_VERSION}&$skiptoken=1", server.uri())
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(DR_CONFIGS))
            .and(query_param("$skiptoken", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [alias_json("a2")]
            })))
            .mount(&server)
            .await;

        let aliases: Vec<_> = assert_ok!(
            manager(&server)
                .disaster_recovery_configs()
                .list("rg", "ns-primary")
                .try_collect()
                .await
        );
        let names: Vec<_> = aliases.iter().filter_map(|a| a.name()).collect();
        assert_eq!(names, vec!["a1", "a2"]);
    }

    #[tokio::test]
    async fn test_break_pairing_and_fail_over() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("{DR_CONFIGS}/my-alias/breakPairing")))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("{DR_CONFIGS}/my-alias/failover")))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let configs = manager(&server).disaster_recovery_configs();
        assert_ok!(configs.break_pairing("rg", "ns-primary", "my-alias").await);
        assert_ok!(configs.fail_over("rg", "ns-primary", "my-alias").await);
    }

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(format!("{DR_CONFIGS}/my-alias")))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        assert_ok!(
            manager(&server)
                .disaster_recovery_configs()
                .delete("rg", "ns-primary", "my-alias")
                .await
        );
    }

    #[tokio::test]
    async fn test_get_missing_alias_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": {"code": "NotFound", "message": "Alias not found"}
            })))
            .mount(&server)
            .await;

        let error = assert_err!(
            manager(&server)
                .disaster_recovery_configs()
                .get("rg", "ns-primary", "nope")
                .await
        );
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_authorization_rule_by_id_and_keys() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{DR_CONFIGS}/my-alias/authorizationRules/RootManageSharedAccessKey")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(rule_json("my-alias", "RootManageSharedAccessKey")),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!(
                "{DR_CONFIGS}/my-alias/authorizationRules/RootManageSharedAccessKey/listKeys"
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "aliasPrimaryConnectionString": "Endpoint=sb://my-alias.servicebus.windows.net/;SharedAccessKeyName=RootManageSharedAccessKey;SharedAccessKey=k1",
                "primaryKey": "k1",
                "keyName": "RootManageSharedAccessKey"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let configs = manager(&server).disaster_recovery_configs();
        let rule_id = format!("{DR_CONFIGS}/my-alias/AuthorizationRules/RootManageSharedAccessKey");
        let rule = assert_ok!(configs.get_authorization_rule_by_id(&rule_id).await);
        assert_eq!(rule.rights(), &[AccessRights::Listen, AccessRights::Send]);

        let keys = assert_ok!(rule.list_keys().await);
        assert_eq!(keys.primary_key(), Some("k1"));
        assert_eq!(keys.key_name(), Some("RootManageSharedAccessKey"));
        assert!(!format!("{keys:?}").contains("k1"));
    }

    #[tokio::test]
    async fn test_list_authorization_rules() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("{DR_CONFIGS}/my-alias/authorizationRules")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [rule_json("my-alias", "r1"), rule_json("my-alias", "r2")]
            })))
            .mount(&server)
            .await;

        let rules: Vec<_> = assert_ok!(
            manager(&server)
                .disaster_recovery_configs()
                .list_authorization_rules("rg", "ns-primary", "my-alias")
                .try_collect()
                .await
        );
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].name(), Some("r2"));
    }

    #[tokio::test]
    async fn test_malformed_rule_id_is_rejected_locally() {
        let server = MockServer::start().await;
        let configs = manager(&server).disaster_recovery_configs();
        assert_err!(configs.get_authorization_rule_by_id("/subscriptions/sub-1/resourceGroups/rg").await);
    }
}
