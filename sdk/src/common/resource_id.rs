//! Parsing of Azure Resource Manager resource identifiers.
//!
//! An ARM id alternates between segment names and values:
//! `/subscriptions/{sub}/resourceGroups/{rg}/providers/{ns}/{type}/{name}/...`.

use super::errors::{SdkError, SdkResult};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    raw: String,
    segments: Vec<String>,
}

impl ResourceId {
    pub fn parse(id: &str) -> SdkResult<Self> {
        let segments: Vec<String> = id
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if segments.len() < 2 || !segments[0].eq_ignore_ascii_case("subscriptions") {
            return Err(SdkError::Configuration(format!(
                "Invalid resource ID format: {id}"
            )));
        }

        Ok(Self {
            raw: id.to_string(),
            segments,
        })
    }

    /// Value following the first segment named `name` (case-insensitive).
    ///
    /// `providers` is skipped as a name since its value is a namespace, not a
    /// resource, and lookups for e.g. `namespaces` must not land on it.
    pub fn value_by_name(&self, name: &str) -> Option<&str> {
        let mut iter = self.segments.iter().peekable();
        while let Some(segment) = iter.next() {
            if segment.eq_ignore_ascii_case(name) {
                return iter.peek().map(|s| s.as_str());
            }
            if segment.eq_ignore_ascii_case("providers") {
                iter.next();
            }
        }
        None
    }

    pub fn require(&self, name: &str) -> SdkResult<&str> {
        self.value_by_name(name).ok_or_else(|| {
            SdkError::Configuration(format!(
                "Resource ID {} has no '{}' segment",
                self.raw, name
            ))
        })
    }

    pub fn subscription_id(&self) -> Option<&str> {
        self.value_by_name("subscriptions")
    }

    pub fn resource_group(&self) -> Option<&str> {
        self.value_by_name("resourceGroups")
    }

    pub fn provider_namespace(&self) -> Option<&str> {
        self.segments
            .iter()
            .position(|s| s.eq_ignore_ascii_case("providers"))
            .and_then(|i| self.segments.get(i + 1))
            .map(|s| s.as_str())
    }

    /// Name of the innermost resource.
    pub fn name(&self) -> Option<&str> {
        if self.segments.len() % 2 == 0 {
            self.segments.last().map(|s| s.as_str())
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULE_ID: &str = "/subscriptions/sub-1/resourceGroups/rg-1/providers/Microsoft.EventHub/namespaces/ns-1/disasterRecoveryConfigs/alias-1/AuthorizationRules/rule-1";

    #[test]
    fn extracts_segments_by_name() {
        let id = ResourceId::parse(RULE_ID).unwrap();
        assert_eq!(id.subscription_id(), Some("sub-1"));
        assert_eq!(id.resource_group(), Some("rg-1"));
        assert_eq!(id.value_by_name("namespaces"), Some("ns-1"));
        assert_eq!(id.value_by_name("disasterRecoveryConfigs"), Some("alias-1"));
        assert_eq!(id.value_by_name("authorizationrules"), Some("rule-1"));
        assert_eq!(id.provider_namespace(), Some("Microsoft.EventHub"));
        assert_eq!(id.name(), Some("rule-1"));
    }

    #[test]
    fn missing_segment_is_reported() {
        let id = ResourceId::parse("/subscriptions/sub-1/resourceGroups/rg-1").unwrap();
        assert!(id.value_by_name("namespaces").is_none());
        assert!(id.require("namespaces").is_err());
    }

    #[test]
    fn rejects_non_arm_ids() {
        assert!(ResourceId::parse("").is_err());
        assert!(ResourceId::parse("/tenants/abc").is_err());
    }
}
