use crate::common::{SdkError, SdkResult};
use std::fmt;

const REDACTED_KEYS: &[&str] = &["secret", "sharedaccesskey", "sharedaccesssignature"];

/// A parsed `Key=Value;Key=Value` connection string.
///
/// Key lookup ignores case and values may themselves contain `=`, as base64
/// secrets usually do. Both App Configuration strings
/// (`Endpoint`, `Id`, `Secret`) and Service Bus / Event Hubs strings
/// (`Endpoint`, `SharedAccessKeyName`, `SharedAccessKey`, `EntityPath`) are
/// accepted.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionString {
    parts: Vec<(String, String)>,
}

impl ConnectionString {
    pub fn parse(value: &str) -> SdkResult<Self> {
        if value.trim().is_empty() {
            return Err(SdkError::Configuration(
                "Connection string cannot be empty".to_string(),
            ));
        }

        let mut parts = Vec::new();
        for part in value.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let (key, val) = part.split_once('=').ok_or_else(|| {
                SdkError::Configuration(format!(
                    "Invalid connection string segment '{}': expected Key=Value",
                    redact_segment(part)
                ))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(SdkError::Configuration(
                    "Connection string contains a segment without a key".to_string(),
                ));
            }
            parts.push((key.to_string(), val.trim().to_string()));
        }

        Ok(Self { parts })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.parts
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn require(&self, key: &str) -> SdkResult<&str> {
        self.get(key).ok_or_else(|| {
            SdkError::Configuration(format!("Missing {key} in connection string"))
        })
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.get("Endpoint")
    }

    pub fn id(&self) -> Option<&str> {
        self.get("Id")
    }

    pub fn secret(&self) -> Option<&str> {
        self.get("Secret")
    }

    pub fn shared_access_key_name(&self) -> Option<&str> {
        self.get("SharedAccessKeyName")
    }

    pub fn shared_access_key(&self) -> Option<&str> {
        self.get("SharedAccessKey")
    }

    pub fn entity_path(&self) -> Option<&str> {
        self.get("EntityPath")
    }

    /// First DNS label of the endpoint host, e.g. `my-ns` for
    /// `sb://my-ns.servicebus.windows.net/`.
    pub fn namespace(&self) -> Option<&str> {
        let endpoint = self.endpoint()?;
        let host = endpoint
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(endpoint);
        host.split(['.', '/', ':'])
            .next()
            .filter(|label| !label.is_empty())
    }

    /// Endpoint rewritten to `https://`, without a trailing slash.
    pub fn https_endpoint(&self) -> SdkResult<String> {
        let endpoint = self.require("Endpoint")?;
        let rest = endpoint
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(endpoint);
        Ok(format!("https://{}", rest.trim_end_matches('/')))
    }
}

fn redact_segment(segment: &str) -> &str {
    match segment.split_once('=') {
        Some((key, _)) => key,
        None if segment.len() > 8 => "<redacted>",
        None => segment,
    }
}

impl fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.parts {
            if REDACTED_KEYS.contains(&key.to_ascii_lowercase().as_str()) {
                map.entry(key, &"<redacted>");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

impl std::str::FromStr for ConnectionString {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
