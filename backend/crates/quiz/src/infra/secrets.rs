//! Upstream Secrets
//!
//! Credentials for the assistant and the device hub, read from the
//! environment once at startup.

use platform::sas::SasCredentials;

const DEFAULT_ASSISTANT_MODEL: &str = "gpt-4o-mini";

/// Assistant endpoint credentials
#[derive(Clone)]
pub struct AssistantSecrets {
    /// Base URL of an OpenAI-compatible API, e.g. `https://api.openai.com/v1`
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for AssistantSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantSecrets")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl AssistantSecrets {
    /// `ASSISTANT_ENDPOINT` and `ASSISTANT_API_KEY` are required,
    /// `ASSISTANT_MODEL` is optional.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Some(Self {
            endpoint: get("ASSISTANT_ENDPOINT")?,
            api_key: get("ASSISTANT_API_KEY")?,
            model: get("ASSISTANT_MODEL").unwrap_or_else(|| DEFAULT_ASSISTANT_MODEL.to_string()),
        })
    }
}

/// Device hub credentials. All four variables or none.
#[derive(Debug, Clone)]
pub struct DeviceHubSecrets {
    /// Hub host name, e.g. `myhub.azure-devices.net`
    pub host: String,
    pub device_id: String,
    pub credentials: SasCredentials,
}

impl DeviceHubSecrets {
    pub fn from_env() -> Result<Option<Self>, PartialDeviceHubConfig> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// `Ok(None)` when nothing is set, `Err` when only some variables are.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, PartialDeviceHubConfig> {
        const VARS: [&str; 4] = [
            "DEVICE_HUB_HOST",
            "DEVICE_HUB_POLICY_NAME",
            "DEVICE_HUB_KEY",
            "DEVICE_ID",
        ];

        let values: Vec<Option<String>> = VARS
            .iter()
            .map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
            .collect();

        match values.as_slice() {
            [Some(host), Some(policy_name), Some(key), Some(device_id)] => Ok(Some(Self {
                host: host.trim().to_string(),
                device_id: device_id.trim().to_string(),
                credentials: SasCredentials {
                    resource_uri: host.trim().to_string(),
                    policy_name: policy_name.trim().to_string(),
                    key_b64: key.trim().to_string(),
                },
            })),
            _ if values.iter().all(Option::is_none) => Ok(None),
            _ => Err(PartialDeviceHubConfig {
                missing: VARS
                    .iter()
                    .zip(&values)
                    .filter(|(_, v)| v.is_none())
                    .map(|(name, _)| *name)
                    .collect(),
            }),
        }
    }
}

/// Some but not all device hub variables were set
#[derive(Debug, Clone, thiserror::Error)]
#[error("Device hub is partially configured, missing: {}", .missing.join(", "))]
pub struct PartialDeviceHubConfig {
    pub missing: Vec<&'static str>,
}
