//! Shared Access Signature (SAS) tokens
//!
//! Device hubs authorise service calls with a token of the form
//! `SharedAccessSignature sr={uri}&sig={signature}&se={expiry}&skn={policy}`
//! where the signature is HMAC-SHA256 over `"{url-encoded uri}\n{expiry}"`
//! keyed with the base64-decoded shared access key.

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::crypto::{from_base64, hmac_sha256, to_base64};

/// Error when building a SAS token
#[derive(Debug, Clone, thiserror::Error)]
pub enum SasError {
    #[error("Shared access key is not valid base64")]
    InvalidKey,
    #[error("Resource URI is empty")]
    EmptyResource,
}

/// Credentials for one shared access policy
#[derive(Clone)]
pub struct SasCredentials {
    /// Resource URI the token is scoped to, e.g. `myhub.azure-devices.net`
    pub resource_uri: String,
    /// Shared access policy name (`skn`); empty for device-scoped keys
    pub policy_name: String,
    /// Base64 shared access key
    pub key_b64: String,
}

impl std::fmt::Debug for SasCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SasCredentials")
            .field("resource_uri", &self.resource_uri)
            .field("policy_name", &self.policy_name)
            .field("key_b64", &"[REDACTED]")
            .finish()
    }
}

impl SasCredentials {
    /// Token valid from `now` for `ttl`
    pub fn token_at(&self, now: DateTime<Utc>, ttl: Duration) -> Result<String, SasError> {
        let expiry = now.timestamp() + ttl.as_secs() as i64;
        generate_sas_token(&self.resource_uri, &self.key_b64, &self.policy_name, expiry)
    }

    /// Token valid from the current time for `ttl`
    pub fn token(&self, ttl: Duration) -> Result<String, SasError> {
        self.token_at(Utc::now(), ttl)
    }
}

/// Build a SAS token expiring at `expiry_epoch_secs`
pub fn generate_sas_token(
    resource_uri: &str,
    key_b64: &str,
    policy_name: &str,
    expiry_epoch_secs: i64,
) -> Result<String, SasError> {
    if resource_uri.trim().is_empty() {
        return Err(SasError::EmptyResource);
    }
    let key = from_base64(key_b64.trim()).map_err(|_| SasError::InvalidKey)?;

    let encoded_uri = urlencoding::encode(&resource_uri.to_lowercase()).into_owned();
    let string_to_sign = format!("{}\n{}", encoded_uri, expiry_epoch_secs);
    let signature = to_base64(&hmac_sha256(&key, string_to_sign.as_bytes()));

    let mut token = format!(
        "SharedAccessSignature sr={}&sig={}&se={}",
        encoded_uri,
        urlencoding::encode(&signature),
        expiry_epoch_secs
    );
    if !policy_name.is_empty() {
        token.push_str("&skn=");
        token.push_str(policy_name);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8=";

    #[test]
    fn test_token_shape() {
        let token = generate_sas_token("MyHub.azure-devices.net", KEY, "service", 1_700_000_000)
            .unwrap();
        assert!(token.starts_with("SharedAccessSignature sr=myhub.azure-devices.net&sig="));
        assert!(token.contains("&se=1700000000"));
        assert!(token.ends_with("&skn=service"));
    }

    #[test]
    fn test_token_without_policy() {
        let token = generate_sas_token("hub/devices/d1", KEY, "", 10).unwrap();
        assert!(token.contains("sr=hub%2Fdevices%2Fd1"));
        assert!(!token.contains("skn="));
    }

    #[test]
    fn test_token_is_deterministic_and_expiry_bound() {
        let a = generate_sas_token("hub", KEY, "p", 100).unwrap();
        let b = generate_sas_token("hub", KEY, "p", 100).unwrap();
        let c = generate_sas_token("hub", KEY, "p", 101).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            generate_sas_token("hub", "not base64!", "p", 1),
            Err(SasError::InvalidKey)
        ));
        assert!(matches!(
            generate_sas_token("  ", KEY, "p", 1),
            Err(SasError::EmptyResource)
        ));
    }

    #[test]
    fn test_credentials_expiry_from_ttl() {
        let creds = SasCredentials {
            resource_uri: "hub".to_string(),
            policy_name: "p".to_string(),
            key_b64: KEY.to_string(),
        };
        let now = DateTime::from_timestamp(1_000, 0).unwrap();
        let token = creds.token_at(now, Duration::from_secs(60)).unwrap();
        assert!(token.contains("&se=1060"));
        assert!(!format!("{:?}", creds).contains(KEY));
    }
}
