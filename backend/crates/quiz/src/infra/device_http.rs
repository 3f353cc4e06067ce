//! HTTP Device Messenger
//!
//! Sends cloud-to-device messages through the device hub REST API,
//! authorised with a SAS token minted per request.

use platform::sas::SasCredentials;
use reqwest::{Client, Url, header};
use std::time::Duration;

use crate::domain::gateway::{DeliveryError, DeviceMessenger};
use crate::infra::secrets::DeviceHubSecrets;

const API_VERSION: &str = "2021-04-12";
const TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Device hub client
pub struct HttpDeviceMessenger {
    client: Client,
    base_url: Url,
    credentials: SasCredentials,
}

impl HttpDeviceMessenger {
    pub fn new(secrets: &DeviceHubSecrets, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = platform::http::build_http_client(timeout)
            .map_err(|e| DeliveryError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: hub_base_url(&secrets.host)?,
            credentials: secrets.credentials.clone(),
        })
    }

    fn message_url(&self, device_id: &str) -> Result<Url, DeliveryError> {
        device_message_url(&self.base_url, device_id)
    }
}

impl DeviceMessenger for HttpDeviceMessenger {
    async fn send(&self, device_id: &str, payload: Vec<u8>) -> Result<(), DeliveryError> {
        let url = self.message_url(device_id)?;
        let token = self
            .credentials
            .token(TOKEN_TTL)
            .map_err(|e| DeliveryError::Authorization(e.to_string()))?;

        let response = self
            .client
            .post(url)
            .header(header::AUTHORIZATION, token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout
                } else {
                    DeliveryError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DeliveryError::Authorization(format!("status {}", status.as_u16())));
        }

        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

/// Hosts without a scheme are reached over HTTPS
fn hub_base_url(host: &str) -> Result<Url, DeliveryError> {
    let host = host.trim();
    let raw = if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    };

    Url::parse(&raw).map_err(|e| DeliveryError::Connection(format!("invalid hub host: {}", e)))
}

/// `{base}/devices/{device_id}/messages/deviceBound?api-version=...`
fn device_message_url(base: &Url, device_id: &str) -> Result<Url, DeliveryError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| DeliveryError::Connection("hub host cannot be a base URL".to_string()))?
        .pop_if_empty()
        .extend(["devices", device_id, "messages", "deviceBound"]);
    url.query_pairs_mut().append_pair("api-version", API_VERSION);
    Ok(url)
}
