//! Gateway Traits
//!
//! Capabilities provided by external services: the assistant that grades
//! answers and the device hub that receives replies.

use thiserror::Error;

/// Assistant call failure
#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Assistant connection error: {0}")]
    Connection(String),

    #[error("Assistant returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Assistant response could not be decoded: {0}")]
    InvalidResponse(String),

    #[error("Assistant returned an empty reply")]
    EmptyReply,
}

/// Device delivery failure. Never surfaced to clients.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Device hub authorization failed: {0}")]
    Authorization(String),

    #[error("Device hub connection error: {0}")]
    Connection(String),

    #[error("Device hub rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Reply could not be serialized: {0}")]
    Serialization(String),

    #[error("Device delivery timed out")]
    Timeout,
}

/// Assistant capability: one prompt in, one reply out
#[trait_variant::make(AssistantGateway: Send)]
pub trait LocalAssistantGateway {
    async fn send_message(&self, prompt: &str) -> Result<String, AssistantError>;
}

/// Device messaging capability
#[trait_variant::make(DeviceMessenger: Send)]
pub trait LocalDeviceMessenger {
    async fn send(&self, device_id: &str, payload: Vec<u8>) -> Result<(), DeliveryError>;
}
