//! Infrastructure Layer
//!
//! Session storage and HTTP clients for the assistant and the device hub.

pub mod assistant_http;
pub mod device_http;
pub mod memory;
pub mod secrets;
