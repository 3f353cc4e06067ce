//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256, Base64)
//! - Shared access signature (SAS) tokens for the device hub
//! - HTTP client construction for upstream services

pub mod crypto;
pub mod http;
pub mod sas;
