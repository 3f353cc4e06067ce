//! Quiz Relay Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, question bank, repository and gateway traits
//! - `application/` - Quiz session service, validation, configuration
//! - `infra/` - In-memory session store, assistant and device hub clients
//! - `presentation/` - HTTP handlers and router
//!
//! ## Flow
//! - `start-quiz` picks a random question and binds it to a new session id
//! - `message` sends instruction + question + answer to the assistant and
//!   returns its reply, mirroring it to a device when one is configured
//! - Sessions expire after a TTL and are then indistinguishable from unknown ids

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use application::config::QuizConfig;
pub use application::quiz_service::{QuizSessionService, ReplyDelivery};
pub use error::{QuizError, QuizResult};
pub use infra::assistant_http::HttpAssistantGateway;
pub use infra::device_http::HttpDeviceMessenger;
pub use infra::memory::{InMemorySessionStore, spawn_session_sweeper};
pub use infra::secrets::{AssistantSecrets, DeviceHubSecrets};
pub use presentation::router::{app_router, quiz_router};

pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
