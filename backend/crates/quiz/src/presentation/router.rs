//! Quiz Router

use axum::{
    Router,
    routing::{get, post},
};
use kernel::error::app_error::AppError;
use std::sync::Arc;

use crate::application::quiz_service::QuizSessionService;
use crate::domain::gateway::{AssistantGateway, DeviceMessenger};
use crate::domain::repository::SessionRepository;
use crate::presentation::handlers::{self, QuizAppState};

/// Quiz routes, meant to be nested under `/api/AIAssistant`
pub fn quiz_router<S, A, D>(service: Arc<QuizSessionService<S, A, D>>) -> Router
where
    S: SessionRepository + Send + Sync + 'static,
    A: AssistantGateway + Send + Sync + 'static,
    D: DeviceMessenger + Send + Sync + 'static,
{
    let state = QuizAppState { service };

    Router::new()
        .route("/start-quiz", get(handlers::start_quiz::<S, A, D>))
        .route("/message", post(handlers::submit_message::<S, A, D>))
        .with_state(state)
}

/// Top-level router: quiz routes under `/api/AIAssistant` plus `/health`
pub fn app_router<S, A, D>(service: Arc<QuizSessionService<S, A, D>>) -> Router
where
    S: SessionRepository + Send + Sync + 'static,
    A: AssistantGateway + Send + Sync + 'static,
    D: DeviceMessenger + Send + Sync + 'static,
{
    let health = Router::new()
        .route("/health", get(handlers::health::<S, A, D>))
        .with_state(QuizAppState {
            service: service.clone(),
        });

    Router::new()
        .nest("/api/AIAssistant", quiz_router(service))
        .merge(health)
        .fallback(|| async { AppError::not_found("No route matches this path") })
}
