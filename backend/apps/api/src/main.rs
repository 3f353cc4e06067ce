//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `quiz::AppError`.

use anyhow::Context;
use axum::{
    http,
    http::{Method, header},
};
use quiz::{
    AssistantSecrets, DeviceHubSecrets, HttpAssistantGateway, HttpDeviceMessenger,
    InMemorySessionStore, QuizConfig, QuizSessionService, ReplyDelivery, app_router,
    spawn_session_sweeper,
};
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_QUIZ_CONFIG_PATH: &str = "quiz.json";
const ASSISTANT_TIMEOUT: Duration = Duration::from_secs(60);

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Resolve device delivery once; a partial device hub setup disables it
fn reply_delivery(config: &QuizConfig) -> anyhow::Result<ReplyDelivery<HttpDeviceMessenger>> {
    let secrets = match DeviceHubSecrets::from_env() {
        Ok(Some(secrets)) => secrets,
        Ok(None) => {
            tracing::info!("Device hub not configured, reply delivery disabled");
            return Ok(ReplyDelivery::Disabled);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Reply delivery disabled");
            return Ok(ReplyDelivery::Disabled);
        }
    };

    let messenger = HttpDeviceMessenger::new(&secrets, config.delivery_timeout)
        .context("Failed to build device hub client")?;

    tracing::info!(
        device_id = %secrets.device_id,
        hub = %secrets.host,
        "Reply delivery enabled"
    );

    Ok(ReplyDelivery::Device {
        messenger: Arc::new(messenger),
        device_id: secrets.device_id,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,quiz=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Quiz content
    let config_path =
        env::var("QUIZ_CONFIG_PATH").unwrap_or_else(|_| DEFAULT_QUIZ_CONFIG_PATH.to_string());
    let config = QuizConfig::from_json_file(&config_path)
        .with_context(|| format!("Failed to load quiz file {}", config_path))?;

    let bank = config.question_bank();
    if bank.is_empty() {
        // start-quiz answers 400 until questions are configured
        tracing::error!(path = %config_path, "Quiz file has no questions");
    } else {
        tracing::info!(path = %config_path, questions = bank.len(), "Quiz loaded");
    }

    // Upstream services
    let assistant_secrets = AssistantSecrets::from_env()
        .context("ASSISTANT_ENDPOINT and ASSISTANT_API_KEY must be set in environment")?;
    let endpoint = assistant_secrets.endpoint.clone();
    let assistant = HttpAssistantGateway::new(assistant_secrets, ASSISTANT_TIMEOUT)
        .context("Failed to build assistant client")?;
    tracing::info!(endpoint = %endpoint, model = %assistant.model(), "Assistant configured");

    let delivery = reply_delivery(&config)?;

    // Sessions
    let sessions = Arc::new(InMemorySessionStore::new());
    let sweeper = spawn_session_sweeper(sessions.clone(), config.sweep_interval);

    let service = Arc::new(QuizSessionService::new(
        sessions,
        Arc::new(assistant),
        bank,
        delivery,
        Arc::new(config),
    ));

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]));

    // Build router
    let app = app_router(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let bind_addr = env::var("API_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let addr: SocketAddr = bind_addr
        .parse()
        .with_context(|| format!("Invalid API_BIND_ADDR {}", bind_addr))?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    tracing::info!("Server stopped");

    Ok(())
}
