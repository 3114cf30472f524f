//! Menfess server binary.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use menfess::adapters::http::{app_router, HttpSettings};
use menfess::adapters::notification::{DispatcherConfig, DispatcherHandle};
use menfess::adapters::{
    ExpoPushGateway, InMemoryPostRepository, InMemoryPushTokenStore, InMemoryUserRepository,
    JwtAuthService, NotificationDispatcher, PushNotifier, TracingErrorLog,
};
use menfess::application::{Adapters, MenfessService};
use menfess::config::{AppConfig, ConfigError, LogFormat, NotificationConfig, ServerConfig, ValidationError};
use menfess::domain::foundation::DomainError;
use menfess::ports::{Notifier, PushTokenStore};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Push gateway setup failed: {0}")]
    Push(#[from] DomainError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.server);

    let users = Arc::new(InMemoryUserRepository::new());
    let posts = Arc::new(InMemoryPostRepository::new(users.clone()));
    let tokens: Arc<dyn PushTokenStore> = Arc::new(InMemoryPushTokenStore::new());
    let auth = Arc::new(JwtAuthService::from_config(&config.auth));
    let (notifier, dispatcher) = build_notifier(&config.notification, tokens)?;

    let service = MenfessService::new(
        Adapters {
            users,
            posts,
            auth: auth.clone(),
            notifier,
            log: Arc::new(TracingErrorLog::new()),
        },
        config.auth.registration_mode,
    );

    let settings = HttpSettings {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
        permissive_cors: config.server.is_development(),
    };
    let app = app_router(service, auth, &settings);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        registration_mode = ?config.auth.registration_mode,
        "Menfess server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(dispatcher) = dispatcher {
        tracing::info!("Draining notification queue");
        dispatcher.shutdown().await;
    }
    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    match server.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

fn build_notifier(
    config: &NotificationConfig,
    tokens: Arc<dyn PushTokenStore>,
) -> Result<(Arc<dyn Notifier>, Option<DispatcherHandle>), StartupError> {
    if !config.enabled {
        tracing::info!("Push notifications disabled");
        return Ok((Arc::new(PushNotifier::disabled(tokens)), None));
    }

    let gateway = Arc::new(ExpoPushGateway::from_config(config)?);
    let (dispatcher, handle) = NotificationDispatcher::spawn(
        gateway,
        tokens.clone(),
        DispatcherConfig::default().with_queue_capacity(config.queue_capacity),
    );
    Ok((Arc::new(PushNotifier::new(tokens, dispatcher)), Some(handle)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
