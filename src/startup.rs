//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::Settings;
use crate::domain::entities::SubmissionRepository;
use crate::infrastructure::database;
use crate::infrastructure::repositories::PgSubmissionRepository;
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{cors, logging, RateLimiter};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Storage handle injected at startup; handlers never construct pools.
    pub store: Arc<dyn SubmissionRepository>,
    pub limiter: Arc<RateLimiter>,
    pub settings: Arc<Settings>,
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        // Create database pool
        let pool = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        // Idempotent schema bootstrap, before the server accepts traffic
        database::run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");

        let store: Arc<dyn SubmissionRepository> = Arc::new(PgSubmissionRepository::new(pool));

        // Create app state
        let state = AppState {
            store,
            limiter: Arc::new(RateLimiter::from_settings(&settings.rate_limit)),
            settings: Arc::new(settings.clone()),
        };

        handlers::health::init_server_start();

        // Build router with middleware
        let router = routes::create_router(state)
            .layer(logging::create_trace_layer())
            .layer(axum::middleware::from_fn(logging::track_metrics))
            .layer(cors::create_cors_layer(&settings.cors));

        // Bind to address
        let addr = settings.server.socket_addr();
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        // ConnectInfo supplies the peer address used by the rate limiter
        axum::serve(
            self.listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;
        Ok(())
    }
}
