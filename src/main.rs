use rust_lead_pipeline::api::handlers::{self, AppState};
use rust_lead_pipeline::cities::CityCatalog;
use rust_lead_pipeline::config::Config;
use rust_lead_pipeline::integrations::source::RandomUserSource;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the query service.
///
/// Initializes logging and configuration, builds the upstream source client
/// and serves the HTTP routes.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_lead_pipeline=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let source = RandomUserSource::new(
        config.source_base_url.clone(),
        Arc::new(CityCatalog::default()),
        config.rng_seed,
    )?;
    tracing::info!("✓ Lead source initialized: {}", config.source_base_url);

    let app_state = Arc::new(AppState::new(config.clone(), Arc::new(source)));

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?,
    );

    // Pipeline routes fetch upstream on every call, so they are rate limited
    let protected_routes = handlers::pipeline_routes().layer(
        ServiceBuilder::new()
            .layer(RequestBodyLimitLayer::new(64 * 1024))
            .layer(GovernorLayer {
                config: governor_conf,
            }),
    );

    let app = handlers::public_routes()
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
