use anyhow::{Context, Result};
use axum::{http::HeaderValue, Router};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use envgate::{config::ServerConfig, middleware::ApiKeySource, routes, settings, SettingsLoader};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "envgate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting envgate server");

    // Loading writes `.env` entries into the process environment, which must
    // happen while the process is still single-threaded.
    let loader = SettingsLoader::host();
    let settings = settings::initialize(&loader);
    for name in settings.namespaced().names() {
        info!("   Namespace: {}", name);
    }

    let config = ServerConfig::from_settings(&settings)?;
    info!("✅ Configuration loaded");
    info!("   API key variable: {}", config.api_key_var);

    let app = Router::new()
        .nest(
            "/api",
            routes::create_routes(settings, ApiKeySource::from_env(config.api_key_var.clone())),
        )
        .layer(cors_layer(&config)?)
        .layer(tower_http::trace::TraceLayer::new_for_http());

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?
        .block_on(serve(app, &config))
}

fn cors_layer(config: &ServerConfig) -> Result<CorsLayer> {
    let allow_origin = if config.cors_origin == "*" {
        AllowOrigin::from(Any)
    } else {
        let origin = config
            .cors_origin
            .parse::<HeaderValue>()
            .context("CORS_ORIGIN must be a valid header value")?;
        AllowOrigin::exact(origin)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

async fn serve(app: Router, config: &ServerConfig) -> Result<()> {
    let ip = config
        .host
        .parse::<std::net::IpAddr>()
        .with_context(|| format!("HOST must be an IP address, got {}", config.host))?;
    let addr = SocketAddr::new(ip, config.port);
    info!("🌐 Server listening on http://{}", addr);
    info!("💚 Health check: http://{}/api/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
