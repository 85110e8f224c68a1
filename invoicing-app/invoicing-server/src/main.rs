use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use invoicing_api::{build_router, AppState, Repositories};
use invoicing_infrastructure::{
    create_pool, run_migrations, InMemoryStore, PgCustomerRepository, PgInvoiceRepository, PgUserRepository,
};
use invoicing_security::JwtService;
use invoicing_shared::config::AppConfig;

async fn repositories(config: &AppConfig) -> anyhow::Result<Repositories> {
    if config.database.url.is_empty() {
        warn!("No database url configured, using the in-memory store");
        let store = Arc::new(InMemoryStore::new());
        return Ok(Repositories {
            users: store.clone(),
            customers: store.clone(),
            invoices: store,
        });
    }

    info!("Connecting to database...");
    let pool = create_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    info!("Database connection established.");

    if config.database.run_migrations {
        run_migrations(&pool).await?;
    }

    Ok(Repositories {
        users: Arc::new(PgUserRepository::new(pool.clone())),
        customers: Arc::new(PgCustomerRepository::new(pool.clone())),
        invoices: Arc::new(PgInvoiceRepository::new(pool)),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    let _guard = invoicing_shared::telemetry::init_telemetry()?;

    info!("Invoicing server starting...");

    // Load configuration
    let config = AppConfig::load()?;

    // Create App State
    let repos = repositories(&config).await?;
    let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);
    let state = AppState::new(repos, jwt);

    // Build router
    let app = build_router(state).layer(
        CorsLayer::new()
            .allow_origin(config.cors.allowed_origin.parse::<HeaderValue>()?)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
    );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
