use std::env;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adboard_backend::handlers::{ad_account, analytics, campaign, client, comment, daily_spend};
use adboard_backend::jobs::spend_reconcile::start_spend_reconcile_job;
use adboard_backend::services::read_cache::ReadCache;
use adboard_backend::services::spend_sync::{self, DbSpendApplier, DEBOUNCE_WINDOW};
use adboard_backend::AppState;

/// TTL for cached campaign read models; explicit invalidation from the
/// synchronizer is the primary freshness mechanism
const READ_CACHE_TTL_SECS: u64 = 60;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,adboard_backend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Connect to database
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    // Run migrations
    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let cache = ReadCache::new(READ_CACHE_TTL_SECS);

    // Debounced ledger-to-campaign spend synchronizer
    let applier = Arc::new(DbSpendApplier::new(db.clone(), cache.clone()));
    let spend_sync = spend_sync::spawn(applier, DEBOUNCE_WINDOW);

    // Hourly drift healer for the denormalized spend column
    start_spend_reconcile_job(db.clone(), cache.clone()).await;

    let state = AppState {
        db,
        cache,
        spend_sync,
    };

    // Build router
    let app = Router::new()
        .route("/", get(hello_adboard))
        .route(
            "/api/clients",
            get(client::list_clients).post(client::create_client),
        )
        .route(
            "/api/clients/{id}",
            get(client::get_client)
                .put(client::update_client)
                .delete(client::delete_client),
        )
        .route(
            "/api/ad-accounts",
            get(ad_account::list_ad_accounts).post(ad_account::create_ad_account),
        )
        .route(
            "/api/ad-accounts/{id}",
            get(ad_account::get_ad_account)
                .put(ad_account::update_ad_account)
                .delete(ad_account::delete_ad_account),
        )
        .route(
            "/api/campaigns",
            get(campaign::list_campaigns).post(campaign::create_campaign),
        )
        .route("/api/campaigns/analytics", get(analytics::campaign_analytics))
        .route(
            "/api/campaigns/{id}",
            get(campaign::get_campaign)
                .put(campaign::update_campaign)
                .delete(campaign::delete_campaign),
        )
        .route(
            "/api/campaigns/{id}/daily-spends",
            get(daily_spend::list_daily_spends).post(daily_spend::upsert_daily_spend),
        )
        .route(
            "/api/campaigns/{id}/comments",
            get(comment::list_comments).post(comment::create_comment),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind listen address");

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

async fn hello_adboard() -> &'static str {
    "Hello from Adboard Backend!"
}
