/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 (PgPool, token 発行/検証, upload 保存先) → Router 組み立て
 * - Middleware の適用 (HTTP 共通 / CORS / security headers)
 * - migration 実行後に axum::serve() で起動
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tower_http::services::ServeDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{self, handlers::health::health};
use crate::config::Config;
use crate::middleware::{cors, http, security_headers};
use crate::services::auth::build_auth_services;
use crate::services::uploads::{UploadKind, UploadStore};
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG=info,human_registry=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash loudly. production: default hook, server keeps running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("failed to load configuration")?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;

    sqlx::migrate!("./migrations")
        .run(&state.db)
        .await
        .context("failed to run database migrations")?;

    let app = build_router(state, &config);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the shared state. The pool connects lazily, so nothing here talks
/// to the database.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect_lazy(&config.database_url)
        .context("invalid DATABASE_URL")?;

    let (issuer, verifier) = build_auth_services(config);

    let uploads = UploadStore::new(&config.upload_dir);
    uploads
        .ensure_dirs()
        .await
        .with_context(|| format!("failed to create {}", config.upload_dir.display()))?;

    Ok(AppState::new(db, issuer, verifier, Arc::new(uploads)))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let files = ServeDir::new(state.uploads.dir(UploadKind::File));
    let facial = ServeDir::new(state.uploads.dir(UploadKind::Facial));

    let router = Router::new()
        .route("/health", get(health))
        .nest("/api", api::routes(state.clone()))
        .nest_service("/files", files)
        .nest_service("/facial", facial)
        .with_state(state);

    let router = http::apply(router, Duration::from_secs(config.request_timeout_seconds));
    let router = cors::apply(router, config);
    security_headers::apply(router)
}
