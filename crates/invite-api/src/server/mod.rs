//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use invite_common::{AppConfig, AppError};
use invite_db::{
    create_pool, run_migrations, PgAuditLogRepository, PgGuildRepository, PgInviteCodeRepository,
    PgInviteLedger, PgJoinRepository, PgMemberRepository, PgRankRepository, PgRoleRepository,
    PoolConfig,
};
use invite_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router);
    router.with_state(state)
}

/// Connect to PostgreSQL, apply migrations and wire the repositories
pub async fn create_app_state(config: &AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool_config = PoolConfig::new(&config.database, config.engine.store_timeout());
    let pool = create_pool(&pool_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Database migrations applied");

    let service_context = ServiceContext::builder()
        .ledger(Arc::new(PgInviteLedger::new(pool.clone())))
        .invite_code_repo(Arc::new(PgInviteCodeRepository::new(pool.clone())))
        .rank_repo(Arc::new(PgRankRepository::new(pool.clone())))
        .role_repo(Arc::new(PgRoleRepository::new(pool.clone())))
        .guild_repo(Arc::new(PgGuildRepository::new(pool.clone())))
        .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
        .audit_repo(Arc::new(PgAuditLogRepository::new(pool.clone())))
        .join_repo(Arc::new(PgJoinRepository::new(pool.clone())))
        .bot_user_id(config.bot.user_id)
        .engine(config.engine.clone())
        .build()
        .map_err(AppError::from)?;

    Ok(AppState::new(service_context).with_pool(pool))
}

/// Run the HTTP server
pub async fn run_server(app: Router, address: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to bind to {address}: {e}")))?;

    info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(anyhow::anyhow!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let state = create_app_state(&config).await?;
    let app = create_app(state);
    run_server(app, &config.api.address()).await
}
