//! qrroll API Server Entry Point
//!
//! Uses `anyhow` for startup errors; request-level errors go through
//! `kernel::error::AppError`.

mod config;
mod routes;

use std::net::SocketAddr;

use attendance::{AttendanceAppState, PgAttendanceRepository, spawn_daily_sweep};
use auth::PgAuthRepository;
use auth::domain::repository::TeacherSessionRepository;
use auth::presentation::AuthAppState;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "qrroll_api=info,auth=info,attendance=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup must not prevent the server from starting
    let auth_repo = PgAuthRepository::new(pool.clone());
    match auth_repo.cleanup_expired(Utc::now().timestamp_millis()).await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Teacher session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Teacher session cleanup failed, continuing anyway");
        }
    }

    let auth_state = AuthAppState::new(auth_repo, config.auth.clone());
    let attendance_state =
        AttendanceAppState::new(PgAttendanceRepository::new(pool), config.attendance.clone());

    let sweep = spawn_daily_sweep(
        attendance_state.repo.clone(),
        attendance_state.config.clone(),
    );
    tokio::spawn(async move {
        match sweep.await {
            Ok(()) => tracing::error!("Daily penalty sweep scheduler stopped"),
            Err(e) => tracing::error!(error = %e, "Daily penalty sweep scheduler crashed"),
        }
    });

    let app = routes::app_router(auth_state, attendance_state)
        .layer(routes::cors_layer(&config.frontend_origins));

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
