use anyhow::Result;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod config;
mod error;
mod geofence;
mod models;
mod qr;
mod registry;
mod repositories;
mod routes;
mod state;
mod store;
mod validation;
mod validator;

use common::database::{DatabaseConfig, init_pool};
use tokio::net::TcpListener;

use crate::{
    config::AppConfig,
    registry::SessionRegistry,
    repositories::{AttendanceRepository, SessionRepository, StudentRepository, UserRepository},
    state::AppState,
    validator::AttendanceValidator,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting attendance service");

    let app_config = AppConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!().run(&pool).await?;
    info!("Database migrations applied");

    // Initialize repositories and the attendance engine
    let session_repository = Arc::new(SessionRepository::new(pool.clone()));
    let attendance_repository = Arc::new(AttendanceRepository::new(pool.clone()));
    let student_repository = StudentRepository::new(pool.clone());
    let user_repository = UserRepository::new(pool);

    let registry = SessionRegistry::new(
        session_repository.clone(),
        Arc::new(user_repository.clone()),
    );
    let validator = AttendanceValidator::new(
        session_repository,
        attendance_repository.clone(),
        app_config.allowed_radius_km,
    );

    info!(
        "Attendance engine initialized with a {} km geofence radius",
        app_config.allowed_radius_km
    );

    let app_state = AppState {
        registry,
        validator,
        attendance_repository,
        student_repository,
        user_repository,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&app_config.bind_addr).await?;
    info!("Attendance service listening on {}", app_config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
