use actix_web::{web, App, HttpServer};
use clap::Parser;
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
mod api;
use crate::api::{
    api_config,
    auth::{AuthRateLimiter, AuthService, Authenticator, TokenKeys},
    health::health_config,
    job::JobService,
    validation,
};
mod cli;
mod config;
mod db;
mod engine;
mod logging;
mod seed;
mod shutdown;
use crate::cli::{Cli, Command};
use crate::db::{job_repository::JobRepository, user_repository::UserRepository};
use crate::engine::OwnerId;
use crate::shutdown::ShutdownCoordinator;

async fn serve(config: config::Config, pool: Pool<Postgres>) -> std::io::Result<()> {
    let keys = TokenKeys::new(&config.jwt_secret, config.jwt_lifetime_hours);

    // Shared across all actix workers
    let job_service = web::Data::new(JobService::new(Arc::new(JobRepository::new(pool.clone()))));
    let auth_service = web::Data::new(
        AuthService::new(Arc::new(UserRepository::new(pool.clone())), keys.clone())
            .with_hash_cost(config.bcrypt_cost),
    );
    let rate_limiter = web::Data::new(AuthRateLimiter::new(
        config.auth_rate_limit,
        Duration::from_secs(config.auth_rate_window_minutes * 60),
    ));
    let authenticator = web::Data::new(Authenticator::new(keys, config.test_user_id));
    let server_pool = web::Data::new(pool.clone());
    let max_payload_size = config.max_payload_size;

    if let Some(id) = config.test_user_id {
        info!("User {} is the read-only demo account", id);
    }

    let server = HttpServer::new(move || {
        App::new()
            .app_data(server_pool.clone())
            .app_data(job_service.clone())
            .app_data(auth_service.clone())
            .app_data(authenticator.clone())
            .app_data(rate_limiter.clone())
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .app_data(validation::json_config())
            .app_data(validation::query_config())
            .app_data(validation::path_config())
            .configure(health_config)
            .configure(api_config)
    })
    .disable_signals();

    info!("Server starting on http://{}:{}", config.host, config.port);

    let server = server
        .bind((config.host.as_str(), config.port))?
        .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, pool)
        .wait_for_shutdown()
        .await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let config = config::Config::from_env()
        .expect("Failed to load configuration");

    std::fs::create_dir_all(&config.log_dir)
        .expect("Failed to create logs directory");

    logging::init(&config.log_dir);

    info!("Starting job-tracker");
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Max database connections: {}", config.max_db_connections);
    info!("  - Token lifetime: {} hours", config.jwt_lifetime_hours);
    info!(
        "  - Auth attempts: {} per {} minutes per client",
        config.auth_rate_limit, config.auth_rate_window_minutes
    );

    let pool = db::connection::get_connection(&config.database_url, config.max_db_connections).await
        .expect("Failed to connect to database");

    db::migrations::run_migrations(&pool).await
        .expect("Failed to run database migrations");

    let outcome = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => return serve(config, pool).await,
        Command::Populate { file, owner } => {
            let repo = JobRepository::new(pool.clone());
            seed::populate(&repo, &file, OwnerId::from_verified(owner)).await
        }
        Command::Demo { owner, count } => {
            let repo = JobRepository::new(pool.clone());
            seed::demo(&repo, OwnerId::from_verified(owner), count).await
        }
    };

    pool.close().await;

    match outcome {
        Ok(inserted) => {
            info!("Success! {} jobs inserted", inserted);
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(std::io::Error::new(std::io::ErrorKind::Other, e))
        }
    }
}
