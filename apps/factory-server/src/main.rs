use std::net::SocketAddr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::PgPool;
use tracing::{info, warn};

use factory_api::{build_router, AppState};
use factory_core::repositories::Repositories;
use factory_core::services::UserService;
use factory_infrastructure::{create_pool, postgres_repositories, run_migrations, InMemoryStore};
use factory_shared::config::AppConfig;

#[derive(Parser)]
#[command(name = "factory-server")]
#[command(about = "Factory equipment registry API server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
    /// Create a staff superuser
    CreateSuperuser {
        #[arg(long, env = "SUPERUSER_EMAIL")]
        email: String,
        #[arg(long, env = "SUPERUSER_PASSWORD")]
        password: String,
        #[arg(long, env = "SUPERUSER_SURNAME", default_value = "Admin")]
        surname: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize telemetry
    let _guard = factory_shared::telemetry::init_telemetry(&config.log)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Migrate => migrate(&config).await,
        Commands::CreateSuperuser {
            email,
            password,
            surname,
        } => create_superuser(&config, &email, &password, &surname).await,
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    info!("{} starting ({})", config.app.name, config.app.env);

    let (repos, db) = open_store(&config).await?;
    if let Some(pool) = &db {
        run_migrations(pool).await.context("Failed to apply migrations")?;
    }

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));

    let app = build_router(AppState::new(config, repos, db));

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn migrate(config: &AppConfig) -> anyhow::Result<()> {
    match open_store(config).await? {
        (_, Some(pool)) => run_migrations(&pool).await.context("Failed to apply migrations")?,
        (_, None) => info!("In-memory store selected, nothing to migrate"),
    }
    Ok(())
}

async fn create_superuser(
    config: &AppConfig,
    email: &str,
    password: &str,
    surname: &str,
) -> anyhow::Result<()> {
    let (repos, db) = open_store(config).await?;
    if db.is_none() {
        warn!("In-memory store selected, the superuser is lost when this command exits");
    }

    let user = UserService::new(repos.users)
        .create_superuser(email, password, surname)
        .await
        .context("Failed to create superuser")?;

    info!("Superuser {} created", user.id);
    Ok(())
}

/// Repositories for the configured backend; `memory://` selects the
/// in-memory store.
async fn open_store(config: &AppConfig) -> anyhow::Result<(Repositories, Option<PgPool>)> {
    if config.database.is_memory() {
        info!("Using in-memory store");
        return Ok((InMemoryStore::new().repositories(), None));
    }

    info!("Connecting to database...");
    let pool = create_pool(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Database connection established");

    Ok((postgres_repositories(pool.clone()), Some(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
