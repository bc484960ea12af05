use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tokio::signal;

use holiday_resolver::api::app_router;
use holiday_resolver::cli::Cli;
use holiday_resolver::config::{Config, StorageBackend};
use holiday_resolver::db::create_pool;
use holiday_resolver::error::AppError;
use holiday_resolver::holidays::kayaposoft_adapter::KayaposoftHolidayProvider;
use holiday_resolver::holidays::{HolidayProvider, HolidayResolver, HolidayStore};
use holiday_resolver::logging::init_logging;
use holiday_resolver::metrics::AppMetrics;
use holiday_resolver::repository::HolidayRepository;
use holiday_resolver::services::kayaposoft::KayaposoftClient;
use holiday_resolver::store::InMemoryHolidayStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    let cli = Cli::parse();
    init_logging();

    if let Err(err) = run(cli).await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::from_env()
        .map_err(AppError::Config)?
        .with_cli_overrides(&cli);

    tracing::info!("Service starting with config: {:?}", config);

    let store: Arc<dyn HolidayStore + Send + Sync> = match &config.storage {
        StorageBackend::Sqlite { database_url } => {
            let pool = create_pool(database_url)
                .await
                .map_err(|err| AppError::Config(format!("Database unavailable: {}", err)))?;
            Arc::new(HolidayRepository::new(pool))
        }
        StorageBackend::InMemory => {
            tracing::warn!("Using in-memory holiday store; fetched data is lost on exit");
            Arc::new(InMemoryHolidayStore::new())
        }
    };

    let provider: Arc<dyn HolidayProvider + Send + Sync> = Arc::new(
        KayaposoftHolidayProvider::new(KayaposoftClient::new(config.provider_url.clone())),
    );

    let metrics = Arc::new(
        AppMetrics::new().map_err(|err| AppError::Internal(err.to_string()))?,
    );

    let resolver = HolidayResolver::new(store, provider).with_metrics(metrics.clone());
    let app = app_router(resolver, metrics);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.api_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::Network(format!("Failed to bind {}: {}", addr, err)))?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            tracing::info!("Shutdown signal received. Stopping server.");
        })
        .await
        .map_err(|err| AppError::Network(err.to_string()))?;

    tracing::info!("Server stopped cleanly");
    Ok(())
}
