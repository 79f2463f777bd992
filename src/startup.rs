use crate::shutdown;
use dtrsystem::config::Config;
use dtrsystem::error::{config_error, Error};
use dtrsystem::store::{FirebaseStore, RecordStore};
use dtrsystem::web::{router, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Start the web server and run it until a shutdown signal arrives
pub async fn start_server(config: Config) -> miette::Result<()> {
    // Connect the realtime database actor
    let firebase = FirebaseStore::new(&config)?;
    info!("Reading attendance from {}", config.database_url);

    let store: Arc<dyn RecordStore> = Arc::new(firebase.clone());
    let state = AppState::new(&config, store)?;
    let app = router(state, &config.assets_dir);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
        .parse()
        .map_err(|_| {
            config_error(&format!(
                "Invalid listen address {}:{}",
                config.bind_address, config.port
            ))
        })?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(Error::from)?;
    info!("Listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait_for_signal())
        .await;

    // Stop the store actor whichever way the server ended
    if let Err(e) = firebase.shutdown().await {
        error!("Error shutting down realtime database actor: {:?}", e);
    } else {
        info!("Realtime database actor shut down successfully");
    }

    served.map_err(Error::from)?;
    info!("Server stopped");
    Ok(())
}
