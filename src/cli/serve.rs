//! Serve command implementation

use crate::api::{create_router, AppState};
use crate::cli::ServeArgs;
use crate::config::{LogFormat, LoggingConfig, NetpathConfig};
use crate::snapshot::SnapshotReader;
use crate::watcher::{self, SnapshotWatcher};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<NetpathConfig, Box<dyn std::error::Error>> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        NetpathConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        NetpathConfig::default()
    };

    config = config.with_env_overrides();

    // CLI flags win over everything else
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if let Some(ref dir) = args.snapshot_dir {
        config.snapshots.dir = dir.clone();
    }
    if args.no_watch {
        config.watcher.enabled = false;
    }

    Ok(config)
}

/// Initialize tracing based on configuration
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}

/// Start the snapshot watcher when enabled.
///
/// A missing snapshot directory disables live updates instead of failing
/// the server; route queries keep reporting the read error per request.
fn start_watcher(
    config: &NetpathConfig,
    app_state: &AppState,
    cancel_token: CancellationToken,
) -> Option<JoinHandle<()>> {
    if !config.watcher.enabled {
        tracing::info!("Snapshot watcher disabled");
        return None;
    }

    let reader = Arc::new(SnapshotReader::new(config.reader.clone()));
    let snapshot_watcher = SnapshotWatcher::new(
        reader,
        config.snapshots.clone(),
        config.watcher.clone(),
        app_state.updates.clone(),
    );
    match snapshot_watcher.start(cancel_token) {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "Snapshot watcher not started, live updates disabled");
            None
        }
    }
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    cancel_token.cancel();
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load and merge configuration
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;

    tracing::info!("Starting netpath server");
    tracing::debug!(?config, "Loaded configuration");
    tracing::info!(
        dir = %config.snapshots.dir.display(),
        strategy = %config.routing.default_strategy,
        "Serving routes from snapshots"
    );

    // 3. Build shared state and router
    let config = Arc::new(config);
    let updates = watcher::channel(&config.watcher);
    let app_state = Arc::new(AppState::with_updates(Arc::clone(&config), updates));
    let app = create_router(Arc::clone(&app_state));

    // 4. Start the snapshot watcher
    let cancel_token = CancellationToken::new();
    let watcher_handle = start_watcher(&config, &app_state, cancel_token.clone());

    // 5. Bind and serve
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "netpath API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token.clone()))
        .await?;

    // 6. Cleanup
    cancel_token.cancel();
    if let Some(handle) = watcher_handle {
        tracing::info!("Waiting for snapshot watcher to stop");
        handle.await?;
    }

    tracing::info!("netpath server stopped");
    Ok(())
}
