mod api;
mod middleware;

use std::sync::Arc;

use sawei_catalogue::CatalogueHandle;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = sawei_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let catalogue = CatalogueHandle::new();
    let path = config.catalogue_path.clone();
    let initial = catalogue.clone();
    if let Err(e) = tokio::task::spawn_blocking(move || initial.reload(&path)).await? {
        tracing::warn!(
            path = %config.catalogue_path.display(),
            error = %e,
            "catalogue not loaded at startup; serving degraded until reload"
        );
    }

    let auth = AuthState::from_tokens(&config.admin_tokens, config.env)?;
    let app = build_app(
        AppState {
            catalogue,
            catalogue_path: Arc::new(config.catalogue_path.clone()),
        },
        auth,
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
