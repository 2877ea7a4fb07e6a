mod api;
mod middleware;
mod runs;
mod scheduler;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::{api::build_app, middleware::CronAuth, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(engage_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let terms = engage_core::load_terms(&config.terms_path)?;
    tracing::info!(
        env = %config.env,
        bluesky_terms = terms.bluesky.len(),
        linkedin_terms = terms.linkedin.len(),
        "configuration loaded"
    );

    let state = AppState::from_config(Arc::clone(&config), terms);

    let _scheduler = match config.schedule.as_deref() {
        Some(schedule) => {
            Some(scheduler::build_scheduler(schedule, &config, state.clone()).await?)
        }
        None => None,
    };

    let app = build_app(state, CronAuth::new(config.cron_secret.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
