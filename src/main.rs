use crate::api::{GridSource, OfflineSource, RestSource};
use crate::app::App;
use crate::config::AppConfig;
use crate::responses::error_to_response;
use crate::router::handle;
use astra::Server;
use tracing::{error, info, warn};
use tracing_subscriber::filter::EnvFilter;

mod api;
mod app;
mod config;
mod errors;
mod handlers;
mod inventory;
mod loader;
mod responses;
mod router;
mod session;
mod templates;

#[cfg(test)]
mod tests;

/// Initialize logging, writing to SALES_MATRIX_LOG_PATH if set, otherwise stderr.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("SALES_MATRIX_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    // 1️⃣ Configuration
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    // 2️⃣ Upstream sales API, or none
    let source: Box<dyn GridSource> = match &config.api {
        Some(api) => match RestSource::new(api) {
            Ok(rest) => {
                info!(url = %api.base_url, "using sales API");
                Box::new(rest)
            }
            Err(e) => {
                error!("could not build sales API client: {e}");
                std::process::exit(1);
            }
        },
        None => {
            warn!("SALES_API_URL not set; running on bundled demo layouts");
            Box::new(OfflineSource)
        }
    };

    // 3️⃣ Start the server
    let addr = config.bind;
    let workers = config.workers;
    let app = App::new(config, source);
    info!(%addr, workers, "starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        error!("server ended with error: {e}");
        std::process::exit(1);
    }

    info!("server shut down cleanly");
}
