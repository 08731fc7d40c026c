//! Markdown Server
//!
//! A local HTTP server rendering a tree of Markdown files.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ routing::dispatcher ──▶ routing::resolver
//!                         │                   │                 (sandbox under root)
//!                         │                   ▼
//!                         │            content::ignore (excluded → 404)
//!                         │                   │
//!                         │        ┌──────────┼───────────┐
//!                         │        ▼          ▼           ▼
//!                         │      Home     Markdown      Image
//!                         │        │          │           │
//!                         │        ▼          ▼           │
//!                         │   content::menu + content::markdown
//!                         │        │                      │
//!                         │        ▼                      │
//!                         │   render::page                │
//!     Client Response     │        │                      │
//!     ◀───────────────────┴────────┴──────────────────────┘
//!
//!     Cross-cutting: config, observability (logging, metrics), lifecycle
//! ```

use clap::Parser;

use markdown_server::config::Cli;
use markdown_server::http::HttpServer;
use markdown_server::lifecycle::{self, signals, Shutdown};
use markdown_server::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.load()?;

    logging::init(&config.observability.log_level);

    tracing::info!("markdown-server v{} starting", env!("CARGO_PKG_VERSION"));

    let state = match lifecycle::build_state(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = match lifecycle::bind(&config.listener).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    tracing::info!(
        root = %state.dispatcher.root().display(),
        address = %listener.local_addr()?,
        "Serving on http://{}",
        config.listener.bind_address()
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    let server = HttpServer::new(state, &config.timeouts);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
