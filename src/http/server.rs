//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener, stop on shutdown broadcast
//! - Execute the action chosen by the dispatcher
//! - Observability (metrics, request IDs in logs)

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::{ServiceBuilder, ServiceExt};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeFile,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::TimeoutConfig;
use crate::content::{markdown, MenuBuilder};
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::http::response::{html, ServeError};
use crate::observability::metrics as request_metrics;
use crate::render::{PageContext, PageRenderer};
use crate::routing::{Dispatcher, RenderAction};

/// Application state injected into handlers.
///
/// Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub menu: Arc<MenuBuilder>,
    pub pages: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, menu: MenuBuilder, pages: PageRenderer) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            menu: Arc::new(menu),
            pages: Arc::new(pages),
        }
    }
}

/// HTTP server for the Markdown tree.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around prepared state.
    pub fn new(state: AppState, timeouts: &TimeoutConfig) -> Self {
        Self {
            router: Self::build_router(state, timeouts),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, timeouts: &TimeoutConfig) -> Router {
        Router::new()
            .route("/", any(serve_request))
            .route("/{*path}", any(serve_request))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(timeouts.request_secs))),
            )
    }

    /// The configured router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown message arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: classify, then render or stream.
async fn serve_request(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let url_path = request.uri().path().to_string();
    let request_id = request_id(request.headers()).to_string();

    tracing::info!(request_id = %request_id, "{} {}", method, url_path);

    let action = state.dispatcher.dispatch(&method, &url_path);
    let kind = action.kind();

    let result = match action {
        RenderAction::Reject(e) => Err(e),
        RenderAction::Home => render_home(&state, &url_path).await,
        RenderAction::Markdown(path) => render_markdown(&state, path, &url_path).await,
        RenderAction::Image(path) => serve_image(path, request).await,
    };

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            if e.status().is_server_error() {
                tracing::error!(request_id = %request_id, error = %e, "Request failed");
            } else {
                tracing::warn!(request_id = %request_id, error = %e, "Request rejected");
            }
            e.into_response()
        }
    };

    record(&method, &response, kind, start);
    response
}

fn record(method: &Method, response: &Response, kind: &'static str, start: Instant) {
    request_metrics::record_request(method.as_str(), response.status().as_u16(), kind, start);
}

async fn render_home(state: &AppState, url_path: &str) -> Result<Response, ServeError> {
    let menu = build_menu(state, url_path).await;
    let body = state
        .pages
        .render(PageContext::home(url_path, menu))
        .map_err(|e| ServeError::Internal(e.to_string()))?;
    Ok(html(body))
}

async fn render_markdown(
    state: &AppState,
    path: PathBuf,
    url_path: &str,
) -> Result<Response, ServeError> {
    let source = tokio::fs::read(&path)
        .await
        .map_err(|e| ServeError::NotFound(format!("cannot read {}: {}", path.display(), e)))?;

    let content = markdown::to_html(&source)
        .map_err(|e| ServeError::Internal(format!("cannot convert {}: {}", path.display(), e)))?;

    let menu = build_menu(state, url_path).await;

    let title = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let page = PageContext {
        title,
        url_path: url_path.to_string(),
        file_path: path.display().to_string(),
        content,
        menu,
    };

    let body = state
        .pages
        .render(page)
        .map_err(|e| ServeError::Internal(e.to_string()))?;
    Ok(html(body))
}

/// Walk the tree off the async workers and render the menu.
async fn build_menu(state: &AppState, url_path: &str) -> String {
    let menu = Arc::clone(&state.menu);
    let root = state.dispatcher.root().to_path_buf();
    let url_path = url_path.to_string();

    match tokio::task::spawn_blocking(move || menu.build(&root, &url_path)).await {
        Ok(menu) => menu,
        Err(e) => {
            tracing::error!(error = %e, "Menu task failed");
            String::new()
        }
    }
}

/// Stream the file as-is, content type guessed from its extension.
///
/// Only regular files are streamed; a directory with an image extension is
/// reported as missing.
async fn serve_image(path: PathBuf, request: Request<Body>) -> Result<Response, ServeError> {
    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|e| ServeError::NotFound(format!("cannot stat {}: {}", path.display(), e)))?;
    if !metadata.is_file() {
        return Err(ServeError::NotFound(format!("{} is not a file", path.display())));
    }

    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => Ok(response.map(Body::new)),
        Err(never) => match never {},
    }
}
