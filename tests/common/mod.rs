//! Shared utilities for integration testing.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

use markdown_server::config::ServerConfig;
use markdown_server::http::HttpServer;
use markdown_server::lifecycle::{bind, build_state, Shutdown};

/// A server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Create files (and their parent directories) under `root`.
pub fn write_tree(root: &Path, files: &[(&str, &[u8])]) {
    for (file, content) in files {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
    }
}

/// Config serving `root` on 127.0.0.1 with a random port, reading the
/// ignore file and templates from `config_dir`.
pub fn test_config(root: &Path, config_dir: &Path) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.content.root = root.to_path_buf();
    config.content.config_dir = config_dir.to_path_buf();
    config
}

/// Start the server the same way `main` does.
pub async fn start_server(config: ServerConfig) -> TestServer {
    let state = build_state(&config).unwrap();
    let listener = bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(state, &config.timeouts);
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

/// Send a request with the target written verbatim, bypassing any client
/// side path normalisation. Returns the status code and the raw response.
#[allow(dead_code)]
pub async fn raw_request(addr: SocketAddr, method: &str, target: &str) -> (u16, String) {
    let mut socket = TcpStream::connect(addr).await.unwrap();
    let request = format!("{method} {target} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    socket.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    socket.read_to_end(&mut response).await.unwrap();
    let response = String::from_utf8_lossy(&response).into_owned();

    let status = response
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .unwrap_or(0);
    (status, response)
}
