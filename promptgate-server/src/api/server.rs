//! HTTP server setup and connection handling.

use super::router;
use super::state::AppState;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use promptgate_core::{GateError, Result};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Configuration for the API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on. Zero picks a free port.
    pub port: u16,
}

impl ServerConfig {
    /// Create a new server configuration.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Get the socket address.
    pub fn socket_addr(&self) -> SocketAddr {
        let host: std::net::IpAddr = self.host.parse().unwrap_or([127, 0, 0, 1].into());
        SocketAddr::new(host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8188,
        }
    }
}

/// HTTP API server for prompt edit sessions.
pub struct ApiServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Bind the listening socket.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the address cannot be bound.
    pub async fn bind(config: &ServerConfig, state: Arc<AppState>) -> Result<Self> {
        let addr = config.socket_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| GateError::Io {
            target: format!("{}:{}", config.host, config.port),
            cause: e.to_string(),
        })?;
        let local_addr = listener.local_addr().map_err(|e| GateError::Io {
            target: addr.to_string(),
            cause: e.to_string(),
        })?;

        Ok(Self {
            listener,
            local_addr,
            state,
        })
    }

    /// The address actually bound.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Get a reference to the application state.
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    /// Serve until the process exits.
    pub async fn run(self) -> Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Serve until `shutdown` completes.
    pub async fn run_until(self, shutdown: impl Future<Output = ()>) -> Result<()> {
        tracing::info!(addr = %self.local_addr, "API server started");
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                result = self.listener.accept() => {
                    let (stream, remote_addr) = result.map_err(|e| GateError::Network {
                        cause: e.to_string(),
                    })?;

                    let io = TokioIo::new(stream);
                    let state = Arc::clone(&self.state);

                    tokio::spawn(async move {
                        let service = service_fn(move |req| {
                            let state = Arc::clone(&state);
                            async move { router::route(req, state).await }
                        });

                        if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                            if !e.is_incomplete_message() {
                                tracing::warn!(
                                    remote = %remote_addr,
                                    error = %e,
                                    "HTTP connection error"
                                );
                            }
                        }
                    });
                }
                _ = &mut shutdown => {
                    tracing::info!("API server shutting down");
                    break;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8188);
    }

    #[test]
    fn server_config_socket_addr() {
        let config = ServerConfig::new("0.0.0.0", 9000);
        let addr = config.socket_addr();

        assert_eq!(addr.port(), 9000);
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
    }

    #[tokio::test]
    async fn bind_ephemeral_port() {
        let server = ApiServer::bind(
            &ServerConfig::new("127.0.0.1", 0),
            Arc::new(AppState::default()),
        )
        .await
        .unwrap();

        assert_ne!(server.local_addr().port(), 0);
    }
}
