//! `TactixServer` builder and accept loop.
//!
//! This is the entry point for running a Tactix server. It ties the
//! layers together: transport → protocol → coordinator.

use std::collections::HashMap;
use std::sync::Arc;

use tactix_protocol::{ClientId, JsonCodec, ServerEvent};
use tactix_transport::{Transport, WebSocketTransport};
use tokio::sync::{Mutex, mpsc};

use crate::TactixError;
use crate::coordinator::SessionCoordinator;
use crate::handler::handle_connection;

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks.
/// Interior mutability via `Mutex` where needed.
pub(crate) struct ServerState {
    /// All game state behind one lock: events are processed one at a
    /// time across the whole process, which makes every handler atomic.
    pub(crate) coordinator: Mutex<SessionCoordinator>,
    /// Outbound channel per live connection, for fan-out delivery.
    pub(crate) connections: Mutex<HashMap<ClientId, mpsc::UnboundedSender<ServerEvent>>>,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a Tactix server.
///
/// # Example
///
/// ```rust,ignore
/// use tactix::prelude::*;
///
/// let server = TactixServer::builder()
///     .bind("0.0.0.0:8080")
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct TactixServerBuilder {
    bind_addr: String,
}

impl TactixServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Builds the server, binding the WebSocket listener.
    pub async fn build(self) -> Result<TactixServer, TactixError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let state = Arc::new(ServerState {
            coordinator: Mutex::new(SessionCoordinator::default()),
            connections: Mutex::new(HashMap::new()),
            codec: JsonCodec,
        });

        Ok(TactixServer { transport, state })
    }
}

impl Default for TactixServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Tactix server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct TactixServer {
    transport: WebSocketTransport,
    state: Arc<ServerState>,
}

impl TactixServer {
    /// Creates a new builder.
    pub fn builder() -> TactixServerBuilder {
        TactixServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> Result<std::net::SocketAddr, TactixError> {
        Ok(self.transport.local_addr()?)
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each.
    /// Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), TactixError> {
        tracing::info!("Tactix server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
