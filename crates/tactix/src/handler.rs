//! Per-connection handler: decode loop, dispatch, and fan-out.
//!
//! Each accepted connection gets its own Tokio task running this
//! handler. The flow is:
//!   1. Register an outbound channel and spawn a writer task
//!   2. Loop: receive frames → decode `ClientEvent` → coordinator
//!   3. On close (clean, error, or EOF) synthesize the disconnect,
//!      notify the remaining room members, and unregister

use std::sync::Arc;

use tactix_protocol::{ClientEvent, ClientId, Codec, Recipient, ServerEvent};
use tactix_transport::{Connection, WebSocketConnection};

use crate::TactixError;
use crate::coordinator::SessionCoordinator;
use crate::server::ServerState;

/// What the connection produced: a decoded event, or its end.
enum Inbound {
    Event(ClientEvent),
    Disconnect,
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    state: Arc<ServerState>,
) -> Result<(), TactixError> {
    let client = conn.id();
    tracing::debug!(%client, "handling new connection");

    let conn = Arc::new(conn);

    // Register the outbound channel before any event can address us.
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<ServerEvent>();
    state.connections.lock().await.insert(client, tx);

    let writer = spawn_writer(Arc::clone(&conn), Arc::clone(&state), rx);

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%client, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%client, error = %e, "recv error");
                break;
            }
        };

        let event: ClientEvent = match state.codec.decode(&data) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(%client, error = %e, "skipping undecodable frame");
                continue;
            }
        };

        process(&state, client, Inbound::Event(event)).await;
    }

    // However the loop ended, the departure must reach the room.
    process(&state, client, Inbound::Disconnect).await;

    // Dropping the sender ends the writer once its queue drains, so
    // the departure notice above still goes out to the others while
    // our own pending sends flush.
    state.connections.lock().await.remove(&client);
    let _ = writer.await;

    tracing::debug!(%client, "connection handler finished");
    Ok(())
}

/// Spawns the task that drains the outbound channel onto the socket.
fn spawn_writer(
    conn: Arc<WebSocketConnection>,
    state: Arc<ServerState>,
    mut rx: tokio::sync::mpsc::UnboundedReceiver<ServerEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let bytes = match state.codec.encode(&event) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::error!(error = %e, "failed to encode outbound event");
                    continue;
                }
            };
            if let Err(e) = conn.send(&bytes).await {
                tracing::debug!(error = %e, "outbound send failed, stopping writer");
                break;
            }
        }
    })
}

/// Runs one inbound item through the coordinator and delivers the
/// resulting batch.
///
/// Recipients are expanded against room membership while the
/// coordinator lock is held, so the audience is the one the handler
/// saw. Delivery happens after the lock is released; sends to
/// connections that vanished in between are silently dropped.
async fn process(state: &Arc<ServerState>, client: ClientId, inbound: Inbound) {
    let deliveries = {
        let mut coordinator = state.coordinator.lock().await;
        let batch = match inbound {
            Inbound::Event(event) => coordinator.handle_event(client, event),
            Inbound::Disconnect => coordinator.handle_disconnect(client),
        };
        expand_recipients(&coordinator, batch)
    };

    if deliveries.is_empty() {
        return;
    }

    let connections = state.connections.lock().await;
    for (target, event) in deliveries {
        if let Some(tx) = connections.get(&target) {
            let _ = tx.send(event);
        }
    }
}

/// Resolves each [`Recipient`] to the concrete connections it names.
fn expand_recipients(
    coordinator: &SessionCoordinator,
    batch: Vec<(Recipient, ServerEvent)>,
) -> Vec<(ClientId, ServerEvent)> {
    let mut out = Vec::new();
    for (recipient, event) in batch {
        match recipient {
            Recipient::Client(target) => out.push((target, event)),
            Recipient::Room(code) => {
                for member in coordinator.room_members(&code) {
                    out.push((member, event.clone()));
                }
            }
            Recipient::RoomExcept(code, excluded) => {
                for member in coordinator.room_members(&code) {
                    if member != excluded {
                        out.push((member, event.clone()));
                    }
                }
            }
        }
    }
    out
}
