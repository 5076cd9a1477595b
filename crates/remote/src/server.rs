// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket server implementation.
//!
//! Handles client connections, message routing, and per-project relay.

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast::error::RecvError;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

use kb_core::protocol::{ClientMessage, ServerMessage};
use kb_core::ProjectId;

use crate::state::ServerState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// What the server knows about one connection.
#[derive(Debug)]
pub(crate) struct Session {
    pub id: u64,
    pub project: Option<ProjectId>,
}

impl Session {
    pub fn new(id: u64) -> Self {
        Session { id, project: None }
    }
}

/// Run the WebSocket server on the given address.
pub async fn run(addr: SocketAddr, state: ServerState) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on: {}", addr);

    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let state = state.clone();

        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }
}

/// Handle a single WebSocket connection.
pub(crate) async fn handle_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: ServerState,
) -> Result<(), BoxError> {
    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    let mut session = Session::new(state.connection_id());
    info!(connection = session.id, "New WebSocket connection from: {}", peer_addr);

    let (mut ws_sink, mut ws_stream) = ws_stream.split();
    let mut relay_rx = state.subscribe();

    loop {
        tokio::select! {
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = match handle_client_message(&text, &state, &mut session).await {
                            Ok(response) => response,
                            Err(e) => Some(ServerMessage::error(e.to_string())),
                        };
                        if let Some(response) = response {
                            ws_sink.send(Message::Text(response.to_json()?.into())).await?;
                        }
                    }
                    Some(Ok(Message::Close(_))) => {
                        info!("Client {} disconnected", peer_addr);
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        ws_sink.send(Message::Pong(data)).await?;
                    }
                    Some(Ok(_)) => {
                        // Binary, Pong and raw frames carry nothing for us
                    }
                    Some(Err(e)) => {
                        error!("WebSocket error from {}: {}", peer_addr, e);
                        break;
                    }
                    None => {
                        info!("Client {} stream ended", peer_addr);
                        break;
                    }
                }
            }

            relayed = relay_rx.recv() => {
                match relayed {
                    Ok(relayed) => {
                        if relayed.origin == session.id
                            || session.project.as_ref() != Some(&relayed.project_id)
                        {
                            continue;
                        }
                        let json = ServerMessage::moves(relayed.moves).to_json()?;
                        if let Err(e) = ws_sink.send(Message::Text(json.into())).await {
                            warn!("Failed to relay moves to {}: {}", peer_addr, e);
                            break;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        warn!("Client {} lagged by {} messages", peer_addr, n);
                    }
                    Err(RecvError::Closed) => {
                        break;
                    }
                }
            }
        }
    }

    info!("Connection closed: {}", peer_addr);
    Ok(())
}

/// Process a client message and return an optional response.
pub(crate) async fn handle_client_message(
    text: &str,
    state: &ServerState,
    session: &mut Session,
) -> Result<Option<ServerMessage>, BoxError> {
    let msg = ClientMessage::from_json(text)?;
    debug!(connection = session.id, "Received message: {:?}", msg);

    match msg {
        ClientMessage::Join { project_id } => {
            info!(connection = session.id, project = %project_id, "joined project");
            session.project = Some(project_id);
            Ok(None)
        }

        ClientMessage::Moves { moves } => {
            let Some(project) = session.project.clone() else {
                return Ok(Some(ServerMessage::error("join a project before sending moves")));
            };
            let (ours, foreign): (Vec<_>, Vec<_>) =
                moves.into_iter().partition(|m| m.project_id == project);
            if !foreign.is_empty() {
                return Ok(Some(ServerMessage::error(format!(
                    "{} move(s) are not for project {}",
                    foreign.len(),
                    project
                ))));
            }

            let received = ours.len();
            let accepted = state.record_moves(session.id, &project, ours).await?;
            debug!(received, accepted = accepted.len(), "moves recorded");
            // Relay is the only response
            Ok(None)
        }

        ClientMessage::Snapshot { project_id } => {
            let moves = state.snapshot(&project_id).await?;
            debug!(project = %project_id, "Snapshot response: {} placements", moves.len());
            Ok(Some(ServerMessage::snapshot_response(project_id, moves)))
        }

        ClientMessage::Ping { id } => {
            debug!("Ping received: {}", id);
            Ok(Some(ServerMessage::pong(id)))
        }
    }
}
