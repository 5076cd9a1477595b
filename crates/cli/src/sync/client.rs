// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sync client for the `kb-remote` relay.
//!
//! Provides a high-level interface for:
//! - Connecting and joining the board's project
//! - Sending moves (with offline queue fallback)
//! - Fetching the relay's latest placements
//! - Reconnecting with exponential backoff

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use kb_core::protocol::{ClientMessage, ServerMessage};
use kb_core::{ProjectId, RemoteMove};

use super::queue::{OfflineQueue, QueueError};
use super::transport::{Transport, TransportError, WebSocketTransport};
use crate::config::RemoteConfig;

/// Configuration for the sync client.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub url: String,
    pub project_id: ProjectId,
    pub max_retries: u32,
    /// Cap on the backoff delay (seconds).
    pub max_delay_secs: u64,
    /// First backoff delay (milliseconds).
    pub initial_delay_ms: u64,
    /// How long to wait for each reply from the relay.
    pub reply_timeout: Duration,
}

impl SyncConfig {
    pub fn new(url: impl Into<String>, project_id: impl Into<ProjectId>) -> Self {
        SyncConfig {
            url: url.into(),
            project_id: project_id.into(),
            max_retries: 3,
            max_delay_secs: 5,
            initial_delay_ms: 100,
            reply_timeout: Duration::from_secs(5),
        }
    }

    pub fn from_remote(remote: &RemoteConfig, project_id: impl Into<ProjectId>) -> Self {
        SyncConfig {
            max_retries: remote.reconnect_max_retries.max(1),
            max_delay_secs: remote.reconnect_max_delay_secs,
            ..Self::new(remote.url.clone(), project_id)
        }
    }
}

/// Error type for sync client operations.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("not connected to relay")]
    NotConnected,

    #[error("relay unreachable after {0} attempt(s)")]
    MaxRetriesExceeded(u32),

    #[error("relay did not answer in time")]
    Timeout,

    #[error("relay closed the connection")]
    Closed,
}

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting { attempt: u32 },
}

/// What arrived while waiting for a reply.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Inbox {
    /// The relay's latest placements, when a snapshot was requested.
    pub placements: Vec<RemoteMove>,
    /// Moves other clients made in the meantime.
    pub relayed: Vec<RemoteMove>,
    /// Rejections of something this client sent.
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Awaiting {
    Snapshot,
    Pong(u64),
}

pub struct SyncClient<T: Transport = WebSocketTransport> {
    config: SyncConfig,
    transport: T,
    queue: OfflineQueue,
    state: ConnectionState,
    next_ping: u64,
}

impl SyncClient<WebSocketTransport> {
    pub fn new(config: SyncConfig, queue_path: &Path) -> SyncResult<Self> {
        Self::with_transport(config, WebSocketTransport::new(), queue_path)
    }
}

impl<T: Transport> SyncClient<T> {
    pub fn with_transport(config: SyncConfig, transport: T, queue_path: &Path) -> SyncResult<Self> {
        let queue = OfflineQueue::open(queue_path)?;
        Ok(SyncClient {
            config,
            transport,
            queue,
            state: ConnectionState::Disconnected,
            next_ping: 1,
        })
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected && self.transport.is_connected()
    }

    /// Number of moves waiting in the offline queue.
    pub fn pending_moves(&self) -> SyncResult<usize> {
        Ok(self.queue.move_count()?)
    }

    /// Connects once and joins the configured project.
    pub async fn connect(&mut self) -> SyncResult<()> {
        self.state = ConnectionState::Connecting;
        match self.open().await {
            Ok(()) => {
                self.state = ConnectionState::Connected;
                Ok(())
            }
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                Err(e)
            }
        }
    }

    async fn open(&mut self) -> SyncResult<()> {
        self.transport.connect(&self.config.url).await?;
        let join = ClientMessage::join(self.config.project_id.clone());
        self.transport.send(join).await?;
        Ok(())
    }

    /// Connect with exponential backoff retry.
    pub async fn connect_with_retry(&mut self) -> SyncResult<()> {
        let mut attempt = 0;
        let mut delay_ms = self.config.initial_delay_ms;

        loop {
            attempt += 1;
            self.state = ConnectionState::Reconnecting { attempt };

            match self.open().await {
                Ok(()) => {
                    self.state = ConnectionState::Connected;
                    return Ok(());
                }
                Err(e) if attempt >= self.config.max_retries => {
                    debug!(attempt, error = %e, "giving up on relay");
                    self.state = ConnectionState::Disconnected;
                    return Err(SyncError::MaxRetriesExceeded(attempt));
                }
                Err(e) => {
                    debug!(attempt, delay_ms, error = %e, "relay connect failed, retrying");
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    delay_ms = std::cmp::min(delay_ms * 2, self.config.max_delay_secs * 1000);
                }
            }
        }
    }

    pub async fn disconnect(&mut self) -> SyncResult<()> {
        self.transport.disconnect().await?;
        self.state = ConnectionState::Disconnected;
        Ok(())
    }

    /// Sends one drop's moves, or queues them when the relay is out of reach.
    ///
    /// Returns true if they were sent.
    pub async fn send_moves(&mut self, moves: Vec<RemoteMove>) -> SyncResult<bool> {
        if moves.is_empty() {
            return Ok(true);
        }
        if !self.is_connected() {
            self.queue.enqueue(&moves)?;
            return Ok(false);
        }

        match self.transport.send(ClientMessage::moves(moves.clone())).await {
            Ok(()) => Ok(true),
            Err(e) => {
                debug!(error = %e, "send failed, queueing moves");
                self.state = ConnectionState::Disconnected;
                self.queue.enqueue(&moves)?;
                Ok(false)
            }
        }
    }

    /// Sends every queued batch, oldest first. Returns the number of moves sent.
    pub async fn flush_queue(&mut self) -> SyncResult<usize> {
        if !self.is_connected() {
            return Err(SyncError::NotConnected);
        }

        let batches = self.queue.peek_all()?;
        let mut sent_batches = 0;
        let mut sent_moves = 0;

        for batch in batches {
            let count = batch.len();
            if let Err(e) = self.transport.send(ClientMessage::moves(batch)).await {
                self.state = ConnectionState::Disconnected;
                if sent_batches > 0 {
                    self.queue.remove_first(sent_batches)?;
                }
                return Err(e.into());
            }
            sent_batches += 1;
            sent_moves += count;
        }

        if sent_batches > 0 {
            self.queue.clear()?;
        }
        Ok(sent_moves)
    }

    /// Receive a message from the relay; `None` once it hung up.
    pub async fn recv(&mut self) -> SyncResult<Option<ServerMessage>> {
        if !self.is_connected() {
            return Err(SyncError::NotConnected);
        }

        match self.transport.recv().await {
            Ok(Some(msg)) => Ok(Some(msg)),
            Ok(None) => {
                self.state = ConnectionState::Disconnected;
                Ok(None)
            }
            Err(e) => {
                self.state = ConnectionState::Disconnected;
                Err(e.into())
            }
        }
    }

    /// Asks for the project's latest placements and waits for them.
    pub async fn fetch_snapshot(&mut self) -> SyncResult<Inbox> {
        if !self.is_connected() {
            return Err(SyncError::NotConnected);
        }
        let request = ClientMessage::snapshot(self.config.project_id.clone());
        self.transport.send(request).await?;
        self.read_until(Awaiting::Snapshot).await
    }

    /// Round-trips a ping, so every earlier message has been handled by the
    /// relay. Rejections of those messages arrive before the pong.
    pub async fn confirm(&mut self) -> SyncResult<Inbox> {
        if !self.is_connected() {
            return Err(SyncError::NotConnected);
        }
        let id = self.next_ping;
        self.next_ping += 1;
        self.transport.send(ClientMessage::ping(id)).await?;
        self.read_until(Awaiting::Pong(id)).await
    }

    async fn read_until(&mut self, awaiting: Awaiting) -> SyncResult<Inbox> {
        let mut inbox = Inbox::default();
        loop {
            let reply_timeout = self.config.reply_timeout;
            let msg = match tokio::time::timeout(reply_timeout, self.recv()).await {
                Ok(msg) => msg?,
                Err(_) => return Err(SyncError::Timeout),
            };

            match msg {
                None => return Err(SyncError::Closed),
                Some(ServerMessage::Moves { moves }) => inbox.relayed.extend(moves),
                Some(ServerMessage::Error { message }) => inbox.errors.push(message),
                Some(ServerMessage::SnapshotResponse { moves, .. })
                    if awaiting == Awaiting::Snapshot =>
                {
                    inbox.placements = moves;
                    return Ok(inbox);
                }
                Some(ServerMessage::Pong { id }) if awaiting == Awaiting::Pong(id) => {
                    return Ok(inbox);
                }
                Some(other) => debug!(?other, "ignoring unrelated reply"),
            }
        }
    }
}
