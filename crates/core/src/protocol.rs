// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket protocol messages between board clients and the relay server.
//!
//! The protocol is simple:
//! - A client joins one project, then sends the moves it applies locally
//! - The server records them and relays the accepted ones to the project's
//!   other clients
//! - A joining client asks for a snapshot of the latest placements

use serde::{Deserialize, Serialize};

use crate::op::RemoteMove;
use crate::task::ProjectId;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe this connection to a project's moves.
    Join { project_id: ProjectId },

    /// Moves produced by one local drop, all sharing a version.
    Moves { moves: Vec<RemoteMove> },

    /// Request the latest placement of every task in a project.
    Snapshot { project_id: ProjectId },

    /// Ping message for keepalive.
    Ping {
        /// Client-chosen ID echoed in Pong.
        id: u64,
    },
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Moves made by another client of the joined project.
    Moves { moves: Vec<RemoteMove> },

    /// Response to a Snapshot request, oldest move first.
    SnapshotResponse {
        project_id: ProjectId,
        moves: Vec<RemoteMove>,
    },

    /// Pong response to client Ping.
    Pong {
        /// Echoed from the Ping message.
        id: u64,
    },

    /// Error message.
    Error {
        /// Human-readable error description.
        message: String,
    },
}

impl ClientMessage {
    pub fn join(project_id: impl Into<ProjectId>) -> Self {
        ClientMessage::Join {
            project_id: project_id.into(),
        }
    }

    pub fn moves(moves: Vec<RemoteMove>) -> Self {
        ClientMessage::Moves { moves }
    }

    pub fn snapshot(project_id: impl Into<ProjectId>) -> Self {
        ClientMessage::Snapshot {
            project_id: project_id.into(),
        }
    }

    pub fn ping(id: u64) -> Self {
        ClientMessage::Ping { id }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl ServerMessage {
    pub fn moves(moves: Vec<RemoteMove>) -> Self {
        ServerMessage::Moves { moves }
    }

    pub fn snapshot_response(project_id: ProjectId, moves: Vec<RemoteMove>) -> Self {
        ServerMessage::SnapshotResponse { project_id, moves }
    }

    pub fn pong(id: u64) -> Self {
        ServerMessage::Pong { id }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
