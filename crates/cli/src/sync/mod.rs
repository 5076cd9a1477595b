// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sharing moves with other clients through `kb-remote`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Board    │────►│   Outbox    │────►│ SyncClient  │────►│  kb-remote  │
//! │  (kb-core)  │     │ (broadcast) │     │ (transport) │◄────│   (relay)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                                         ┌─────────────┐
//!                                         │    Queue    │  (moves made offline)
//!                                         └─────────────┘
//! ```

mod client;
mod outbox;
mod queue;
mod transport;

pub use client::{ConnectionState, Inbox, SyncClient, SyncConfig, SyncError, SyncResult};
pub use outbox::Outbox;
pub use queue::OfflineQueue;
pub use transport::{Transport, TransportError, TransportFuture, WebSocketTransport};

#[cfg(test)]
pub(crate) mod test_helpers;


#[cfg(test)]
mod outbox_tests;
