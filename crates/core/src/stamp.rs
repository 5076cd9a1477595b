// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Move versions.
//!
//! Every applied move carries a [`Stamp`], a hybrid logical clock reading of
//! the client that produced it. A task remembers the stamp of the last move
//! applied to it; anything arriving later with an older or equal stamp is
//! stale and gets dropped, whether it is a persistence acknowledgment or
//! another client's broadcast.
//!
//! Text form: `{wall_ms}-{counter}-{node}`. Ordering compares `wall_ms`, then
//! `counter`, then `node` so that two clients never produce equal stamps.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Error, Result};

/// Version of a single move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stamp {
    pub wall_ms: u64,
    pub counter: u32,
    pub node: u32,
}

impl Stamp {
    pub fn new(wall_ms: u64, counter: u32, node: u32) -> Self {
        Stamp {
            wall_ms,
            counter,
            node,
        }
    }

    /// True when `self` supersedes `other`, or when there is nothing to supersede.
    pub fn supersedes(&self, other: Option<&Stamp>) -> bool {
        match other {
            Some(other) => self > other,
            None => true,
        }
    }
}

impl Ord for Stamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.wall_ms
            .cmp(&other.wall_ms)
            .then_with(|| self.counter.cmp(&other.counter))
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for Stamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.wall_ms, self.counter, self.node)
    }
}

impl FromStr for Stamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('-');
        let (Some(wall), Some(counter), Some(node), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::InvalidStamp(format!(
                "expected 'wall_ms-counter-node', got '{s}'"
            )));
        };

        let field = |value: &str, name: &str| {
            Error::InvalidStamp(format!("invalid {name} '{value}' in '{s}'"))
        };

        Ok(Stamp::new(
            wall.parse().map_err(|_| field(wall, "wall_ms"))?,
            counter.parse().map_err(|_| field(counter, "counter"))?,
            node.parse().map_err(|_| field(node, "node"))?,
        ))
    }
}

/// Source of wall-clock milliseconds, injectable for tests.
pub trait ClockSource: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Wall clock backed by `SystemTime`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

impl<C: ClockSource> ClockSource for std::sync::Arc<C> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Issues strictly increasing stamps for one node.
pub struct StampClock<C: ClockSource = SystemClock> {
    clock: C,
    node: u32,
    // (last wall_ms, last counter)
    last: Mutex<(u64, u32)>,
}

impl StampClock<SystemClock> {
    pub fn new(node: u32) -> Self {
        Self::with_clock(SystemClock, node)
    }
}

impl<C: ClockSource> StampClock<C> {
    pub fn with_clock(clock: C, node: u32) -> Self {
        StampClock {
            clock,
            node,
            last: Mutex::new((0, 0)),
        }
    }

    pub fn node(&self) -> u32 {
        self.node
    }

    /// Next local stamp. Monotonic even if the wall clock stalls or steps back.
    pub fn tick(&self) -> Stamp {
        let physical = self.clock.now_ms();
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());

        *last = if physical > last.0 {
            (physical, 0)
        } else {
            (last.0, last.1 + 1)
        };

        Stamp::new(last.0, last.1, self.node)
    }

    /// Folds in a stamp seen from another node so the next `tick` sorts after it.
    pub fn observe(&self, seen: &Stamp) {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        if (seen.wall_ms, seen.counter) > *last {
            *last = (seen.wall_ms, seen.counter);
        }
    }
}

#[cfg(test)]
#[path = "stamp_tests.rs"]
mod tests;
