//! Shared pool of reusable text buffers

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::options::PoolConfig;

static SHARED: Lazy<Arc<CharPool>> = Lazy::new(|| Arc::new(CharPool::new()));

/// Counters describing pool activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Buffers handed out
    pub rented: u64,
    /// Buffers handed back
    pub returned: u64,
    /// Rents that had to allocate fresh storage
    pub allocated: u64,
    /// Returned buffers dropped because of retention limits
    pub discarded: u64,
    /// Idle buffers currently held
    pub retained: usize,
}

impl PoolStats {
    /// Buffers rented and not yet returned
    pub fn outstanding(&self) -> u64 {
        self.rented.saturating_sub(self.returned)
    }
}

/// A thread-safe pool of cleared `String` buffers
///
/// Renting picks the smallest idle buffer that satisfies the requested
/// capacity and allocates only when none does.
pub struct CharPool {
    idle: Mutex<Vec<String>>,
    config: PoolConfig,
    rented: AtomicU64,
    returned: AtomicU64,
    allocated: AtomicU64,
    discarded: AtomicU64,
}

impl CharPool {
    /// Create a pool with default retention limits
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Create a pool with explicit retention limits
    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            config,
            rented: AtomicU64::new(0),
            returned: AtomicU64::new(0),
            allocated: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
        }
    }

    /// The process-wide pool
    pub fn shared() -> Arc<CharPool> {
        Arc::clone(&SHARED)
    }

    /// Retention limits of this pool
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Lease an empty buffer with at least `min_capacity` bytes of room
    pub fn rent(&self, min_capacity: usize) -> String {
        self.rented.fetch_add(1, Ordering::Relaxed);

        let reused = {
            let mut idle = self.idle.lock();
            let best = idle
                .iter()
                .enumerate()
                .filter(|(_, buf)| buf.capacity() >= min_capacity)
                .min_by_key(|(_, buf)| buf.capacity())
                .map(|(i, _)| i);
            best.map(|i| idle.swap_remove(i))
        };

        match reused {
            Some(buf) => {
                trace!(capacity = buf.capacity(), "Reusing pooled buffer");
                buf
            }
            None => {
                self.allocated.fetch_add(1, Ordering::Relaxed);
                trace!(capacity = min_capacity, "Allocating buffer");
                String::with_capacity(min_capacity)
            }
        }
    }

    /// Hand a buffer back; its contents are discarded
    pub fn release(&self, mut buf: String) {
        self.returned.fetch_add(1, Ordering::Relaxed);
        buf.clear();

        let capacity = buf.capacity();
        if capacity == 0 {
            return;
        }
        if capacity > self.config.max_retained_capacity {
            self.discarded.fetch_add(1, Ordering::Relaxed);
            debug!(capacity, "Dropping oversized buffer instead of pooling it");
            return;
        }

        let mut idle = self.idle.lock();
        if idle.len() < self.config.max_retained {
            trace!(capacity, "Returning buffer to pool");
            idle.push(buf);
        } else {
            self.discarded.fetch_add(1, Ordering::Relaxed);
            debug!(capacity, retained = idle.len(), "Pool full, dropping buffer");
        }
    }

    /// Snapshot of the pool counters
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            rented: self.rented.load(Ordering::Relaxed),
            returned: self.returned.load(Ordering::Relaxed),
            allocated: self.allocated.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            retained: self.idle.lock().len(),
        }
    }

    /// Drop every idle buffer
    pub fn clear(&self) {
        self.idle.lock().clear();
    }
}

impl Default for CharPool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CharPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharPool")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish()
    }
}
