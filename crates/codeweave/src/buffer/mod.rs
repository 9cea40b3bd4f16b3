//! Pooled text storage
//!
//! [`PooledBuffer`] is the growable buffer every writer emits into; its
//! storage is leased from a [`CharPool`] and handed back on drop.

pub mod pool;
pub mod pooled;

pub use pool::{CharPool, PoolStats};
pub use pooled::{PooledBuffer, MAX_CAPACITY, MIN_CAPACITY};
