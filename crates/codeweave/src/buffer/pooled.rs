//! Growable text buffer leased from a [`CharPool`]

use std::{fmt, sync::Arc};

use tracing::trace;

use super::pool::CharPool;

/// Smallest capacity ever requested from the pool
pub const MIN_CAPACITY: usize = 1024;

/// Largest capacity a buffer may grow to
pub const MAX_CAPACITY: usize = isize::MAX as usize;

/// An exclusively owned text buffer whose storage comes from, and goes back
/// to, a [`CharPool`]
///
/// The buffer grows by doubling `capacity + additional`, clamped to
/// [`MIN_CAPACITY`]..=[`MAX_CAPACITY`]. Storage is returned to the pool when
/// the buffer is dropped or [disposed](PooledBuffer::dispose).
pub struct PooledBuffer {
    text: String,
    pool: Arc<CharPool>,
}

impl PooledBuffer {
    /// Lease a buffer from the shared pool
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Lease a buffer from the shared pool with a capacity hint
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_pool(CharPool::shared(), capacity)
    }

    /// Lease a buffer from a specific pool
    pub fn with_pool(pool: Arc<CharPool>, capacity: usize) -> Self {
        let text = pool.rent(capacity.clamp(MIN_CAPACITY, MAX_CAPACITY));
        Self { text, pool }
    }

    /// Number of bytes written
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether nothing has been written
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Size of the backing storage
    #[inline]
    pub fn capacity(&self) -> usize {
        self.text.capacity()
    }

    /// Room left before the next growth
    #[inline]
    pub fn available(&self) -> usize {
        self.text.capacity() - self.text.len()
    }

    /// The written text
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Append one character
    #[inline]
    pub fn write_char(&mut self, ch: char) {
        let needed = ch.len_utf8();
        if needed > self.available() {
            self.grow(needed);
        }
        self.text.push(ch);
    }

    /// Append a run of text
    #[inline]
    pub fn write_str(&mut self, text: &str) {
        if text.len() > self.available() {
            self.grow(text.len());
        }
        self.text.push_str(text);
    }

    /// Rewind the written length to `len`
    ///
    /// # Panics
    ///
    /// If `len` is past the written text or not on a character boundary.
    pub fn truncate(&mut self, len: usize) {
        assert!(
            len <= self.text.len(),
            "cannot truncate buffer of length {} to {}",
            self.text.len(),
            len
        );
        self.text.truncate(len);
    }

    /// Forget everything written, keeping the storage
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Whether the written text starts with `prefix`
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.text.starts_with(prefix)
    }

    /// Whether the written text ends with `suffix`
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.text.ends_with(suffix)
    }

    /// Move to storage of at least `capacity + additional` doubled
    ///
    /// # Panics
    ///
    /// If the written text plus `additional` cannot fit in [`MAX_CAPACITY`].
    pub fn grow(&mut self, additional: usize) {
        let required = self.text.len().saturating_add(additional);
        assert!(
            required <= MAX_CAPACITY,
            "buffer cannot grow past {} bytes",
            MAX_CAPACITY
        );

        let new_capacity = self
            .capacity()
            .saturating_add(additional)
            .saturating_mul(2)
            .clamp(MIN_CAPACITY, MAX_CAPACITY);

        let mut replacement = self.pool.rent(new_capacity);
        replacement.push_str(&self.text);
        let old = std::mem::replace(&mut self.text, replacement);
        trace!(
            from = old.capacity(),
            to = self.text.capacity(),
            "Grew text buffer"
        );
        self.pool.release(old);
    }

    /// Return the storage to the pool
    ///
    /// Equivalent to dropping the buffer.
    pub fn dispose(self) {}

    /// Take the written text, keeping its storage out of the pool
    pub fn into_string(mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

impl Default for PooledBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PooledBuffer {
    fn drop(&mut self) {
        let text = std::mem::take(&mut self.text);
        if text.capacity() > 0 {
            self.pool.release(text);
        }
    }
}

impl fmt::Display for PooledBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for PooledBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("text", &self.text)
            .finish()
    }
}
