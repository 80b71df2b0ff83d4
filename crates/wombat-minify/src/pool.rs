//! Reusable script buffers.
//!
//! A minifier pass collects the text of each `<script>` element in a buffer
//! leased from a [`BufferPool`]. The lease is a [`PooledBuffer`] guard that
//! owns its buffer outright; dropping it clears the buffer and puts it back,
//! so a document with many scripts, or many documents in a row, reuse the
//! same few allocations.

use core::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A pool of cleared `String` buffers.
pub struct BufferPool {
    buffers: Mutex<Vec<String>>,
    max_buffers: usize,
    max_capacity: usize,
}

impl BufferPool {
    /// Default number of idle buffers kept.
    pub const DEFAULT_MAX_BUFFERS: usize = 8;

    /// Default capacity, in bytes, an idle buffer may keep. Larger buffers
    /// are shrunk when returned.
    pub const DEFAULT_MAX_CAPACITY: usize = 64 * 1024;

    /// An empty pool with the default limits.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_limits(Self::DEFAULT_MAX_BUFFERS, Self::DEFAULT_MAX_CAPACITY)
    }

    /// An empty pool keeping at most `max_buffers` idle buffers of at most
    /// `max_capacity` bytes each.
    #[must_use]
    pub const fn with_limits(max_buffers: usize, max_capacity: usize) -> Self {
        Self {
            buffers: Mutex::new(Vec::new()),
            max_buffers,
            max_capacity,
        }
    }

    /// The process-wide pool used when a caller does not supply one.
    #[must_use]
    pub fn global() -> &'static Self {
        static GLOBAL: BufferPool = BufferPool::new();
        &GLOBAL
    }

    /// Lease a cleared buffer, reusing an idle one when available.
    #[must_use]
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let buffer = self.idle().pop().unwrap_or_default();
        PooledBuffer { buffer, pool: self }
    }

    /// Number of idle buffers waiting to be reused.
    #[must_use]
    pub fn available(&self) -> usize {
        self.idle().len()
    }

    fn release(&self, mut buffer: String) {
        if buffer.capacity() == 0 {
            return;
        }
        buffer.clear();
        buffer.shrink_to(self.max_capacity);
        let mut idle = self.idle();
        if idle.len() < self.max_buffers {
            idle.push(buffer);
        }
    }

    /// Buffers are always left cleared, so a lock poisoned by a panicking
    /// holder is still safe to use.
    fn idle(&self) -> MutexGuard<'_, Vec<String>> {
        self.buffers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("available", &self.available())
            .field("max_buffers", &self.max_buffers)
            .field("max_capacity", &self.max_capacity)
            .finish()
    }
}

/// A buffer leased from a [`BufferPool`], returned to it on drop.
pub struct PooledBuffer<'p> {
    buffer: String,
    pool: &'p BufferPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = String;

    fn deref(&self) -> &String {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut String {
        &mut self.buffer
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(mem::take(&mut self.buffer));
    }
}

impl fmt::Debug for PooledBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PooledBuffer").field(&self.buffer).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_is_returned_cleared() {
        let pool = BufferPool::new();
        {
            let mut buffer = pool.acquire();
            buffer.push_str("var a = 1;");
        }
        assert_eq!(pool.available(), 1);
        let buffer = pool.acquire();
        assert!(buffer.is_empty());
        assert!(buffer.capacity() >= "var a = 1;".len());
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn test_concurrent_leases_get_distinct_buffers() {
        let pool = BufferPool::new();
        let mut first = pool.acquire();
        let mut second = pool.acquire();
        first.push('a');
        second.push('b');
        assert_eq!((first.as_str(), second.as_str()), ("a", "b"));
        drop(first);
        drop(second);
        assert_eq!(pool.available(), 2);
    }

    #[test]
    fn test_idle_count_is_bounded() {
        let pool = BufferPool::with_limits(1, 16);
        let mut a = pool.acquire();
        let mut b = pool.acquire();
        a.push('x');
        b.push('y');
        drop(a);
        drop(b);
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_large_buffers_are_shrunk() {
        let pool = BufferPool::with_limits(4, 16);
        {
            let mut buffer = pool.acquire();
            buffer.push_str(&"x".repeat(1024));
        }
        assert!(pool.acquire().capacity() < 1024);
    }

    #[test]
    fn test_unused_lease_is_not_pooled() {
        let pool = BufferPool::new();
        drop(pool.acquire());
        assert_eq!(pool.available(), 0);
    }
}
