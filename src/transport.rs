//! Hand-off point between command codecs and the transport
//!
//! The transport that moves command bytes between processes is not part of
//! this crate. [`CommandSink`] is the seam it plugs into; [`CommandQueue`] is
//! an in-process implementation for wiring producers to consumers directly.

use std::collections::VecDeque;

use bytes::Bytes;
use tracing::trace;

use crate::buffer::{Region, Result};

/// Accepts encoded commands as `(region, offset, length)`
pub trait CommandSink {
    /// Take `length` bytes of `region` starting at `offset`
    ///
    /// Implementations must reject ranges outside the region before taking
    /// anything.
    fn submit(&mut self, region: &[u8], offset: usize, length: usize) -> Result<()>;
}

/// In-memory FIFO of submitted commands
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Bytes>,
}

impl CommandQueue {
    /// Create an empty queue
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest command
    ///
    /// Receivers bind a read-only codec to the returned bytes at offset 0.
    pub fn pop(&mut self) -> Option<Bytes> {
        let command = self.pending.pop_front();
        if let Some(bytes) = &command {
            trace!(len = bytes.len(), remaining = self.pending.len(), "command delivered");
        }
        command
    }

    /// Number of commands waiting
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check whether no command is waiting
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl CommandSink for CommandQueue {
    fn submit(&mut self, region: &[u8], offset: usize, length: usize) -> Result<()> {
        let bytes = region.get_bytes(offset, length)?;
        self.pending.push_back(Bytes::copy_from_slice(bytes));
        trace!(offset, length, pending = self.pending.len(), "command queued");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Error;

    #[test]
    fn test_fifo_order() {
        let region = *b"abcdef";
        let mut queue = CommandQueue::new();
        queue.submit(&region, 0, 2).unwrap();
        queue.submit(&region, 4, 2).unwrap();

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().unwrap().as_ref(), b"ab");
        assert_eq!(queue.pop().unwrap().as_ref(), b"ef");
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_range_outside_region_rejected() {
        let region = [0u8; 8];
        let mut queue = CommandQueue::new();

        assert!(matches!(
            queue.submit(&region, 4, 8),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(queue.is_empty());
    }
}
