//! Pending reads and writes against one state value.
//!
//! The queue does no locking of its own. Ordering comes from its owner, the
//! store resolver, which is the only code that touches it.

use std::collections::VecDeque;

/// A pending write: mutates the state in place.
pub type Write<S> = Box<dyn FnOnce(&mut S) + Send>;

/// A pending read: observes the state once all earlier writes are applied.
pub type Read<S> = Box<dyn FnOnce(&S) + Send>;

pub struct MutationQueue<S> {
    reads: VecDeque<Read<S>>,
    writes: Vec<Write<S>>,
}

impl<S> MutationQueue<S> {
    pub fn new() -> Self {
        Self {
            reads: VecDeque::new(),
            writes: Vec::new(),
        }
    }

    pub fn enqueue_read(&mut self, read: Read<S>) {
        self.reads.push_back(read);
    }

    pub fn enqueue_write(&mut self, write: Write<S>) {
        self.writes.push(write);
    }

    /// Removes and returns every queued write in submission order.
    pub fn drain_writes(&mut self) -> Vec<Write<S>> {
        std::mem::take(&mut self.writes)
    }

    /// Removes and returns the oldest queued read.
    pub fn drain_one_read(&mut self) -> Option<Read<S>> {
        self.reads.pop_front()
    }

    pub fn pending_reads(&self) -> usize {
        self.reads.len()
    }

    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty() && self.writes.is_empty()
    }
}

impl<S> Default for MutationQueue<S> {
    fn default() -> Self {
        Self::new()
    }
}
