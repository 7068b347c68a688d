//! Serialized state ownership.
//!
//! A [`StateStore`] is a cheap, cloneable handle. All reads and writes travel
//! over one channel to a [`StoreResolver`], which owns the canonical state and
//! the [`MutationQueue`] and processes them one at a time on its own task:
//!
//! 1. fold every pending write into the state, in submission order
//! 2. publish the result if it differs from the previous snapshot
//! 3. serve the oldest pending read, then go back to 1
//!
//! Writes that arrive while reads are being served are folded in before the
//! next read, so a read never observes a state older than any write that was
//! submitted before it.

mod channel;
mod error;
pub mod queue;

pub use channel::SnapshotChannel;
pub use error::StoreError;
pub use queue::MutationQueue;

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use uuid::Uuid;

use crate::state::State;
use queue::{Read, Write};

enum Mutation<S> {
    Read(Read<S>),
    Write(Write<S>),
}

/// Handle to one serialized state value.
pub struct StateStore<S: State> {
    id: Uuid,
    inbox: mpsc::UnboundedSender<Mutation<S>>,
    channel: Arc<SnapshotChannel<S>>,
}

impl<S: State> Clone for StateStore<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inbox: self.inbox.clone(),
            channel: Arc::clone(&self.channel),
        }
    }
}

impl<S: State> StateStore<S> {
    /// Creates a store and the resolver that must be spawned to drive it.
    ///
    /// Mutations submitted before the resolver runs are queued and resolved
    /// once it starts.
    pub fn new(initial: S) -> (Self, StoreResolver<S>) {
        Self::with_channel(SnapshotChannel::new(initial))
    }

    /// Creates a store that publishes through the given channel. The store
    /// takes ownership; the channel lives exactly as long as the store does.
    pub fn with_channel(channel: SnapshotChannel<S>) -> (Self, StoreResolver<S>) {
        let id = Uuid::new_v4();
        let (inbox, receiver) = mpsc::unbounded_channel();
        let channel = Arc::new(channel);
        let state = channel.current();
        let store = Self {
            id,
            inbox,
            channel: Arc::clone(&channel),
        };
        let resolver = StoreResolver {
            id,
            inbox: receiver,
            queue: MutationQueue::new(),
            state,
            channel,
        };
        (store, resolver)
    }

    /// Creates a store and spawns its resolver on the current tokio runtime.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn spawn(initial: S) -> Self {
        let (store, resolver) = Self::new(initial);
        tokio::spawn(resolver.run());
        store
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The latest published snapshot. Never waits for pending writes.
    pub fn current_state(&self) -> S {
        self.channel.current()
    }

    /// Queues a write.
    pub fn set_state<F>(&self, write: F)
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        if self.inbox.send(Mutation::Write(Box::new(write))).is_err() {
            tracing::warn!(store = %self.id, "set_state dropped: resolver has shut down");
        }
    }

    /// Queues a read that observes the state after every earlier write.
    pub fn get_state<F>(&self, read: F)
    where
        F: FnOnce(&S) + Send + 'static,
    {
        if self.inbox.send(Mutation::Read(Box::new(read))).is_err() {
            tracing::warn!(store = %self.id, "get_state dropped: resolver has shut down");
        }
    }

    /// Awaitable form of [`get_state`](Self::get_state).
    pub async fn state(&self) -> Result<S, StoreError> {
        let (respond_to, receiver) = oneshot::channel();
        self.get_state(move |state| {
            if respond_to.send(state.clone()).is_err() {
                tracing::trace!("state read dropped (receiver gone)");
            }
        });
        receiver.await.map_err(|_| StoreError::Closed)
    }

    /// Subscribes to the snapshot stream. The receiver starts at the latest
    /// snapshot, marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.channel.subscribe()
    }

    pub fn is_closed(&self) -> bool {
        self.inbox.is_closed()
    }
}

/// Owns the canonical state and resolves queued mutations against it.
pub struct StoreResolver<S: State> {
    id: Uuid,
    inbox: mpsc::UnboundedReceiver<Mutation<S>>,
    queue: MutationQueue<S>,
    state: S,
    channel: Arc<SnapshotChannel<S>>,
}

impl<S: State> StoreResolver<S> {
    /// Runs until every [`StateStore`] handle has been dropped.
    pub async fn run(mut self) {
        tracing::debug!(store = %self.id, "resolver started");
        while let Some(mutation) = self.inbox.recv().await {
            self.accept(mutation);
            self.resolve();
        }
        tracing::debug!(store = %self.id, "resolver stopped");
    }

    fn accept(&mut self, mutation: Mutation<S>) {
        match mutation {
            Mutation::Read(read) => self.queue.enqueue_read(read),
            Mutation::Write(write) => self.queue.enqueue_write(write),
        }
    }

    /// Moves everything already sent into the queue without waiting.
    fn pull_pending(&mut self) {
        while let Ok(mutation) = self.inbox.try_recv() {
            self.accept(mutation);
        }
    }

    fn resolve(&mut self) {
        loop {
            self.pull_pending();
            self.resolve_writes();
            let Some(read) = self.queue.drain_one_read() else {
                break;
            };
            tracing::trace!(store = %self.id, pending = self.queue.pending_reads(), "serving read");
            read(&self.state);
        }
    }

    fn resolve_writes(&mut self) {
        let writes = self.queue.drain_writes();
        if writes.is_empty() {
            return;
        }

        let count = writes.len();
        let mut next = self.state.clone();
        for write in writes {
            write(&mut next);
        }

        if next == self.state {
            tracing::trace!(store = %self.id, writes = count, "writes produced an equal state");
            return;
        }

        self.state = next;
        self.channel.publish(self.state.clone());
        tracing::debug!(store = %self.id, writes = count, "published snapshot");
    }
}
