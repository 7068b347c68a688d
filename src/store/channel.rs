//! Replay-latest, deduplicated publication of state snapshots.

use tokio::sync::watch;

/// Publish-subscribe channel owned by one store.
///
/// New subscribers immediately see the latest snapshot. Publishing a value
/// equal to the current one is a no-op, so consecutive snapshots always
/// differ.
pub struct SnapshotChannel<S> {
    sender: watch::Sender<S>,
}

impl<S: Clone + PartialEq> SnapshotChannel<S> {
    pub fn new(initial: S) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Returns true when the value was new and subscribers were notified.
    pub fn publish(&self, next: S) -> bool {
        self.sender.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        })
    }

    pub fn current(&self) -> S {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_are_not_republished() {
        let channel = SnapshotChannel::new(1u32);
        let mut rx = channel.subscribe();

        assert!(!channel.publish(1));
        assert!(!rx.has_changed().unwrap());

        assert!(channel.publish(2));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 2);
    }

    #[test]
    fn late_subscribers_see_latest() {
        let channel = SnapshotChannel::new("a".to_string());
        channel.publish("b".to_string());
        let rx = channel.subscribe();
        assert_eq!(*rx.borrow(), "b");
        assert_eq!(channel.current(), "b");
        assert_eq!(channel.subscriber_count(), 1);
    }
}
