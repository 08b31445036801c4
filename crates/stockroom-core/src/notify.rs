//! Change notifications.
//!
//! The provider publishes a [`ChangeEvent`] after every successful write.
//! Observers register a URI and receive events on a channel. An event for a
//! write at `W` reaches an observer at `O` when `W == O`, when `O` is a prefix
//! of `W` (a collection observer sees item writes) or when `W` is a prefix of
//! `O` (an item observer sees collection writes). Each observer gets at most
//! one event per write.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};

/// Kind of write that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// Rows reachable under `uri` may have changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub uri: String,
    pub kind: ChangeKind,
}

#[derive(Debug)]
struct Observer {
    id: u64,
    segments: Vec<String>,
    sender: Sender<ChangeEvent>,
}

type Registry = Mutex<Vec<Observer>>;

fn lock_registry(registry: &Registry) -> MutexGuard<'_, Vec<Observer>> {
    registry
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Registry of observers keyed by URI.
#[derive(Default)]
pub struct ChangeNotifier {
    observers: Arc<Registry>,
    next_id: AtomicU64,
}

/// Path segments of `uri`, ignoring any query or fragment.
fn segments(uri: &str) -> Vec<String> {
    let path = uri.split(['?', '#']).next().unwrap_or_default();
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_prefix(prefix: &[String], path: &[String]) -> bool {
    prefix.len() <= path.len() && prefix.iter().zip(path).all(|(a, b)| a == b)
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Observer>> {
        lock_registry(&self.observers)
    }

    /// Register an observer for `uri`.
    pub fn subscribe(&self, uri: &str) -> Subscription {
        let (sender, receiver) = unbounded();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock().push(Observer {
            id,
            segments: segments(uri),
            sender,
        });
        Subscription {
            id,
            uri: uri.to_string(),
            receiver,
            registry: Arc::downgrade(&self.observers),
        }
    }

    /// Remove an observer. Dropping the [`Subscription`] has the same effect.
    pub fn unsubscribe(&self, subscription: &Subscription) {
        self.lock().retain(|observer| observer.id != subscription.id);
    }

    /// Number of live observers.
    pub fn observer_count(&self) -> usize {
        self.lock().len()
    }

    /// Publish a change at `uri`. Returns how many observers were reached.
    ///
    /// Must only be called once the write is durable.
    pub fn notify(&self, uri: &str, kind: ChangeKind) -> usize {
        let target = segments(uri);
        let mut observers = self.lock();
        let mut delivered = 0;
        observers.retain(|observer| {
            let related = is_prefix(&observer.segments, &target)
                || is_prefix(&target, &observer.segments);
            if !related {
                return true;
            }
            let event = ChangeEvent {
                uri: uri.to_string(),
                kind,
            };
            match observer.sender.send(event) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => {
                    tracing::debug!(observer = observer.id, "pruning disconnected observer");
                    false
                }
            }
        });
        tracing::debug!(%uri, ?kind, delivered, "change published");
        delivered
    }
}

/// Receiving end of an observer registration.
///
/// Dropping it removes the observer from its notifier.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    uri: String,
    receiver: Receiver<ChangeEvent>,
    registry: Weak<Registry>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            lock_registry(&registry).retain(|observer| observer.id != self.id);
        }
    }
}

impl Subscription {
    /// URI this subscription watches.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn receiver(&self) -> &Receiver<ChangeEvent> {
        &self.receiver
    }

    /// Next pending event, if any.
    pub fn try_next(&self) -> Option<ChangeEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next event.
    pub fn next_timeout(&self, timeout: Duration) -> Option<ChangeEvent> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// All pending events.
    pub fn drain(&self) -> Vec<ChangeEvent> {
        self.receiver.try_iter().collect()
    }
}
