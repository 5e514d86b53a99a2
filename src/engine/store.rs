//! Observable value containers.
//!
//! - `StateStore`: holds the latest value and replays it to new subscribers
//! - `Signal`: fan-out without a stored value
//!
//! Delivery is synchronous and ordered: `replace`/`emit` push the value into
//! every live subscriber's unbounded channel before returning.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

/// Identifies one subscription. Unique for the life of the process.
pub type SubscriptionId = u64;

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

// ============================================================================
// Subscription
// ============================================================================

/// Receiving end of a subscription.
///
/// Dropping it is enough to stop delivery; the sender side is pruned on the
/// next emission.
#[derive(Debug)]
pub struct Subscription<T> {
    id: SubscriptionId,
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> Subscription<T> {
    /// Returns the id to pass to `unsubscribe`.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Waits for the next value. Returns `None` once unsubscribed.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Returns the next value if one is already queued.
    pub fn try_recv(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Drains every queued value.
    pub fn drain(&mut self) -> Vec<T> {
        let mut values = Vec::new();
        while let Ok(value) = self.rx.try_recv() {
            values.push(value);
        }
        values
    }
}

// ============================================================================
// Subscribers
// ============================================================================

#[derive(Debug)]
struct Subscribers<T> {
    senders: Vec<(SubscriptionId, mpsc::UnboundedSender<T>)>,
}

impl<T: Clone> Subscribers<T> {
    fn new() -> Self {
        Self {
            senders: Vec::new(),
        }
    }

    fn add(&mut self) -> (mpsc::UnboundedSender<T>, Subscription<T>) {
        let id = NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.push((id, tx.clone()));
        (tx, Subscription { id, rx })
    }

    fn notify(&mut self, value: &T) {
        // Closed receivers are dropped here
        self.senders.retain(|(_, tx)| tx.send(value.clone()).is_ok());
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.senders.len();
        self.senders.retain(|(existing, _)| *existing != id);
        self.senders.len() != before
    }

    fn len(&self) -> usize {
        self.senders.len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// StateStore
// ============================================================================

#[derive(Debug)]
struct StoreInner<T> {
    value: T,
    subscribers: Subscribers<T>,
}

/// Holds the latest value of `T` and notifies subscribers on every replace.
#[derive(Debug)]
pub struct StateStore<T> {
    inner: Mutex<StoreInner<T>>,
}

impl<T: Clone> StateStore<T> {
    /// Creates a store holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                value: initial,
                subscribers: Subscribers::new(),
            }),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        lock(&self.inner).value.clone()
    }

    /// Replaces the current value and notifies every subscriber.
    pub fn replace(&self, value: T) {
        let mut inner = lock(&self.inner);
        inner.subscribers.notify(&value);
        inner.value = value;
    }

    /// Subscribes to the store.
    ///
    /// The returned subscription already holds the current value, followed by
    /// every value passed to `replace` afterwards.
    pub fn subscribe(&self) -> Subscription<T> {
        let mut inner = lock(&self.inner);
        let (tx, subscription) = inner.subscribers.add();
        // The receiver is alive, so this cannot fail
        let _ = tx.send(inner.value.clone());
        subscription
    }

    /// Removes a subscription. Returns false if the id was unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        lock(&self.inner).subscribers.remove(id)
    }

    /// Returns the number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).subscribers.len()
    }
}

// ============================================================================
// Signal
// ============================================================================

/// Broadcasts values to current subscribers only.
#[derive(Debug)]
pub struct Signal<T> {
    subscribers: Mutex<Subscribers<T>>,
}

impl<T: Clone> Signal<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Subscribers::new()),
        }
    }

    /// Delivers `value` to every subscriber.
    pub fn emit(&self, value: T) {
        lock(&self.subscribers).notify(&value);
    }

    /// Subscribes to values emitted from now on.
    pub fn subscribe(&self) -> Subscription<T> {
        lock(&self.subscribers).add().1
    }

    /// Removes a subscription. Returns false if the id was unknown.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        lock(&self.subscribers).remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.subscribers).len()
    }
}

impl<T: Clone> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
