use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex,
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Identifies one subscription of an `EventBus`. Pass it back to
/// `EventBus::unsubscribe` to stop receiving events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

/// Fan out of events to any number of subscribers.
///
/// Every subscriber gets its own unbounded channel so a slow consumer never
/// blocks the publisher. Subscribers that dropped their receiver are pruned
/// on the next publish.
pub struct EventBus<E> {
    next_handle: AtomicU64,
    subscribers: Mutex<Vec<(SubscriptionHandle, UnboundedSender<E>)>>,
}

impl<E: Clone + Send + 'static> EventBus<E> {
    pub fn new() -> Self {
        Self {
            next_handle: AtomicU64::new(1),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> (SubscriptionHandle, UnboundedReceiver<E>) {
        let handle = SubscriptionHandle(self.next_handle.fetch_add(1, Ordering::SeqCst));
        let (tx, rx) = unbounded_channel();
        self.subscribers.lock().unwrap().push((handle, tx));
        (handle, rx)
    }

    /// Returns false if the handle was not subscribed
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mut subscribers = self.subscribers.lock().unwrap();
        let before = subscribers.len();
        subscribers.retain(|(h, _)| *h != handle);
        subscribers.len() != before
    }

    /// Delivers `event` to every live subscriber and returns how many got it
    pub fn publish(&self, event: E) -> usize {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|(_, tx)| tx.send(event.clone()).is_ok());
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap().len()
    }
}

impl<E: Clone + Send + 'static> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}
