use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use today_domain::{Reminder, ID};
use today_infra::{IReminderStore, StoreChanged, SubscriptionHandle};
use tokio::sync::{mpsc::UnboundedReceiver, Notify};

/// Wraps a store and can hold a save or update open before it reaches the
/// wrapped store, so tests decide what happens while it is in flight.
pub struct GatedStore {
    inner: Arc<dyn IReminderStore>,
    armed: AtomicBool,
    pending: Notify,
    release: Notify,
}

impl GatedStore {
    pub fn new(inner: Arc<dyn IReminderStore>) -> Self {
        Self {
            inner,
            armed: AtomicBool::new(false),
            pending: Notify::new(),
            release: Notify::new(),
        }
    }

    /// The next save or update waits for `release` before it commits
    pub fn hold_next_write(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    pub async fn wait_until_write_pending(&self) {
        self.pending.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn pass_gate(&self) {
        if self.armed.swap(false, Ordering::SeqCst) {
            self.pending.notify_one();
            self.release.notified().await;
        }
    }
}

#[async_trait::async_trait]
impl IReminderStore for GatedStore {
    async fn fetch_all(&self) -> Vec<Reminder> {
        self.inner.fetch_all().await
    }

    async fn save(&self, reminder: &Reminder) -> Option<ID> {
        self.pass_gate().await;
        self.inner.save(reminder).await
    }

    async fn update(&self, reminder: &Reminder) -> bool {
        self.pass_gate().await;
        self.inner.update(reminder).await
    }

    async fn remove(&self, reminder_id: &ID) -> bool {
        self.inner.remove(reminder_id).await
    }

    fn subscribe_changes(&self) -> (SubscriptionHandle, UnboundedReceiver<StoreChanged>) {
        self.inner.subscribe_changes()
    }

    fn unsubscribe_changes(&self, handle: SubscriptionHandle) -> bool {
        self.inner.unsubscribe_changes(handle)
    }
}
