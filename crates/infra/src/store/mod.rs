mod access;
mod adapter;
pub mod native;
mod shared;

use crate::events::SubscriptionHandle;
pub use access::ReminderAccessGate;
pub use adapter::NativeReminderStoreAdapter;
use today_domain::{Reminder, ID};
use tokio::sync::mpsc::UnboundedReceiver;

/// Fired whenever the external store committed a change. It carries no
/// diff: whoever cares has to fetch again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChanged;

/// The external, authoritative reminder store as seen by the rest of the app.
///
/// None of the operations fail loudly. Whatever went wrong (missing access,
/// unknown record, rejected write) collapses to an empty list, `None` or
/// `false`.
#[async_trait::async_trait]
pub trait IReminderStore: Send + Sync {
    /// Every reminder with a resolvable due date
    async fn fetch_all(&self) -> Vec<Reminder>;
    /// Updates the record with the id of `reminder`, or creates one.
    /// Returns the id the store confirmed.
    async fn save(&self, reminder: &Reminder) -> Option<ID>;
    /// Updates the record with the id of `reminder`. Never creates one, a
    /// record that is gone stays gone.
    async fn update(&self, reminder: &Reminder) -> bool;
    async fn remove(&self, reminder_id: &ID) -> bool;
    fn subscribe_changes(&self) -> (SubscriptionHandle, UnboundedReceiver<StoreChanged>);
    fn unsubscribe_changes(&self, handle: SubscriptionHandle) -> bool;
}

#[async_trait::async_trait]
pub trait IAccessGate: Send + Sync {
    /// Resolves with whether the app may use the reminder store. Never fails,
    /// a denial is just `false`.
    async fn request_access(&self) -> bool;
}
