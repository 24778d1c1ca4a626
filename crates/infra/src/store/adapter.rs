use super::{
    native::{Alarm, INativeReminderStore, NativeStoreError, StoreRecord},
    IReminderStore, StoreChanged,
};
use crate::events::SubscriptionHandle;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use today_domain::{Reminder, ID};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

/// Translates between `Reminder`s and the records of the native store.
pub struct NativeReminderStoreAdapter {
    store: Arc<dyn INativeReminderStore>,
}

impl NativeReminderStoreAdapter {
    pub fn new(store: Arc<dyn INativeReminderStore>) -> Self {
        Self { store }
    }

    async fn try_save(&self, reminder: &Reminder) -> Result<ID, NativeStoreError> {
        let mut record = match self.store.find(&reminder.id).await {
            Ok(record) => record,
            Err(NativeStoreError::NotFound(_)) => self.store.new_record(),
            Err(e) => return Err(e),
        };
        apply_reminder(&mut record, reminder);
        self.store.commit(record).await
    }

    async fn try_update(&self, reminder: &Reminder) -> Result<ID, NativeStoreError> {
        let mut record = self.store.find(&reminder.id).await?;
        apply_reminder(&mut record, reminder);
        self.store.commit(record).await
    }
}

/// `None` for records without an absolute alarm, they can not be shown
pub fn to_reminder(record: &StoreRecord) -> Option<Reminder> {
    let due_date = record.first_absolute_date()?;
    Some(Reminder {
        id: record.identifier.clone(),
        title: record.title.clone(),
        due_date,
        notes: record.notes.clone(),
        is_complete: record.is_completed,
    })
}

fn apply_reminder(record: &mut StoreRecord, reminder: &Reminder) {
    record.title = reminder.title.clone();
    record.notes = reminder.notes.clone();
    record.is_completed = reminder.is_complete;
    reconcile_due_date(record, &reminder.due_date);
}

/// Drops absolute alarms that are not at the due date and makes sure one
/// absolute alarm is left. Relative alarms are not ours to touch.
fn reconcile_due_date(record: &mut StoreRecord, due_date: &DateTime<Utc>) {
    record.alarms.retain(|alarm| match alarm.absolute_date() {
        Some(date) => same_minute(date, due_date),
        None => true,
    });
    if !record.has_absolute_alarm() {
        record.alarms.push(Alarm::Absolute(*due_date));
    }
}

fn same_minute(a: &DateTime<Utc>, b: &DateTime<Utc>) -> bool {
    a.timestamp().div_euclid(60) == b.timestamp().div_euclid(60)
}

#[async_trait::async_trait]
impl IReminderStore for NativeReminderStoreAdapter {
    async fn fetch_all(&self) -> Vec<Reminder> {
        match self.store.records().await {
            Ok(records) => {
                let reminders = records.iter().filter_map(to_reminder).collect::<Vec<_>>();
                debug!(
                    "Fetched {} reminders out of {} records",
                    reminders.len(),
                    records.len()
                );
                reminders
            }
            Err(e) => {
                warn!("Unable to fetch reminders. Err: {:?}", e);
                Vec::new()
            }
        }
    }

    async fn save(&self, reminder: &Reminder) -> Option<ID> {
        match self.try_save(reminder).await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Unable to save reminder: {}. Err: {:?}", reminder.id, e);
                None
            }
        }
    }

    async fn update(&self, reminder: &Reminder) -> bool {
        match self.try_update(reminder).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Unable to update reminder: {}. Err: {:?}", reminder.id, e);
                false
            }
        }
    }

    async fn remove(&self, reminder_id: &ID) -> bool {
        match self.store.remove(reminder_id).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Unable to remove reminder: {}. Err: {:?}", reminder_id, e);
                false
            }
        }
    }

    fn subscribe_changes(&self) -> (SubscriptionHandle, UnboundedReceiver<StoreChanged>) {
        self.store.changes().subscribe()
    }

    fn unsubscribe_changes(&self, handle: SubscriptionHandle) -> bool {
        self.store.changes().unsubscribe(handle)
    }
}
