mod remove_reminder;
mod save_reminder;
mod sync_reminders;
mod update_reminder;

use crate::{error::ListError, reminder_detail::ReminderDetailEditDataSource};
use crate::{reminder_detail::ReminderDetailViewDataSource, shared::usecase::execute};
use itertools::Itertools;
use remove_reminder::RemoveReminderUseCase;
use save_reminder::SaveReminderUseCase;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, Weak,
};
use sync_reminders::SyncRemindersUseCase;
use update_reminder::UpdateReminderUseCase;
use today_domain::{FilterPolicy, Reminder, ID};
use today_infra::{EventBus, StoreChanged, SubscriptionHandle, TodayContext};
use tokio::{sync::mpsc::UnboundedReceiver, task::JoinHandle};
use tracing::{debug, info};

/// Notifications the reminder list sends to whoever renders it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    /// The completion state of the reminder at this filtered row changed
    RowCompleted(usize),
    /// The reminder shown at this filtered row was deleted
    RowDeleted(usize),
    /// The whole collection was replaced by a fresh copy of the store
    CollectionReloaded,
}

struct ListState {
    /// Newest first. Never exposed directly, only through the filtered view
    reminders: Vec<Reminder>,
    filter: FilterPolicy,
    /// Bumped on every wholesale reload
    generation: u64,
    /// Ticket of the newest sync that was applied
    applied_sync: u64,
}

struct PinnedRow {
    index: usize,
    reminder: Reminder,
    generation: u64,
}

impl ListState {
    fn position_of(&self, id: &ID) -> Option<usize> {
        self.reminders.iter().position(|r| r.id == *id)
    }
}

struct Inner {
    ctx: TodayContext,
    state: Mutex<ListState>,
    events: EventBus<ListEvent>,
    sync_tickets: AtomicU64,
    store_subscription: Mutex<Option<(SubscriptionHandle, JoinHandle<()>)>>,
}

impl Inner {
    fn filtered(&self, state: &ListState) -> Vec<Reminder> {
        let now = self.ctx.sys.now();
        let locale = &self.ctx.config.locale;
        state
            .reminders
            .iter()
            .filter(|r| state.filter.should_include(r, &now, locale))
            .cloned()
            .sorted_by_key(|r| r.due_date)
            .collect()
    }

    fn filtered_row_of(&self, state: &ListState, id: &ID) -> Option<usize> {
        self.filtered(state).iter().position(|r| r.id == *id)
    }

    fn detach_from_store(&self) {
        if let Some((handle, listener)) = self.store_subscription.lock().unwrap().take() {
            self.ctx.store.unsubscribe_changes(handle);
            listener.abort();
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.detach_from_store();
    }
}

/// The local, filtered and ordered mirror of the reminders held by the
/// external store.
///
/// Two coordinate spaces are involved: rows of the filtered view, which is
/// what the user sees, and positions in the underlying collection. Rows are
/// only meaningful for the duration of one intent, so every intent pins
/// the id of the reminder behind the row before it talks to the store and
/// resolves the position again by that id when writing back.
///
/// Cloning is cheap and every clone operates on the same list.
#[derive(Clone)]
pub struct ReminderListDataSource {
    inner: Arc<Inner>,
}

impl ReminderListDataSource {
    /// Creates an empty list that reloads whenever the store signals a
    /// change. Has to be called from within a tokio runtime.
    pub fn new(ctx: TodayContext) -> Self {
        let (handle, changes) = ctx.store.subscribe_changes();
        let inner = Arc::new(Inner {
            ctx,
            state: Mutex::new(ListState {
                reminders: Vec::new(),
                filter: FilterPolicy::default(),
                generation: 0,
                applied_sync: 0,
            }),
            events: EventBus::new(),
            sync_tickets: AtomicU64::new(0),
            store_subscription: Mutex::new(None),
        });
        let listener = tokio::spawn(listen_for_changes(Arc::downgrade(&inner), changes));
        *inner.store_subscription.lock().unwrap() = Some((handle, listener));
        Self { inner }
    }

    /// `new` followed by the initial sync
    pub async fn start(ctx: TodayContext) -> Self {
        let list = Self::new(ctx);
        list.sync().await;
        list
    }

    pub fn subscribe(&self) -> (SubscriptionHandle, UnboundedReceiver<ListEvent>) {
        self.inner.events.subscribe()
    }

    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        self.inner.events.unsubscribe(handle)
    }

    /// Stops following store changes. Dropping the last clone does the same.
    pub fn close(&self) {
        self.inner.detach_from_store();
    }

    pub fn filter(&self) -> FilterPolicy {
        self.inner.state.lock().unwrap().filter
    }

    /// Does not notify anyone, the caller is expected to re-render
    pub fn set_filter(&self, filter: FilterPolicy) {
        self.inner.state.lock().unwrap().filter = filter;
    }

    /// The reminders the current filter lets through, ordered by due date.
    /// Derived again on every call.
    pub fn filtered_reminders(&self) -> Vec<Reminder> {
        let state = self.inner.state.lock().unwrap();
        self.inner.filtered(&state)
    }

    /// The whole underlying collection
    pub fn all_reminders(&self) -> Vec<Reminder> {
        self.inner.state.lock().unwrap().reminders.clone()
    }

    pub fn count(&self) -> usize {
        self.filtered_reminders().len()
    }

    /// Share of completed reminders in the filtered view. An empty view
    /// counts as fully complete.
    pub fn percent_complete(&self) -> f64 {
        let filtered = self.filtered_reminders();
        if filtered.is_empty() {
            return 1.0;
        }
        let completed = filtered.iter().filter(|r| r.is_complete).count();
        completed as f64 / filtered.len() as f64
    }

    pub fn reminder_at(&self, row: usize) -> Option<Reminder> {
        self.filtered_reminders().get(row).cloned()
    }

    /// Due date text of the reminder at `row`, as the current filter renders it
    pub fn display_text(&self, row: usize) -> Option<String> {
        let state = self.inner.state.lock().unwrap();
        let reminder = self.inner.filtered(&state).get(row).cloned()?;
        let now = self.inner.ctx.sys.now();
        Some(
            state
                .filter
                .display_text(&reminder, &now, &self.inner.ctx.config.locale),
        )
    }

    /// Position in the underlying collection of the reminder at
    /// `filtered_index`.
    ///
    /// # Panics
    ///
    /// If `filtered_index` is outside the filtered view, or if the row does
    /// not resolve to a reminder of the collection. The filtered view is
    /// derived from the collection, so the latter means the two went out of
    /// sync.
    pub fn index_for(&self, filtered_index: usize) -> usize {
        match self.pin_row(filtered_index) {
            Some(pinned) => pinned.index,
            None => panic!(
                "Filtered row {} is out of bounds for a view of {} reminders",
                filtered_index,
                self.count()
            ),
        }
    }

    /// Resolves `row` against the current filtered view. `None` if the row
    /// is out of range.
    ///
    /// Panics on a row missing from the collection, only after the state
    /// lock is released so the mutex is never poisoned.
    fn pin_row(&self, row: usize) -> Option<PinnedRow> {
        let resolved = {
            let state = self.inner.state.lock().unwrap();
            let current = self.inner.filtered(&state).get(row).cloned()?;
            match state.position_of(&current.id) {
                Some(index) => Ok(PinnedRow {
                    index,
                    reminder: state.reminders[index].clone(),
                    generation: state.generation,
                }),
                None => Err(current.id),
            }
        };
        match resolved {
            Ok(pinned) => Some(pinned),
            Err(id) => panic!(
                "Reminder {} at filtered row {} is missing from the collection",
                id, row
            ),
        }
    }

    pub fn detail(&self, row: usize) -> Option<ReminderDetailViewDataSource> {
        let reminder = self.reminder_at(row)?;
        Some(ReminderDetailViewDataSource::new(
            reminder,
            self.inner.ctx.config.locale,
        ))
    }

    pub fn editor(&self, row: usize) -> Option<ReminderDetailEditDataSource> {
        let reminder = self.reminder_at(row)?;
        Some(ReminderDetailEditDataSource::new(
            reminder,
            self.inner.ctx.config.locale,
        ))
    }

    /// Editor for a reminder that is not in the list yet
    pub fn new_reminder_editor(&self) -> ReminderDetailEditDataSource {
        ReminderDetailEditDataSource::new_reminder(
            self.inner.ctx.sys.now(),
            self.inner.ctx.config.locale,
        )
    }

    /// Replaces the reminder at `row` with `reminder`. The id is taken from
    /// the reminder currently at `row`, not from the argument.
    pub async fn update(&self, reminder: Reminder, row: usize) -> Result<(), ListError> {
        self.update_row(row, move |_| reminder).await.map(|_| ())
    }

    pub async fn toggle_complete(&self, row: usize) -> Result<(), ListError> {
        let (id, written) = self
            .update_row(row, |mut reminder| {
                reminder.toggle_complete();
                reminder
            })
            .await?;
        if written {
            let state = self.inner.state.lock().unwrap();
            let current_row = self.inner.filtered_row_of(&state, &id);
            drop(state);
            if let Some(current_row) = current_row {
                self.inner.events.publish(ListEvent::RowCompleted(current_row));
            }
        }
        Ok(())
    }

    /// Writes the changed reminder to the store and, if that worked, writes it
    /// back locally. Returns the pinned id and whether the local write happened.
    async fn update_row<F>(&self, row: usize, change: F) -> Result<(ID, bool), ListError>
    where
        F: FnOnce(Reminder) -> Reminder + Send,
    {
        let pinned = self.pin_row(row).ok_or(ListError::RowOutOfRange(row))?;
        let generation = pinned.generation;
        let id = pinned.reminder.id.clone();
        let reminder = change(pinned.reminder).with_id(id.clone());

        // Never creates: a reminder deleted meanwhile must stay deleted
        execute(
            UpdateReminderUseCase {
                reminder: reminder.clone(),
            },
            &self.inner.ctx,
        )
        .await
        .map_err(|_| ListError::StoreFailure)?;

        let mut state = self.inner.state.lock().unwrap();
        if state.generation != generation {
            // The reload is authoritative. The store signals our own commit
            // as well, so the next reload brings the new value.
            debug!(
                "Collection was reloaded while updating reminder {}, skipping local write",
                id
            );
            return Ok((id, false));
        }
        match state.position_of(&id) {
            Some(index) => {
                state.reminders[index] = reminder;
                Ok((id, true))
            }
            None => {
                debug!("Reminder {} was removed while it was being updated", id);
                Ok((id, false))
            }
        }
    }

    pub async fn delete(&self, row: usize) -> Result<(), ListError> {
        let reminder = self.reminder_at(row).ok_or(ListError::RowOutOfRange(row))?;

        execute(
            RemoveReminderUseCase {
                reminder_id: reminder.id.clone(),
            },
            &self.inner.ctx,
        )
        .await
        .map_err(|_| ListError::StoreFailure)?;

        let deleted_row = {
            let mut state = self.inner.state.lock().unwrap();
            let deleted_row = self.inner.filtered_row_of(&state, &reminder.id);
            if let Some(index) = state.position_of(&reminder.id) {
                state.reminders.remove(index);
            }
            deleted_row
        };
        if let Some(deleted_row) = deleted_row {
            self.inner.events.publish(ListEvent::RowDeleted(deleted_row));
        }
        Ok(())
    }

    /// Saves a new reminder and puts it at the front of the collection.
    /// Returns its row in the filtered view, `None` if the current filter
    /// hides it.
    pub async fn add(&self, reminder: Reminder) -> Result<Option<usize>, ListError> {
        let id = execute(
            SaveReminderUseCase {
                reminder: reminder.clone(),
            },
            &self.inner.ctx,
        )
        .await
        .map_err(|_| ListError::StoreFailure)?;

        let confirmed = reminder.with_id(id.clone());
        let mut state = self.inner.state.lock().unwrap();
        match state.position_of(&id) {
            // A reload triggered by the save already brought it in
            Some(index) => state.reminders[index] = confirmed,
            None => state.reminders.insert(0, confirmed),
        }
        Ok(self.inner.filtered_row_of(&state, &id))
    }

    /// Requests access and replaces the collection with what the store holds.
    /// Returns false if access was denied or a newer sync got there first,
    /// the collection is untouched in both cases.
    pub async fn sync(&self) -> bool {
        let ticket = self.inner.sync_tickets.fetch_add(1, Ordering::SeqCst) + 1;
        let reminders = match execute(SyncRemindersUseCase, &self.inner.ctx).await {
            Ok(reminders) => reminders,
            Err(_) => return false,
        };

        {
            let mut state = self.inner.state.lock().unwrap();
            if ticket < state.applied_sync {
                debug!("Discarding fetch {} superseded by {}", ticket, state.applied_sync);
                return false;
            }
            state.applied_sync = ticket;
            state.generation += 1;
            state.reminders = reminders
                .into_iter()
                .unique_by(|r| r.id.clone())
                .collect();
            info!("Reloaded {} reminders", state.reminders.len());
        }
        self.inner.events.publish(ListEvent::CollectionReloaded);
        true
    }
}

async fn listen_for_changes(list: Weak<Inner>, mut changes: UnboundedReceiver<StoreChanged>) {
    while changes.recv().await.is_some() {
        // One fetch covers a burst of signals
        while changes.try_recv().is_ok() {}
        let inner = match list.upgrade() {
            Some(inner) => inner,
            None => break,
        };
        ReminderListDataSource { inner }.sync().await;
    }
}
