use super::{AuthorizationStatus, INativeReminderStore, NativeStoreError, StoreRecord};
use crate::events::EventBus;
use crate::store::shared::inmemory_repo::*;
use crate::store::StoreChanged;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};
use today_domain::ID;
use tracing::debug;

/// A device reminder store kept in memory.
///
/// Besides serving this process it can be mutated "from another process"
/// through `commit_external` and `remove_external`, which fire the change
/// signal just like local commits do.
///
/// Records are kept newest first. Only records handed out by `new_record`
/// may be added by `commit`, any other unknown identifier is a record that
/// was deleted and is refused.
pub struct InMemoryNativeStore {
    records: Mutex<Vec<StoreRecord>>,
    /// Identifiers handed out by `new_record` and not committed yet
    drafts: Mutex<Vec<ID>>,
    authorization: Mutex<AuthorizationStatus>,
    prompt_answer: bool,
    prompts: AtomicUsize,
    fail_writes: AtomicBool,
    changes: EventBus<StoreChanged>,
}

impl InMemoryNativeStore {
    pub fn new(authorization: AuthorizationStatus, prompt_answer: bool) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            drafts: Mutex::new(Vec::new()),
            authorization: Mutex::new(authorization),
            prompt_answer,
            prompts: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
            changes: EventBus::new(),
        }
    }

    /// A store the user already granted access to
    pub fn authorized() -> Self {
        Self::new(AuthorizationStatus::Authorized, true)
    }

    pub fn set_authorization_status(&self, status: AuthorizationStatus) {
        *self.authorization.lock().unwrap() = status;
    }

    /// Makes every following commit and remove fail until reset
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// How many times the user has been prompted for access
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<StoreRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Writes a record as another app on the device would
    pub fn commit_external(&self, record: StoreRecord) -> ID {
        let id = record.identifier.clone();
        upsert(&record, &self.records);
        self.changes.publish(StoreChanged);
        id
    }

    /// Deletes a record as another app on the device would
    pub fn remove_external(&self, identifier: &ID) -> bool {
        let removed = delete(identifier, &self.records).is_some();
        if removed {
            self.changes.publish(StoreChanged);
        }
        removed
    }

    fn take_draft(&self, identifier: &ID) -> bool {
        let mut drafts = self.drafts.lock().unwrap();
        match drafts.iter().position(|d| d == identifier) {
            Some(i) => {
                drafts.remove(i);
                true
            }
            None => false,
        }
    }

    fn ensure_authorized(&self) -> Result<(), NativeStoreError> {
        match *self.authorization.lock().unwrap() {
            AuthorizationStatus::Authorized => Ok(()),
            _ => Err(NativeStoreError::Unauthorized),
        }
    }

    fn ensure_writable(&self) -> Result<(), NativeStoreError> {
        self.ensure_authorized()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(NativeStoreError::WriteFailure(
                "the store is refusing writes".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl INativeReminderStore for InMemoryNativeStore {
    fn authorization_status(&self) -> AuthorizationStatus {
        *self.authorization.lock().unwrap()
    }

    async fn request_authorization(&self) -> Result<bool, NativeStoreError> {
        let status = self.authorization_status();
        if status.is_decided() {
            return Ok(status == AuthorizationStatus::Authorized);
        }

        // The prompt is answered asynchronously
        tokio::task::yield_now().await;
        self.prompts.fetch_add(1, Ordering::SeqCst);
        let decided = if self.prompt_answer {
            AuthorizationStatus::Authorized
        } else {
            AuthorizationStatus::Denied
        };
        debug!("User answered the access prompt with: {:?}", decided);
        self.set_authorization_status(decided);
        Ok(self.prompt_answer)
    }

    async fn records(&self) -> Result<Vec<StoreRecord>, NativeStoreError> {
        self.ensure_authorized()?;
        Ok(find_by(&self.records, |_| true))
    }

    async fn find(&self, identifier: &ID) -> Result<StoreRecord, NativeStoreError> {
        self.ensure_authorized()?;
        find(identifier, &self.records).ok_or_else(|| NativeStoreError::NotFound(identifier.clone()))
    }

    fn new_record(&self) -> StoreRecord {
        let record = StoreRecord::new(ID::new());
        self.drafts
            .lock()
            .unwrap()
            .push(record.identifier.clone());
        record
    }

    async fn commit(&self, record: StoreRecord) -> Result<ID, NativeStoreError> {
        self.ensure_writable()?;
        let id = record.identifier.clone();
        if !replace(&record, &self.records) {
            if !self.take_draft(&id) {
                return Err(NativeStoreError::NotFound(id));
            }
            upsert(&record, &self.records);
        }
        self.changes.publish(StoreChanged);
        Ok(id)
    }

    async fn remove(&self, identifier: &ID) -> Result<(), NativeStoreError> {
        self.ensure_writable()?;
        match delete(identifier, &self.records) {
            Some(_) => {
                self.changes.publish(StoreChanged);
                Ok(())
            }
            None => Err(NativeStoreError::NotFound(identifier.clone())),
        }
    }

    fn changes(&self) -> &EventBus<StoreChanged> {
        &self.changes
    }
}
