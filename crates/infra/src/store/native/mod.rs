mod inmemory;

use crate::events::EventBus;
use chrono::{DateTime, Utc};
pub use inmemory::InMemoryNativeStore;
use thiserror::Error;
use today_domain::{Entity, ID};

use super::StoreChanged;

/// Whether the user allowed this app to read and write their reminders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet
    NotDetermined,
    /// Access is blocked by device policy and can not be requested
    Restricted,
    Denied,
    Authorized,
}

impl AuthorizationStatus {
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::NotDetermined)
    }
}

/// A trigger attached to a record. Absolute alarms are what the due date of
/// a `Reminder` is stored as.
#[derive(Debug, Clone, PartialEq)]
pub enum Alarm {
    Absolute(DateTime<Utc>),
    /// Seconds relative to the start of the record
    Relative(i64),
}

impl Alarm {
    pub fn absolute_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Absolute(date) => Some(date),
            Self::Relative(_) => None,
        }
    }
}

/// The native record type of the device reminder store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRecord {
    pub identifier: ID,
    pub title: String,
    pub notes: Option<String>,
    pub is_completed: bool,
    pub alarms: Vec<Alarm>,
}

impl StoreRecord {
    pub fn new(identifier: ID) -> Self {
        Self {
            identifier,
            title: String::new(),
            notes: None,
            is_completed: false,
            alarms: Vec::new(),
        }
    }

    /// Date of the first alarm with an absolute date, if any
    pub fn first_absolute_date(&self) -> Option<DateTime<Utc>> {
        self.alarms
            .iter()
            .find_map(|alarm| alarm.absolute_date().copied())
    }

    pub fn has_absolute_alarm(&self) -> bool {
        self.first_absolute_date().is_some()
    }
}

impl Entity for StoreRecord {
    fn id(&self) -> &ID {
        &self.identifier
    }
}

#[derive(Error, Debug)]
pub enum NativeStoreError {
    #[error("Access to the reminder store has not been granted")]
    Unauthorized,
    #[error("The reminder store has no record with identifier: {0}")]
    NotFound(ID),
    #[error("The reminder store failed to write. Error message: `{0}`")]
    WriteFailure(String),
}

/// The device level reminder store. Storage format and permission model
/// are owned by the device, this is only the surface this app talks to.
#[async_trait::async_trait]
pub trait INativeReminderStore: Send + Sync {
    fn authorization_status(&self) -> AuthorizationStatus;
    /// Asks the user for access. Only prompts while the status is
    /// `NotDetermined`, otherwise answers with the decided status.
    async fn request_authorization(&self) -> Result<bool, NativeStoreError>;
    async fn records(&self) -> Result<Vec<StoreRecord>, NativeStoreError>;
    async fn find(&self, identifier: &ID) -> Result<StoreRecord, NativeStoreError>;
    /// A blank record with a store assigned identifier. It is not part of
    /// the store until committed.
    fn new_record(&self) -> StoreRecord;
    async fn commit(&self, record: StoreRecord) -> Result<ID, NativeStoreError>;
    async fn remove(&self, identifier: &ID) -> Result<(), NativeStoreError>;
    /// Fires after every committed change, whoever made it
    fn changes(&self) -> &EventBus<StoreChanged>;
}
