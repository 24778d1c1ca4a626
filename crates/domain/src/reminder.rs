use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A `Reminder` is a single entry of the reminder list.
///
/// It is a plain value: reading one out of a collection hands out a copy
/// and changes only become visible after they are written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: ID,
    pub title: String,
    /// When the `Reminder` is due. Stored in the external store as an
    /// absolute alarm on the record
    pub due_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub is_complete: bool,
}

impl Reminder {
    /// Creates an unsaved `Reminder` with a temporary identity
    pub fn new(title: impl Into<String>, due_date: DateTime<Utc>) -> Self {
        Self {
            id: ID::new(),
            title: title.into(),
            due_date,
            notes: None,
            is_complete: false,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Replaces the identity, e.g. with the one confirmed by the store
    pub fn with_id(mut self, id: ID) -> Self {
        self.id = id;
        self
    }

    pub fn toggle_complete(&mut self) {
        self.is_complete = !self.is_complete;
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}
