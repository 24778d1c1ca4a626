//! Rows and sections of the reminder detail screens. Each variant knows
//! how many rows it has and what text it shows, so the presentation layer
//! only has to match on them.

use crate::{
    date::{format_date_long, format_date_time_medium, format_time_short, Locale},
    reminder::Reminder,
};

/// Rows of the read only detail screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderRow {
    Title,
    Date,
    Time,
    Notes,
}

impl ReminderRow {
    pub const ALL_CASES: [ReminderRow; 4] = [Self::Title, Self::Date, Self::Time, Self::Notes];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL_CASES.get(index).copied()
    }

    pub fn display_text(&self, reminder: &Reminder, locale: &Locale) -> Option<String> {
        match self {
            Self::Title => Some(reminder.title.clone()),
            Self::Date => Some(format_date_long(&reminder.due_date, locale)),
            Self::Time => Some(format_time_short(&reminder.due_date, locale)),
            Self::Notes => reminder.notes.clone(),
        }
    }

    /// Name of the system symbol shown next to the row
    pub fn symbol_name(&self) -> Option<&'static str> {
        match self {
            Self::Title => None,
            Self::Date => Some("calendar.circle"),
            Self::Time => Some("clock"),
            Self::Notes => Some("square.and.pencil"),
        }
    }
}

/// Kind of cell a row of the edit screen is rendered with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCell {
    TitleField,
    DateLabel,
    DatePicker,
    NotesField,
}

impl EditCell {
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::TitleField => "EditTitleCell",
            Self::DateLabel => "EditDateLabelCell",
            Self::DatePicker => "EditDateCell",
            Self::NotesField => "EditNotesCell",
        }
    }
}

/// Sections of the edit screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditSection {
    Title,
    DueDate,
    Notes,
}

impl EditSection {
    pub const ALL_CASES: [EditSection; 3] = [Self::Title, Self::DueDate, Self::Notes];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL_CASES.get(index).copied()
    }

    pub fn header_text(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::DueDate => "Date",
            Self::Notes => "Notes",
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            Self::Title | Self::Notes => 1,
            Self::DueDate => 2,
        }
    }

    pub fn cell(&self, row: usize) -> Option<EditCell> {
        if row >= self.row_count() {
            return None;
        }
        let cell = match self {
            Self::Title => EditCell::TitleField,
            Self::DueDate if row == 0 => EditCell::DateLabel,
            Self::DueDate => EditCell::DatePicker,
            Self::Notes => EditCell::NotesField,
        };
        Some(cell)
    }

    /// Text the cell at `row` starts out with. The date picker renders the
    /// date itself and has none.
    pub fn display_text(&self, reminder: &Reminder, row: usize, locale: &Locale) -> Option<String> {
        match self.cell(row)? {
            EditCell::TitleField => Some(reminder.title.clone()),
            EditCell::DateLabel => Some(format_date_time_medium(&reminder.due_date, locale)),
            EditCell::DatePicker => None,
            EditCell::NotesField => reminder.notes.clone(),
        }
    }
}
