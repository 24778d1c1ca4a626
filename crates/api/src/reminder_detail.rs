use chrono::{DateTime, Utc};
use today_domain::{EditCell, EditSection, Locale, Reminder, ReminderRow};

/// Read only detail screen of a single `Reminder`: one row per
/// `ReminderRow`.
#[derive(Debug, Clone)]
pub struct ReminderDetailViewDataSource {
    reminder: Reminder,
    locale: Locale,
}

impl ReminderDetailViewDataSource {
    pub fn new(reminder: Reminder, locale: Locale) -> Self {
        Self { reminder, locale }
    }

    pub fn reminder(&self) -> &Reminder {
        &self.reminder
    }

    pub fn row_count(&self) -> usize {
        ReminderRow::ALL_CASES.len()
    }

    pub fn row(&self, index: usize) -> Option<ReminderRow> {
        ReminderRow::from_index(index)
    }

    pub fn display_text(&self, index: usize) -> Option<String> {
        self.row(index)?.display_text(&self.reminder, &self.locale)
    }

    pub fn symbol_name(&self, index: usize) -> Option<&'static str> {
        self.row(index)?.symbol_name()
    }
}

/// Edit screen of a single `Reminder`. Works on a copy, nothing is written
/// anywhere until the caller takes the result with `into_reminder` and
/// hands it to the list.
#[derive(Debug, Clone)]
pub struct ReminderDetailEditDataSource {
    reminder: Reminder,
    locale: Locale,
}

impl ReminderDetailEditDataSource {
    pub const NEW_REMINDER_TITLE: &'static str = "New Reminder";

    pub fn new(reminder: Reminder, locale: Locale) -> Self {
        Self { reminder, locale }
    }

    /// Blank reminder due right away, as offered by the add button
    pub fn new_reminder(now: DateTime<Utc>, locale: Locale) -> Self {
        Self::new(Reminder::new(Self::NEW_REMINDER_TITLE, now), locale)
    }

    pub fn section_count(&self) -> usize {
        EditSection::ALL_CASES.len()
    }

    pub fn section(&self, index: usize) -> Option<EditSection> {
        EditSection::from_index(index)
    }

    pub fn row_count(&self, section: usize) -> usize {
        self.section(section).map(|s| s.row_count()).unwrap_or(0)
    }

    pub fn header_text(&self, section: usize) -> Option<&'static str> {
        self.section(section).map(|s| s.header_text())
    }

    pub fn cell(&self, section: usize, row: usize) -> Option<EditCell> {
        self.section(section)?.cell(row)
    }

    pub fn display_text(&self, section: usize, row: usize) -> Option<String> {
        self.section(section)?
            .display_text(&self.reminder, row, &self.locale)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.reminder.title = title.into();
    }

    pub fn set_due_date(&mut self, due_date: DateTime<Utc>) {
        self.reminder.due_date = due_date;
    }

    /// An empty string clears the notes
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        let notes = notes.into();
        self.reminder.notes = if notes.is_empty() { None } else { Some(notes) };
    }

    pub fn reminder(&self) -> &Reminder {
        &self.reminder
    }

    pub fn into_reminder(self) -> Reminder {
        self.reminder
    }
}
