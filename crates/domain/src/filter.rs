use crate::{
    date::{format_date_time_medium, format_time_short, is_same_day, Locale},
    reminder::Reminder,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Decides which `Reminder`s are shown in the list and how their due
/// date is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterPolicy {
    /// Due on the current calendar day
    Today,
    /// Due after today
    Future,
    All,
}

impl FilterPolicy {
    pub const ALL_CASES: [FilterPolicy; 3] = [Self::Today, Self::Future, Self::All];

    /// Maps the selected segment of the filter control to a policy.
    /// Unknown segments fall back to `Today`.
    pub fn from_segment(index: usize) -> Self {
        Self::ALL_CASES
            .get(index)
            .copied()
            .unwrap_or(FilterPolicy::Today)
    }

    pub fn segment(&self) -> usize {
        match self {
            Self::Today => 0,
            Self::Future => 1,
            Self::All => 2,
        }
    }

    pub fn should_include(&self, reminder: &Reminder, now: &DateTime<Utc>, locale: &Locale) -> bool {
        match self {
            Self::Today => is_same_day(&reminder.due_date, now, locale),
            Self::Future => {
                reminder.due_date > *now && !is_same_day(&reminder.due_date, now, locale)
            }
            Self::All => true,
        }
    }

    pub fn display_text(&self, reminder: &Reminder, now: &DateTime<Utc>, locale: &Locale) -> String {
        match self {
            Self::Today => format_time_short(&reminder.due_date, locale),
            Self::Future => format_date_time_medium(&reminder.due_date, locale),
            Self::All => {
                if is_same_day(&reminder.due_date, now, locale) {
                    format!("Today at {}", format_time_short(&reminder.due_date, locale))
                } else {
                    format_date_time_medium(&reminder.due_date, locale)
                }
            }
        }
    }
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::Today
    }
}
