mod date;
mod detail;
mod filter;
mod reminder;
mod shared;

pub use date::{
    format_date_long, format_date_medium, format_date_time_medium, format_time_short,
    is_same_day, HourCycle, Locale,
};
pub use detail::{EditCell, EditSection, ReminderRow};
pub use filter::FilterPolicy;
pub use reminder::Reminder;
pub use shared::entity::{Entity, InvalidIDError, ID};
