mod error;
mod reminder_detail;
mod reminder_list;
mod shared;

pub use error::ListError;
pub use reminder_detail::{ReminderDetailEditDataSource, ReminderDetailViewDataSource};
pub use reminder_list::{ListEvent, ReminderListDataSource};
pub use shared::usecase::{execute, UseCase};
