use crate::shared::usecase::UseCase;
use today_domain::{Reminder, ID};
use today_infra::TodayContext;

/// Writes a `Reminder` to the store, creating it if the store does not
/// know its id. Responds with the id the store confirmed.
#[derive(Debug)]
pub struct SaveReminderUseCase {
    pub reminder: Reminder,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for SaveReminderUseCase {
    type Response = ID;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &TodayContext) -> Result<Self::Response, Self::Errors> {
        ctx.store
            .save(&self.reminder)
            .await
            .ok_or(UseCaseErrors::StorageError)
    }
}
