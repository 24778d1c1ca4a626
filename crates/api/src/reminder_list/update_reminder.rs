use crate::shared::usecase::UseCase;
use today_domain::Reminder;
use today_infra::TodayContext;

/// Writes changes of a `Reminder` the store already holds. Fails if the
/// store no longer knows it.
#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub reminder: Reminder,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for UpdateReminderUseCase {
    type Response = ();

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &TodayContext) -> Result<Self::Response, Self::Errors> {
        if ctx.store.update(&self.reminder).await {
            Ok(())
        } else {
            Err(UseCaseErrors::StorageError)
        }
    }
}
