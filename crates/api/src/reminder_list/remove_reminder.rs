use crate::shared::usecase::UseCase;
use today_domain::ID;
use today_infra::TodayContext;

#[derive(Debug)]
pub struct RemoveReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError(ID),
}

#[async_trait::async_trait]
impl UseCase for RemoveReminderUseCase {
    type Response = ();

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &TodayContext) -> Result<Self::Response, Self::Errors> {
        if ctx.store.remove(&self.reminder_id).await {
            Ok(())
        } else {
            Err(UseCaseErrors::StorageError(self.reminder_id.clone()))
        }
    }
}
