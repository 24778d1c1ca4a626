use crate::shared::usecase::UseCase;
use today_domain::Reminder;
use today_infra::TodayContext;

/// Asks for access to the reminder store and, if granted, fetches
/// everything it holds
#[derive(Debug)]
pub struct SyncRemindersUseCase;

#[derive(Debug)]
pub enum UseCaseErrors {
    Unauthorized,
}

#[async_trait::async_trait]
impl UseCase for SyncRemindersUseCase {
    type Response = Vec<Reminder>;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &TodayContext) -> Result<Self::Response, Self::Errors> {
        if !ctx.access.request_access().await {
            return Err(UseCaseErrors::Unauthorized);
        }
        Ok(ctx.store.fetch_all().await)
    }
}
