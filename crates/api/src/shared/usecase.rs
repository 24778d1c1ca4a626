use std::fmt::Debug;
use today_infra::TodayContext;
use tracing::error;

#[async_trait::async_trait]
pub trait UseCase: Debug + Send {
    type Response: Send;
    type Errors: Send;

    async fn execute(&mut self, ctx: &TodayContext) -> Result<Self::Response, Self::Errors>;
}

#[tracing::instrument(name = "Executing usecase", skip(ctx))]
pub async fn execute<U>(mut usecase: U, ctx: &TodayContext) -> Result<U::Response, U::Errors>
where
    U: UseCase,
    U::Errors: Debug,
{
    let res = usecase.execute(ctx).await;

    if let Err(e) = &res {
        error!("Use case error: {:?}", e);
    }

    res
}
