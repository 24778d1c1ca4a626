mod config;
mod events;
mod store;
mod system;

pub use config::Config;
pub use events::{EventBus, SubscriptionHandle};
use std::sync::Arc;
pub use store::native::{
    Alarm, AuthorizationStatus, INativeReminderStore, InMemoryNativeStore, NativeStoreError,
    StoreRecord,
};
pub use store::{
    IAccessGate, IReminderStore, NativeReminderStoreAdapter, ReminderAccessGate, StoreChanged,
};
pub use system::{ISys, RealSys, StaticTimeSys};

#[derive(Clone)]
pub struct TodayContext {
    pub store: Arc<dyn IReminderStore>,
    pub access: Arc<dyn IAccessGate>,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl TodayContext {
    /// Wires the adapter and access gate on top of a native store
    pub fn create(native: Arc<dyn INativeReminderStore>, config: Config) -> Self {
        Self {
            store: Arc::new(NativeReminderStoreAdapter::new(native.clone())),
            access: Arc::new(ReminderAccessGate::new(native)),
            config,
            sys: Arc::new(RealSys {}),
        }
    }

    /// Context on top of an in memory store the user already granted access to
    pub fn create_inmemory() -> Self {
        Self::create(
            Arc::new(InMemoryNativeStore::authorized()),
            Config::default(),
        )
    }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> TodayContext {
    let config = Config::new();
    let native = InMemoryNativeStore::new(
        AuthorizationStatus::NotDetermined,
        config.grant_access_on_prompt,
    );
    TodayContext::create(Arc::new(native), config)
}
