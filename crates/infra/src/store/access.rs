use super::{
    native::{AuthorizationStatus, INativeReminderStore},
    IAccessGate,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Negotiates access to the native store. Concurrent requests while the
/// user has not decided yet share a single prompt.
pub struct ReminderAccessGate {
    store: Arc<dyn INativeReminderStore>,
    prompt: Mutex<()>,
}

impl ReminderAccessGate {
    pub fn new(store: Arc<dyn INativeReminderStore>) -> Self {
        Self {
            store,
            prompt: Mutex::new(()),
        }
    }
}

#[async_trait::async_trait]
impl IAccessGate for ReminderAccessGate {
    async fn request_access(&self) -> bool {
        match self.store.authorization_status() {
            AuthorizationStatus::Authorized => return true,
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted => return false,
            AuthorizationStatus::NotDetermined => {}
        }

        let _prompt = self.prompt.lock().await;
        // Someone else may have prompted while we were waiting
        let status = self.store.authorization_status();
        if status.is_decided() {
            return status == AuthorizationStatus::Authorized;
        }

        match self.store.request_authorization().await {
            Ok(granted) => {
                info!("Reminder access granted: {}", granted);
                granted
            }
            Err(e) => {
                warn!("Unable to request reminder access. Err: {:?}", e);
                false
            }
        }
    }
}
