use async_trait::async_trait;
use shiftdesk_application::{AuditEvent, AuditRepository};
use shiftdesk_core::AppResult;
use tokio::sync::Mutex;

/// In-memory append-only audit log.
#[derive(Debug, Default)]
pub struct InMemoryAuditRepository {
    events: Mutex<Vec<AuditEvent>>,
}

impl InMemoryAuditRepository {
    /// Returns a copy of every appended event in append order.
    pub async fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        tracing::debug!(
            action = event.action.as_str(),
            resource_id = %event.resource_id,
            "audit event appended"
        );
        self.events.lock().await.push(event);
        Ok(())
    }
}
