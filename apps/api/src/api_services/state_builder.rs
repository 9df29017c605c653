use std::sync::Arc;

use shiftdesk_application::{
    AuditRepository, AuthorizationService, Clock, LeaveApprovalWorkflow, LeaveRequestService,
    RequestGateway, RoleDirectory, SchedulingStore, ShiftService, SwapRequestService,
};
use shiftdesk_infrastructure::{
    InMemoryAuditRepository, InMemoryRoleDirectory, InMemorySchedulingStore,
    PostgresAuditRepository, PostgresRoleDirectory, PostgresSchedulingStore, SystemClock,
};
use sqlx::PgPool;

use crate::state::AppState;

/// Adapter set behind the application services.
#[derive(Clone)]
pub struct SchedulingPorts {
    pub store: Arc<dyn SchedulingStore>,
    pub directory: Arc<dyn RoleDirectory>,
    pub audit_repository: Arc<dyn AuditRepository>,
    pub clock: Arc<dyn Clock>,
    pub backend: &'static str,
}

impl SchedulingPorts {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            store: Arc::new(PostgresSchedulingStore::new(pool.clone())),
            directory: Arc::new(PostgresRoleDirectory::new(pool.clone())),
            audit_repository: Arc::new(PostgresAuditRepository::new(pool)),
            clock: Arc::new(SystemClock),
            backend: "postgres",
        }
    }

    /// Volatile adapters; state is lost on restart.
    pub fn in_memory(directory: InMemoryRoleDirectory) -> Self {
        Self {
            store: Arc::new(InMemorySchedulingStore::new()),
            directory: Arc::new(directory),
            audit_repository: Arc::new(InMemoryAuditRepository::default()),
            clock: Arc::new(SystemClock),
            backend: "memory",
        }
    }
}

pub fn build_app_state(ports: SchedulingPorts) -> AppState {
    let authorization_service = AuthorizationService::new(ports.directory);
    let workflow = LeaveApprovalWorkflow::new(
        ports.store.clone(),
        ports.clock.clone(),
        ports.audit_repository.clone(),
    );

    AppState {
        request_gateway: RequestGateway::new(
            authorization_service.clone(),
            workflow,
            ports.store.clone(),
        ),
        leave_request_service: LeaveRequestService::new(
            authorization_service.clone(),
            ports.store.clone(),
            ports.clock.clone(),
            ports.audit_repository.clone(),
        ),
        shift_service: ShiftService::new(authorization_service.clone(), ports.store.clone()),
        swap_request_service: SwapRequestService::new(
            authorization_service.clone(),
            ports.store,
            ports.clock,
            ports.audit_repository,
        ),
        authorization_service,
        storage_backend: ports.backend,
    }
}
