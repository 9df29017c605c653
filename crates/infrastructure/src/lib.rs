//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_audit_repository;
mod in_memory_role_directory;
mod in_memory_scheduling_store;
mod postgres_audit_repository;
mod postgres_role_directory;
mod postgres_scheduling_store;
mod system_clock;

pub use in_memory_audit_repository::InMemoryAuditRepository;
pub use in_memory_role_directory::InMemoryRoleDirectory;
pub use in_memory_scheduling_store::InMemorySchedulingStore;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_role_directory::PostgresRoleDirectory;
pub use postgres_scheduling_store::PostgresSchedulingStore;
pub use system_clock::SystemClock;
