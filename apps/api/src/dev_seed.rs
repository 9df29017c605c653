//! Development users so a fresh instance can be exercised with `x-actor-id`.

use shiftdesk_application::DirectoryUser;
use shiftdesk_core::AppResult;
use shiftdesk_domain::{UserId, UserRole};
use shiftdesk_infrastructure::{InMemoryRoleDirectory, PostgresRoleDirectory};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

const DEV_SEED_ADMIN_USER_ID: Uuid = Uuid::from_u128(0xa2c8_ea5f_4f39_4724_97f5_932f_97f5_4f76);
const DEV_SEED_ADMIN_DISPLAY_NAME: &str = "Scheduling Admin";

const DEV_SEED_EMPLOYEE_USER_ID: Uuid =
    Uuid::from_u128(0x96d1_1e90_7403_4654_9727_cb10_43f8_bd31);
const DEV_SEED_EMPLOYEE_DISPLAY_NAME: &str = "Shift Employee";

fn seed_users() -> [DirectoryUser; 2] {
    [
        DirectoryUser {
            user_id: UserId::from_uuid(DEV_SEED_ADMIN_USER_ID),
            display_name: DEV_SEED_ADMIN_DISPLAY_NAME.to_owned(),
            role: UserRole::Admin,
        },
        DirectoryUser {
            user_id: UserId::from_uuid(DEV_SEED_EMPLOYEE_USER_ID),
            display_name: DEV_SEED_EMPLOYEE_DISPLAY_NAME.to_owned(),
            role: UserRole::Employee,
        },
    ]
}

/// Builds an in-memory directory holding the development users.
pub fn in_memory_directory() -> InMemoryRoleDirectory {
    log_seed_users();
    InMemoryRoleDirectory::with_users(seed_users())
}

/// Upserts the development users into PostgreSQL.
pub async fn run(pool: PgPool) -> AppResult<()> {
    let directory = PostgresRoleDirectory::new(pool);
    for user in seed_users() {
        directory.upsert_user(&user).await?;
    }

    log_seed_users();
    Ok(())
}

fn log_seed_users() {
    for user in seed_users() {
        info!(
            user_id = %user.user_id,
            role = user.role.as_str(),
            "development user available"
        );
    }
}
