use async_trait::async_trait;
use shiftdesk_application::{DirectoryUser, RoleDirectory};
use shiftdesk_core::{AppError, AppResult};
use shiftdesk_domain::{UserId, UserRole};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// PostgreSQL-backed role directory.
#[derive(Clone)]
pub struct PostgresRoleDirectory {
    pool: PgPool,
}

impl PostgresRoleDirectory {
    /// Creates a directory with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts `user`, or updates the display name and role of an existing row.
    pub async fn upsert_user(&self, user: &DirectoryUser) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO scheduling_users (id, display_name, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET display_name = EXCLUDED.display_name,
                role = EXCLUDED.role
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.display_name.as_str())
        .bind(user.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Storage(format!("failed to save user '{}': {error}", user.user_id))
        })?;

        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    display_name: String,
    role: String,
}

#[async_trait]
impl RoleDirectory for PostgresRoleDirectory {
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<DirectoryUser>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, display_name, role
            FROM scheduling_users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Storage(format!("failed to load user '{user_id}': {error}"))
        })?;

        row.map(|row| {
            let role = row.role.parse::<UserRole>().map_err(|error| {
                AppError::Storage(format!("stored user '{}' is unreadable: {error}", row.id))
            })?;
            Ok(DirectoryUser {
                user_id: UserId::from_uuid(row.id),
                display_name: row.display_name,
                role,
            })
        })
        .transpose()
    }
}
