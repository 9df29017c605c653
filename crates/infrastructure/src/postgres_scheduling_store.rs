//! PostgreSQL-backed scheduling store.

use async_trait::async_trait;
use chrono::NaiveDate;
use shiftdesk_application::{LeaveListQuery, SchedulingStore, SchedulingUnitOfWork};
use shiftdesk_core::{AppError, AppResult};
use shiftdesk_domain::{
    LeaveId, LeaveRequest, ShiftAssignment, ShiftId, SwapId, SwapRequest, UserId,
};
use sqlx::postgres::PgExecutor;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use uuid::Uuid;

mod rows;

use rows::{
    LEAVE_COLUMNS, LeaveRow, SHIFT_COLUMNS, SWAP_COLUMNS, ShiftRow, SwapRow, format_wall_clock,
    leave_rows,
};

/// PostgreSQL implementation of the scheduling store port.
#[derive(Clone)]
pub struct PostgresSchedulingStore {
    pool: PgPool,
}

impl PostgresSchedulingStore {
    /// Creates a store with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchedulingStore for PostgresSchedulingStore {
    async fn begin(&self) -> AppResult<Box<dyn SchedulingUnitOfWork>> {
        let transaction = self.pool.begin().await.map_err(|error| {
            AppError::Storage(format!("failed to start scheduling transaction: {error}"))
        })?;

        Ok(Box::new(PostgresSchedulingUnitOfWork { transaction }))
    }

    async fn find_leave_by_id(&self, leave_id: LeaveId) -> AppResult<Option<LeaveRequest>> {
        fetch_leave(&self.pool, leave_id).await
    }

    async fn list_leaves(&self, query: LeaveListQuery) -> AppResult<Vec<LeaveRequest>> {
        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(format!(
            "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE TRUE"
        ));

        if let Some(user_id) = query.user_id {
            builder.push(" AND user_id = ").push_bind(user_id.as_uuid());
        }
        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }

        builder
            .push(" ORDER BY created_at DESC, id LIMIT ")
            .push_bind(i64::try_from(query.limit).unwrap_or(i64::MAX))
            .push(" OFFSET ")
            .push_bind(i64::try_from(query.offset).unwrap_or(i64::MAX));

        let rows = builder
            .build_query_as::<LeaveRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Storage(format!("failed to list leave requests: {error}"))
            })?;

        leave_rows(rows)
    }

    async fn find_shifts_by_user_and_date_range(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ShiftAssignment>> {
        fetch_shifts_in_range(&self.pool, user_id, from, to).await
    }

    async fn find_shift_by_id(&self, shift_id: ShiftId) -> AppResult<Option<ShiftAssignment>> {
        fetch_shift(&self.pool, shift_id).await
    }

    async fn find_swap_by_id(&self, swap_id: SwapId) -> AppResult<Option<SwapRequest>> {
        fetch_swap(&self.pool, swap_id).await
    }
}

/// Unit of work backed by one database transaction.
///
/// Dropping it without [`SchedulingUnitOfWork::commit`] rolls the
/// transaction back.
struct PostgresSchedulingUnitOfWork {
    transaction: Transaction<'static, Postgres>,
}

#[async_trait]
impl SchedulingUnitOfWork for PostgresSchedulingUnitOfWork {
    async fn find_leave_by_id(&mut self, leave_id: LeaveId) -> AppResult<Option<LeaveRequest>> {
        fetch_leave(&mut *self.transaction, leave_id).await
    }

    async fn insert_leave(&mut self, leave: &LeaveRequest) -> AppResult<()> {
        let decision = leave.decision();
        sqlx::query(
            r#"
            INSERT INTO leave_requests (
                id,
                user_id,
                start_date,
                end_date,
                category,
                reason,
                status,
                accepts_swap,
                shift_preferences,
                decided_by,
                decided_at,
                decision_note,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(leave.id().as_uuid())
        .bind(leave.user_id().as_uuid())
        .bind(leave.start_date())
        .bind(leave.end_date())
        .bind(leave.category().as_str())
        .bind(leave.reason())
        .bind(leave.status().as_str())
        .bind(leave.accepts_swap())
        .bind(shift_preferences(leave))
        .bind(decision.map(|value| value.decided_by.as_uuid()))
        .bind(decision.map(|value| value.decided_at))
        .bind(decision.and_then(|value| value.note.clone()))
        .bind(leave.created_at())
        .bind(leave.updated_at())
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| {
            AppError::Storage(format!(
                "failed to insert leave request '{}': {error}",
                leave.id()
            ))
        })?;

        Ok(())
    }

    async fn save_leave_if_pending(&mut self, leave: &LeaveRequest) -> AppResult<bool> {
        let decision = leave.decision();
        let result = sqlx::query(
            r#"
            UPDATE leave_requests
            SET start_date = $2,
                end_date = $3,
                category = $4,
                reason = $5,
                status = $6,
                accepts_swap = $7,
                shift_preferences = $8,
                decided_by = $9,
                decided_at = $10,
                decision_note = $11,
                updated_at = $12
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(leave.id().as_uuid())
        .bind(leave.start_date())
        .bind(leave.end_date())
        .bind(leave.category().as_str())
        .bind(leave.reason())
        .bind(leave.status().as_str())
        .bind(leave.accepts_swap())
        .bind(shift_preferences(leave))
        .bind(decision.map(|value| value.decided_by.as_uuid()))
        .bind(decision.map(|value| value.decided_at))
        .bind(decision.and_then(|value| value.note.clone()))
        .bind(leave.updated_at())
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| {
            AppError::Storage(format!(
                "failed to update leave request '{}': {error}",
                leave.id()
            ))
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_leave(&mut self, leave_id: LeaveId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM leave_requests WHERE id = $1")
            .bind(leave_id.as_uuid())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| {
                AppError::Storage(format!(
                    "failed to delete leave request '{leave_id}': {error}"
                ))
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_shifts_by_user_and_date_range(
        &mut self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ShiftAssignment>> {
        fetch_shifts_in_range(&mut *self.transaction, user_id, from, to).await
    }

    async fn find_shift_by_id(&mut self, shift_id: ShiftId) -> AppResult<Option<ShiftAssignment>> {
        fetch_shift(&mut *self.transaction, shift_id).await
    }

    async fn save_shift(&mut self, shift: &ShiftAssignment) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO shift_assignments (
                id,
                assigned_to,
                shift_date,
                start_time,
                end_time,
                position,
                status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
            SET assigned_to = EXCLUDED.assigned_to,
                shift_date = EXCLUDED.shift_date,
                start_time = EXCLUDED.start_time,
                end_time = EXCLUDED.end_time,
                position = EXCLUDED.position,
                status = EXCLUDED.status
            "#,
        )
        .bind(shift.id().as_uuid())
        .bind(shift.assigned_to().map(|value| value.as_uuid()))
        .bind(shift.date())
        .bind(format_wall_clock(shift.start_time()))
        .bind(format_wall_clock(shift.end_time()))
        .bind(shift.position())
        .bind(shift.status().as_str())
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| {
            AppError::Storage(format!("failed to save shift '{}': {error}", shift.id()))
        })?;

        Ok(())
    }

    async fn delete_shifts(&mut self, shift_ids: &[ShiftId]) -> AppResult<u64> {
        if shift_ids.is_empty() {
            return Ok(0);
        }

        let ids: Vec<Uuid> = shift_ids.iter().map(ShiftId::as_uuid).collect();
        let result = sqlx::query("DELETE FROM shift_assignments WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| {
                AppError::Storage(format!(
                    "failed to delete {} shifts: {error}",
                    shift_ids.len()
                ))
            })?;

        Ok(result.rows_affected())
    }

    async fn reassign_shift(&mut self, shift_id: ShiftId, user_id: UserId) -> AppResult<bool> {
        let result = sqlx::query("UPDATE shift_assignments SET assigned_to = $2 WHERE id = $1")
            .bind(shift_id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&mut *self.transaction)
            .await
            .map_err(|error| {
                AppError::Storage(format!(
                    "failed to reassign shift '{shift_id}' to user '{user_id}': {error}"
                ))
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_swap_by_id(&mut self, swap_id: SwapId) -> AppResult<Option<SwapRequest>> {
        fetch_swap(&mut *self.transaction, swap_id).await
    }

    async fn insert_swap(&mut self, swap: &SwapRequest) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO swap_requests (
                id,
                requester,
                source_shift_id,
                target_shift_id,
                reason,
                status,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(swap.id().as_uuid())
        .bind(swap.requester().as_uuid())
        .bind(swap.source_shift_id().as_uuid())
        .bind(swap.target_shift_id().as_uuid())
        .bind(swap.reason())
        .bind(swap.status().as_str())
        .bind(swap.created_at())
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| {
            AppError::Storage(format!(
                "failed to insert swap request '{}': {error}",
                swap.id()
            ))
        })?;

        Ok(())
    }

    async fn save_swap_if_pending(&mut self, swap: &SwapRequest) -> AppResult<bool> {
        let decision = swap.decision();
        let result = sqlx::query(
            r#"
            UPDATE swap_requests
            SET status = $2,
                decided_by = $3,
                decided_at = $4,
                decision_note = $5
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(swap.id().as_uuid())
        .bind(swap.status().as_str())
        .bind(decision.map(|value| value.decided_by.as_uuid()))
        .bind(decision.map(|value| value.decided_at))
        .bind(decision.and_then(|value| value.note.clone()))
        .execute(&mut *self.transaction)
        .await
        .map_err(|error| {
            AppError::Storage(format!(
                "failed to update swap request '{}': {error}",
                swap.id()
            ))
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.transaction.commit().await.map_err(|error| {
            AppError::Storage(format!("failed to commit scheduling transaction: {error}"))
        })
    }
}

fn shift_preferences(leave: &LeaveRequest) -> Vec<String> {
    leave
        .shift_preferences()
        .iter()
        .map(|value| value.as_str().to_owned())
        .collect()
}

async fn fetch_leave<'e, E>(executor: E, leave_id: LeaveId) -> AppResult<Option<LeaveRequest>>
where
    E: PgExecutor<'e>,
{
    let sql = format!("SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE id = $1");
    let row = sqlx::query_as::<_, LeaveRow>(sql.as_str())
        .bind(leave_id.as_uuid())
        .fetch_optional(executor)
        .await
        .map_err(|error| {
            AppError::Storage(format!(
                "failed to load leave request '{leave_id}': {error}"
            ))
        })?;

    row.map(LeaveRequest::try_from).transpose()
}

async fn fetch_shift<'e, E>(executor: E, shift_id: ShiftId) -> AppResult<Option<ShiftAssignment>>
where
    E: PgExecutor<'e>,
{
    let sql = format!("SELECT {SHIFT_COLUMNS} FROM shift_assignments WHERE id = $1");
    let row = sqlx::query_as::<_, ShiftRow>(sql.as_str())
        .bind(shift_id.as_uuid())
        .fetch_optional(executor)
        .await
        .map_err(|error| {
            AppError::Storage(format!("failed to load shift '{shift_id}': {error}"))
        })?;

    Ok(row.and_then(ShiftRow::into_shift))
}

async fn fetch_shifts_in_range<'e, E>(
    executor: E,
    user_id: UserId,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<ShiftAssignment>>
where
    E: PgExecutor<'e>,
{
    let sql = format!(
        "SELECT {SHIFT_COLUMNS} FROM shift_assignments \
         WHERE assigned_to = $1 AND shift_date BETWEEN $2 AND $3 \
         ORDER BY shift_date, start_time"
    );
    let rows = sqlx::query_as::<_, ShiftRow>(sql.as_str())
        .bind(user_id.as_uuid())
        .bind(from)
        .bind(to)
        .fetch_all(executor)
        .await
        .map_err(|error| {
            AppError::Storage(format!(
                "failed to load shifts of user '{user_id}' between {from} and {to}: {error}"
            ))
        })?;

    Ok(rows.into_iter().filter_map(ShiftRow::into_shift).collect())
}

async fn fetch_swap<'e, E>(executor: E, swap_id: SwapId) -> AppResult<Option<SwapRequest>>
where
    E: PgExecutor<'e>,
{
    let sql = format!("SELECT {SWAP_COLUMNS} FROM swap_requests WHERE id = $1");
    let row = sqlx::query_as::<_, SwapRow>(sql.as_str())
        .bind(swap_id.as_uuid())
        .fetch_optional(executor)
        .await
        .map_err(|error| {
            AppError::Storage(format!("failed to load swap request '{swap_id}': {error}"))
        })?;

    row.map(SwapRequest::try_from).transpose()
}
