use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use shiftdesk_core::{AppError, AppResult};
use shiftdesk_domain::{
    Decision, LeaveId, LeaveRequest, LeaveRequestSnapshot, ShiftAssignment,
    ShiftAssignmentSnapshot, ShiftId, ShiftStatus, SwapId, SwapRequest, SwapRequestSnapshot,
    UserId,
};
use sqlx::FromRow;
use uuid::Uuid;

pub(super) const LEAVE_COLUMNS: &str = "id, user_id, start_date, end_date, category, reason, \
     status, accepts_swap, shift_preferences, decided_by, decided_at, decision_note, \
     created_at, updated_at";

pub(super) const SHIFT_COLUMNS: &str =
    "id, assigned_to, shift_date, start_time, end_time, position, status";

pub(super) const SWAP_COLUMNS: &str = "id, requester, source_shift_id, target_shift_id, reason, \
     status, decided_by, decided_at, decision_note, created_at";

#[derive(Debug, FromRow)]
pub(super) struct LeaveRow {
    id: Uuid,
    user_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    category: String,
    reason: String,
    status: String,
    accepts_swap: bool,
    shift_preferences: Vec<String>,
    decided_by: Option<Uuid>,
    decided_at: Option<DateTime<Utc>>,
    decision_note: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<LeaveRow> for LeaveRequest {
    type Error = AppError;

    fn try_from(row: LeaveRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse()
            .map_err(|error| corrupt_row("leave request", row.id, error))?;
        let status = row
            .status
            .parse()
            .map_err(|error| corrupt_row("leave request", row.id, error))?;

        Ok(Self::from_snapshot(LeaveRequestSnapshot {
            id: LeaveId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            start_date: row.start_date,
            end_date: row.end_date,
            category,
            reason: row.reason,
            status,
            accepts_swap: row.accepts_swap,
            shift_preferences: row.shift_preferences,
            decision: decision(row.decided_by, row.decided_at, row.decision_note),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}

#[derive(Debug, FromRow)]
pub(super) struct ShiftRow {
    id: Uuid,
    assigned_to: Option<Uuid>,
    shift_date: NaiveDate,
    start_time: String,
    end_time: String,
    position: String,
    status: String,
}

impl ShiftRow {
    /// Converts the row, or returns `None` with a warning when its stored
    /// wall-clock times or status cannot be read.
    pub(super) fn into_shift(self) -> Option<ShiftAssignment> {
        let parsed = (
            parse_wall_clock(self.start_time.as_str()),
            parse_wall_clock(self.end_time.as_str()),
            self.status.parse::<ShiftStatus>(),
        );
        let (Some(start_time), Some(end_time), Ok(status)) = parsed else {
            tracing::warn!(
                shift_id = %self.id,
                start_time = %self.start_time,
                end_time = %self.end_time,
                status = %self.status,
                "skipping shift with malformed stored values"
            );
            return None;
        };

        Some(ShiftAssignment::from_snapshot(ShiftAssignmentSnapshot {
            id: ShiftId::from_uuid(self.id),
            assigned_to: self.assigned_to.map(UserId::from_uuid),
            date: self.shift_date,
            start_time,
            end_time,
            position: self.position,
            status,
        }))
    }
}

#[derive(Debug, FromRow)]
pub(super) struct SwapRow {
    id: Uuid,
    requester: Uuid,
    source_shift_id: Uuid,
    target_shift_id: Uuid,
    reason: String,
    status: String,
    decided_by: Option<Uuid>,
    decided_at: Option<DateTime<Utc>>,
    decision_note: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<SwapRow> for SwapRequest {
    type Error = AppError;

    fn try_from(row: SwapRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|error| corrupt_row("swap request", row.id, error))?;

        Ok(Self::from_snapshot(SwapRequestSnapshot {
            id: SwapId::from_uuid(row.id),
            requester: UserId::from_uuid(row.requester),
            source_shift_id: ShiftId::from_uuid(row.source_shift_id),
            target_shift_id: ShiftId::from_uuid(row.target_shift_id),
            reason: row.reason,
            status,
            decision: decision(row.decided_by, row.decided_at, row.decision_note),
            created_at: row.created_at,
        }))
    }
}

/// Formats a wall-clock time the way it is stored.
pub(super) fn format_wall_clock(value: NaiveTime) -> String {
    value.format("%H:%M:%S").to_string()
}

/// Accepts `HH:MM:SS` and `HH:MM`.
pub(super) fn parse_wall_clock(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

pub(super) fn leave_rows(rows: Vec<LeaveRow>) -> AppResult<Vec<LeaveRequest>> {
    rows.into_iter().map(LeaveRequest::try_from).collect()
}

fn decision(
    decided_by: Option<Uuid>,
    decided_at: Option<DateTime<Utc>>,
    note: Option<String>,
) -> Option<Decision> {
    Some(Decision {
        decided_by: UserId::from_uuid(decided_by?),
        decided_at: decided_at?,
        note,
    })
}

fn corrupt_row(kind: &str, id: Uuid, error: AppError) -> AppError {
    AppError::Storage(format!("stored {kind} '{id}' is unreadable: {error}"))
}
