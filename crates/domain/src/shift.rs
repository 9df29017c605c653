use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use shiftdesk_core::{AppError, AppResult};

use crate::{ShiftId, UserId};

/// Shift lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Planned, whether assigned or open.
    Scheduled,
    /// Worked.
    Completed,
    /// Called off.
    Cancelled,
}

impl ShiftStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ShiftStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(AppError::Validation(format!(
                "unknown shift status '{value}'"
            ))),
        }
    }
}

/// Administrator-editable shift fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftAssignmentInput {
    /// Assigned employee, `None` for an open shift.
    pub assigned_to: Option<UserId>,
    /// Calendar date.
    pub date: NaiveDate,
    /// Wall-clock start.
    pub start_time: NaiveTime,
    /// Wall-clock end, same day.
    pub end_time: NaiveTime,
    /// Role or position label.
    pub position: String,
    /// Lifecycle status.
    pub status: ShiftStatus,
}

/// Persisted shift fields used to rehydrate the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftAssignmentSnapshot {
    /// Shift identifier.
    pub id: ShiftId,
    /// Assigned employee.
    pub assigned_to: Option<UserId>,
    /// Calendar date.
    pub date: NaiveDate,
    /// Wall-clock start.
    pub start_time: NaiveTime,
    /// Wall-clock end.
    pub end_time: NaiveTime,
    /// Role or position label.
    pub position: String,
    /// Lifecycle status.
    pub status: ShiftStatus,
}

/// A scheduled block of work, optionally assigned to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    id: ShiftId,
    assigned_to: Option<UserId>,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    position: String,
    status: ShiftStatus,
}

impl ShiftAssignment {
    /// Creates a validated shift.
    pub fn new(id: ShiftId, input: ShiftAssignmentInput) -> AppResult<Self> {
        validate_shift_input(&input)?;

        Ok(Self {
            id,
            assigned_to: input.assigned_to,
            date: input.date,
            start_time: input.start_time,
            end_time: input.end_time,
            position: input.position.trim().to_owned(),
            status: input.status,
        })
    }

    /// Rebuilds a shift from storage without re-validating it.
    #[must_use]
    pub fn from_snapshot(snapshot: ShiftAssignmentSnapshot) -> Self {
        Self {
            id: snapshot.id,
            assigned_to: snapshot.assigned_to,
            date: snapshot.date,
            start_time: snapshot.start_time,
            end_time: snapshot.end_time,
            position: snapshot.position,
            status: snapshot.status,
        }
    }

    /// Returns the shift identifier.
    #[must_use]
    pub fn id(&self) -> ShiftId {
        self.id
    }

    /// Returns the assigned employee, if any.
    #[must_use]
    pub fn assigned_to(&self) -> Option<UserId> {
        self.assigned_to
    }

    /// Returns the calendar date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the wall-clock start.
    #[must_use]
    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    /// Returns the wall-clock end.
    #[must_use]
    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    /// Returns the role or position label.
    #[must_use]
    pub fn position(&self) -> &str {
        self.position.as_str()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub fn status(&self) -> ShiftStatus {
        self.status
    }

    /// Returns the concrete `[start, end)` instants, or `None` when the
    /// stored times do not form a forward same-day interval.
    #[must_use]
    pub fn interval(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        (self.start_time < self.end_time).then(|| {
            (
                self.date.and_time(self.start_time),
                self.date.and_time(self.end_time),
            )
        })
    }

    /// Returns whether both shifts belong to the same employee on the same
    /// date with intersecting intervals.
    #[must_use]
    pub fn clashes_with(&self, other: &Self) -> bool {
        if self.id == other.id || self.date != other.date {
            return false;
        }

        let same_assignee = matches!(
            (self.assigned_to, other.assigned_to),
            (Some(left), Some(right)) if left == right
        );
        if !same_assignee {
            return false;
        }

        match (self.interval(), other.interval()) {
            (Some((left_start, left_end)), Some((right_start, right_end))) => {
                left_start < right_end && right_start < left_end
            }
            _ => false,
        }
    }

    /// Replaces all editable fields.
    pub fn revise(&mut self, input: ShiftAssignmentInput) -> AppResult<()> {
        validate_shift_input(&input)?;
        self.assigned_to = input.assigned_to;
        self.date = input.date;
        self.start_time = input.start_time;
        self.end_time = input.end_time;
        self.position = input.position.trim().to_owned();
        self.status = input.status;
        Ok(())
    }

    /// Moves the shift to another employee, or opens it with `None`.
    pub fn assign_to(&mut self, user_id: Option<UserId>) {
        self.assigned_to = user_id;
    }
}

fn validate_shift_input(input: &ShiftAssignmentInput) -> AppResult<()> {
    if input.start_time >= input.end_time {
        return Err(AppError::Validation(format!(
            "shift start {} must be before end {}",
            input.start_time, input.end_time
        )));
    }

    if input.position.trim().is_empty() {
        return Err(AppError::Validation(
            "shift position must not be empty".to_owned(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use shiftdesk_core::AppError;

    use super::{ShiftAssignment, ShiftAssignmentInput, ShiftStatus};
    use crate::{ShiftId, UserId};

    fn time(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or_default()
    }

    fn input(user: Option<UserId>, start: u32, end: u32) -> ShiftAssignmentInput {
        ShiftAssignmentInput {
            assigned_to: user,
            date: NaiveDate::from_ymd_opt(2025, 8, 20).unwrap_or_default(),
            start_time: time(start),
            end_time: time(end),
            position: "barista".to_owned(),
            status: ShiftStatus::Scheduled,
        }
    }

    fn create(user: Option<UserId>, start: u32, end: u32) -> ShiftAssignment {
        let created = ShiftAssignment::new(ShiftId::new(), input(user, start, end));
        assert!(created.is_ok());
        created.unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn start_must_precede_end() {
        let created = ShiftAssignment::new(ShiftId::new(), input(None, 17, 9));
        assert!(matches!(created, Err(AppError::Validation(_))));
    }

    #[test]
    fn blank_position_is_rejected() {
        let mut payload = input(None, 9, 17);
        payload.position = "  ".to_owned();
        let created = ShiftAssignment::new(ShiftId::new(), payload);
        assert!(matches!(created, Err(AppError::Validation(_))));
    }

    #[test]
    fn same_user_overlapping_shifts_clash() {
        let user = UserId::new();
        assert!(create(Some(user), 9, 17).clashes_with(&create(Some(user), 12, 20)));
    }

    #[test]
    fn touching_shifts_do_not_clash() {
        let user = UserId::new();
        assert!(!create(Some(user), 9, 13).clashes_with(&create(Some(user), 13, 17)));
    }

    #[test]
    fn open_or_foreign_shifts_do_not_clash() {
        let user = UserId::new();
        assert!(!create(Some(user), 9, 17).clashes_with(&create(None, 9, 17)));
        assert!(!create(Some(user), 9, 17).clashes_with(&create(Some(UserId::new()), 9, 17)));
    }
}
