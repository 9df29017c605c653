//! Leave request aggregate and its status machine.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shiftdesk_core::{AppError, AppResult, NonEmptyString};

use crate::{Decision, LeaveId, LeaveWindow, UserId};

/// Maximum number of characters accepted in a leave reason.
pub const LEAVE_REASON_MAX_LENGTH: usize = 500;

/// Maximum number of ranked shift preferences on one leave request.
pub const MAX_SHIFT_PREFERENCES: usize = 3;

/// User-visible message for decisions attempted on non-pending leaves.
pub const ONLY_PENDING_DECIDABLE: &str = "Only Pending leaves can be decided.";

/// Leave category chosen by the employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveCategory {
    /// Annual paid leave.
    Annual,
    /// Sick leave.
    Sick,
    /// Casual leave.
    Casual,
    /// Unpaid leave.
    Unpaid,
    /// Study leave.
    Study,
    /// Anything else.
    Other,
}

impl LeaveCategory {
    /// Returns a stable storage value for this category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Sick => "sick",
            Self::Casual => "casual",
            Self::Unpaid => "unpaid",
            Self::Study => "study",
            Self::Other => "other",
        }
    }
}

impl FromStr for LeaveCategory {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "annual" => Ok(Self::Annual),
            "sick" => Ok(Self::Sick),
            "casual" => Ok(Self::Casual),
            "unpaid" => Ok(Self::Unpaid),
            "study" => Ok(Self::Study),
            "other" => Ok(Self::Other),
            _ => Err(AppError::Validation(format!(
                "unknown leave category '{value}'"
            ))),
        }
    }
}

/// Leave request lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting an administrator decision.
    Pending,
    /// Approved by an administrator.
    Approved,
    /// Rejected by an administrator.
    Rejected,
    /// Withdrawn before a decision.
    Cancelled,
}

impl LeaveStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns whether no further transition is allowed.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl FromStr for LeaveStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(AppError::Validation(format!(
                "unknown leave status '{value}'"
            ))),
        }
    }
}

/// Employee-editable leave fields, used for creation and pending edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveRequestInput {
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Leave category.
    pub category: LeaveCategory,
    /// Free-text reason.
    pub reason: String,
    /// Whether the employee accepts moving into a different shift.
    pub accepts_swap: bool,
    /// Ranked shift preferences, most preferred first.
    pub shift_preferences: Vec<String>,
}

/// Persisted leave request fields used to rehydrate the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveRequestSnapshot {
    /// Leave identifier.
    pub id: LeaveId,
    /// Owning employee.
    pub user_id: UserId,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Leave category.
    pub category: LeaveCategory,
    /// Free-text reason.
    pub reason: String,
    /// Current status.
    pub status: LeaveStatus,
    /// Swap-acceptable flag.
    pub accepts_swap: bool,
    /// Ranked shift preferences.
    pub shift_preferences: Vec<String>,
    /// Decision metadata, present once decided.
    pub decision: Option<Decision>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Employee leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    id: LeaveId,
    user_id: UserId,
    start_date: NaiveDate,
    end_date: NaiveDate,
    category: LeaveCategory,
    reason: String,
    status: LeaveStatus,
    accepts_swap: bool,
    shift_preferences: Vec<NonEmptyString>,
    decision: Option<Decision>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Creates a validated pending leave request owned by `user_id`.
    pub fn new(
        id: LeaveId,
        user_id: UserId,
        input: LeaveRequestInput,
        now: DateTime<Utc>,
    ) -> AppResult<Self> {
        let fields = ValidatedLeaveFields::try_from(input)?;

        Ok(Self {
            id,
            user_id,
            start_date: fields.start_date,
            end_date: fields.end_date,
            category: fields.category,
            reason: fields.reason,
            status: LeaveStatus::Pending,
            accepts_swap: fields.accepts_swap,
            shift_preferences: fields.shift_preferences,
            decision: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a leave request from storage without re-validating it.
    #[must_use]
    pub fn from_snapshot(snapshot: LeaveRequestSnapshot) -> Self {
        Self {
            id: snapshot.id,
            user_id: snapshot.user_id,
            start_date: snapshot.start_date,
            end_date: snapshot.end_date,
            category: snapshot.category,
            reason: snapshot.reason,
            status: snapshot.status,
            accepts_swap: snapshot.accepts_swap,
            shift_preferences: snapshot
                .shift_preferences
                .into_iter()
                .filter_map(|value| NonEmptyString::new(value).ok())
                .collect(),
            decision: snapshot.decision,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
        }
    }

    /// Returns the leave identifier.
    #[must_use]
    pub fn id(&self) -> LeaveId {
        self.id
    }

    /// Returns the owning employee.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the first day of leave.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the last day of leave (inclusive).
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns the leave category.
    #[must_use]
    pub fn category(&self) -> LeaveCategory {
        self.category
    }

    /// Returns the free-text reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        self.reason.as_str()
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> LeaveStatus {
        self.status
    }

    /// Returns whether the employee accepts being moved to another shift.
    #[must_use]
    pub fn accepts_swap(&self) -> bool {
        self.accepts_swap
    }

    /// Returns ranked shift preferences. Advisory only.
    #[must_use]
    pub fn shift_preferences(&self) -> &[NonEmptyString] {
        self.shift_preferences.as_slice()
    }

    /// Returns decision metadata once the request was decided.
    #[must_use]
    pub fn decision(&self) -> Option<&Decision> {
        self.decision.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether `user_id` owns this request.
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Returns the full-day window blocked by this leave.
    #[must_use]
    pub fn window(&self) -> LeaveWindow {
        LeaveWindow::covering(self.start_date, self.end_date)
    }

    /// Replaces employee-editable fields while the request is still pending.
    pub fn revise(&mut self, input: LeaveRequestInput, now: DateTime<Utc>) -> AppResult<()> {
        if self.status != LeaveStatus::Pending {
            return Err(AppError::InvalidState(format!(
                "leave request '{}' is {} and can no longer be edited",
                self.id,
                self.status.as_str()
            )));
        }

        let fields = ValidatedLeaveFields::try_from(input)?;
        self.start_date = fields.start_date;
        self.end_date = fields.end_date;
        self.category = fields.category;
        self.reason = fields.reason;
        self.accepts_swap = fields.accepts_swap;
        self.shift_preferences = fields.shift_preferences;
        self.updated_at = now;
        Ok(())
    }

    /// Marks the request approved by an administrator.
    pub fn approve(&mut self, decision: Decision) -> AppResult<()> {
        self.decide(LeaveStatus::Approved, decision)
    }

    /// Marks the request rejected by an administrator.
    pub fn reject(&mut self, decision: Decision) -> AppResult<()> {
        self.decide(LeaveStatus::Rejected, decision)
    }

    /// Withdraws a pending request.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        if self.status != LeaveStatus::Pending {
            return Err(AppError::InvalidState(format!(
                "leave request '{}' is {} and cannot be cancelled",
                self.id,
                self.status.as_str()
            )));
        }

        self.status = LeaveStatus::Cancelled;
        self.updated_at = now;
        Ok(())
    }

    fn decide(&mut self, status: LeaveStatus, decision: Decision) -> AppResult<()> {
        if self.status != LeaveStatus::Pending {
            return Err(AppError::InvalidState(ONLY_PENDING_DECIDABLE.to_owned()));
        }

        self.status = status;
        self.updated_at = decision.decided_at;
        self.decision = Some(decision);
        Ok(())
    }
}

struct ValidatedLeaveFields {
    start_date: NaiveDate,
    end_date: NaiveDate,
    category: LeaveCategory,
    reason: String,
    accepts_swap: bool,
    shift_preferences: Vec<NonEmptyString>,
}

impl TryFrom<LeaveRequestInput> for ValidatedLeaveFields {
    type Error = AppError;

    fn try_from(input: LeaveRequestInput) -> Result<Self, Self::Error> {
        if input.start_date > input.end_date {
            return Err(AppError::Validation(format!(
                "leave start date {} must not be after end date {}",
                input.start_date, input.end_date
            )));
        }

        let reason = input.reason.trim().to_owned();
        if reason.chars().count() > LEAVE_REASON_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "leave reason must not exceed {LEAVE_REASON_MAX_LENGTH} characters"
            )));
        }

        if input.shift_preferences.len() > MAX_SHIFT_PREFERENCES {
            return Err(AppError::Validation(format!(
                "at most {MAX_SHIFT_PREFERENCES} shift preferences are allowed"
            )));
        }

        if !input.accepts_swap && !input.shift_preferences.is_empty() {
            return Err(AppError::Validation(
                "shift preferences are only accepted when the leave accepts a swap".to_owned(),
            ));
        }

        let shift_preferences = input
            .shift_preferences
            .into_iter()
            .map(NonEmptyString::new)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            start_date: input.start_date,
            end_date: input.end_date,
            category: input.category,
            reason,
            accepts_swap: input.accepts_swap,
            shift_preferences,
        })
    }
}
