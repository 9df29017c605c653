use std::str::FromStr;

use shiftdesk_application::{
    ApproveLeaveOptions, DEFAULT_LIST_LIMIT, LeaveApprovalOutcome, LeaveListQuery,
};
use shiftdesk_core::AppError;
use shiftdesk_domain::{LeaveCategory, LeaveRequest, LeaveRequestInput, LeaveStatus};

use super::types::{
    ApproveLeaveRequest, LeaveApprovalResponse, LeaveListParams, LeaveResponse, SaveLeaveRequest,
};
use crate::dto::{parse_date, parse_optional_id};

impl From<LeaveRequest> for LeaveResponse {
    fn from(leave: LeaveRequest) -> Self {
        let decision = leave.decision();
        Self {
            id: leave.id().to_string(),
            user_id: leave.user_id().to_string(),
            start_date: leave.start_date().to_string(),
            end_date: leave.end_date().to_string(),
            category: leave.category().as_str().to_owned(),
            reason: leave.reason().to_owned(),
            status: leave.status().as_str().to_owned(),
            accepts_swap: leave.accepts_swap(),
            shift_preferences: leave
                .shift_preferences()
                .iter()
                .map(|preference| preference.as_str().to_owned())
                .collect(),
            decided_by: decision.map(|value| value.decided_by.to_string()),
            decided_at: decision.map(|value| value.decided_at.to_rfc3339()),
            decision_note: decision.and_then(|value| value.note.clone()),
            created_at: leave.created_at().to_rfc3339(),
            updated_at: leave.updated_at().to_rfc3339(),
        }
    }
}

impl From<LeaveApprovalOutcome> for LeaveApprovalResponse {
    fn from(outcome: LeaveApprovalOutcome) -> Self {
        Self {
            leave: LeaveResponse::from(outcome.leave),
            deleted_shift_ids: outcome
                .deleted_shift_ids
                .iter()
                .map(ToString::to_string)
                .collect(),
            reassigned_shift_id: outcome.reassigned_shift_id.map(|value| value.to_string()),
        }
    }
}

impl TryFrom<ApproveLeaveRequest> for ApproveLeaveOptions {
    type Error = AppError;

    fn try_from(value: ApproveLeaveRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            new_shift_id: parse_optional_id(value.new_shift_id.as_deref())?,
            note: value.note,
        })
    }
}

impl TryFrom<SaveLeaveRequest> for LeaveRequestInput {
    type Error = AppError;

    fn try_from(value: SaveLeaveRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            start_date: parse_date("startDate", value.start_date.as_str())?,
            end_date: parse_date("endDate", value.end_date.as_str())?,
            category: LeaveCategory::from_str(value.category.as_str())?,
            reason: value.reason,
            accepts_swap: value.accepts_swap,
            shift_preferences: value.shift_preferences,
        })
    }
}

impl TryFrom<LeaveListParams> for LeaveListQuery {
    type Error = AppError;

    fn try_from(value: LeaveListParams) -> Result<Self, Self::Error> {
        let status = value
            .status
            .as_deref()
            .map(str::trim)
            .filter(|status| !status.is_empty())
            .map(LeaveStatus::from_str)
            .transpose()?;

        Ok(Self {
            user_id: parse_optional_id(value.user_id.as_deref())?,
            status,
            limit: value.limit.unwrap_or(DEFAULT_LIST_LIMIT),
            offset: value.offset.unwrap_or_default(),
        })
    }
}
