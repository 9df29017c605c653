use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Incoming payload for leave approval.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "approve-leave-request.ts")]
pub struct ApproveLeaveRequest {
    /// Replacement shift, required when the leave accepts a swap.
    pub new_shift_id: Option<String>,
    pub note: Option<String>,
}

/// Incoming payload for decisions that only carry a note.
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "decision-note-request.ts")]
pub struct DecisionNoteRequest {
    pub note: Option<String>,
}

/// Incoming payload for leave submission and pending edits.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "save-leave-request.ts")]
pub struct SaveLeaveRequest {
    pub start_date: String,
    pub end_date: String,
    pub category: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub accepts_swap: bool,
    /// Ranked shift preferences, most preferred first.
    #[serde(default)]
    pub shift_preferences: Vec<String>,
}

/// Query string for leave listings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveListParams {
    pub user_id: Option<String>,
    pub status: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// API representation of a leave request.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "leave-response.ts")]
pub struct LeaveResponse {
    pub id: String,
    pub user_id: String,
    pub start_date: String,
    pub end_date: String,
    pub category: String,
    pub reason: String,
    pub status: String,
    pub accepts_swap: bool,
    pub shift_preferences: Vec<String>,
    pub decided_by: Option<String>,
    pub decided_at: Option<String>,
    pub decision_note: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// API representation of an approved leave and the schedule changes it caused.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "leave-approval-response.ts")]
pub struct LeaveApprovalResponse {
    #[serde(flatten)]
    pub leave: LeaveResponse,
    pub deleted_shift_ids: Vec<String>,
    pub reassigned_shift_id: Option<String>,
}
