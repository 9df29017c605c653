use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shiftdesk_application::SubmitSwapInput;
use shiftdesk_core::AppError;
use shiftdesk_domain::{ShiftId, SwapRequest};
use ts_rs::TS;

/// Incoming payload for a shift swap request.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "create-swap-request.ts")]
pub struct CreateSwapRequest {
    pub source_shift_id: String,
    pub target_shift_id: String,
    #[serde(default)]
    pub reason: String,
}

/// API representation of a shift swap request.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "swap-response.ts")]
pub struct SwapResponse {
    pub id: String,
    pub requester: String,
    pub source_shift_id: String,
    pub target_shift_id: String,
    pub reason: String,
    pub status: String,
    pub decided_by: Option<String>,
    pub decided_at: Option<String>,
    pub decision_note: Option<String>,
    pub created_at: String,
}

impl From<SwapRequest> for SwapResponse {
    fn from(swap: SwapRequest) -> Self {
        let decision = swap.decision();
        Self {
            id: swap.id().to_string(),
            requester: swap.requester().to_string(),
            source_shift_id: swap.source_shift_id().to_string(),
            target_shift_id: swap.target_shift_id().to_string(),
            reason: swap.reason().to_owned(),
            status: swap.status().as_str().to_owned(),
            decided_by: decision.map(|value| value.decided_by.to_string()),
            decided_at: decision.map(|value| value.decided_at.to_rfc3339()),
            decision_note: decision.and_then(|value| value.note.clone()),
            created_at: swap.created_at().to_rfc3339(),
        }
    }
}

impl TryFrom<CreateSwapRequest> for SubmitSwapInput {
    type Error = AppError;

    fn try_from(value: CreateSwapRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            source_shift_id: ShiftId::from_str(value.source_shift_id.as_str())?,
            target_shift_id: ShiftId::from_str(value.target_shift_id.as_str())?,
            reason: value.reason,
        })
    }
}
