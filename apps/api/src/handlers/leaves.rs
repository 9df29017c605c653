use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use shiftdesk_core::UserIdentity;
use shiftdesk_domain::{LeaveId, LeaveRequestInput};

use crate::dto::{LeaveResponse, SaveLeaveRequest};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn submit_leave_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<SaveLeaveRequest>,
) -> ApiResult<(StatusCode, Json<LeaveResponse>)> {
    let input = LeaveRequestInput::try_from(payload)?;
    let leave = state.leave_request_service.submit(&user, input).await?;

    Ok((StatusCode::CREATED, Json(LeaveResponse::from(leave))))
}

pub async fn update_leave_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(leave_id): Path<String>,
    Json(payload): Json<SaveLeaveRequest>,
) -> ApiResult<Json<LeaveResponse>> {
    let leave_id = LeaveId::from_str(leave_id.as_str())?;
    let input = LeaveRequestInput::try_from(payload)?;
    let leave = state
        .leave_request_service
        .update(&user, leave_id, input)
        .await?;

    Ok(Json(LeaveResponse::from(leave)))
}

pub async fn cancel_leave_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(leave_id): Path<String>,
) -> ApiResult<Json<LeaveResponse>> {
    let leave_id = LeaveId::from_str(leave_id.as_str())?;
    let leave = state.leave_request_service.cancel(&user, leave_id).await?;

    Ok(Json(LeaveResponse::from(leave)))
}

pub async fn delete_leave_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(leave_id): Path<String>,
) -> ApiResult<StatusCode> {
    let leave_id = LeaveId::from_str(leave_id.as_str())?;
    state.leave_request_service.delete(&user, leave_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
