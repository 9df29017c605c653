//! Administrator decisions on leave requests.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use shiftdesk_application::{ApproveLeaveOptions, LeaveListQuery};
use shiftdesk_core::UserIdentity;
use shiftdesk_domain::LeaveId;

use crate::dto::{
    ApproveLeaveRequest, DecisionNoteRequest, LeaveApprovalResponse, LeaveListParams,
    LeaveResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn approve_request_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(leave_id): Path<String>,
    payload: Option<Json<ApproveLeaveRequest>>,
) -> ApiResult<Json<LeaveApprovalResponse>> {
    let leave_id = LeaveId::from_str(leave_id.as_str())?;
    let Json(payload) = payload.unwrap_or_default();
    let options = ApproveLeaveOptions::try_from(payload)?;

    let outcome = state
        .request_gateway
        .approve(&user, leave_id, options)
        .await?;

    Ok(Json(LeaveApprovalResponse::from(outcome)))
}

pub async fn reject_request_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(leave_id): Path<String>,
    payload: Option<Json<DecisionNoteRequest>>,
) -> ApiResult<Json<LeaveResponse>> {
    let leave_id = LeaveId::from_str(leave_id.as_str())?;
    let Json(payload) = payload.unwrap_or_default();

    let leave = state
        .request_gateway
        .reject(&user, leave_id, payload.note)
        .await?;

    Ok(Json(LeaveResponse::from(leave)))
}

pub async fn reconcile_request_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(leave_id): Path<String>,
    payload: Option<Json<ApproveLeaveRequest>>,
) -> ApiResult<Json<LeaveApprovalResponse>> {
    let leave_id = LeaveId::from_str(leave_id.as_str())?;
    let Json(payload) = payload.unwrap_or_default();
    let options = ApproveLeaveOptions::try_from(payload)?;

    let outcome = state
        .request_gateway
        .reconcile(&user, leave_id, options)
        .await?;

    Ok(Json(LeaveApprovalResponse::from(outcome)))
}

pub async fn get_request_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(leave_id): Path<String>,
) -> ApiResult<Json<LeaveResponse>> {
    let leave_id = LeaveId::from_str(leave_id.as_str())?;
    let leave = state.request_gateway.get(&user, leave_id).await?;

    Ok(Json(LeaveResponse::from(leave)))
}

pub async fn list_requests_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(params): Query<LeaveListParams>,
) -> ApiResult<Json<Vec<LeaveResponse>>> {
    let query = LeaveListQuery::try_from(params)?;
    let leaves = state
        .request_gateway
        .list(&user, query)
        .await?
        .into_iter()
        .map(LeaveResponse::from)
        .collect();

    Ok(Json(leaves))
}
