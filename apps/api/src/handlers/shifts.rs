use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use shiftdesk_core::UserIdentity;
use shiftdesk_domain::{ShiftAssignmentInput, ShiftId, UserId};

use crate::dto::{SaveShiftRequest, ShiftRangeParams, ShiftResponse, parse_date};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn create_shift_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<SaveShiftRequest>,
) -> ApiResult<(StatusCode, Json<ShiftResponse>)> {
    let input = ShiftAssignmentInput::try_from(payload)?;
    let shift = state.shift_service.create(&user, input).await?;

    Ok((StatusCode::CREATED, Json(ShiftResponse::from(shift))))
}

pub async fn update_shift_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(shift_id): Path<String>,
    Json(payload): Json<SaveShiftRequest>,
) -> ApiResult<Json<ShiftResponse>> {
    let shift_id = ShiftId::from_str(shift_id.as_str())?;
    let input = ShiftAssignmentInput::try_from(payload)?;
    let shift = state.shift_service.update(&user, shift_id, input).await?;

    Ok(Json(ShiftResponse::from(shift)))
}

pub async fn delete_shift_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(shift_id): Path<String>,
) -> ApiResult<StatusCode> {
    let shift_id = ShiftId::from_str(shift_id.as_str())?;
    state.shift_service.delete(&user, shift_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_user_shifts_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
    Query(range): Query<ShiftRangeParams>,
) -> ApiResult<Json<Vec<ShiftResponse>>> {
    let user_id = UserId::from_str(user_id.as_str())?;
    let from = parse_date("from", range.from.as_str())?;
    let to = parse_date("to", range.to.as_str())?;

    let shifts = state
        .shift_service
        .list_for_user(&user, user_id, from, to)
        .await?
        .into_iter()
        .map(ShiftResponse::from)
        .collect();

    Ok(Json(shifts))
}
