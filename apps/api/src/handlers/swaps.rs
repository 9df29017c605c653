use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use shiftdesk_application::SubmitSwapInput;
use shiftdesk_core::UserIdentity;
use shiftdesk_domain::SwapId;

use crate::dto::{CreateSwapRequest, DecisionNoteRequest, SwapResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn submit_swap_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateSwapRequest>,
) -> ApiResult<(StatusCode, Json<SwapResponse>)> {
    let input = SubmitSwapInput::try_from(payload)?;
    let swap = state.swap_request_service.submit(&user, input).await?;

    Ok((StatusCode::CREATED, Json(SwapResponse::from(swap))))
}

pub async fn approve_swap_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(swap_id): Path<String>,
    payload: Option<Json<DecisionNoteRequest>>,
) -> ApiResult<Json<SwapResponse>> {
    let swap_id = SwapId::from_str(swap_id.as_str())?;
    let Json(payload) = payload.unwrap_or_default();
    let swap = state
        .swap_request_service
        .approve(&user, swap_id, payload.note)
        .await?;

    Ok(Json(SwapResponse::from(swap)))
}

pub async fn reject_swap_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(swap_id): Path<String>,
    payload: Option<Json<DecisionNoteRequest>>,
) -> ApiResult<Json<SwapResponse>> {
    let swap_id = SwapId::from_str(swap_id.as_str())?;
    let Json(payload) = payload.unwrap_or_default();
    let swap = state
        .swap_request_service
        .reject(&user, swap_id, payload.note)
        .await?;

    Ok(Json(SwapResponse::from(swap)))
}
