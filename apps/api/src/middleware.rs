use std::str::FromStr;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use shiftdesk_core::{AppError, UserIdentity};
use shiftdesk_domain::UserId;

use crate::error::ApiResult;
use crate::state::AppState;

/// Header carrying the caller id asserted by the upstream auth layer.
pub const ACTOR_HEADER: &str = "x-actor-id";

pub async fn require_actor(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let raw_actor = request
        .headers()
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;
    let actor_id = UserId::from_str(raw_actor)
        .map_err(|_| AppError::Unauthorized(format!("malformed {ACTOR_HEADER} header")))?;

    let actor = state.authorization_service.resolve_actor(actor_id).await?;
    request.extensions_mut().insert(UserIdentity::new(
        actor.user_id.as_uuid(),
        actor.display_name,
    ));

    Ok(next.run(request).await)
}
