mod cors;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, patch, post, put};
use shiftdesk_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route("/api/requests", get(handlers::requests::list_requests_handler))
        .route(
            "/api/requests/{leave_id}",
            get(handlers::requests::get_request_handler),
        )
        .route(
            "/api/requests/{leave_id}/approve",
            patch(handlers::requests::approve_request_handler),
        )
        .route(
            "/api/requests/{leave_id}/reject",
            patch(handlers::requests::reject_request_handler),
        )
        .route(
            "/api/requests/{leave_id}/reconcile",
            post(handlers::requests::reconcile_request_handler),
        )
        .route("/api/leaves", post(handlers::leaves::submit_leave_handler))
        .route(
            "/api/leaves/{leave_id}",
            put(handlers::leaves::update_leave_handler)
                .delete(handlers::leaves::delete_leave_handler),
        )
        .route(
            "/api/leaves/{leave_id}/cancel",
            patch(handlers::leaves::cancel_leave_handler),
        )
        .route("/api/shifts", post(handlers::shifts::create_shift_handler))
        .route(
            "/api/shifts/{shift_id}",
            put(handlers::shifts::update_shift_handler)
                .delete(handlers::shifts::delete_shift_handler),
        )
        .route(
            "/api/users/{user_id}/shifts",
            get(handlers::shifts::list_user_shifts_handler),
        )
        .route("/api/swaps", post(handlers::swaps::submit_swap_handler))
        .route(
            "/api/swaps/{swap_id}/approve",
            patch(handlers::swaps::approve_swap_handler),
        )
        .route(
            "/api/swaps/{swap_id}/reject",
            patch(handlers::swaps::reject_swap_handler),
        )
        .route_layer(from_fn_with_state(app_state.clone(), middleware::require_actor));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
