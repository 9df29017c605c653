use shiftdesk_application::{
    AuthorizationService, LeaveRequestService, RequestGateway, ShiftService, SwapRequestService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub request_gateway: RequestGateway,
    pub leave_request_service: LeaveRequestService,
    pub shift_service: ShiftService,
    pub swap_request_service: SwapRequestService,
    pub storage_backend: &'static str,
}
