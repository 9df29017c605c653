use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use shiftdesk_application::DirectoryUser;
use shiftdesk_domain::{ONLY_PENDING_DECIDABLE, UserId, UserRole};
use shiftdesk_infrastructure::InMemoryRoleDirectory;
use tower::ServiceExt;

use crate::api_router::build_router;
use crate::api_services::{SchedulingPorts, build_app_state};
use crate::middleware::ACTOR_HEADER;

struct TestApp {
    router: Router,
    admin: UserId,
    employee: UserId,
}

impl TestApp {
    fn new() -> Self {
        let admin = UserId::new();
        let employee = UserId::new();
        let directory = InMemoryRoleDirectory::with_users([
            DirectoryUser {
                user_id: admin,
                display_name: "Ada Admin".to_owned(),
                role: UserRole::Admin,
            },
            DirectoryUser {
                user_id: employee,
                display_name: "Eli Employee".to_owned(),
                role: UserRole::Employee,
            },
        ]);

        let state = build_app_state(SchedulingPorts::in_memory(directory));
        let router =
            build_router(state, "http://localhost:3000").unwrap_or_else(|_| unreachable!());

        Self {
            router,
            admin,
            employee,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        actor: Option<UserId>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(actor) = actor {
            builder = builder.header(ACTOR_HEADER, actor.to_string());
        }
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap_or_else(|_| unreachable!());

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|error| match error {});
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        let payload = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, payload)
    }

    async fn create_shift(&self, day: u32, start: &str, end: &str) -> String {
        let (status, shift) = self
            .send(
                Method::POST,
                "/api/shifts",
                Some(self.admin),
                Some(json!({
                    "assignedTo": self.employee.to_string(),
                    "date": format!("2025-08-{day:02}"),
                    "startTime": start,
                    "endTime": end,
                    "position": "barista",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        shift["id"].as_str().unwrap_or_default().to_owned()
    }

    async fn submit_leave(&self, accepts_swap: bool) -> String {
        let (status, leave) = self
            .send(
                Method::POST,
                "/api/leaves",
                Some(self.employee),
                Some(json!({
                    "startDate": "2025-08-20",
                    "endDate": "2025-08-22",
                    "category": "annual",
                    "reason": "family trip",
                    "acceptsSwap": accepts_swap,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(leave["status"], "pending");
        leave["id"].as_str().unwrap_or_default().to_owned()
    }
}

#[tokio::test]
async fn health_does_not_require_an_actor() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn protected_routes_reject_missing_or_unknown_actors() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/api/requests", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["message"].is_string());

    let (status, _) = app
        .send(Method::GET, "/api/requests", Some(UserId::new()), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn approving_a_plain_leave_deletes_overlapping_shifts() {
    let app = TestApp::new();
    let first = app.create_shift(20, "09:00", "17:00").await;
    let second = app.create_shift(21, "09:00", "17:00").await;
    let kept = app.create_shift(23, "09:00", "17:00").await;
    let leave_id = app.submit_leave(false).await;

    let (status, body) = app
        .send(
            Method::PATCH,
            format!("/api/requests/{leave_id}/approve").as_str(),
            Some(app.admin),
            Some(json!({ "note": "enjoy" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert_eq!(body["decidedBy"], app.admin.to_string());
    assert_eq!(body["decisionNote"], "enjoy");
    assert_eq!(body["reassignedShiftId"], Value::Null);

    let mut deleted: Vec<String> = body["deletedShiftIds"]
        .as_array()
        .map(|values| {
            values
                .iter()
                .filter_map(|value| value.as_str().map(ToOwned::to_owned))
                .collect()
        })
        .unwrap_or_default();
    deleted.sort();
    let mut expected = vec![first, second];
    expected.sort();
    assert_eq!(deleted, expected);

    let (status, shifts) = app
        .send(
            Method::GET,
            format!(
                "/api/users/{}/shifts?from=2025-08-01&to=2025-08-31",
                app.employee
            )
            .as_str(),
            Some(app.employee),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shifts.as_array().map(Vec::len), Some(1));
    assert_eq!(shifts[0]["id"], kept);
}

#[tokio::test]
async fn second_decision_is_a_conflict_with_the_pending_message() {
    let app = TestApp::new();
    let leave_id = app.submit_leave(false).await;
    let uri = format!("/api/requests/{leave_id}/approve");

    let (status, _) = app
        .send(Method::PATCH, uri.as_str(), Some(app.admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(
            Method::PATCH,
            format!("/api/requests/{leave_id}/reject").as_str(),
            Some(app.admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], ONLY_PENDING_DECIDABLE);
}

#[tokio::test]
async fn swap_leave_without_replacement_stays_pending() {
    let app = TestApp::new();
    let leave_id = app.submit_leave(true).await;

    let (status, _) = app
        .send(
            Method::PATCH,
            format!("/api/requests/{leave_id}/approve").as_str(),
            Some(app.admin),
            Some(json!({})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, leave) = app
        .send(
            Method::GET,
            format!("/api/requests/{leave_id}").as_str(),
            Some(app.employee),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(leave["status"], "pending");
}

#[tokio::test]
async fn employees_cannot_decide_requests() {
    let app = TestApp::new();
    let leave_id = app.submit_leave(false).await;

    let (status, _) = app
        .send(
            Method::PATCH,
            format!("/api/requests/{leave_id}/approve").as_str(),
            Some(app.employee),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_and_unknown_ids_are_distinguished() {
    let app = TestApp::new();

    let (status, _) = app
        .send(Method::GET, "/api/requests/not-a-uuid", Some(app.admin), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            Method::GET,
            format!("/api/requests/{}", UserId::new()).as_str(),
            Some(app.admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
