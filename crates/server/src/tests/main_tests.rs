use super::*;
use axum::{
    body::{self, Body},
    http::{header, Request, Response},
};
use serde_json::{json, Value};
use shared::protocol::TaskEvent;
use tower::ServiceExt;

use crate::config::Settings;

fn test_settings() -> Settings {
    Settings {
        password_iterations: 1_000,
        ..Settings::default()
    }
}

async fn test_app() -> (Router, ApiContext) {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let api = ApiContext::seeded(storage);
    let app = build_router(Arc::new(AppState {
        api: api.clone(),
        settings: test_settings(),
    }));
    (app, api)
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("response")
}

fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
}

/// Registers a user, logs in and returns the `name=value` cookie pair.
async fn sign_in(app: &Router) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/register",
            None,
            json!({"name": "Ada Admin", "email": "ada@crm.dev", "password": "secret99"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = send(
        app,
        json_request(
            "POST",
            "/login",
            None,
            json!({"email": "ada@crm.dev", "password": "secret99"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .expect("set-cookie");
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Max-Age=604800"));
    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

#[tokio::test]
async fn healthz_reports_ok_when_storage_is_ready() {
    let (app, _api) = test_app().await;
    let response = send(&app, get_request("/healthz", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn protected_paths_redirect_to_login_without_session() {
    let (app, _api) = test_app().await;
    for uri in ["/dashboard", "/customers", "/orders/ORD-001", "/tasks/events", "/account"] {
        let response = send(&app, get_request(uri, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login");
    }

    let response = send(&app, get_request("/customers", Some("crm_session=forged"))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn me_reports_current_user_or_401() {
    let (app, _api) = test_app().await;
    let response = send(&app, get_request("/api/me", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, json!({"user": null}));

    let cookie = sign_in(&app).await;
    let response = send(&app, get_request("/api/me", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"user": {"name": "Ada Admin", "email": "ada@crm.dev"}})
    );
}

#[tokio::test]
async fn signed_in_login_page_redirects_to_dashboard() {
    let (app, _api) = test_app().await;
    let response = send(&app, get_request("/login", None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = sign_in(&app).await;
    let response = send(&app, get_request("/login", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let response = send(&app, get_request("/account", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let account = body_json(response).await;
    assert_eq!(account["role"], "agent");
}

#[tokio::test]
async fn bad_credentials_and_duplicate_registration_are_rejected() {
    let (app, _api) = test_app().await;
    let _cookie = sign_in(&app).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/login",
            None,
            json!({"email": "ada@crm.dev", "password": "wrong-pass"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["message"], "Invalid email or password");

    let response = send(
        &app,
        json_request(
            "POST",
            "/register",
            None,
            json!({"name": "Ada Again", "email": " ADA@crm.dev ", "password": "secret99"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["message"], "Email already registered");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let (app, _api) = test_app().await;
    let cookie = sign_in(&app).await;

    let response = send(&app, json_request("POST", "/logout", Some(&cookie), json!({}))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    let cleared = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .expect("set-cookie");
    assert!(cleared.contains("Max-Age=0"));

    let response = send(&app, get_request("/dashboard", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn customer_table_select_and_bulk_delete() {
    let (app, api) = test_app().await;
    let cookie = sign_in(&app).await;

    let response = send(&app, get_request("/customers", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(view["totalRows"], 5);
    assert_eq!(view["rowsPerPage"], 10);

    for id in ["1", "2"] {
        let response = send(
            &app,
            json_request(
                "POST",
                "/customers/commands",
                Some(&cookie),
                json!({"type": "select_row", "payload": {"id": id, "checked": true}}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = send(
        &app,
        json_request(
            "POST",
            "/customers/commands",
            Some(&cookie),
            json!({"type": "delete_selected"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(view["totalRows"], 3);
    assert_eq!(view["selectedCount"], 0);
    assert_eq!(api.workspace.customers.len().await, 3);
}

#[tokio::test]
async fn customer_add_edit_and_comment() {
    let (app, _api) = test_app().await;
    let cookie = sign_in(&app).await;
    let draft = json!({
        "name": "Nia Okafor",
        "email": "nia@okafor.dev",
        "phone": "+1 555 0199",
        "status": "Lead"
    });

    let response = send(&app, json_request("POST", "/customers", Some(&cookie), draft)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_str().expect("id").to_string();

    let response = send(&app, get_request("/customers", Some(&cookie))).await;
    let view = body_json(response).await;
    assert_eq!(view["rows"][0]["id"], id.as_str());

    let response = send(
        &app,
        json_request(
            "PUT",
            &format!("/customers/{id}"),
            Some(&cookie),
            json!({
                "name": "Nia Okafor",
                "email": "nia@okafor.dev",
                "phone": "+1 555 0199",
                "status": "Active",
                "notes": "Prefers email"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "Active");

    let response = send(
        &app,
        json_request(
            "POST",
            &format!("/customers/{id}/comments"),
            Some(&cookie),
            json!({"text": "Called back\n---\nwants a demo"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["author"], "Ada Admin");

    let response = send(&app, get_request(&format!("/customers/{id}/notes"), Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let notes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let notes = String::from_utf8(notes.to_vec()).expect("utf8");
    assert!(notes.starts_with("Prefers email"));
    assert!(notes.contains("Comment by Ada Admin"));
}

#[tokio::test]
async fn invalid_draft_and_unknown_id_map_to_status_codes() {
    let (app, _api) = test_app().await;
    let cookie = sign_in(&app).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/customers",
            Some(&cookie),
            json!({"name": "", "email": "x@y.z", "phone": "+1 555 0100", "status": "Lead"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "validation");

    let response = send(&app, get_request("/orders/ORD-999", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(
        &app,
        json_request(
            "POST",
            "/agents/commands",
            Some(&cookie),
            json!({"type": "confirm_delete"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn task_board_filters_and_moves_publish_events() {
    let (app, api) = test_app().await;
    let cookie = sign_in(&app).await;
    let mut events = api.tasks.subscribe();

    let response = send(&app, get_request("/tasks?category=all&priority=LOW", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let board = body_json(response).await;
    let lanes = board["lanes"].as_array().expect("lanes");
    assert_eq!(lanes.len(), 4);
    assert_eq!(lanes[0]["column"], "todo");
    for lane in lanes {
        for task in lane["tasks"].as_array().expect("tasks") {
            assert_eq!(task["priority"], "LOW");
        }
    }

    let response = send(&app, get_request("/tasks?category=URGENT", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        json_request("POST", "/tasks/1/move", Some(&cookie), json!({"column": "done"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["column"], "done");

    match events.recv().await.expect("event") {
        TaskEvent::Moved { id, column } => {
            assert_eq!(id, "1");
            assert_eq!(column.as_str(), "done");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn task_crud_and_table_view() {
    let (app, api) = test_app().await;
    let cookie = sign_in(&app).await;
    let before = api.tasks.snapshot().await.len();

    let response = send(
        &app,
        json_request(
            "POST",
            "/tasks",
            Some(&cookie),
            json!({
                "title": "Write release notes",
                "description": "Summarise the sprint",
                "category": "CONTENT",
                "priority": "MEDIUM",
                "column": "todo"
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_str().expect("id").to_string();

    let response = send(&app, get_request("/tasks/table", Some(&cookie))).await;
    let view = body_json(response).await;
    assert_eq!(view["totalRows"], before + 1);

    let response = send(
        &app,
        Request::delete(format!("/tasks/{id}"))
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(api.tasks.snapshot().await.len(), before);

    let response = send(
        &app,
        Request::delete(format!("/tasks/{id}"))
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_and_analytics_share_aggregates() {
    let (app, _api) = test_app().await;
    let cookie = sign_in(&app).await;

    let dashboard = body_json(send(&app, get_request("/dashboard", Some(&cookie))).await).await;
    let analytics = body_json(send(&app, get_request("/analytics", Some(&cookie))).await).await;
    assert_eq!(dashboard, analytics);
    assert_eq!(dashboard["customerCount"], 5);
    assert!(dashboard["topSelling"].as_array().expect("top").len() <= 3);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let app = build_router(Arc::new(AppState {
        api: ApiContext::seeded(storage),
        settings: Settings {
            max_body_bytes: 16,
            ..test_settings()
        },
    }));

    let payload =
        json!({"name": "Long Body", "email": "long@body.dev", "password": "secret99"}).to_string();
    let request = Request::post("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, payload.len())
        .body(Body::from(payload))
        .expect("request");
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn replacing_the_board_notifies_subscribers() {
    let (app, api) = test_app().await;
    let cookie = sign_in(&app).await;
    let mut events = api.tasks.subscribe();

    let response = send(
        &app,
        json_request(
            "PUT",
            "/tasks",
            Some(&cookie),
            json!([{
                "id": "7",
                "title": "Restore board",
                "description": "Load the saved sprint",
                "category": "MEETING",
                "priority": "HIGH",
                "column": "inreview",
                "lastAdded": "Last 1 day ago"
            }]),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let board = body_json(response).await;
    assert_eq!(board["lanes"][2]["column"], "inreview");
    assert_eq!(board["lanes"][2]["tasks"][0]["id"], "7");
    assert_eq!(api.tasks.snapshot().await.len(), 1);

    match events.recv().await.expect("event") {
        TaskEvent::Replaced { tasks } => {
            assert_eq!(tasks.len(), 1);
            assert_eq!(tasks[0].title, "Restore board");
        }
        other => panic!("unexpected event {other:?}"),
    }
}
