//! Router-level tests over in-memory services
//!
//! Exercises the HTTP surface end-to-end: gateway identity headers, role
//! gating, the demand pipeline, and the family registry rules.

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use serde_json::{json, Value};

use core_kernel::{ProfileId, Role};

use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState};
use test_utils::assertions::assert_newest_first;
use test_utils::{InMemoryServices, StringFixtures};

struct TestApp {
    server: TestServer,
    services: InMemoryServices,
}

fn spawn_app() -> TestApp {
    let services = InMemoryServices::new();
    let state = AppState {
        demands: services.demands.clone(),
        family: services.family.clone(),
        profiles: services.profiles.clone(),
        config: ApiConfig::default(),
    };
    let server = TestServer::new(create_router(state)).expect("router builds");
    TestApp { server, services }
}

fn header(name: &'static str, value: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(name),
        HeaderValue::from_str(value).expect("header value"),
    )
}

/// Identity headers as the auth gateway would forward them
fn as_user(user_id: ProfileId, name: &str, role: &str) -> Vec<(HeaderName, HeaderValue)> {
    vec![
        header("x-user-id", &user_id.as_uuid().to_string()),
        header("x-user-name", name),
        header("x-user-role", role),
    ]
}

fn demand_body() -> Value {
    json!({
        "service_type": StringFixtures::service_type(),
        "beneficiary_name": StringFixtures::beneficiary_name(),
        "beneficiary_relation": "enfant",
        "amount": "25000",
    })
}

async fn create_demand_as(app: &TestApp, member: ProfileId, name: &str) -> Value {
    let mut request = app.server.post("/api/v1/demands").json(&demand_body());
    for (header_name, header_value) in as_user(member, name, "membre") {
        request = request.add_header(header_name, header_value);
    }
    let response = request.await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

async fn put_status(
    app: &TestApp,
    demand_id: &str,
    reviewer: ProfileId,
    reviewer_name: &str,
    role: &str,
    status: &str,
) -> axum_test::TestResponse {
    let mut request = app
        .server
        .put(&format!("/api/v1/demands/{demand_id}/status"))
        .json(&json!({ "status": status }));
    for (header_name, header_value) in as_user(reviewer, reviewer_name, role) {
        request = request.add_header(header_name, header_value);
    }
    request.await
}

// ============================================================================
// Health and identity
// ============================================================================

#[tokio::test]
async fn test_health_is_public() {
    let app = spawn_app();
    let response = app.server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let app = spawn_app();
    let response = app.server.get("/api/v1/demands").await;
    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_role_sees_empty_list() {
    let app = spawn_app();
    create_demand_as(&app, ProfileId::new(), "Koffi").await;

    let mut request = app.server.get("/api/v1/demands");
    for (name, value) in as_user(ProfileId::new(), "Inconnu", "superviseur") {
        request = request.add_header(name, value);
    }
    let response = request.await;

    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Value>>(), Vec::<Value>::new());
}

// ============================================================================
// Demand pipeline over HTTP
// ============================================================================

#[tokio::test]
async fn test_create_demand_lands_pending_and_notifies() {
    let app = spawn_app();
    let member = ProfileId::new();

    let body = create_demand_as(&app, member, "Koffi Agbodjan").await;

    assert_eq!(body["status"], "en_attente");
    assert_eq!(body["member_name"], "Koffi Agbodjan");
    assert!(body["controller_id"].is_null());
    assert_eq!(app.services.notification_port.sent_count().await, 1);
}

#[tokio::test]
async fn test_create_demand_without_service_type_is_422() {
    let app = spawn_app();

    let mut request = app.server.post("/api/v1/demands").json(&json!({
        "service_type": "",
        "beneficiary_name": "Ama",
    }));
    for (name, value) in as_user(ProfileId::new(), "Koffi", "membre") {
        request = request.add_header(name, value);
    }
    let response = request.await;

    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_member_sees_only_own_demands() {
    let app = spawn_app();
    let alice = ProfileId::new();
    let bob = ProfileId::new();

    create_demand_as(&app, alice, "Alice").await;
    create_demand_as(&app, bob, "Bob").await;
    create_demand_as(&app, alice, "Alice").await;

    let mut request = app.server.get("/api/v1/demands");
    for (name, value) in as_user(alice, "Alice", "membre") {
        request = request.add_header(name, value);
    }
    let response = request.await;
    response.assert_status_ok();

    let listed = response.json::<Vec<Value>>();
    assert_eq!(listed.len(), 2);
    for demand in &listed {
        assert_eq!(demand["member_name"], "Alice");
    }
}

#[tokio::test]
async fn test_full_pipeline_over_http() {
    let app = spawn_app();
    let member = ProfileId::new();
    let controller = ProfileId::new();
    let administrator = ProfileId::new();

    let created = create_demand_as(&app, member, "Koffi").await;
    let id = created["id"].as_str().unwrap().to_string();

    let accepted = put_status(&app, &id, controller, "Chantal", "controleur", "acceptee").await;
    accepted.assert_status_ok();
    let accepted = accepted.json::<Value>();
    assert_eq!(accepted["status"], "acceptee");
    assert!(!accepted["controller_name"].is_null());
    assert!(accepted["administrator_id"].is_null());

    let validated =
        put_status(&app, &id, administrator, "Ade", "administrateur", "validee").await;
    validated.assert_status_ok();
    let validated = validated.json::<Value>();
    assert_eq!(validated["status"], "validee");
    assert!(!validated["administrator_name"].is_null());
    // Controller stamps survive
    assert_eq!(validated["controller_name"], accepted["controller_name"]);
}

#[tokio::test]
async fn test_administrator_cannot_touch_pending_demand() {
    let app = spawn_app();

    let created = create_demand_as(&app, ProfileId::new(), "Koffi").await;
    let id = created["id"].as_str().unwrap().to_string();

    let response =
        put_status(&app, &id, ProfileId::new(), "Ade", "administrateur", "acceptee").await;
    response.assert_status(axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_member_cannot_review() {
    let app = spawn_app();

    let created = create_demand_as(&app, ProfileId::new(), "Koffi").await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = put_status(&app, &id, ProfileId::new(), "Koffi", "membre", "acceptee").await;
    response.assert_status(axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_rejected_is_terminal_over_http() {
    let app = spawn_app();
    let controller = ProfileId::new();

    let created = create_demand_as(&app, ProfileId::new(), "Koffi").await;
    let id = created["id"].as_str().unwrap().to_string();

    put_status(&app, &id, controller, "Chantal", "controleur", "rejetee")
        .await
        .assert_status_ok();

    let second = put_status(&app, &id, controller, "Chantal", "controleur", "rejetee").await;
    second.assert_status(axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_administrator_queue_is_accepted_only() {
    let app = spawn_app();
    let controller = ProfileId::new();

    let first = create_demand_as(&app, ProfileId::new(), "A").await;
    create_demand_as(&app, ProfileId::new(), "B").await;

    let id = first["id"].as_str().unwrap().to_string();
    put_status(&app, &id, controller, "Chantal", "controleur", "acceptee")
        .await
        .assert_status_ok();

    let mut request = app.server.get("/api/v1/demands");
    for (name, value) in as_user(ProfileId::new(), "Ade", "administrateur") {
        request = request.add_header(name, value);
    }
    let response = request.await;
    response.assert_status_ok();

    let queue = response.json::<Vec<Value>>();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0]["status"], "acceptee");
}

#[tokio::test]
async fn test_controller_list_is_everything_newest_first() {
    let app = spawn_app();

    create_demand_as(&app, ProfileId::new(), "A").await;
    create_demand_as(&app, ProfileId::new(), "B").await;
    create_demand_as(&app, ProfileId::new(), "C").await;

    let all = app
        .services
        .demands
        .list_for_role(Role::Controller, None)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
    assert_newest_first(&all);
}

#[tokio::test]
async fn test_delete_demand_requires_administrator() {
    let app = spawn_app();

    let created = create_demand_as(&app, ProfileId::new(), "Koffi").await;
    let id = created["id"].as_str().unwrap().to_string();

    let mut forbidden = app.server.delete(&format!("/api/v1/demands/{id}"));
    for (name, value) in as_user(ProfileId::new(), "Koffi", "membre") {
        forbidden = forbidden.add_header(name, value);
    }
    forbidden
        .await
        .assert_status(axum::http::StatusCode::FORBIDDEN);

    let mut allowed = app.server.delete(&format!("/api/v1/demands/{id}"));
    for (name, value) in as_user(ProfileId::new(), "Ade", "administrateur") {
        allowed = allowed.add_header(name, value);
    }
    allowed
        .await
        .assert_status(axum::http::StatusCode::NO_CONTENT);
}

// ============================================================================
// Family registry over HTTP
// ============================================================================

fn family_body(relation: &str) -> Value {
    json!({
        "first_name": "Ama",
        "last_name": "Agbodjan",
        "national_id": StringFixtures::national_id(),
        "birth_certificate_ref": StringFixtures::birth_certificate_ref(),
        "date_of_birth": "2015-06-01",
        "relation": relation,
    })
}

async fn add_family_member_as(
    app: &TestApp,
    owner: ProfileId,
    body: &Value,
) -> axum_test::TestResponse {
    let mut request = app.server.post("/api/v1/family").json(body);
    for (name, value) in as_user(owner, "Koffi", "membre") {
        request = request.add_header(name, value);
    }
    request.await
}

#[tokio::test]
async fn test_add_dependent_with_document() {
    let app = spawn_app();
    let owner = ProfileId::new();

    let mut body = family_body("enfant");
    body["justification_document"] = json!({
        "file_name": "acte.pdf",
        "content_type": "application/pdf",
        "data": "aGVsbG8=",
    });

    let response = add_family_member_as(&app, owner, &body).await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let member = response.json::<Value>();
    assert_eq!(member["relation"], "enfant");
    assert_eq!(member["justification_document"]["nom"], "acte.pdf");
    assert_eq!(app.services.storage.upload_count().await, 1);
}

#[tokio::test]
async fn test_second_spouse_is_conflict() {
    let app = spawn_app();
    let owner = ProfileId::new();

    add_family_member_as(&app, owner, &family_body("epouse"))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = add_family_member_as(&app, owner, &family_body("epoux")).await;
    response.assert_status(axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_relation_is_bad_request() {
    let app = spawn_app();
    let response = add_family_member_as(&app, ProfileId::new(), &family_body("cousin")).await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_eligibility_probe() {
    let app = spawn_app();
    let owner = ProfileId::new();

    add_family_member_as(&app, owner, &family_body("epouse"))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let mut request = app.server.get("/api/v1/family/eligibility/epoux");
    for (name, value) in as_user(owner, "Koffi", "membre") {
        request = request.add_header(name, value);
    }
    let response = request.await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["can_add"], false);

    // Unknown relation answers false rather than erroring
    let mut request = app.server.get("/api/v1/family/eligibility/cousin");
    for (name, value) in as_user(owner, "Koffi", "membre") {
        request = request.add_header(name, value);
    }
    let response = request.await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["can_add"], false);
}

#[tokio::test]
async fn test_update_with_omitted_document_keeps_reference() {
    let app = spawn_app();
    let owner = ProfileId::new();

    let mut body = family_body("enfant");
    body["justification_document"] = json!({
        "file_name": "acte.pdf",
        "content_type": "application/pdf",
        "data": "aGVsbG8=",
    });
    let created = add_family_member_as(&app, owner, &body).await.json::<Value>();
    let id = created["id"].as_str().unwrap().to_string();
    let document_before = created["justification_document"].clone();

    let mut request = app
        .server
        .put(&format!("/api/v1/family/{id}"))
        .json(&json!({ "first_name": "Afiavi" }));
    for (name, value) in as_user(owner, "Koffi", "membre") {
        request = request.add_header(name, value);
    }
    let response = request.await;
    response.assert_status_ok();

    let updated = response.json::<Value>();
    assert_eq!(updated["first_name"], "Afiavi");
    assert_eq!(updated["justification_document"], document_before);
}

#[tokio::test]
async fn test_cannot_touch_another_members_dependent() {
    let app = spawn_app();
    let owner = ProfileId::new();
    let intruder = ProfileId::new();

    let created = add_family_member_as(&app, owner, &family_body("enfant"))
        .await
        .json::<Value>();
    let id = created["id"].as_str().unwrap().to_string();

    let mut request = app.server.delete(&format!("/api/v1/family/{id}"));
    for (name, value) in as_user(intruder, "Autre", "membre") {
        request = request.add_header(name, value);
    }
    request
        .await
        .assert_status(axum::http::StatusCode::FORBIDDEN);
}

// ============================================================================
// Profile administration over HTTP
// ============================================================================

#[tokio::test]
async fn test_profile_listing_is_administrator_only() {
    let app = spawn_app();

    let mut forbidden = app.server.get("/api/v1/profiles");
    for (name, value) in as_user(ProfileId::new(), "Koffi", "membre") {
        forbidden = forbidden.add_header(name, value);
    }
    forbidden
        .await
        .assert_status(axum::http::StatusCode::FORBIDDEN);

    let mut allowed = app.server.get("/api/v1/profiles");
    for (name, value) in as_user(ProfileId::new(), "Ade", "administrateur") {
        allowed = allowed.add_header(name, value);
    }
    allowed.await.assert_status_ok();
}

#[tokio::test]
async fn test_activate_suspend_cycle_leaves_audit_trail() {
    let app = spawn_app();
    let admin = ProfileId::new();

    let mut create = app.server.post("/api/v1/profiles").json(&json!({
        "email": "nouveau@exemple.bj",
        "first_name": "Sena",
        "last_name": "Akplogan",
        "role": "membre",
    }));
    for (name, value) in as_user(admin, "Ade", "administrateur") {
        create = create.add_header(name, value);
    }
    let created = create.await;
    created.assert_status(axum::http::StatusCode::CREATED);
    let id = created.json::<Value>()["id"].as_str().unwrap().to_string();

    let mut activate = app.server.post(&format!("/api/v1/profiles/{id}/activate"));
    for (name, value) in as_user(admin, "Ade", "administrateur") {
        activate = activate.add_header(name, value);
    }
    let activated = activate.await;
    activated.assert_status_ok();
    assert_eq!(activated.json::<Value>()["is_active"], true);

    let mut suspend = app.server.post(&format!("/api/v1/profiles/{id}/suspend"));
    for (name, value) in as_user(admin, "Ade", "administrateur") {
        suspend = suspend.add_header(name, value);
    }
    let suspended = suspend.await;
    suspended.assert_status_ok();
    assert_eq!(suspended.json::<Value>()["is_active"], false);

    assert_eq!(app.services.audit_port.entry_count().await, 2);
}
