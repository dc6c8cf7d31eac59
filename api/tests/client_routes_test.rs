//! End-to-end tests for the client endpoints: CRUD, search and style
//! linking, all behind the bearer-token guard.

mod common;

use actix_web::{test, App};
use serde_json::Value;
use uuid::Uuid;

use atelier_api::app::configure_api;
use atelier_core::domain::entities::{Style, StyleCategory};
use atelier_core::repositories::StyleRepository;

use common::{seed_user, test_app};

fn client_payload(name: &str, phone: &str) -> Value {
    serde_json::json!({
        "name": name,
        "phone": phone,
        "email": "CLIENT@Example.com",
        "eventType": "Wedding",
        "measurements": [
            { "name": "bust", "value": "92cm" },
            { "name": "waist", "value": "74cm" },
        ],
    })
}

async fn seed_style(harness: &common::TestApp, name: &str) -> Uuid {
    let style = Style::new(
        name.to_string(),
        StyleCategory::Wedding,
        format!("https://images.test/{name}.jpg"),
        format!("test/{name}"),
    );
    harness.styles.create(style).await.unwrap().id
}

#[actix_web::test]
async fn client_endpoints_require_authentication() {
    let harness = test_app();
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let req = test::TestRequest::get().uri("/api/v1/clients").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "You are not logged in. Please log in to get access"
    );
}

#[actix_web::test]
async fn create_and_fetch_a_client() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(client_payload("Ngozi Eze", "+2348012345678"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "success");
    let id = body["data"]["client"]["id"].as_str().unwrap().to_string();
    // Email is normalized on the way in
    assert_eq!(body["data"]["client"]["email"], "client@example.com");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/clients/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["client"]["name"], "Ngozi Eze");
    assert_eq!(body["data"]["styles"].as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn missing_phone_is_an_unprocessable_entity() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(serde_json::json!({ "name": "Ngozi Eze", "phone": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let body: Value = test::read_body_json(resp).await;
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"phone"));
}

#[actix_web::test]
async fn malformed_phone_is_rejected_with_the_value_echoed() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(serde_json::json!({ "name": "Ngozi Eze", "phone": "not a number" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], "phone");
    assert_eq!(body["errors"][0]["message"], "Please provide a valid phone number");
}

#[actix_web::test]
async fn malformed_id_is_a_bad_request_not_a_miss() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/clients/not-a-uuid")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid id: not-a-uuid");
}

#[actix_web::test]
async fn unknown_client_is_a_404() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/clients/{}", Uuid::new_v4()))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn search_filters_by_name_and_event_type() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    for (name, phone, event) in [
        ("Ngozi Eze", "+2348012345678", "Wedding"),
        ("Adaeze Okafor", "+2348098765432", "Graduation"),
    ] {
        let mut payload = client_payload(name, phone);
        payload["eventType"] = Value::String(event.to_string());
        let req = test::TestRequest::post()
            .uri("/api/v1/clients")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/clients?name=ngozi")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["results"], 1);
    assert_eq!(body["data"]["clients"][0]["name"], "Ngozi Eze");

    let req = test::TestRequest::get()
        .uri("/api/v1/clients?eventType=grad")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["results"], 1);
    assert_eq!(body["data"]["clients"][0]["name"], "Adaeze Okafor");
}

#[actix_web::test]
async fn update_and_delete_a_client() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(client_payload("Ngozi Eze", "+2348012345678"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let id = body["data"]["client"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/clients/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(serde_json::json!({ "eventType": "Engagement" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["client"]["eventType"], "Engagement");
    // Untouched fields survive a partial update
    assert_eq!(body["data"]["client"]["name"], "Ngozi Eze");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/clients/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/clients/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn style_links_attach_once_and_detach_idempotently() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let style_id = seed_style(&harness, "aso-oke-classic").await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(client_payload("Ngozi Eze", "+2348012345678"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let client_id = body["data"]["client"]["id"].as_str().unwrap().to_string();

    let link_uri = format!("/api/v1/clients/{client_id}/styles");

    let req = test::TestRequest::post()
        .uri(&link_uri)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(serde_json::json!({ "styleId": style_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["styles"][0]["name"], "aso-oke-classic");

    // The linked styles list shows it
    let req = test::TestRequest::get()
        .uri(&link_uri)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["results"], 1);

    // Second link of the same pair is a conflict
    let req = test::TestRequest::post()
        .uri(&link_uri)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(serde_json::json!({ "styleId": style_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    // Unlink removes it; unlinking again is a no-op
    for _ in 0..2 {
        let req = test::TestRequest::delete()
            .uri(&format!("{link_uri}/{style_id}"))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["styles"].as_array().unwrap().len(), 0);
    }
}

#[actix_web::test]
async fn linking_an_unknown_style_is_a_404() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(client_payload("Ngozi Eze", "+2348012345678"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let client_id = body["data"]["client"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/clients/{client_id}/styles"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(serde_json::json!({ "styleId": Uuid::new_v4() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn duplicate_phone_is_a_conflict() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(client_payload("Ngozi Eze", "+2348012345678"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(client_payload("Someone Else", "+2348012345678"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
}
