//! End-to-end tests for the style endpoints: multipart create/update,
//! search filters and image cleanup.

mod common;

use actix_web::{test, App};
use serde_json::Value;

use atelier_api::app::configure_api;

use common::{seed_user, test_app};

const BOUNDARY: &str = "----atelier-test-boundary";

/// Builds a `multipart/form-data` body from text fields plus an optional
/// file part under `styleImage`.
fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((file_name, content_type, bytes)) = image {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"styleImage\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(uri: &str, token: &str, body: Vec<u8>) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header(("Authorization", format!("Bearer {token}")))
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

async fn create_style<S, B>(app: &S, token: &str, name: &str) -> Value
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let body = multipart_body(
        &[
            ("name", name),
            ("category", "Wedding"),
            ("description", "Hand-embroidered aso-oke"),
        ],
        Some(("gown.jpg", "image/jpeg", b"\xff\xd8\xff fake jpeg")),
    );
    let req = multipart_request("/api/v1/styles", token, body).to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201);
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn create_style_hosts_the_image() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let body = create_style(&app, &token, "Aso-Oke Classic").await;

    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["style"]["name"], "Aso-Oke Classic");
    assert_eq!(body["data"]["style"]["category"], "Wedding");
    assert!(body["data"]["style"]["imageUrl"]
        .as_str()
        .unwrap()
        .starts_with("https://images.test/"));
    assert_eq!(harness.storage.live_count(), 1);
}

#[actix_web::test]
async fn create_without_image_is_unprocessable() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let body = multipart_body(&[("name", "Aso-Oke Classic"), ("category", "Wedding")], None);
    let req = multipart_request("/api/v1/styles", &token, body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], "styleImage");
    assert_eq!(body["errors"][0]["message"], "Style image is required");
}

#[actix_web::test]
async fn non_image_upload_is_a_bad_request() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let body = multipart_body(
        &[("name", "Aso-Oke Classic"), ("category", "Wedding")],
        Some(("notes.txt", "text/plain", b"not an image at all")),
    );
    let req = multipart_request("/api/v1/styles", &token, body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Not an image. Please upload only images");
    assert_eq!(harness.storage.live_count(), 0);
}

#[actix_web::test]
async fn unknown_category_is_unprocessable() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let body = multipart_body(
        &[("name", "Aso-Oke Classic"), ("category", "Streetwear")],
        Some(("gown.jpg", "image/jpeg", b"bytes")),
    );
    let req = multipart_request("/api/v1/styles", &token, body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], "category");
}

#[actix_web::test]
async fn failed_upload_persists_nothing() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    harness.storage.fail_uploads(true);
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let body = multipart_body(
        &[("name", "Aso-Oke Classic"), ("category", "Wedding")],
        Some(("gown.jpg", "image/jpeg", b"bytes")),
    );
    let req = multipart_request("/api/v1/styles", &token, body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 500);
    assert_eq!(harness.storage.live_count(), 0);

    let req = test::TestRequest::get()
        .uri("/api/v1/styles")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["results"], 0);
}

#[actix_web::test]
async fn search_filters_by_category_and_name() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    create_style(&app, &token, "Aso-Oke Classic").await;

    let casual = multipart_body(
        &[("name", "Ankara Day Dress"), ("category", "Casual")],
        Some(("dress.jpg", "image/jpeg", b"bytes")),
    );
    let req = multipart_request("/api/v1/styles", &token, casual).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::get()
        .uri("/api/v1/styles?category=Casual")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["results"], 1);
    assert_eq!(body["data"]["styles"][0]["name"], "Ankara Day Dress");

    let req = test::TestRequest::get()
        .uri("/api/v1/styles?name=aso")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["results"], 1);
    assert_eq!(body["data"]["styles"][0]["name"], "Aso-Oke Classic");

    let req = test::TestRequest::get()
        .uri("/api/v1/styles?category=Streetwear")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn updating_the_image_discards_the_old_one() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let body = create_style(&app, &token, "Aso-Oke Classic").await;
    let id = body["data"]["style"]["id"].as_str().unwrap().to_string();
    let old_url = body["data"]["style"]["imageUrl"].as_str().unwrap().to_string();

    let update = multipart_body(
        &[("name", "Aso-Oke Deluxe")],
        Some(("deluxe.jpg", "image/jpeg", b"new bytes")),
    );
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/styles/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(update)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["style"]["name"], "Aso-Oke Deluxe");
    assert_ne!(body["data"]["style"]["imageUrl"], old_url);
    // Exactly one image remains hosted: the replacement
    assert_eq!(harness.storage.live_count(), 1);
}

#[actix_web::test]
async fn text_only_update_keeps_the_image() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let body = create_style(&app, &token, "Aso-Oke Classic").await;
    let id = body["data"]["style"]["id"].as_str().unwrap().to_string();
    let old_url = body["data"]["style"]["imageUrl"].as_str().unwrap().to_string();

    let update = multipart_body(&[("description", "Updated notes")], None);
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/styles/{id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(update)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["style"]["imageUrl"], old_url);
    assert_eq!(harness.storage.live_count(), 1);
}

#[actix_web::test]
async fn delete_removes_the_image_and_client_links() {
    let harness = test_app();
    let (_, token) = seed_user(&harness, "tailor@example.com", false).await;
    let app = test::init_service(App::new().configure(configure_api(harness.state.clone()))).await;

    let body = create_style(&app, &token, "Aso-Oke Classic").await;
    let style_id = body["data"]["style"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(serde_json::json!({ "name": "Ngozi Eze", "phone": "+2348012345678" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    let client_id = body["data"]["client"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/clients/{client_id}/styles"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(serde_json::json!({ "styleId": style_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/styles/{style_id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);
    assert_eq!(harness.storage.live_count(), 0);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/clients/{client_id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["styles"].as_array().unwrap().len(), 0);
}
