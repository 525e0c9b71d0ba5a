//! HTML pages end to end: redirects, flash cookie and not-found pages

mod common;

use common::{library, set_cookie, spawn_app, system_user, OWNER_ID};
use pretty_assertions::assert_eq;
use reqwest::header::{COOKIE, LOCATION, REFERER};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_root_redirects_to_libraries() {
    let backend = MockServer::start().await;
    let app = spawn_app(&backend).await;

    let response = app.client.get(app.url("/")).send().await.unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(location(&response), "/libraries");
}

#[tokio::test]
async fn test_store_success_flashes_on_index() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/libraries"))
        .and(body_json(json!({
            "name": "Lib",
            "description": "d",
            "isPublic": false,
            "ownerId": OWNER_ID
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(library("lib1")))
        .expect(1)
        .mount(&backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/libraries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([library("lib1")])))
        .mount(&backend)
        .await;
    let app = spawn_app(&backend).await;

    let response = app
        .client
        .post(app.url("/libraries"))
        .form(&[
            ("name", "Lib"),
            ("description", "d"),
            ("isPublic", "0"),
            ("ownerId", OWNER_ID),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 303);
    assert_eq!(location(&response), "/libraries");
    let flash = set_cookie(&response, "flash").expect("flash cookie");

    let page = app
        .client
        .get(app.url("/libraries"))
        .header(COOKIE, flash)
        .send()
        .await
        .unwrap();
    assert_eq!(page.status(), 200);
    let html = page.text().await.unwrap();
    assert!(html.contains("Library created successfully."));
    assert!(html.contains("href=\"/libraries/lib1\""));
}

#[tokio::test]
async fn test_invalid_form_goes_back_without_backend_call() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&backend)
        .await;
    let app = spawn_app(&backend).await;

    let response = app
        .client
        .post(app.url("/users"))
        .header(REFERER, format!("{}/users/create", app.address))
        .form(&[
            ("username", "ada"),
            ("email", "not-an-email"),
            ("password", "short"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 303);
    assert_eq!(location(&response), "/users/create");
    let flash = set_cookie(&response, "flash").expect("flash cookie");

    let page = app
        .client
        .get(app.url("/users/create"))
        .header(COOKIE, flash)
        .send()
        .await
        .unwrap();
    let html = page.text().await.unwrap();
    assert!(html.contains("The email field must be a valid email address."));
    assert!(html.contains("The password field must be at least 8 characters."));
    assert!(html.contains("value=\"not-an-email\""));
    assert!(!html.contains("value=\"short\""));
}

#[tokio::test]
async fn test_backend_failure_goes_back_with_error() {
    let backend = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/libraries/lib1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&backend)
        .await;
    let app = spawn_app(&backend).await;

    let response = app
        .client
        .post(app.url("/libraries/lib1/update"))
        .form(&[("name", "Renamed")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 303);
    assert_eq!(location(&response), "/libraries/lib1/edit");
    assert!(set_cookie(&response, "flash").is_some());
}

#[tokio::test]
async fn test_show_missing_user_is_404_page() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/system/users/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&backend)
        .await;
    let app = spawn_app(&backend).await;

    let response = app.client.get(app.url("/users/missing")).send().await.unwrap();
    assert_eq!(response.status(), 404);
    assert!(response.text().await.unwrap().contains("Not Found"));
}

#[tokio::test]
async fn test_show_user_offers_flag_toggles() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/system/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(system_user("u1")))
        .mount(&backend)
        .await;
    let app = spawn_app(&backend).await;

    let html = app
        .client
        .get(app.url("/users/u1"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("Ada Lovelace"));
    assert!(html.contains("action=\"/users/u1/activate\""));
    assert!(html.contains("action=\"/users/u1/unconfirm\""));
}

#[tokio::test]
async fn test_index_shows_backend_error() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/system/users"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&backend)
        .await;
    let app = spawn_app(&backend).await;

    let response = app.client.get(app.url("/users")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("Failed to fetch data from API: /api/system/users"));
    assert!(html.contains("No users found."));
}

#[tokio::test]
async fn test_transition_redirects_to_user() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/system/users/u1/activate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(system_user("u1")))
        .expect(1)
        .mount(&backend)
        .await;
    let app = spawn_app(&backend).await;

    let response = app
        .client
        .post(app.url("/users/u1/activate"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 303);
    assert_eq!(location(&response), "/users/u1");
    assert!(set_cookie(&response, "flash").is_some());
}

#[tokio::test]
async fn test_delete_item_redirects_to_items() {
    let backend = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/libraries/lib1/items/item1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&backend)
        .await;
    let app = spawn_app(&backend).await;

    let response = app
        .client
        .post(app.url("/libraries/lib1/items/item1/delete"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 303);
    assert_eq!(location(&response), "/libraries/lib1/items");
}

#[tokio::test]
async fn test_unknown_page_is_html_404() {
    let backend = MockServer::start().await;
    let app = spawn_app(&backend).await;

    let response = app.client.get(app.url("/nowhere")).send().await.unwrap();
    assert_eq!(response.status(), 404);
    assert!(response.text().await.unwrap().contains("could not be found"));
}

#[tokio::test]
async fn test_links_encode_backend_ids() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/libraries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([library("a b/c?d")])))
        .mount(&backend)
        .await;
    let app = spawn_app(&backend).await;

    let html = app
        .client
        .get(app.url("/libraries"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("href=\"/libraries/a%20b%2Fc%3Fd\""));
    assert!(html.contains("href=\"/libraries/a%20b%2Fc%3Fd/items\""));
}

#[tokio::test]
async fn test_oversized_form_still_flashes_errors() {
    let backend = MockServer::start().await;
    let app = spawn_app(&backend).await;
    let description = "x".repeat(10_000);

    let response = app
        .client
        .post(app.url("/libraries"))
        .form(&[
            ("name", ""),
            ("description", description.as_str()),
            ("isPublic", "1"),
            ("ownerId", OWNER_ID),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 303);
    assert_eq!(location(&response), "/libraries/create");
    let flash = set_cookie(&response, "flash").expect("flash cookie");
    assert!(flash.len() < 4096);

    let html = app
        .client
        .get(app.url("/libraries/create"))
        .header(COOKIE, flash)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("The name field is required."));
    assert!(html.contains(&format!("value=\"{}\"", OWNER_ID)));
}
