// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, seed_company, sheet_cells, FAKE_PNG};
use axum::http::StatusCode;
use serde_json::{json, Value};
use sitemeta::domain::models::company::{Company, CompanyStatus};
use uuid::Uuid;

#[tokio::test]
async fn test_health_and_version() {
    let app = create_test_app().await;

    let response = app.server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.text(), "OK");

    let response = app.server.get("/version").await;
    response.assert_status_ok();
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_scrape_returns_captured_record() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/scrape")
        .json(&json!({ "url": app.site_url("/"), "userId": "user-1" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["name"], "Acme Inc");
    assert_eq!(body["ownerId"], "user-1");
    assert_eq!(body["status"], "captured");
    assert_eq!(body["twitterUrl"], Value::Null);

    let id = body["id"].as_str().unwrap().to_string();
    let screenshot_path = body["screenshotPath"].as_str().unwrap().to_string();
    assert_eq!(screenshot_path, format!("screenshots/{}.png", id));

    // The stored relative path is also the static file route
    let response = app.server.get(&format!("/{}", screenshot_path)).await;
    response.assert_status_ok();
    assert_eq!(&response.as_bytes()[..], FAKE_PNG);
}

#[tokio::test]
async fn test_scrape_failure_is_plain_500() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/scrape")
        .json(&json!({ "url": app.site_url("/broken"), "userId": "user-1" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "Error scraping the website");
    assert_eq!(app.capturer.calls(), 0);
    assert!(app.repository.list(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_company() {
    let app = create_test_app().await;
    let company = seed_company(&app.repository, "user-1", "Acme").await;

    let response = app
        .server
        .get(&format!("/companies/{}", company.id))
        .await;
    response.assert_status_ok();

    let fetched: Company = response.json();
    assert_eq!(fetched.id, company.id);
    assert_eq!(fetched.name.as_deref(), Some("Acme"));
    assert_eq!(fetched.status, CompanyStatus::Pending);
}

#[tokio::test]
async fn test_get_unknown_or_malformed_company_is_404() {
    let app = create_test_app().await;

    let response = app
        .server
        .get(&format!("/companies/{}", Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Company not found");

    let response = app.server.get("/companies/not-a-uuid").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "Company not found");
}

#[tokio::test]
async fn test_list_companies_with_filter() {
    let app = create_test_app().await;
    seed_company(&app.repository, "alice", "Acme").await;
    seed_company(&app.repository, "bob", "Globex").await;

    let response = app.server.get("/companies").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Company>>().len(), 2);

    let response = app
        .server
        .get("/companies")
        .add_query_param("userId", "bob")
        .await;
    response.assert_status_ok();
    let companies: Vec<Company> = response.json();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].name.as_deref(), Some("Globex"));
}

#[tokio::test]
async fn test_delete_companies_ignores_unknown_ids() {
    let app = create_test_app().await;
    let acme = seed_company(&app.repository, "alice", "Acme").await;
    let globex = seed_company(&app.repository, "alice", "Globex").await;

    let response = app
        .server
        .delete("/companies")
        .json(&json!({
            "ids": [acme.id.to_string(), Uuid::new_v4().to_string(), "garbage"]
        }))
        .await;
    response.assert_status_ok();

    assert!(app.repository.find_by_id(acme.id).await.unwrap().is_none());
    assert!(app.repository.find_by_id(globex.id).await.unwrap().is_some());

    // Repeating the request still succeeds
    let response = app
        .server
        .delete("/companies")
        .json(&json!({ "ids": [acme.id.to_string()] }))
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_download_returns_spreadsheet() {
    let app = create_test_app().await;
    let acme = seed_company(&app.repository, "alice", "Acme").await;
    let globex = seed_company(&app.repository, "alice", "Globex").await;

    let response = app
        .server
        .post("/download")
        .json(&json!({ "ids": [globex.id.to_string(), acme.id.to_string()] }))
        .await;
    response.assert_status_ok();

    assert_eq!(
        response.header("content-type").to_str().unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        response.header("content-disposition").to_str().unwrap(),
        "attachment; filename=\"companies.xlsx\""
    );
    assert!(response.as_bytes().starts_with(b"PK"));

    let cells = sheet_cells(response.as_bytes());
    assert_eq!(cells["A1"], "Name");
    assert_eq!(cells["J1"], "Email");
    // Rows follow the order of the requested ids
    assert_eq!(cells["A2"], "Globex");
    assert_eq!(cells["A3"], "Acme");
    // Seeded companies have no description
    assert!(!cells.contains_key("B2"));
    assert!(!cells.contains_key("B3"));
}

#[tokio::test]
async fn test_download_skips_unknown_and_duplicate_ids() {
    let app = create_test_app().await;
    let acme = seed_company(&app.repository, "alice", "Acme").await;
    let globex = seed_company(&app.repository, "alice", "Globex").await;

    let response = app
        .server
        .post("/download")
        .json(&json!({
            "ids": [
                acme.id.to_string(),
                Uuid::new_v4().to_string(),
                "garbage",
                globex.id.to_string(),
                acme.id.to_string()
            ]
        }))
        .await;
    response.assert_status_ok();

    let cells = sheet_cells(response.as_bytes());
    assert_eq!(cells["A2"], "Acme");
    assert_eq!(cells["A3"], "Globex");
    assert!(!cells.contains_key("A4"));
}

#[tokio::test]
async fn test_malformed_bodies_get_plain_text_errors() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/scrape")
        .json(&json!({ "userId": "user-1" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "Error scraping the website");

    let response = app.server.post("/scrape").text("not json").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "Error scraping the website");

    let response = app
        .server
        .post("/download")
        .json(&json!({ "ids": "not-a-list" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "Error generating Excel file");

    let response = app
        .server
        .delete("/companies")
        .json(&json!({ "ids": 42 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "Error deleting companies");

    assert_eq!(app.capturer.calls(), 0);
}

#[tokio::test]
async fn test_download_with_no_known_ids_still_returns_workbook() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/download")
        .json(&json!({ "ids": [Uuid::new_v4().to_string()] }))
        .await;
    response.assert_status_ok();
    assert!(response.as_bytes().starts_with(b"PK"));
}
