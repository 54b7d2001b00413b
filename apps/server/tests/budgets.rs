mod common;

use axum::http::{Method, StatusCode};
use common::{build_test_router, login, send, USER_ID};
use fintrack_core::testing::test_session;
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn overview_reports_usage_and_alerts() {
    let (app, store) = build_test_router();
    let session = test_session(USER_ID);
    store.seed_budget(&session, "Food", dec!(1000), (2024, 1, 1), (2024, 1, 31));
    store.seed_budget(&session, "Travel", dec!(0), (2024, 1, 1), (2024, 1, 31));
    store.seed_expense(&session, "Food", dec!(900), 2024, 1, 31);
    store.seed_expense(&session, "Travel", dec!(50), 2024, 1, 15);
    store.seed_expense(&session, "Food", dec!(400), 2024, 2, 1);

    let token = login(&app).await;
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/budgets/overview",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["usage"]["spent"].as_f64(), Some(900.0));
    assert_eq!(results[0]["usage"]["percentage"].as_f64(), Some(90.0));
    assert_eq!(results[0]["alert"]["kind"], "approaching");

    assert!(results[1]["usage"]["percentage"].is_null());
    assert_eq!(results[1]["usage"]["displayPercentage"].as_f64(), Some(100.0));
    assert_eq!(results[1]["alert"]["kind"], "exceeded");

    let alerts = body["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 2);
    assert_eq!(
        alerts[0]["message"],
        "You have used 90.00% of the budget for Food"
    );
    assert_eq!(
        alerts[1]["message"],
        "Spending has exceeded the budget for Travel"
    );
    assert_eq!(body["totalSpent"].as_f64(), Some(1350.0));
}

#[tokio::test]
async fn malformed_budgets_are_listed_without_failing_the_overview() {
    let (app, store) = build_test_router();
    let session = test_session(USER_ID);
    store.seed_budget(&session, "Food", dec!(100), (2024, 1, 1), (2024, 1, 31));
    store.seed_malformed_budget(&session, "broken", "amount");

    let token = login(&app).await;
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/budgets/overview",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["malformed"][0]["id"], "broken");
    assert_eq!(body["malformed"][0]["field"], "amount");
}

#[tokio::test]
async fn budget_crud_round_trip() {
    let (app, _store) = build_test_router();
    let token = login(&app).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v1/budgets",
        Some(&token),
        Some(json!({
            "category": "Food",
            "amount": 500,
            "startDate": "2024-03-01",
            "endDate": "2024-03-31"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/budgets/{id}"),
        Some(&token),
        Some(json!({ "amount": 750 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["amount"].as_f64(), Some(750.0));
    assert_eq!(updated["category"], "Food");

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/budgets/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/budgets/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn negative_budget_amount_is_a_bad_request() {
    let (app, _store) = build_test_router();
    let token = login(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/budgets",
        Some(&token),
        Some(json!({
            "category": "Food",
            "amount": -5,
            "startDate": "2024-03-01",
            "endDate": "2024-03-31"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn failed_fetch_maps_to_bad_gateway() {
    let (app, store) = build_test_router();
    let token = login(&app).await;
    store.fail_reads_with("backend unavailable");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/budgets/overview",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("backend unavailable"));
}
