mod common;

use axum::http::{Method, StatusCode};
use common::{build_test_router, login, send, USER_ID};
use fintrack_core::testing::test_session;
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn add_list_and_delete_record_history() {
    let (app, store) = build_test_router();
    let token = login(&app).await;

    for (kind, category, amount, date) in [
        ("expense", "Food", 120, "2024-01-05"),
        ("expense", "Rent", 800, "2024-01-01"),
        ("income", "Salary", 3000, "2024-01-25"),
    ] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/transactions",
            Some(&token),
            Some(json!({
                "type": kind,
                "category": category,
                "amount": amount,
                "date": date,
                "note": null,
                "receiptUrl": null
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/transactions?type=expense&to=2024-01-05",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["category"], "Food");
    assert_eq!(records[1]["category"], "Rent");

    let (_, recent) = send(
        &app,
        Method::GET,
        "/api/v1/transactions/recent?limit=1",
        Some(&token),
        None,
    )
    .await;
    let recent = recent.as_array().unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0]["category"], "Salary");

    let id = records[0]["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/transactions/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let actions = store.history_actions(&test_session(USER_ID));
    assert_eq!(actions.len(), 4);
    assert!(actions[0].starts_with("Added expense transaction"));
    assert!(actions[3].starts_with("Deleted expense transaction"));

    let (_, history) = send(&app, Method::GET, "/api/v1/history", Some(&token), None).await;
    assert_eq!(history["records"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn negative_amount_is_rejected() {
    let (app, _store) = build_test_router();
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/transactions",
        Some(&token),
        Some(json!({
            "type": "expense",
            "category": "Food",
            "amount": -1,
            "date": "2024-01-05"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn dashboard_and_period_report() {
    let (app, store) = build_test_router();
    let session = test_session(USER_ID);
    store.seed_expense(&session, "Food", dec!(100), 2024, 1, 3);
    store.seed_expense(&session, "Food", dec!(50), 2024, 1, 4);
    store.seed_expense(&session, "Rent", dec!(400), 2024, 1, 4);
    store.seed_income(&session, "Salary", dec!(1000), 2024, 1, 1);
    let token = login(&app).await;

    let (status, dashboard) = send(
        &app,
        Method::GET,
        "/api/v1/reports/dashboard",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["totalIncome"].as_f64(), Some(1000.0));
    assert_eq!(dashboard["totalExpense"].as_f64(), Some(550.0));
    assert_eq!(dashboard["balance"].as_f64(), Some(450.0));
    assert_eq!(dashboard["expenseByCategory"][0]["category"], "Rent");
    assert_eq!(dashboard["monthly"][0]["month"], "2024-01");

    let (status, report) = send(
        &app,
        Method::GET,
        "/api/v1/reports/period?range=custom&start=2024-01-03&end=2024-01-04",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["transactions"].as_array().unwrap().len(), 3);
    assert_eq!(report["averageDailyExpense"].as_f64(), Some(275.0));
    assert_eq!(report["highestExpenseCategory"], "Rent");

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/reports/period?range=custom&start=2024-01-04",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
