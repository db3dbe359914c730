//! Comprehensive integration tests for the Net Pay Calculation Engine.
//!
//! This test suite covers all calculation scenarios including:
//! - Zero-input baseline
//! - The standard 420000/20% reference scenario
//! - Other-deduction single counting (legacy double-count regression)
//! - HES net add-back
//! - Contribution defaults per pay period
//! - Rule catalogue reads and updates
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use netpay_engine::api::{AppState, create_router};
use netpay_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/ph_payroll").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Compare a JSON decimal string against an expected value numerically.
fn assert_decimal_field(value: &Value, pointer: &str, expected: &str) {
    let actual = value
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("missing field {}", pointer));
    assert_eq!(
        Decimal::from_str(actual).unwrap(),
        decimal(expected),
        "Expected {} at {}, got {}",
        expected,
        pointer,
        actual
    );
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri("/deductions/calculate")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

fn create_request(employee_id: &str, basic_pay: &str, pay_period: &str) -> Value {
    json!({
        "employee_id": employee_id,
        "basic_pay": basic_pay,
        "pay_period": pay_period
    })
}

// =============================================================================
// Calculation Scenarios
// =============================================================================

/// Zero input produces an all-zero result.
#[tokio::test]
async fn test_zero_input_baseline() {
    let router = create_router_for_test();

    let body = json!({
        "employee_id": "emp_zero",
        "basic_pay": "0",
        "pay_period": "2024-06",
        "tax_rate_percent": "0",
        "contributions": { "sss": "0", "philhealth": "0", "pagibig": "0" }
    });

    let (status, json) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["error"], json!(false));
    assert_decimal_field(&json, "/data/net_pay", "0");
    assert_decimal_field(&json, "/data/annual_net_pay", "0");
    assert_decimal_field(&json, "/data/total_deductions", "0");
    assert_decimal_field(&json, "/data/total_other_deductions", "0");
    assert_decimal_field(&json, "/data/hes/net", "0");
}

/// The standard reference scenario: 35000 monthly at 20% with 2024 defaults.
#[tokio::test]
async fn test_standard_scenario_420000_annual_at_20_percent() {
    let router = create_router_for_test();

    let body = create_request("emp_001", "35000", "2024-06");
    let (status, json) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&json, "/data/basic_pay", "35000");
    assert_decimal_field(&json, "/data/tax_amount", "7000");
    assert_decimal_field(&json, "/data/sss_deduction", "1375");
    assert_decimal_field(&json, "/data/philhealth_deduction", "900");
    assert_decimal_field(&json, "/data/pagibig_deduction", "100");
    assert_decimal_field(&json, "/data/total_deductions", "9375");
    assert_decimal_field(&json, "/data/net_pay", "25625");
    assert_decimal_field(&json, "/data/annual_net_pay", "307500");
}

/// Line items summing to X enter total_deductions once. The legacy system
/// double counted them; that figure must not be reproduced.
#[tokio::test]
async fn test_regression_legacy_double_count_not_reproduced() {
    let router = create_router_for_test();

    let mut body = create_request("emp_001", "35000", "2024-06");
    body["additional_deductions"] = json!([
        { "name": "water_bill", "amount": "350" },
        { "name": "mpl", "amount": "650" }
    ]);

    let (status, json) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&json, "/data/total_other_deductions", "1000");
    // Counted once: 9375 + 1000
    assert_decimal_field(&json, "/data/total_deductions", "10375");
    assert_decimal_field(&json, "/data/net_pay", "24625");

    // The double-counted totals would have been 11375 and 23625
    let total = Decimal::from_str(json["data"]["total_deductions"].as_str().unwrap()).unwrap();
    let net = Decimal::from_str(json["data"]["net_pay"].as_str().unwrap()).unwrap();
    assert_ne!(total, decimal("11375"));
    assert_ne!(net, decimal("23625"));
}

/// HES allowances are taxed at the fixed 20% and the net added back.
#[tokio::test]
async fn test_hes_net_added_back_after_deductions() {
    let router = create_router_for_test();

    let mut body = create_request("emp_001", "35000", "2024-06");
    body["hes"] = json!({
        "hes_allowance": "5000",
        "research_incentive": "1000",
        "academic_excellence": "500"
    });

    let (status, json) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&json, "/data/hes/total", "6500");
    assert_decimal_field(&json, "/data/hes/withholding_tax", "1300");
    assert_decimal_field(&json, "/data/hes/net", "5200");
    // 25625 + 5200; HES withholding never joins total_deductions
    assert_decimal_field(&json, "/data/net_pay", "30825");
    assert_decimal_field(&json, "/data/total_deductions", "9375");
}

/// Adding twelve pesos of annual salary adds one peso of untaxed monthly net.
#[tokio::test]
async fn test_salary_linearity_through_api() {
    let base_body = json!({
        "employee_id": "emp_001",
        "basic_pay": "35000",
        "pay_period": "2024-06",
        "tax_rate_percent": "0"
    });
    let raised_body = json!({
        "employee_id": "emp_001",
        "basic_pay": "35001",
        "pay_period": "2024-06",
        "tax_rate_percent": "0"
    });

    let (_, base) = post_calculate(create_router_for_test(), base_body).await;
    let (_, raised) = post_calculate(create_router_for_test(), raised_body).await;

    let base_net = Decimal::from_str(base["data"]["net_pay"].as_str().unwrap()).unwrap();
    let raised_net = Decimal::from_str(raised["data"]["net_pay"].as_str().unwrap()).unwrap();

    assert_eq!(raised_net - base_net, decimal("1"));
}

/// Everything at once, reconciled by hand.
#[tokio::test]
async fn test_full_calculation_with_all_components() {
    let router = create_router_for_test();

    let body = json!({
        "employee_id": "emp_full",
        "basic_pay": "30000",
        "pay_period": "2024-06",
        "tax_rate_percent": "25",
        "contributions": { "sss": "1600" },
        "gsis_loans": { "conso": "2500", "emergency": "800" },
        "additional_deductions": [
            { "name": "sss_loan", "amount": "892.50" },
            { "name": "electric_bill", "amount": "1245.80" },
            { "name": "talong", "amount": "45" }
        ],
        "hes": { "hes_allowance": "4000" }
    });

    let (status, json) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::OK);
    // tax: 30000 * 25% = 7500
    assert_decimal_field(&json, "/data/tax_amount", "7500");
    // contributions: 1600 (override) + 900 + 100 = 2600
    assert_decimal_field(&json, "/data/sss_deduction", "1600");
    assert_decimal_field(&json, "/data/gsis_loans_total", "3300");
    assert_decimal_field(&json, "/data/total_other_deductions", "2183.30");
    // 7500 + 2600 + 3300 + 2183.30
    assert_decimal_field(&json, "/data/total_deductions", "15583.30");
    // hes: 4000 total, 800 withheld, 3200 net
    assert_decimal_field(&json, "/data/hes/net", "3200.00");
    // 30000 - 15583.30 + 3200
    assert_decimal_field(&json, "/data/net_pay", "17616.70");
    assert_decimal_field(&json, "/data/annual_net_pay", "211400.40");

    let lines = json["data"]["other_deductions"].as_array().unwrap();
    assert_eq!(lines.len(), 3);
}

/// A 2023 pay period resolves against the 2023 contribution table.
#[tokio::test]
async fn test_contribution_defaults_follow_pay_period() {
    let router = create_router_for_test();

    let body = create_request("emp_001", "35000", "2023-06");
    let (status, json) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&json, "/data/sss_deduction", "1125");
    assert_decimal_field(&json, "/data/philhealth_deduction", "800");
    assert_decimal_field(&json, "/data/pagibig_deduction", "100");
}

/// The audit trace walks through every component of the formula.
#[tokio::test]
async fn test_audit_trace_present_in_response() {
    let router = create_router_for_test();

    let body = create_request("emp_001", "35000", "2024-06");
    let (_, json) = post_calculate(router, body).await;

    let steps = json["data"]["audit_trace"]["steps"].as_array().unwrap();
    let rule_ids: Vec<&str> = steps
        .iter()
        .map(|s| s["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        rule_ids,
        vec![
            "monthly_basic",
            "withholding_tax",
            "mandated_contributions",
            "gsis_loans",
            "other_deductions",
            "hes_subsidy",
            "net_pay_totals",
        ]
    );
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let router = create_router_for_test();

    let (status, json) = send(
        router,
        Request::builder()
            .method("POST")
            .uri("/deductions/calculate")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], json!(true));
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_invalid_pay_period_returns_400() {
    let router = create_router_for_test();

    let body = create_request("emp_001", "35000", "June 2024");
    let (status, json) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    // The period fails serde validation inside the JSON body
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("Invalid pay period"), "got: {}", message);
}

#[tokio::test]
async fn test_unknown_additional_deduction_returns_400() {
    let router = create_router_for_test();

    let mut body = create_request("emp_001", "35000", "2024-06");
    body["additional_deductions"] = json!([{ "name": "tithes", "amount": "100" }]);

    let (status, json) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "DEDUCTION_RULE_NOT_FOUND");
    assert!(json["message"].as_str().unwrap().contains("tithes"));
}

#[tokio::test]
async fn test_tax_rate_above_fifty_returns_400() {
    let router = create_router_for_test();

    let mut body = create_request("emp_001", "35000", "2024-06");
    body["tax_rate_percent"] = json!("50.5");

    let (status, json) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_TAX_RATE");
}

#[tokio::test]
async fn test_negative_line_amount_returns_400() {
    let router = create_router_for_test();

    let mut body = create_request("emp_001", "35000", "2024-06");
    body["additional_deductions"] = json!([{ "name": "okra", "amount": "-10" }]);

    let (status, json) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn test_pay_period_before_all_tables_returns_400() {
    let router = create_router_for_test();

    let body = create_request("emp_001", "35000", "2019-05");
    let (status, json) = post_calculate(router, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "RATE_NOT_FOUND");
}

// =============================================================================
// Rule Catalogue and Tax Brackets
// =============================================================================

#[tokio::test]
async fn test_tax_brackets_served_from_config() {
    let router = create_router_for_test();

    let (status, json) = send(
        router,
        Request::builder()
            .method("GET")
            .uri("/deductions/tax-brackets")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["error"], json!(false));
    let brackets = json["data"].as_array().unwrap();
    assert_eq!(brackets.len(), 6);
    assert_eq!(brackets[0]["lower"], "0");
    assert!(brackets[5].get("upper").is_none());
}

#[tokio::test]
async fn test_rules_list_covers_fixed_line_set() {
    let router = create_router_for_test();

    let (status, json) = send(
        router,
        Request::builder()
            .method("GET")
            .uri("/deductions/rules")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rules = json["data"].as_array().unwrap();
    assert_eq!(rules.len(), 26);
    assert!(
        rules
            .iter()
            .any(|r| r["id"] == "water_bill" && r["category"] == "utility")
    );
    assert!(
        rules
            .iter()
            .any(|r| r["id"] == "sss_loan" && r["category"] == "loan")
    );
}

/// Update a rule default through the API, then watch it flow into a
/// subsequent calculation on the same state.
#[tokio::test]
async fn test_rule_update_then_calculate_flow() {
    let state = create_test_state();

    let (status, json) = send(
        create_router(state.clone()),
        Request::builder()
            .method("PUT")
            .uri("/deductions/rules/annual_dues")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{ "default_amount": "120" }"#))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["default_amount"], "120");

    let body = create_request("emp_001", "35000", "2024-06");
    let (status, json) = post_calculate(create_router(state), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_field(&json, "/data/total_other_deductions", "120");
    assert_decimal_field(&json, "/data/total_deductions", "9495");
    assert_decimal_field(&json, "/data/net_pay", "25505");
}

#[tokio::test]
async fn test_rule_update_unknown_id_returns_404() {
    let router = create_router_for_test();

    let (status, json) = send(
        router,
        Request::builder()
            .method("PUT")
            .uri("/deductions/rules/tithes")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{ "default_amount": "120" }"#))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "DEDUCTION_RULE_NOT_FOUND");
}
