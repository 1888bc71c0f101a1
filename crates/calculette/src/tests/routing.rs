use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::clients::client_router;
use crate::settings::{settings_router, CostSettingsService};
use crate::simulation::simulation_router;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request builds")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn simulation_body(client_id: &str) -> serde_json::Value {
    json!({
        "resourceProfile": { "kind": "FREELANCE", "hourlyRate": "80.47" },
        "plannedHours": "100",
        "clientId": client_id,
        "proposedBillRate": "115"
    })
}

#[tokio::test]
async fn simulation_route_returns_results() {
    let router = simulation_router(Arc::new(seeded_simulation_service()));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/margin/simulations",
            simulation_body("acme"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["target"]["theoreticalMarginPercent"], "32.94");
    assert_eq!(payload["proposed"]["marginPercent"], "30.03");
    assert_eq!(payload["proposed"]["status"], "OK");
    assert_eq!(payload["marginDeltaPoints"], "-2.91");
}

#[tokio::test]
async fn simulation_route_returns_unprocessable_with_missing_fields() {
    let router = simulation_router(Arc::new(seeded_simulation_service()));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/margin/simulations",
            simulation_body("globex"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["missingFields"],
        json!(["discountPercent", "forcedVacationDaysPerYear", "targetHourlyRate"])
    );
}

#[tokio::test]
async fn simulation_handler_maps_lookup_failures() {
    let service = Arc::new(seeded_simulation_service());
    let request: crate::margin::MarginSimulationRequest =
        serde_json::from_value(simulation_body("umbrella")).expect("request parses");

    let response = crate::simulation::router::simulate_handler(
        State(service),
        axum::Json(request),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let service = Arc::new(unconfigured_simulation_service());
    let request: crate::margin::MarginSimulationRequest =
        serde_json::from_value(simulation_body("acme")).expect("request parses");
    let response = crate::simulation::router::simulate_handler(
        State(service),
        axum::Json(request),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn simulation_route_reports_invalid_field() {
    let router = simulation_router(Arc::new(seeded_simulation_service()));
    let mut body = simulation_body("acme");
    body["proposedBillRate"] = json!("0");

    let response = router
        .oneshot(json_request("POST", "/api/v1/margin/simulations", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], "proposedBillRate");
}

#[tokio::test]
async fn simulation_route_rejects_out_of_range_totals() {
    let router = simulation_router(Arc::new(seeded_simulation_service()));
    let mut body = simulation_body("acme");
    body["plannedHours"] = json!("1000000000000000");
    body["proposedBillRate"] = json!("1000000000000000");

    let response = router
        .oneshot(json_request("POST", "/api/v1/margin/simulations", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["field"], "plannedHours");
    assert_eq!(payload["error"], "invalid input for plannedHours: is too large");
}

#[tokio::test]
async fn scenario_routes_save_and_fetch() {
    let router = simulation_router(Arc::new(seeded_simulation_service()));

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/margin/scenarios",
            json!({ "name": "Acme renewal", "request": simulation_body("acme") }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let saved = read_json_body(response).await;
    let id = saved["id"].as_str().expect("scenario id").to_string();

    let response = router
        .oneshot(empty_request("GET", &format!("/api/v1/margin/scenarios/{id}")))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = read_json_body(response).await;
    assert_eq!(fetched["name"], "Acme renewal");
    assert_eq!(fetched["result"]["totals"]["totalMargin"], "3453");
}

#[tokio::test]
async fn settings_routes_manage_the_lifecycle() {
    let (service, _) = settings_service();
    let router = settings_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/settings/cost-parameters",
            json!({
                "name": "2026",
                "parameters": {
                    "employerChargesRatePercent": "65",
                    "indirectAnnualCosts": "5000",
                    "billableHoursPerYear": 1600
                }
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json_body(response).await;
    let id = created["id"].as_str().expect("set id").to_string();
    assert_eq!(created["isActive"], true);

    let response = router
        .clone()
        .oneshot(empty_request("GET", "/api/v1/settings/active-cost-parameters"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await["id"], id.as_str());

    let response = router
        .oneshot(empty_request(
            "DELETE",
            &format!("/api/v1/settings/cost-parameters/{id}"),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn settings_route_rejects_invalid_parameters() {
    let (service, _) = settings_service();
    let router = settings_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/settings/cost-parameters",
            json!({
                "name": "broken",
                "parameters": {
                    "employerChargesRatePercent": "165",
                    "indirectAnnualCosts": "5000",
                    "billableHoursPerYear": 1600
                }
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn settings_handler_reports_missing_active_set() {
    let (service, _) = settings_service();
    let response = crate::settings::router::active_handler(State(Arc::new(service))).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn settings_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(CostSettingsService::new(Arc::new(UnavailableRepository)));
    let response = crate::settings::router::list_handler(State(service)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn client_routes_update_and_lookup() {
    let (service, _) = client_service();
    let router = client_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/v1/clients/globex/commercial",
            json!({
                "name": "Globex",
                "commercial": { "targetMarginPercent": "25", "minimumMarginPercent": "15" }
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/clients/globex/commercial"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "incomplete");
    assert_eq!(
        payload["missingFields"],
        json!(["discountPercent", "forcedVacationDaysPerYear", "targetHourlyRate"])
    );
}

#[tokio::test]
async fn client_route_rejects_invalid_update() {
    let (service, _) = client_service();
    let router = client_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/v1/clients/acme/commercial",
            json!({ "commercial": { "targetMarginPercent": "20", "minimumMarginPercent": "30" } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn import_route_returns_summary() {
    let (service, _) = client_service();
    let router = client_router(Arc::new(service));
    let csv = "Client ID,Client Name,Target Margin %,Minimum Margin %,Discount %,Forced Vacation Days,Target Hourly Rate\n\
               acme,Acme Corp,25,15,10,5,120\n\
               ,Nameless,25,15,10,5,120\n";

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/commercial-parameters/import")
                .header(header::CONTENT_TYPE, "text/csv")
                .body(Body::from(csv))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["created"], 1);
    assert_eq!(payload["rejected"][0]["line"], 3);

    let response = router
        .oneshot(empty_request("GET", "/api/v1/clients"))
        .await
        .expect("route executes");
    let clients = read_json_body(response).await;
    assert_eq!(clients.as_array().map(Vec::len), Some(1));
    assert_eq!(clients[0]["name"], "Acme Corp");
}

#[tokio::test]
async fn unknown_client_lookup_is_not_found() {
    let (service, _) = client_service();
    let router = client_router(Arc::new(service));

    let response = router
        .oneshot(empty_request("GET", "/api/v1/clients/nobody/commercial"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn routers_merge_without_conflicts() {
    let (settings, _) = settings_service();
    let (clients, _) = client_service();
    let router = settings_router(Arc::new(settings))
        .merge(client_router(Arc::new(clients)))
        .merge(simulation_router(Arc::new(seeded_simulation_service())));

    let response = router
        .oneshot(empty_request("GET", "/api/v1/margin/scenarios"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
}

