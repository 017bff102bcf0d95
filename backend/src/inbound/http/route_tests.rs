//! Tests for the route planning handler.

use super::*;
use crate::domain::ports::MockRoutePlanningService;
use crate::domain::{Coordinate, ErrorCode};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

fn point(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).expect("valid coordinate")
}

fn sample_plan() -> RoutePlan {
    RoutePlan {
        route_index: 0,
        route: vec![point(40.0, -74.0), point(40.05, -74.02), point(40.1, -74.1)],
        petrol_pumps: vec![PetrolPump {
            name: Some("Shell".to_owned()),
            location: point(40.02, -74.01),
            address: None,
            city: Some("Newark".to_owned()),
            state: None,
        }],
    }
}

async fn call(service: MockRoutePlanningService, uri: &str) -> (StatusCode, Value) {
    call_with_timeout(service, uri, Duration::from_secs(5)).await
}

async fn call_with_timeout(
    service: MockRoutePlanningService,
    uri: &str,
    timeout: Duration,
) -> (StatusCode, Value) {
    let state = HttpState::new(Arc::new(service), timeout);
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(plan_route),
    )
    .await;
    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

#[actix_web::test]
async fn returns_route_with_null_optional_fields() {
    let mut service = MockRoutePlanningService::new();
    service
        .expect_plan()
        .withf(|request| request.start == "40.0,-74.0" && request.destination == "40.1,-74.1")
        .times(1)
        .returning(|_| Ok(sample_plan()));

    let (status, body) = call(service, "/route?start=40.0,-74.0&destination=40.1,-74.1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "route_index": 0,
            "route": [[40.0, -74.0], [40.05, -74.02], [40.1, -74.1]],
            "petrol_pumps": [{
                "name": "Shell",
                "latitude": 40.02,
                "longitude": -74.01,
                "address": null,
                "city": "Newark",
                "state": null
            }]
        })
    );
}

#[rstest]
#[case("/route?destination=Pune", "start")]
#[case("/route?start=Mumbai", "destination")]
#[case("/route?start=%20%20&destination=Pune", "start")]
#[actix_web::test]
async fn missing_parameters_are_rejected(#[case] uri: &str, #[case] field: &str) {
    let mut service = MockRoutePlanningService::new();
    service.expect_plan().never();

    let (status, body) = call(service, uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"], json!({ "field": field, "code": "missing_field" }));
}

#[rstest]
#[case(Error::invalid_request("bad coordinate"), StatusCode::BAD_REQUEST)]
#[case(Error::location_not_found("no match"), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(Error::no_route_found("island"), StatusCode::NOT_FOUND)]
#[case(Error::upstream_unavailable("router down"), StatusCode::BAD_GATEWAY)]
#[case(Error::upstream_timeout("router slow"), StatusCode::GATEWAY_TIMEOUT)]
#[actix_web::test]
async fn domain_errors_map_to_statuses(#[case] error: Error, #[case] expected: StatusCode) {
    let code = error.code();
    let mut service = MockRoutePlanningService::new();
    service
        .expect_plan()
        .times(1)
        .returning(move |_| Err(error.clone()));

    let (status, body) = call(service, "/route?start=a&destination=b").await;

    assert_eq!(status, expected);
    assert_eq!(body["code"], json!(code.as_str()));
}

/// Planning service that never finishes within the test timeout.
struct StalledPlanner;

#[async_trait::async_trait]
impl crate::domain::ports::RoutePlanningService for StalledPlanner {
    async fn plan(&self, _request: &RoutePlanRequest) -> Result<RoutePlan, Error> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(sample_plan())
    }
}

#[actix_web::test]
async fn request_timeout_answers_gateway_timeout() {
    let state = HttpState::new(Arc::new(StalledPlanner), Duration::from_millis(20));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .service(plan_route),
    )
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/route?start=40.0,-74.0&destination=40.1,-74.1")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!(ErrorCode::UpstreamTimeout.as_str()));
}

#[test]
fn response_body_converts_plan() {
    let body = RouteResponseBody::from(sample_plan());
    assert_eq!(body.route.len(), 3);
    assert_eq!(body.petrol_pumps[0].latitude, 40.02);
    assert_eq!(body.petrol_pumps[0].address, None);
}
