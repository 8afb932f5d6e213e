use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::core::{Projection, ProjectionInput, compute_projection};
use crate::error::{Error, InputField};
use crate::input::{UncheckedInput, parse_count, parse_real};

// Fields stay untyped so a badly typed value is reported against its field
// instead of failing the whole extraction.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectionPayload {
    initial_capital: Option<Value>,
    monthly_contribution: Option<Value>,
    #[serde(alias = "annualRatePercent")]
    annual_rate: Option<Value>,
    years: Option<Value>,
    compounding_frequency: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    input: ProjectionInput,
    years: Projection,
    final_balance: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    invalid_fields: Vec<&'static str>,
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("projection API listening on http://{addr}");
    info!("local access: http://127.0.0.1:{port}/api/projection");

    axum::serve(listener, router()).await
}

fn router() -> Router {
    Router::new()
        .route(
            "/api/projection",
            get(projection_get_handler).post(projection_post_handler),
        )
        .fallback(not_found_handler)
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found", Vec::new())
}

async fn projection_get_handler(
    payload: Result<Query<ProjectionPayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => projection_handler_impl(payload),
        Err(rejection) => bad_request(&rejection.body_text()),
    }
}

async fn projection_post_handler(
    payload: Result<Json<ProjectionPayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => projection_handler_impl(payload),
        Err(rejection) => bad_request(&rejection.body_text()),
    }
}

fn projection_handler_impl(payload: ProjectionPayload) -> Response {
    match input_from_payload(payload) {
        Ok(input) => {
            debug!(?input, "running projection");
            json_response(StatusCode::OK, build_projection_response(input))
        }
        Err(fields) => {
            debug!(?fields, "rejected projection request");
            let keys = fields.iter().map(|field| field.key()).collect();
            let msg = Error::InvalidInput(fields).to_string();
            error_response(StatusCode::BAD_REQUEST, &msg, keys)
        }
    }
}

fn input_from_payload(payload: ProjectionPayload) -> Result<ProjectionInput, Vec<InputField>> {
    let defaults = ProjectionInput::default();
    UncheckedInput {
        initial_capital: real_field(payload.initial_capital, defaults.initial_capital),
        monthly_contribution: real_field(
            payload.monthly_contribution,
            defaults.monthly_contribution,
        ),
        annual_rate_percent: real_field(payload.annual_rate, defaults.annual_rate_percent),
        years: count_field(payload.years, defaults.years),
        compounding_frequency: count_field(
            payload.compounding_frequency,
            defaults.compounding_frequency,
        ),
    }
    .validate()
}

// Strings (query parameters, quoted JSON) parse like prompt answers.
fn real_field(value: Option<Value>, default: f64) -> Option<f64> {
    match value {
        None => Some(default),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_real(&s, default),
        Some(_) => None,
    }
}

fn count_field(value: Option<Value>, default: u32) -> Option<i64> {
    match value {
        None => Some(default.into()),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => parse_count(&s, default),
        Some(_) => None,
    }
}

fn build_projection_response(input: ProjectionInput) -> ProjectionResponse {
    let years = compute_projection(&input);
    let final_balance = years.last().map_or(input.initial_capital, |row| row.balance);
    ProjectionResponse {
        input,
        years,
        final_balance,
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn bad_request(reason: &str) -> Response {
    debug!(reason, "unreadable projection request");
    error_response(
        StatusCode::BAD_REQUEST,
        &format!("Invalid request: {reason}"),
        Vec::new(),
    )
}

fn error_response(status: StatusCode, msg: &str, invalid_fields: Vec<&'static str>) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
            invalid_fields,
        },
    )
}

#[cfg(test)]
fn input_from_json(json: &str) -> Result<ProjectionInput, String> {
    let payload = serde_json::from_str::<ProjectionPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    input_from_payload(payload).map_err(|fields| Error::InvalidInput(fields).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let response = router()
            .oneshot(request)
            .await
            .expect("router never fails");
        let status = response.status();
        let cache_control = response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        let body = serde_json::from_slice(&bytes).expect("json body");
        (status, cache_control, body)
    }

    fn post_json(json: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/projection")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json))
            .expect("valid request")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request")
    }

    #[test]
    fn empty_payload_uses_defaults() {
        let input = input_from_json("{}").expect("valid input");
        assert_eq!(input, ProjectionInput::default());
    }

    #[test]
    fn payload_parses_camel_case_keys() {
        let input = input_from_json(
            r#"{
                "initialCapital": 1000,
                "monthlyContribution": -50.5,
                "annualRate": 4.5,
                "years": 3,
                "compoundingFrequency": 4
            }"#,
        )
        .expect("valid input");

        assert_eq!(input.initial_capital, 1000.0);
        assert_eq!(input.monthly_contribution, -50.5);
        assert_eq!(input.annual_rate_percent, 4.5);
        assert_eq!(input.years, 3);
        assert_eq!(input.compounding_frequency, 4);
    }

    #[test]
    fn payload_accepts_annual_rate_percent_alias() {
        let input = input_from_json(r#"{"annualRatePercent": 7}"#).expect("valid input");
        assert_eq!(input.annual_rate_percent, 7.0);
    }

    #[test]
    fn payload_null_fields_take_defaults() {
        let input = input_from_json(r#"{"years": null}"#).expect("valid input");
        assert_eq!(input.years, 20);
    }

    #[test]
    fn payload_rejects_non_positive_counts() {
        let err = input_from_json(r#"{"years": 0, "compoundingFrequency": -1}"#)
            .expect_err("must reject non-positive counts");
        assert_eq!(
            err,
            "Invalid input for: Time in years, Compounding frequency"
        );
    }

    #[test]
    fn payload_rejects_badly_typed_fields_by_name() {
        let fields = input_from_payload(
            serde_json::from_str(
                r#"{"initialCapital": "abc", "annualRate": [1], "years": 2.5}"#,
            )
            .expect("any value shape deserializes"),
        )
        .expect_err("must reject");
        assert_eq!(
            fields,
            vec![
                InputField::InitialCapital,
                InputField::AnnualRate,
                InputField::Years
            ]
        );
    }

    #[test]
    fn response_serialization_contains_expected_fields() {
        let input = ProjectionInput {
            initial_capital: 1000.0,
            monthly_contribution: 100.0,
            annual_rate_percent: 10.0,
            years: 1,
            compounding_frequency: 1,
        };
        let response = build_projection_response(input);
        assert_eq!(response.final_balance, 1200.0);

        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(json.contains("\"input\""));
        assert!(json.contains("\"annualRatePercent\":10.0"));
        assert!(json.contains("\"compoundingFrequency\":1"));
        assert!(json.contains(
            "\"years\":[{\"year\":0,\"balance\":1000.0},{\"year\":1,\"balance\":1200.0}]"
        ));
        assert!(json.contains("\"finalBalance\":1200.0"));
    }

    #[tokio::test]
    async fn post_with_fractional_years_lists_the_field() {
        let (status, cache_control, body) = send(post_json(r#"{"years": 2.5}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(body["error"], "Invalid input for: Time in years");
        assert_eq!(body["invalidFields"], serde_json::json!(["years"]));
    }

    #[tokio::test]
    async fn post_with_string_capital_lists_the_field() {
        let (status, _, body) = send(post_json(r#"{"initialCapital": "abc"}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["invalidFields"], serde_json::json!(["initialCapital"]));
    }

    #[tokio::test]
    async fn post_with_malformed_body_is_a_json_bad_request() {
        let (status, cache_control, body) = send(post_json("{")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        let error = body["error"].as_str().expect("error message");
        assert!(error.starts_with("Invalid request: "));
        assert!(body.get("invalidFields").is_none());
    }

    #[tokio::test]
    async fn get_with_unparseable_years_lists_the_field() {
        let (status, _, body) = send(get_request("/api/projection?years=abc")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["invalidFields"], serde_json::json!(["years"]));
    }

    #[tokio::test]
    async fn get_runs_projection_from_query_string() {
        let (status, cache_control, body) = send(get_request(
            "/api/projection?initialCapital=1000&monthlyContribution=100&annualRate=10\
             &years=1&compoundingFrequency=1",
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(body["finalBalance"].as_f64(), Some(1200.0));
        assert_eq!(body["years"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn get_without_query_uses_defaults() {
        let (status, _, body) = send(get_request("/api/projection")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["input"]["years"], 20);
        assert_eq!(body["finalBalance"].as_f64(), Some(3589545.46));
    }

    #[tokio::test]
    async fn unknown_route_returns_json_not_found() {
        let (status, cache_control, body) = send(get_request("/nope")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(body, serde_json::json!({"error": "Not found"}));
    }
}
