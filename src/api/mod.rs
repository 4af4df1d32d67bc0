use axum::{
    Router,
    extract::{Json, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Deserializer, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::analytics::{
    DebtAnalysis, RunwayHealth, SavingsProgress, TargetSavingAdvice, debt_analysis,
    runway_health, savings_progress, target_saving_advice,
};
use crate::core::catalog::{self, AlgorithmInfo, SAFETY_LINE_PRESETS, SafetyLinePreset};
use crate::core::{Algorithm, AlgorithmComparison, Asset, CalculationResult, Debt};
use crate::error::SaspError;
use crate::profile::Profile;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiAlgorithm {
    #[serde(alias = "proportional")]
    Linear,
    #[serde(alias = "exponential")]
    Smooth,
    #[serde(alias = "tiered", alias = "steps")]
    Step,
    #[serde(alias = "s-curve", alias = "sCurve", alias = "s_curve")]
    Sigmoid,
}

impl From<ApiAlgorithm> for Algorithm {
    fn from(value: ApiAlgorithm) -> Self {
        match value {
            ApiAlgorithm::Linear => Algorithm::Linear,
            ApiAlgorithm::Smooth => Algorithm::Smooth,
            ApiAlgorithm::Step => Algorithm::Step,
            ApiAlgorithm::Sigmoid => Algorithm::Sigmoid,
        }
    }
}

/// A holding as sent by a form; absent numbers mean zero.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct HoldingPayload {
    id: Option<String>,
    name: Option<String>,
    amount: Option<f64>,
    rate: Option<f64>,
}

impl HoldingPayload {
    fn into_parts(self, index: usize) -> (String, String, f64, f64) {
        let id = self.id.unwrap_or_else(|| (index + 1).to_string());
        let name = self.name.unwrap_or_default();
        (
            id,
            name,
            self.amount.unwrap_or(0.0),
            self.rate.unwrap_or(0.0),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CalculatePayload {
    assets: Option<Vec<HoldingPayload>>,
    debts: Option<Vec<HoldingPayload>>,
    income: Option<f64>,
    expense: Option<f64>,
    /// Missing keeps the default target, `null` clears it.
    #[serde(deserialize_with = "explicit_option")]
    target_saving: Option<Option<f64>>,
    algorithm: Option<ApiAlgorithm>,
    safety_line: Option<f64>,
}

fn explicit_option<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculateResponse {
    algorithm: Algorithm,
    safety_line: f64,
    result: CalculationResult,
    health: RunwayHealth,
    target_advice: TargetSavingAdvice,
    savings_progress: Option<SavingsProgress>,
    debt_analysis: Option<DebtAnalysis>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareResponse {
    safety_line: f64,
    selected_algorithm: Algorithm,
    rows: Vec<AlgorithmComparison>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AlgorithmsResponse {
    algorithms: Vec<AlgorithmInfo>,
    presets: [SafetyLinePreset; 3],
    safety_line_min: u32,
    safety_line_max: u32,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/algorithms", get(algorithms_handler))
        .route("/api/default-profile", get(default_profile_handler))
        .route("/api/calculate", post(calculate_handler))
        .route("/api/compare", post(compare_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("SASP HTTP API listening on http://{addr}");
    tracing::info!("Local access: http://127.0.0.1:{port}/api/health");

    axum::serve(listener, router()).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn algorithms_handler() -> Response {
    json_response(
        StatusCode::OK,
        AlgorithmsResponse {
            algorithms: catalog::all(),
            presets: SAFETY_LINE_PRESETS,
            safety_line_min: *catalog::SAFETY_LINE_RANGE.start(),
            safety_line_max: *catalog::SAFETY_LINE_RANGE.end(),
        },
    )
}

async fn default_profile_handler() -> Response {
    json_response(StatusCode::OK, Profile::default())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn calculate_handler(payload: Result<Json<CalculatePayload>, JsonRejection>) -> Response {
    let profile = match profile_from_request(payload) {
        Ok(profile) => profile,
        Err(response) => return response,
    };
    tracing::debug!(
        algorithm = profile.algorithm.id(),
        safety_line = profile.safety_line,
        assets = profile.assets.len(),
        debts = profile.debts.len(),
        "calculate"
    );
    json_response(StatusCode::OK, build_calculate_response(&profile))
}

async fn compare_handler(payload: Result<Json<CalculatePayload>, JsonRejection>) -> Response {
    let profile = match profile_from_request(payload) {
        Ok(profile) => profile,
        Err(response) => return response,
    };
    tracing::debug!(safety_line = profile.safety_line, "compare");
    json_response(StatusCode::OK, build_compare_response(&profile))
}

fn profile_from_request(
    payload: Result<Json<CalculatePayload>, JsonRejection>,
) -> Result<Profile, Response> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!("rejected payload: {rejection}");
        error_response(
            StatusCode::BAD_REQUEST,
            &format!("Invalid API JSON payload: {}", rejection.body_text()),
        )
    })?;
    profile_from_payload(payload)
        .map_err(|err| error_response(StatusCode::BAD_REQUEST, &err.to_string()))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn profile_from_json(json: &str) -> Result<Profile, SaspError> {
    let payload = serde_json::from_str::<CalculatePayload>(json)?;
    profile_from_payload(payload)
}

fn profile_from_payload(payload: CalculatePayload) -> Result<Profile, SaspError> {
    let mut profile = Profile::default();

    if let Some(assets) = payload.assets {
        profile.assets = assets
            .into_iter()
            .enumerate()
            .map(|(index, holding)| {
                let (id, name, amount, rate) = holding.into_parts(index);
                Asset::new(id, name, amount, rate)
            })
            .collect();
    }
    if let Some(debts) = payload.debts {
        profile.debts = debts
            .into_iter()
            .enumerate()
            .map(|(index, holding)| {
                let (id, name, amount, rate) = holding.into_parts(index);
                Debt::new(id, name, amount, rate)
            })
            .collect();
    }

    if let Some(v) = payload.income {
        profile.financials.income = v;
    }
    if let Some(v) = payload.expense {
        profile.financials.expense = v;
    }
    if let Some(v) = payload.target_saving {
        profile.financials.target_saving = v;
    }
    if let Some(v) = payload.algorithm {
        profile.algorithm = v.into();
    }
    if let Some(v) = payload.safety_line {
        profile.safety_line = v;
    }

    let profile = profile.sanitized();
    profile.validate()?;
    Ok(profile)
}

fn build_calculate_response(profile: &Profile) -> CalculateResponse {
    let result = profile.compute();
    CalculateResponse {
        algorithm: profile.algorithm,
        safety_line: profile.safety_line,
        health: runway_health(result.runway_months, profile.safety_line),
        target_advice: target_saving_advice(&profile.financials, result.nominal_disposable),
        savings_progress: savings_progress(&result),
        debt_analysis: debt_analysis(&profile.debts, profile.financials.income),
        result,
    }
}

fn build_compare_response(profile: &Profile) -> CompareResponse {
    CompareResponse {
        safety_line: profile.safety_line,
        selected_algorithm: profile.algorithm,
        rows: profile.compare(),
    }
}
