use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{
        Json, Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::core::{
    DEFAULT_ANNUAL_SALARY_INCREASE, DEFAULT_INFLATION_RATE, Profile, RawProfile, Scenario,
    ScenarioError, local_today,
};
use crate::error::AppError;
use crate::report::{UserProjection, project_user};
use crate::source::{ProfileSource, SourceError};

#[derive(Clone)]
struct AppState {
    source: Arc<dyn ProfileSource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ScenarioQuery {
    annual_salary_increase: Option<f64>,
    inflation_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionPayload {
    profile: RawProfile,
    #[serde(flatten)]
    scenario: ScenarioQuery,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(source: Arc<dyn ProfileSource>) -> Router {
    Router::new()
        .route("/api/users/:user_id/projection", get(user_projection_handler))
        .route("/api/projection", post(projection_post_handler))
        .fallback(not_found_handler)
        .with_state(AppState { source })
}

pub async fn run_http_server(port: u16, source: Arc<dyn ProfileSource>) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(source);

    let listener = TcpListener::bind(addr).await?;
    info!("retirement projection API listening on http://{addr}");
    info!("local access: http://127.0.0.1:{port}/api/users/1/projection");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn user_projection_handler(
    State(state): State<AppState>,
    user_id: Result<Path<u64>, PathRejection>,
    query: Result<Query<ScenarioQuery>, QueryRejection>,
) -> Response {
    let Path(user_id) = match user_id {
        Ok(path) => path,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };
    let scenario = match scenario_from_query(query) {
        Ok(scenario) => scenario,
        Err(e) => return app_error_response(e.into()),
    };

    match project_user(state.source.as_ref(), user_id, &scenario, local_today()).await {
        Ok(projection) => json_response(StatusCode::OK, projection),
        Err(e) => app_error_response(e),
    }
}

async fn projection_post_handler(
    payload: Result<Json<ProjectionPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };

    match project_payload(payload, local_today()) {
        Ok(projection) => json_response(StatusCode::OK, projection),
        Err(e) => app_error_response(e),
    }
}

fn scenario_from_query(query: ScenarioQuery) -> Result<Scenario, ScenarioError> {
    Scenario::new(
        query
            .annual_salary_increase
            .unwrap_or(DEFAULT_ANNUAL_SALARY_INCREASE),
        query.inflation_rate.unwrap_or(DEFAULT_INFLATION_RATE),
    )
}

fn project_payload(
    payload: ProjectionPayload,
    today: NaiveDate,
) -> Result<UserProjection, AppError> {
    let scenario = scenario_from_query(payload.scenario)?;
    let profile = Profile::validate(payload.profile, today)?;
    Ok(UserProjection::new(&profile, &scenario))
}

fn status_for_error(err: &AppError) -> StatusCode {
    match err {
        AppError::Validation(_) | AppError::Scenario(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::Source(SourceError::NotFound(_)) => StatusCode::NOT_FOUND,
        AppError::Source(_) => StatusCode::BAD_GATEWAY,
    }
}

fn app_error_response(err: AppError) -> Response {
    let status = status_for_error(&err);
    if status.is_server_error() {
        error!(error = %err, "projection request failed");
    } else {
        debug!(error = %err, "projection request rejected");
    }
    error_response(status, &err.to_string())
}

fn rejection_response(status: StatusCode, body_text: String) -> Response {
    debug!(%status, reason = %body_text, "malformed projection request");
    error_response(status, &body_text)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
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
