use crate::infra::AppState;
use crate::page::FormPage;
use axum::extract::rejection::FormRejection;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Extension, Form, Json, Router};
use frailty_index::error::AppError;
use frailty_index::intake::{FormIntake, ValidationError};
use frailty_index::report::{ScoreDisplay, ScoreView};
use frailty_index::scoring::{score, Indicator, IndicatorRecord};
use serde_json::json;
use tracing::{debug, warn};

type FormFields = Vec<(String, String)>;

pub(crate) fn frailty_routes() -> Router {
    Router::new()
        .route("/", get(form_page).post(form_submit))
        .route("/calculate_frailty", post(calculate_frailty_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// `POST /calculate_frailty` with `"True"`/`"False"` form fields.
pub(crate) async fn calculate_frailty_endpoint(
    form: Result<Form<FormFields>, FormRejection>,
) -> Result<Json<ScoreView>, AppError> {
    let record = parse_submission(FormIntake::api(), form).inspect_err(|error| {
        warn!(%error, "rejected frailty calculation request");
    })?;

    let result = score(&record);
    debug!(
        category = result.category.label(),
        probability = result.probability,
        "scored frailty calculation request"
    );

    Ok(Json(ScoreView::from(&result)))
}

pub(crate) async fn form_page() -> Html<String> {
    Html(FormPage::default().render())
}

pub(crate) async fn form_submit(
    form: Result<Form<FormFields>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let checked = match &form {
        Ok(Form(fields)) => checked_indicators(fields),
        Err(_) => IndicatorRecord::default(),
    };

    match parse_submission(FormIntake::checkbox_form(), form) {
        Ok(record) => {
            let result = score(&record);
            debug!(
                category = result.category.label(),
                probability = result.probability,
                "scored interactive form"
            );
            let page = FormPage {
                record,
                outcome: Some(ScoreDisplay::from_result(&result)),
                error: None,
            };
            (StatusCode::OK, Html(page.render()))
        }
        Err(error) => {
            warn!(%error, "rejected interactive form");
            let page = FormPage {
                record: checked,
                outcome: None,
                error: Some(error.to_string()),
            };
            (StatusCode::UNPROCESSABLE_ENTITY, Html(page.render()))
        }
    }
}

fn parse_submission(
    intake: FormIntake,
    form: Result<Form<FormFields>, FormRejection>,
) -> Result<IndicatorRecord, ValidationError> {
    let Form(fields) = form.map_err(|rejection| ValidationError::Malformed(rejection.body_text()))?;
    intake.parse(
        fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str())),
    )
}

/// Keeps checkbox state when the age is rejected so the form re-renders as
/// submitted.
fn checked_indicators(fields: &FormFields) -> IndicatorRecord {
    fields
        .iter()
        .filter_map(|(name, _)| Indicator::from_field_name(name))
        .fold(IndicatorRecord::default(), IndicatorRecord::with)
}
