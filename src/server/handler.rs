use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::{
    extract::{Form, Json, State},
    response::{Html, IntoResponse},
};
use serde_json::Value;

use crate::domain::model::{BookingInput, BookingRecord, Prediction};
use crate::server::app::AppState;
use crate::server::page::{self, Outcome};
use crate::server::schema::{ErrorResponse, PredictionResponse};
use crate::utils::error::{PredictError, Result};

fn status_for(err: &PredictError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn run_prediction(state: &AppState, input: BookingInput) -> Result<Prediction> {
    let record = BookingRecord::new(input)?;
    let prediction = state.predictor.predict(&record)?;
    tracing::info!(
        "🔮 Prediction: {:?} (p={:.3})",
        prediction.status,
        prediction.cancel_probability
    );
    Ok(prediction)
}

pub async fn form_page() -> Html<String> {
    Html(page::render(&BookingInput::default(), None))
}

pub async fn submit_form(
    State(state): State<AppState>,
    form: std::result::Result<Form<BookingInput>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let input = match form {
        Ok(Form(input)) => input,
        Err(rejection) => {
            tracing::warn!("Rejected form submission: {}", rejection.body_text());
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(page::render(
                    &BookingInput::default(),
                    Some(Outcome::Failed(rejection.body_text())),
                )),
            );
        }
    };

    match run_prediction(&state, input.clone()) {
        Ok(prediction) => (
            StatusCode::OK,
            Html(page::render(&input, Some(Outcome::Predicted(prediction.message)))),
        ),
        Err(e) => {
            tracing::error!("❌ Prediction failed: {}", e);
            (
                status_for(&e),
                Html(page::render(&input, Some(Outcome::Failed(e.user_friendly_message())))),
            )
        }
    }
}

pub async fn predict_json(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BookingInput>, JsonRejection>,
) -> std::result::Result<impl IntoResponse, (StatusCode, Json<Value>)> {
    let Json(input) = payload.map_err(|rejection| {
        tracing::warn!("Rejected JSON payload ({}): {}", rejection.status(), rejection.body_text());
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({
                "success": false,
                "error": rejection.body_text(),
                "category": "input",
            })),
        )
    })?;

    match run_prediction(&state, input) {
        Ok(prediction) => Ok((
            StatusCode::OK,
            Json(PredictionResponse {
                success: true,
                data: prediction,
            }),
        )),
        Err(e) => {
            tracing::error!("❌ Prediction failed: {}", e);
            let body = serde_json::to_value(ErrorResponse::from(&e)).unwrap_or_else(|_| {
                serde_json::json!({"success": false, "error": e.to_string()})
            });
            Err((status_for(&e), Json(body)))
        }
    }
}

pub async fn health() -> Json<Value> {
    Json(serde_json::json!({"status": "ok"}))
}
