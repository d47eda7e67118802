use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::core::predictor::ArtifactPredictor;
use crate::server::handler::{form_page, health, predict_json, submit_form};

#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<ArtifactPredictor>,
}

impl AppState {
    pub fn new(predictor: ArtifactPredictor) -> Self {
        Self {
            predictor: Arc::new(predictor),
        }
    }
}

pub fn create_router(app_state: AppState) -> Router {
    let api_routes = Router::new().route("/predict", post(predict_json));

    Router::new()
        .route("/", get(form_page).post(submit_form))
        .route("/health", get(health))
        .nest("/api", api_routes)
        .with_state(app_state)
}
