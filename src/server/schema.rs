use crate::domain::model::Prediction;
use crate::utils::error::PredictError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub success: bool,
    pub data: Prediction,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub category: String,
}

impl From<&PredictError> for ErrorResponse {
    fn from(err: &PredictError) -> Self {
        Self {
            success: false,
            error: err.user_friendly_message(),
            category: format!("{:?}", err.category()).to_lowercase(),
        }
    }
}
