use crate::domain::model::{
    BookingInput, CategoricalColumn, Prediction, FEATURE_COUNT, NUMERIC_COUNT,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait FileStore: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Human readable location of `path`, used in error messages.
    fn describe(&self, path: &str) -> String;
}

pub trait ArtifactLocations: Send + Sync {
    fn model_path(&self) -> &str;
    fn encoder_path(&self) -> &str;
    fn scaler_path(&self) -> &str;
}

/// Maps a categorical value to the integer code it was fitted with.
pub trait CategoricalEncoder: Send + Sync {
    fn encode(&self, column: CategoricalColumn, value: &str) -> Result<usize>;
}

pub trait FeatureScaler: Send + Sync {
    fn transform(&self, row: &[f64; NUMERIC_COUNT]) -> [f64; NUMERIC_COUNT];
}

pub trait Classifier: Send + Sync {
    /// Probability of the positive (cancelled) class.
    fn predict_proba(&self, row: &[f64; FEATURE_COUNT]) -> f64;
    /// Raw class label as stored in the model.
    fn predict(&self, row: &[f64; FEATURE_COUNT]) -> i64;
}

#[derive(Debug, Clone)]
pub struct BatchRow {
    pub input: BookingInput,
    pub prediction: Prediction,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<BookingInput>>;
    async fn transform(&self, data: Vec<BookingInput>) -> Result<Vec<BatchRow>>;
    async fn load(&self, rows: Vec<BatchRow>) -> Result<String>;
}
