pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AppConfig;

pub use adapters::LocalStore;
pub use core::{
    artifacts::{load_artifacts, ArtifactPaths, Artifacts},
    batch::CsvBatchPipeline,
    engine::BatchEngine,
    predictor::{ArtifactPredictor, Predictor},
};
pub use domain::model::{BookingInput, BookingRecord, BookingStatus, Prediction};
pub use utils::error::{PredictError, Result};
