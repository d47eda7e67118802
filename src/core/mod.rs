pub mod artifacts;
pub mod batch;
pub mod classifier;
pub mod encoder;
pub mod engine;
pub mod predictor;
pub mod scaler;

pub use crate::domain::model::{BookingInput, BookingRecord};
pub use crate::domain::ports::{
    ArtifactLocations, BatchRow, CategoricalEncoder, Classifier, FeatureScaler, FileStore, Pipeline,
};
pub use crate::utils::error::Result;
