//! Startup loading of the three fitted artifacts.
//!
//! Loading is all-or-nothing: the first artifact that is missing, unreadable
//! or inconsistent with the fixed feature layout aborts the whole load.

use crate::core::classifier::{ClassifierModel, ModelArtifact};
use crate::core::encoder::{ColumnEncoders, EncoderArtifact};
use crate::core::scaler::{ScalerArtifact, StandardScaler};
use crate::core::{ArtifactLocations, FileStore};
use crate::utils::error::{PredictError, Result};
use crate::utils::validation::{validate_path, Validate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_FILE: &str = "best_xgb_model.json";
pub const DEFAULT_ENCODER_FILE: &str = "encoder.json";
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";

/// Why an artifact was rejected after it parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactDefect {
    Corrupt(String),
    Schema(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub model: String,
    pub encoder: String,
    pub scaler: String,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL_FILE.to_string(),
            encoder: DEFAULT_ENCODER_FILE.to_string(),
            scaler: DEFAULT_SCALER_FILE.to_string(),
        }
    }
}

impl ArtifactLocations for ArtifactPaths {
    fn model_path(&self) -> &str {
        &self.model
    }

    fn encoder_path(&self) -> &str {
        &self.encoder
    }

    fn scaler_path(&self) -> &str {
        &self.scaler
    }
}

impl Validate for ArtifactPaths {
    fn validate(&self) -> Result<()> {
        validate_path("artifacts.model", &self.model)?;
        validate_path("artifacts.encoder", &self.encoder)?;
        validate_path("artifacts.scaler", &self.scaler)?;
        Ok(())
    }
}

/// The loaded, read-only artifact set.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub model: ClassifierModel,
    pub encoders: ColumnEncoders,
    pub scaler: StandardScaler,
}

pub async fn load_artifacts<S: FileStore, L: ArtifactLocations>(
    store: &S,
    locations: &L,
) -> Result<Artifacts> {
    tracing::info!("📦 Loading artifacts");

    let model: ModelArtifact = read_json(store, "model", locations.model_path()).await?;
    let model = ClassifierModel::from_artifact(model)
        .map_err(|d| defect_error(store, "model", locations.model_path(), d))?;
    tracing::debug!("Model loaded ({})", model.kind());

    let encoder: EncoderArtifact = read_json(store, "encoder", locations.encoder_path()).await?;
    let encoders = ColumnEncoders::from_artifact(encoder).map_err(|reason| {
        PredictError::ArtifactLoadError {
            artifact: "encoder".to_string(),
            path: store.describe(locations.encoder_path()),
            reason,
        }
    })?;
    tracing::debug!(
        "Encoder loaded ({})",
        if encoders.is_shared() { "shared" } else { "per-column" }
    );

    let scaler: ScalerArtifact = read_json(store, "scaler", locations.scaler_path()).await?;
    let scaler = StandardScaler::from_artifact(scaler)
        .map_err(|d| defect_error(store, "scaler", locations.scaler_path(), d))?;

    tracing::info!("✅ Artifacts loaded");

    Ok(Artifacts {
        model,
        encoders,
        scaler,
    })
}

async fn read_json<S: FileStore, T: DeserializeOwned>(
    store: &S,
    artifact: &str,
    path: &str,
) -> Result<T> {
    tracing::debug!("Reading {} artifact from {}", artifact, store.describe(path));

    let bytes = store
        .read_file(path)
        .await
        .map_err(|e| PredictError::ArtifactLoadError {
            artifact: artifact.to_string(),
            path: store.describe(path),
            reason: e.to_string(),
        })?;

    serde_json::from_slice(&bytes).map_err(|e| PredictError::ArtifactLoadError {
        artifact: artifact.to_string(),
        path: store.describe(path),
        reason: format!("invalid artifact: {}", e),
    })
}

fn defect_error<S: FileStore>(
    store: &S,
    artifact: &str,
    path: &str,
    defect: ArtifactDefect,
) -> PredictError {
    match defect {
        ArtifactDefect::Corrupt(reason) => PredictError::ArtifactLoadError {
            artifact: artifact.to_string(),
            path: store.describe(path),
            reason,
        },
        ArtifactDefect::Schema(message) => PredictError::SchemaMismatchError {
            artifact: artifact.to_string(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStore {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStore {
        async fn put(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.as_bytes().to_vec());
        }
    }

    impl FileStore for MockStore {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                PredictError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn describe(&self, path: &str) -> String {
            format!("mock://{}", path)
        }
    }

    const MODEL: &str = r#"{"kind": "logistic_regression",
        "coefficients": [0,0,0,0,0,0,0,1,0,0,0,0,0,0,0], "intercept": 0.0}"#;
    const ENCODER: &str = r#"{"classes": ["Corporate", "Meal Plan 1", "Online", "Room_Type 1"]}"#;
    const SCALER: &str = r#"{"mean": [0,0,0,0,0,0,0,0,0,0,0,0], "scale": [1,1,1,1,1,1,1,1,1,1,1,1]}"#;

    async fn complete_store() -> MockStore {
        let store = MockStore::default();
        store.put(DEFAULT_MODEL_FILE, MODEL).await;
        store.put(DEFAULT_ENCODER_FILE, ENCODER).await;
        store.put(DEFAULT_SCALER_FILE, SCALER).await;
        store
    }

    #[tokio::test]
    async fn test_load_all_three_artifacts() {
        let store = complete_store().await;
        let artifacts = load_artifacts(&store, &ArtifactPaths::default()).await.unwrap();
        assert_eq!(artifacts.model.kind(), "logistic_regression");
        assert!(artifacts.encoders.is_shared());
    }

    #[tokio::test]
    async fn test_missing_artifact_aborts_load() {
        let store = complete_store().await;
        store.files.lock().await.remove(DEFAULT_SCALER_FILE);

        match load_artifacts(&store, &ArtifactPaths::default()).await {
            Err(PredictError::ArtifactLoadError { artifact, path, .. }) => {
                assert_eq!(artifact, "scaler");
                assert_eq!(path, "mock://scaler.json");
            }
            other => panic!("expected artifact load error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_corrupt_json_is_reported() {
        let store = complete_store().await;
        store.put(DEFAULT_ENCODER_FILE, "{not json").await;

        let err = load_artifacts(&store, &ArtifactPaths::default()).await.unwrap_err();
        assert!(matches!(err, PredictError::ArtifactLoadError { ref artifact, .. } if artifact == "encoder"));
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_distinct_from_corruption() {
        let store = complete_store().await;
        store
            .put(DEFAULT_SCALER_FILE, r#"{"mean": [0,0,0], "scale": [1,1,1]}"#)
            .await;

        let err = load_artifacts(&store, &ArtifactPaths::default()).await.unwrap_err();
        assert!(matches!(err, PredictError::SchemaMismatchError { ref artifact, .. } if artifact == "scaler"));
    }

    #[test]
    fn test_artifact_paths_validation() {
        assert!(ArtifactPaths::default().validate().is_ok());
        let paths = ArtifactPaths {
            model: String::new(),
            ..ArtifactPaths::default()
        };
        assert!(paths.validate().is_err());
    }
}
