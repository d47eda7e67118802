use crate::core::artifacts::ArtifactDefect;
use crate::core::FeatureScaler;
use crate::domain::model::{NUMERIC_COUNT, NUMERIC_FEATURES};
use serde::{Deserialize, Serialize};

/// On-disk layout of a fitted standard scaler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: [f64; NUMERIC_COUNT],
    scale: [f64; NUMERIC_COUNT],
}

impl StandardScaler {
    pub fn from_artifact(artifact: ScalerArtifact) -> Result<Self, ArtifactDefect> {
        let mean = fixed_width("mean", &artifact.mean)?;
        let mut scale = fixed_width("scale", &artifact.scale)?;

        if let Some(names) = &artifact.feature_names {
            if names.len() != NUMERIC_COUNT
                || names.iter().zip(NUMERIC_FEATURES.iter()).any(|(a, b)| a != b)
            {
                return Err(ArtifactDefect::Schema(format!(
                    "fitted on {:?}, expected {:?}",
                    names, NUMERIC_FEATURES
                )));
            }
        } else {
            tracing::debug!("Scaler artifact carries no feature names; column order is not checked");
        }

        // sklearn 將零變異欄位的 scale 視為 1
        for s in scale.iter_mut() {
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        Ok(Self { mean, scale })
    }
}

fn fixed_width(name: &str, values: &[f64]) -> Result<[f64; NUMERIC_COUNT], ArtifactDefect> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ArtifactDefect::Corrupt(format!("{} contains non-finite values", name)));
    }
    values.try_into().map_err(|_| {
        ArtifactDefect::Schema(format!(
            "{} has {} entries, expected {}",
            name,
            values.len(),
            NUMERIC_COUNT
        ))
    })
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, row: &[f64; NUMERIC_COUNT]) -> [f64; NUMERIC_COUNT] {
        let mut scaled = [0.0; NUMERIC_COUNT];
        for (i, value) in row.iter().enumerate() {
            scaled[i] = (value - self.mean[i]) / self.scale[i];
        }
        scaled
    }
}
