//! Binary classifiers exported from the training notebook.
//!
//! Two model shapes are understood: a gradient boosted tree ensemble
//! (XGBoost `binary:logistic`) and a plain logistic regression. Both score a
//! 15-column row laid out as [`MODEL_FEATURES`] and threshold the positive
//! class probability at 0.5.

use crate::core::artifacts::ArtifactDefect;
use crate::core::Classifier;
use crate::domain::model::{FEATURE_COUNT, MODEL_FEATURES};
use serde::{Deserialize, Serialize};

const DECISION_THRESHOLD: f64 = 0.5;

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    GradientBoostedTrees {
        base_score: f64,
        trees: Vec<TreeArtifact>,
        #[serde(default)]
        feature_names: Option<Vec<String>>,
        #[serde(default = "default_classes")]
        classes: Vec<i64>,
    },
    LogisticRegression {
        coefficients: Vec<f64>,
        intercept: f64,
        #[serde(default)]
        feature_names: Option<Vec<String>>,
        #[serde(default = "default_classes")]
        classes: Vec<i64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeArtifact {
    pub nodes: Vec<NodeArtifact>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeArtifact {
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
    },
    Leaf {
        leaf: f64,
    },
}

#[derive(Debug, Clone)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
    },
    Leaf(f64),
}

/// A regression tree whose child links always point forward, so walking it
/// from the root always ends on a leaf.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_artifact(position: usize, artifact: TreeArtifact) -> Result<Self, ArtifactDefect> {
        let len = artifact.nodes.len();
        if len == 0 {
            return Err(ArtifactDefect::Corrupt(format!("tree {} has no nodes", position)));
        }

        let mut nodes = Vec::with_capacity(len);
        for (id, node) in artifact.nodes.into_iter().enumerate() {
            let node = match node {
                NodeArtifact::Leaf { leaf } => {
                    if !leaf.is_finite() {
                        return Err(ArtifactDefect::Corrupt(format!(
                            "tree {} node {} has a non-finite leaf value",
                            position, id
                        )));
                    }
                    Node::Leaf(leaf)
                }
                NodeArtifact::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                } => {
                    if feature >= FEATURE_COUNT {
                        return Err(ArtifactDefect::Schema(format!(
                            "tree {} node {} splits on feature {}, model input has {} columns",
                            position, id, feature, FEATURE_COUNT
                        )));
                    }
                    if yes <= id || no <= id || yes >= len || no >= len {
                        return Err(ArtifactDefect::Corrupt(format!(
                            "tree {} node {} has invalid children ({}, {})",
                            position, id, yes, no
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(ArtifactDefect::Corrupt(format!(
                            "tree {} node {} has a NaN threshold",
                            position, id
                        )));
                    }
                    Node::Split {
                        feature,
                        threshold,
                        yes,
                        no,
                    }
                }
            };
            nodes.push(node);
        }

        Ok(Self { nodes })
    }

    pub fn score(&self, row: &[f64; FEATURE_COUNT]) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf(value) => return *value,
                Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                } => {
                    id = if row[*feature] < *threshold { *yes } else { *no };
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
enum Scorer {
    Trees { base_margin: f64, trees: Vec<Tree> },
    Linear { coefficients: [f64; FEATURE_COUNT], intercept: f64 },
}

#[derive(Debug, Clone)]
pub struct ClassifierModel {
    scorer: Scorer,
    classes: [i64; 2],
}

impl ClassifierModel {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ArtifactDefect> {
        match artifact {
            ModelArtifact::GradientBoostedTrees {
                base_score,
                trees,
                feature_names,
                classes,
            } => {
                check_feature_names(feature_names.as_deref())?;
                if !(base_score > 0.0 && base_score < 1.0) {
                    return Err(ArtifactDefect::Corrupt(format!(
                        "base_score must be a probability in (0, 1), got {}",
                        base_score
                    )));
                }
                if trees.is_empty() {
                    return Err(ArtifactDefect::Corrupt("model has no trees".to_string()));
                }

                let trees = trees
                    .into_iter()
                    .enumerate()
                    .map(|(position, tree)| Tree::from_artifact(position, tree))
                    .collect::<Result<Vec<_>, _>>()?;

                tracing::debug!("Loaded gradient boosted model with {} trees", trees.len());

                Ok(Self {
                    scorer: Scorer::Trees {
                        base_margin: logit(base_score),
                        trees,
                    },
                    classes: binary_classes(&classes)?,
                })
            }
            ModelArtifact::LogisticRegression {
                coefficients,
                intercept,
                feature_names,
                classes,
            } => {
                check_feature_names(feature_names.as_deref())?;
                let len = coefficients.len();
                let coefficients: [f64; FEATURE_COUNT] =
                    coefficients.try_into().map_err(|_| {
                        ArtifactDefect::Schema(format!(
                            "model has {} coefficients, expected {}",
                            len, FEATURE_COUNT
                        ))
                    })?;
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(ArtifactDefect::Corrupt(
                        "model contains non-finite weights".to_string(),
                    ));
                }

                Ok(Self {
                    scorer: Scorer::Linear {
                        coefficients,
                        intercept,
                    },
                    classes: binary_classes(&classes)?,
                })
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self.scorer {
            Scorer::Trees { .. } => "gradient_boosted_trees",
            Scorer::Linear { .. } => "logistic_regression",
        }
    }

    fn margin(&self, row: &[f64; FEATURE_COUNT]) -> f64 {
        match &self.scorer {
            Scorer::Trees { base_margin, trees } => {
                base_margin + trees.iter().map(|tree| tree.score(row)).sum::<f64>()
            }
            Scorer::Linear {
                coefficients,
                intercept,
            } => {
                intercept
                    + coefficients
                        .iter()
                        .zip(row.iter())
                        .map(|(w, x)| w * x)
                        .sum::<f64>()
            }
        }
    }
}

impl Classifier for ClassifierModel {
    fn predict_proba(&self, row: &[f64; FEATURE_COUNT]) -> f64 {
        sigmoid(self.margin(row))
    }

    fn predict(&self, row: &[f64; FEATURE_COUNT]) -> i64 {
        if self.predict_proba(row) > DECISION_THRESHOLD {
            self.classes[1]
        } else {
            self.classes[0]
        }
    }
}

fn check_feature_names(names: Option<&[String]>) -> Result<(), ArtifactDefect> {
    match names {
        Some(names)
            if names.len() != FEATURE_COUNT
                || names.iter().zip(MODEL_FEATURES.iter()).any(|(a, b)| a != b) =>
        {
            Err(ArtifactDefect::Schema(format!(
                "model was trained on {:?}, expected {:?}",
                names, MODEL_FEATURES
            )))
        }
        _ => Ok(()),
    }
}

fn binary_classes(classes: &[i64]) -> Result<[i64; 2], ArtifactDefect> {
    match classes {
        [negative, positive] => Ok([*negative, *positive]),
        other => Err(ArtifactDefect::Schema(format!(
            "expected a binary classifier, model has {} classes",
            other.len()
        ))),
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}
