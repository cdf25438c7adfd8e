//! Pre-trained classifier loading and inference.
//!
//! The model is trained elsewhere and shipped as a JSON artifact tagged with
//! its `kind`. It is loaded once at startup and only ever read afterwards.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Ordered integer features for one submitted row.
pub type FeatureVector = Vec<i64>;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to load model: {0}")]
    Load(String),

    #[error("Failed to load model: invalid artifact: {0}")]
    Invalid(String),

    #[error("X has {got} features, but the model is expecting {expected} features as input")]
    FeatureCount { expected: usize, got: usize },
}

pub type ModelResult<T> = Result<T, ModelError>;

/// A trained classifier. Returns one class index per input row.
pub trait Classifier: Send + Sync {
    fn predict(&self, rows: &[FeatureVector]) -> ModelResult<Vec<i64>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression(LogisticRegression),
    DecisionTree(DecisionTree),
}

impl ModelArtifact {
    pub fn from_json(raw: &str) -> ModelResult<Self> {
        let artifact: ModelArtifact =
            serde_json::from_str(raw).map_err(|e| ModelError::Load(e.to_string()))?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn validate(&self) -> ModelResult<()> {
        match self {
            ModelArtifact::LogisticRegression(m) => m.validate(),
            ModelArtifact::DecisionTree(m) => m.validate(),
        }
    }

    pub fn n_features(&self) -> usize {
        match self {
            ModelArtifact::LogisticRegression(m) => m.n_features,
            ModelArtifact::DecisionTree(m) => m.n_features,
        }
    }
}

impl Classifier for ModelArtifact {
    fn predict(&self, rows: &[FeatureVector]) -> ModelResult<Vec<i64>> {
        match self {
            ModelArtifact::LogisticRegression(m) => m.predict(rows),
            ModelArtifact::DecisionTree(m) => m.predict(rows),
        }
    }
}

/// Loads and validates the artifact at `path`.
pub fn load_model(path: impl AsRef<Path>) -> ModelResult<ModelArtifact> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(ModelError::NotFound(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path).map_err(|e| ModelError::Load(e.to_string()))?;
    let artifact = ModelArtifact::from_json(&raw)?;
    log::info!(
        "Loaded model from {} ({} features)",
        path.display(),
        artifact.n_features()
    );
    Ok(artifact)
}

fn check_row(n_features: usize, row: &[i64]) -> ModelResult<()> {
    if row.len() != n_features {
        return Err(ModelError::FeatureCount {
            expected: n_features,
            got: row.len(),
        });
    }
    Ok(())
}

/// Index of the largest value; ties resolve to the lowest index.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// Linear model. `coef` holds one row per class, or a single row when the
/// model is binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub n_features: usize,
    pub classes: Vec<i64>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl LogisticRegression {
    fn validate(&self) -> ModelResult<()> {
        if self.classes.len() < 2 {
            return Err(ModelError::Invalid(format!(
                "logistic regression needs at least 2 classes, got {}",
                self.classes.len()
            )));
        }
        let expected_rows = if self.classes.len() == 2 {
            1
        } else {
            self.classes.len()
        };
        if self.coef.len() != expected_rows {
            return Err(ModelError::Invalid(format!(
                "expected {} coefficient rows, got {}",
                expected_rows,
                self.coef.len()
            )));
        }
        if self.intercept.len() != expected_rows {
            return Err(ModelError::Invalid(format!(
                "expected {} intercepts, got {}",
                expected_rows,
                self.intercept.len()
            )));
        }
        if let Some(row) = self.coef.iter().find(|row| row.len() != self.n_features) {
            return Err(ModelError::Invalid(format!(
                "coefficient row has {} weights, expected {}",
                row.len(),
                self.n_features
            )));
        }
        Ok(())
    }

    fn decision_function(&self, row: &[i64]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(weights, bias)| {
                weights
                    .iter()
                    .zip(row)
                    .fold(*bias, |acc, (w, x)| acc + w * (*x as f64))
            })
            .collect()
    }

    fn predict_row(&self, row: &[i64]) -> ModelResult<i64> {
        check_row(self.n_features, row)?;
        let scores = self.decision_function(row);
        let idx = if scores.len() == 1 {
            usize::from(scores[0] > 0.0)
        } else {
            argmax(&scores)
        };
        Ok(self.classes[idx])
    }
}

impl Classifier for LogisticRegression {
    fn predict(&self, rows: &[FeatureVector]) -> ModelResult<Vec<i64>> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}

/// Single decision tree in flattened node-array form. Node 0 is the root;
/// a node is a leaf when its left child is -1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub n_features: usize,
    pub classes: Vec<i64>,
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

impl DecisionTree {
    fn node_count(&self) -> usize {
        self.children_left.len()
    }

    fn validate(&self) -> ModelResult<()> {
        let nodes = self.node_count();
        if nodes == 0 {
            return Err(ModelError::Invalid("decision tree has no nodes".to_string()));
        }
        if self.classes.is_empty() {
            return Err(ModelError::Invalid("decision tree has no classes".to_string()));
        }
        let lengths = [
            ("children_right", self.children_right.len()),
            ("feature", self.feature.len()),
            ("threshold", self.threshold.len()),
            ("value", self.value.len()),
        ];
        if let Some((name, len)) = lengths.iter().find(|(_, len)| *len != nodes) {
            return Err(ModelError::Invalid(format!(
                "{} has {} entries, expected {}",
                name, len, nodes
            )));
        }
        for node in 0..nodes {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == -1 {
                if self.value[node].len() != self.classes.len() {
                    return Err(ModelError::Invalid(format!(
                        "leaf {} has {} class counts, expected {}",
                        node,
                        self.value[node].len(),
                        self.classes.len()
                    )));
                }
                continue;
            }
            // Children must point forward, which also rules out cycles.
            for child in [left, right] {
                if child <= node as i64 || child as usize >= nodes {
                    return Err(ModelError::Invalid(format!(
                        "node {} has invalid child {}",
                        node, child
                    )));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= self.n_features {
                return Err(ModelError::Invalid(format!(
                    "node {} splits on unknown feature {}",
                    node, feature
                )));
            }
        }
        Ok(())
    }

    fn predict_row(&self, row: &[i64]) -> ModelResult<i64> {
        check_row(self.n_features, row)?;
        let mut node = 0usize;
        while self.children_left[node] != -1 {
            let x = row[self.feature[node] as usize] as f64;
            node = if x <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        Ok(self.classes[argmax(&self.value[node])])
    }
}

impl Classifier for DecisionTree {
    fn predict(&self, rows: &[FeatureVector]) -> ModelResult<Vec<i64>> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}
