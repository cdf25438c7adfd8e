//! Request pipeline for `/predict`: form pairs in, display text out.

use crate::labels::LabelTable;
use crate::model::{Classifier, FeatureVector, ModelError};
use std::collections::HashSet;

pub const NO_INPUT: &str = "No input data provided";
pub const EMPTY_FEATURES: &str = "Input data is empty";

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("{0}")]
    EmptyInput(&'static str),

    #[error("invalid integer literal for field '{field}': '{value}'")]
    CoercionFailure { field: String, value: String },

    #[error(transparent)]
    Inference(#[from] ModelError),

    #[error("Invalid prediction output")]
    InvalidShape,

    #[error("Prediction output is out of range")]
    OutOfRange,
}

impl PredictError {
    /// Validation failures are expected; everything else is reported as an
    /// unexpected error.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PredictError::EmptyInput(_) | PredictError::InvalidShape | PredictError::OutOfRange
        )
    }

    pub fn prediction_text(&self) -> String {
        if self.is_validation() {
            format!("Error: {}", self)
        } else {
            format!("An error occurred: {}", self)
        }
    }
}

/// Keeps the first value of each field, in the order fields first appear.
pub fn first_value_per_field(pairs: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    pairs
        .into_iter()
        .filter(|(field, _)| seen.insert(field.clone()))
        .collect()
}

/// Coerces form values to integers, keeping submission order.
pub fn parse_features(pairs: &[(String, String)]) -> Result<FeatureVector, PredictError> {
    if pairs.is_empty() {
        return Err(PredictError::EmptyInput(NO_INPUT));
    }
    let features = pairs
        .iter()
        .map(|(field, value)| {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| PredictError::CoercionFailure {
                    field: field.clone(),
                    value: value.clone(),
                })
        })
        .collect::<Result<FeatureVector, _>>()?;
    if features.is_empty() {
        return Err(PredictError::EmptyInput(EMPTY_FEATURES));
    }
    Ok(features)
}

/// Runs the model on a single row and resolves the label.
pub fn predict_label<'a>(
    model: &dyn Classifier,
    labels: &'a LabelTable,
    features: FeatureVector,
) -> Result<&'a str, PredictError> {
    let output = model.predict(&[features])?;
    let [index] = output.as_slice() else {
        return Err(PredictError::InvalidShape);
    };
    labels.get(*index).ok_or(PredictError::OutOfRange)
}

/// Full pipeline, rendered to the text shown under the form.
pub fn prediction_text(
    model: &dyn Classifier,
    labels: &LabelTable,
    pairs: &[(String, String)],
) -> Result<String, PredictError> {
    let features = parse_features(pairs)?;
    let label = predict_label(model, labels, features)?;
    Ok(format!("Likely country: {}", label))
}
