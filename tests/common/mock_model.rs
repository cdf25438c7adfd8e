use sighting_predictor::model::{Classifier, FeatureVector, ModelError, ModelResult};
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Returns this exact output for every call.
    Fixed(Vec<i64>),
    /// Fails as if the row had the wrong number of features.
    Fail,
}

/// Classifier stand-in that records every batch it is asked to predict.
pub struct MockModel {
    behavior: MockBehavior,
    calls: Mutex<Vec<Vec<FeatureVector>>>,
}

impl MockModel {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn returning(output: Vec<i64>) -> Self {
        Self::new(MockBehavior::Fixed(output))
    }

    pub fn calls(&self) -> Vec<Vec<FeatureVector>> {
        self.calls.lock().unwrap().clone()
    }
}

impl Classifier for MockModel {
    fn predict(&self, rows: &[FeatureVector]) -> ModelResult<Vec<i64>> {
        self.calls.lock().unwrap().push(rows.to_vec());
        match &self.behavior {
            MockBehavior::Fixed(output) => Ok(output.clone()),
            MockBehavior::Fail => Err(ModelError::FeatureCount {
                expected: 3,
                got: rows.first().map_or(0, Vec::len),
            }),
        }
    }
}
