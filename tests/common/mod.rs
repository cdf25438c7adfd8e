#![allow(dead_code)]

pub mod mock_model;

use sighting_predictor::{app_state::AppState, labels::LabelTable, model::Classifier};
use std::sync::Arc;

pub fn create_test_state(model: Arc<dyn Classifier>) -> AppState {
    AppState::new(model, LabelTable::default()).unwrap()
}

/// Pulls the message out of the rendered `<p class="result">` block.
pub fn extract_prediction_text(body: &[u8]) -> Option<String> {
    let page = std::str::from_utf8(body).ok()?;
    let start = page.find("<p class=\"result\">")? + "<p class=\"result\">".len();
    let end = page[start..].find("</p>")? + start;
    Some(page[start..end].trim().to_string())
}
