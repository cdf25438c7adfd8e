use crate::config::ServerConfig;
use crate::labels::LabelTable;
use crate::model::{Classifier, load_model};
use crate::prediction;
use crate::render::PageRenderer;
use std::sync::Arc;

/// Read-only state shared by every worker. Built once before the server
/// starts and never mutated afterwards.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn Classifier>,
    pub labels: LabelTable,
    pub renderer: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(model: Arc<dyn Classifier>, labels: LabelTable) -> anyhow::Result<Self> {
        let renderer = PageRenderer::new()?;
        Ok(Self {
            model,
            labels,
            renderer: Arc::new(renderer),
        })
    }

    /// Loads the model named in `config`. Any failure here is fatal.
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let model = load_model(&config.model_path)?;
        Self::new(Arc::new(model), LabelTable::default())
    }

    /// Text shown under the form for one submission.
    pub fn prediction_text(&self, pairs: &[(String, String)]) -> String {
        match prediction::prediction_text(self.model.as_ref(), &self.labels, pairs) {
            Ok(text) => {
                log::debug!("{}", text);
                text
            }
            Err(e) => {
                log::warn!("Prediction failed: {}", e);
                e.prediction_text()
            }
        }
    }
}
