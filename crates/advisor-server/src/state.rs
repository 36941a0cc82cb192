//! Application State

use std::sync::Arc;

use finance_advisor::AdviceEngine;
use inference_runtime::InstrumentPredictor;

use crate::config::ModelBackend;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Rule engine over the loaded predictor
    pub engine: Arc<AdviceEngine>,

    /// Backend the predictor was built from
    pub backend: ModelBackend,
}

impl AppState {
    pub fn new(predictor: Arc<InstrumentPredictor>, backend: ModelBackend) -> Self {
        Self { engine: Arc::new(AdviceEngine::new(predictor)), backend }
    }
}
