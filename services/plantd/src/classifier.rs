use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use catalog::Catalog;
use heuristics::{HeuristicPredictor, ModelInfo, PredictError, PredictionResult};
use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error(transparent)]
    Predict(#[from] PredictError),
    #[error("classifier task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, image: &Path) -> Result<PredictionResult, ClassifyError>;
    fn model_info(&self) -> ModelInfo;
    fn name(&self) -> &'static str;
}

pub struct HeuristicClassifier {
    predictor: HeuristicPredictor,
}

impl HeuristicClassifier {
    pub fn new(catalog: Arc<Catalog>, preprocess: bool) -> Self {
        Self {
            predictor: HeuristicPredictor::new(catalog).with_preprocessing(preprocess),
        }
    }
}

#[async_trait]
impl Classifier for HeuristicClassifier {
    async fn classify(&self, image: &Path) -> Result<PredictionResult, ClassifyError> {
        let predictor = self.predictor.clone();
        let path = image.to_path_buf();

        // image decode is blocking; every call gets its own generator
        let res = tokio::task::spawn_blocking(move || {
            let mut rng = StdRng::from_entropy();
            predictor.predict(&path, &mut rng)
        })
        .await??;
        Ok(res)
    }

    fn model_info(&self) -> ModelInfo {
        self.predictor.model_info()
    }

    fn name(&self) -> &'static str {
        "Simple ML Service (Heuristic)"
    }
}
