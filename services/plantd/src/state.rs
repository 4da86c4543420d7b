use std::sync::Arc;

use catalog::Catalog;
use chrono::Utc;
use datasets::ReconcilerRules;
use heuristics::PredictionResult;
use tokio::sync::RwLock;
use tracing::info;

use crate::classifier::{Classifier, HeuristicClassifier};
use crate::config::AppConfig;
use crate::history::PredictionHistory;

pub type SharedState = Arc<AppState>;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
    pub rules: ReconcilerRules,
    pub classifier: Arc<dyn Classifier>,
    pub history: Arc<RwLock<PredictionHistory>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let catalog = Arc::new(match &config.catalog_path {
            Some(path) => Catalog::load_or_empty(path).logged("catalog"),
            None => Catalog::builtin(),
        });
        info!(classes = catalog.len(), "catalog ready");

        let classifier = Arc::new(HeuristicClassifier::new(catalog.clone(), config.preprocess_images));
        Self::with_classifier(config, catalog, classifier)
    }

    pub fn with_classifier(config: AppConfig, catalog: Arc<Catalog>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            config,
            catalog,
            rules: ReconcilerRules::default(),
            classifier,
            history: Arc::new(RwLock::new(PredictionHistory::new())),
        }
    }

    pub async fn record_prediction(&self, res: &PredictionResult, image_name: &str, image_hash_hex: &str) -> u64 {
        self.history
            .write()
            .await
            .record(res, image_name, image_hash_hex, Utc::now())
    }
}
