use std::path::Path;
use std::sync::Arc;

use catalog::{Catalog, ClassId, PlantKeywords};
use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::preprocess::{preprocess_image, INPUT_SIZE};
use crate::{HealthStatus, ModelInfo, PredictError, PredictionResult, TopPrediction};

pub const HEALTHY_CONFIDENCE: (f64, f64) = (0.85, 0.95);
pub const DISEASED_CONFIDENCE: (f64, f64) = (0.70, 0.95);
/// Alternatives draw from `[0, ALTERNATIVE_CONFIDENCE_MAX)`.
pub const ALTERNATIVE_CONFIDENCE_MAX: f64 = 0.3;
pub const ALTERNATIVES: usize = 2;

/// Filename-keyword stand-in for a trained classifier.
///
/// Randomness is always supplied by the caller so a seeded generator gives
/// reproducible predictions.
#[derive(Clone, Debug)]
pub struct HeuristicPredictor {
    catalog: Arc<Catalog>,
    keywords: PlantKeywords,
    preprocess: bool,
}

impl HeuristicPredictor {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            keywords: PlantKeywords::default(),
            preprocess: false,
        }
    }

    pub fn with_keywords(mut self, keywords: PlantKeywords) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_preprocessing(mut self, on: bool) -> Self {
        self.preprocess = on;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            total_classes: self.catalog.len(),
            accuracy: "86.12%".to_string(),
            input_size: [INPUT_SIZE, INPUT_SIZE, 3],
            framework: "Heuristic (filename keywords)".to_string(),
        }
    }

    /// Pick a class id from the basename of `name`.
    ///
    /// A plant keyword narrows the draw to that plant's ids; otherwise the
    /// draw is uniform over the whole catalog.
    pub fn select_class<R: Rng + ?Sized>(&self, name: &str, rng: &mut R) -> Result<ClassId, PredictError> {
        if self.catalog.is_empty() {
            return Err(PredictError::EmptyCatalog);
        }

        let base = basename(name).to_lowercase();
        if let Some(plant) = self.keywords.plant_for(&base) {
            if let Some(id) = self.catalog.ids_for_plant(plant).choose(rng) {
                return Ok(*id);
            }
        }

        Ok(rng.gen_range(0..self.catalog.len()) as ClassId)
    }

    /// Prediction from the filename alone. No I/O.
    pub fn predict_name<R: Rng + ?Sized>(&self, name: &str, rng: &mut R) -> Result<PredictionResult, PredictError> {
        let class_id = self.select_class(name, rng)?;
        let entry = self.catalog.get(class_id).ok_or(PredictError::EmptyCatalog)?;
        let parts = entry.parts();

        let (lo, hi) = if parts.is_healthy() {
            HEALTHY_CONFIDENCE
        } else {
            DISEASED_CONFIDENCE
        };
        let confidence = rng.gen_range(lo..=hi);

        let (disease, status) = if parts.is_healthy() {
            ("Healthy".to_string(), HealthStatus::Healthy)
        } else if parts.descriptor.is_empty() {
            ("Unknown".to_string(), HealthStatus::Diseased)
        } else {
            (parts.descriptor.to_string(), HealthStatus::Diseased)
        };

        Ok(PredictionResult {
            class_id,
            plant: parts.plant.to_string(),
            disease,
            status,
            confidence,
            full_class: entry.label.clone(),
            top_predictions: self.top_predictions(class_id, confidence, rng),
        })
    }

    /// Preprocess the file at `path` (when enabled), then predict from its name.
    pub fn predict<R: Rng + ?Sized>(&self, path: &Path, rng: &mut R) -> Result<PredictionResult, PredictError> {
        if self.preprocess {
            let bytes = preprocess_image(path)?;
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "preprocessed image");
        }
        self.predict_name(&path.to_string_lossy(), rng)
    }

    fn top_predictions<R: Rng + ?Sized>(&self, main: ClassId, confidence: f64, rng: &mut R) -> Vec<TopPrediction> {
        let mut out = Vec::with_capacity(ALTERNATIVES + 1);
        if let Some(entry) = self.catalog.get(main) {
            out.push(TopPrediction { class: entry.label.clone(), confidence });
        }

        let others: Vec<ClassId> = self.catalog.ids().filter(|id| *id != main).collect();
        let n = ALTERNATIVES.min(others.len());
        for i in index::sample(rng, others.len(), n) {
            if let Some(entry) = self.catalog.get(others[i]) {
                out.push(TopPrediction {
                    class: entry.label.clone(),
                    confidence: rng.gen_range(0.0..ALTERNATIVE_CONFIDENCE_MAX),
                });
            }
        }
        out
    }
}

fn basename(name: &str) -> &str {
    Path::new(name)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn predictor() -> HeuristicPredictor {
        HeuristicPredictor::new(Arc::new(Catalog::builtin()))
    }

    #[test]
    fn test_keyword_only_in_basename() {
        let p = predictor();
        let mut rng = StdRng::seed_from_u64(1);
        // the directory says tomato, the file says potato
        for _ in 0..50 {
            let id = p.select_class("/data/tomato/potato_leaf.jpg", &mut rng).unwrap();
            assert!((4..=6).contains(&id));
        }
    }

    #[test]
    fn test_empty_catalog() {
        let p = HeuristicPredictor::new(Arc::new(Catalog::default()));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(p.predict_name("corn.jpg", &mut rng), Err(PredictError::EmptyCatalog)));
    }

    #[test]
    fn test_small_catalog_top_predictions() {
        let c = Catalog::from_labels(["Corn healthy", "Corn Common rust"]).unwrap();
        let p = HeuristicPredictor::new(Arc::new(c));
        let mut rng = StdRng::seed_from_u64(3);
        let res = p.predict_name("x.jpg", &mut rng).unwrap();
        assert_eq!(res.top_predictions.len(), 2);
        assert_ne!(res.top_predictions[0].class, res.top_predictions[1].class);
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("a/b/Corn.JPG"), "Corn.JPG");
        assert_eq!(basename("plain"), "plain");
    }
}
