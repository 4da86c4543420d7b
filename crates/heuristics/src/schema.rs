use catalog::ClassId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Diseased,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Diseased => "diseased",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopPrediction {
    pub class: String,
    pub confidence: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub class_id: ClassId,
    pub plant: String,
    pub disease: String,        // "Healthy" iff status == Healthy
    pub status: HealthStatus,
    pub confidence: f64,        // 0.0..=1.0
    pub full_class: String,
    pub top_predictions: Vec<TopPrediction>, // [0] is the main prediction
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub total_classes: usize,
    pub accuracy: String,
    pub input_size: [u32; 3],
    pub framework: String,
}
