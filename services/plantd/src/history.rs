use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use heuristics::{HealthStatus, PredictionResult};
use serde::Serialize;

/// Newest records kept for the dashboard. Counters cover every prediction.
pub const HISTORY_CAPACITY: usize = 500;

#[derive(Clone, Debug, Serialize)]
pub struct PredictionRecord {
    pub id: u64,
    pub plant: String,
    pub disease: String,
    pub status: HealthStatus,
    pub confidence: f64,
    pub full_class: String,
    pub image_name: String,
    pub image_hash_hex: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_predictions: u64,
    pub today_predictions: u64,
    pub avg_confidence: f64, // percent, one decimal
    pub healthy_plants: u64,
    pub diseased_plants: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecentPrediction {
    pub id: u64,
    pub prediction: String,
    pub confidence: f64, // percent
    pub status: HealthStatus,
    pub plant_type: String,
    pub disease_name: Option<String>,
    pub image_name: String,
    pub image_hash: String, // BLAKE3 hex of the uploaded bytes
    pub timestamp: String,
}

#[derive(Debug, Default)]
pub struct PredictionHistory {
    records: VecDeque<PredictionRecord>,
    next_id: u64,
    total: u64,
    healthy: u64,
    diseased: u64,
    confidence_sum: f64,
}

impl PredictionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        res: &PredictionResult,
        image_name: &str,
        image_hash_hex: &str,
        at: DateTime<Utc>,
    ) -> u64 {
        self.next_id += 1;
        self.total += 1;
        self.confidence_sum += res.confidence;
        match res.status {
            HealthStatus::Healthy => self.healthy += 1,
            HealthStatus::Diseased => self.diseased += 1,
        }

        if self.records.len() == HISTORY_CAPACITY {
            self.records.pop_front();
        }
        self.records.push_back(PredictionRecord {
            id: self.next_id,
            plant: res.plant.clone(),
            disease: res.disease.clone(),
            status: res.status,
            confidence: res.confidence,
            full_class: res.full_class.clone(),
            image_name: image_name.to_string(),
            image_hash_hex: image_hash_hex.to_string(),
            created_at: at,
        });
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `todayPredictions` counts retained records from the current UTC day.
    pub fn stats(&self, now: DateTime<Utc>) -> DashboardStats {
        let today = now.date_naive();
        let avg = if self.total == 0 {
            0.0
        } else {
            self.confidence_sum / self.total as f64 * 100.0
        };
        DashboardStats {
            total_predictions: self.total,
            today_predictions: self
                .records
                .iter()
                .filter(|r| r.created_at.date_naive() == today)
                .count() as u64,
            avg_confidence: round1(avg),
            healthy_plants: self.healthy,
            diseased_plants: self.diseased,
        }
    }

    /// Newest first.
    pub fn recent(&self, limit: usize, now: DateTime<Utc>) -> Vec<RecentPrediction> {
        self.records
            .iter()
            .rev()
            .take(limit)
            .map(|r| RecentPrediction {
                id: r.id,
                prediction: format!("{} - {}", r.plant, r.disease),
                confidence: round1(r.confidence * 100.0),
                status: r.status,
                plant_type: r.plant.clone(),
                disease_name: match r.status {
                    HealthStatus::Healthy => None,
                    HealthStatus::Diseased => Some(r.disease.clone()),
                },
                image_name: r.image_name.clone(),
                image_hash: r.image_hash_hex.clone(),
                timestamp: time_ago(now, r.created_at),
            })
            .collect()
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub fn time_ago(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);
    let plural = |n: i64, unit: &str| format!("{n} {unit}{} ago", if n > 1 { "s" } else { "" });
    match secs {
        s if s < 60 => format!("{s} seconds ago"),
        s if s < 3600 => plural(s / 60, "minute"),
        s if s < 86400 => plural(s / 3600, "hour"),
        s => plural(s / 86400, "day"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use heuristics::TopPrediction;

    fn pred(plant: &str, disease: &str, status: HealthStatus, confidence: f64) -> PredictionResult {
        let full = if status == HealthStatus::Healthy {
            format!("{plant} healthy")
        } else {
            format!("{plant} {disease}")
        };
        PredictionResult {
            class_id: 0,
            plant: plant.to_string(),
            disease: disease.to_string(),
            status,
            confidence,
            full_class: full.clone(),
            top_predictions: vec![TopPrediction { class: full, confidence }],
        }
    }

    #[test]
    fn test_time_ago() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(time_ago(now, now - Duration::seconds(5)), "5 seconds ago");
        assert_eq!(time_ago(now, now - Duration::minutes(1)), "1 minute ago");
        assert_eq!(time_ago(now, now - Duration::minutes(2)), "2 minutes ago");
        assert_eq!(time_ago(now, now - Duration::hours(3)), "3 hours ago");
        assert_eq!(time_ago(now, now - Duration::days(1)), "1 day ago");
        assert_eq!(time_ago(now, now + Duration::seconds(5)), "0 seconds ago");
    }

    #[test]
    fn test_stats_and_recent() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut h = PredictionHistory::new();
        h.record(&pred("Corn", "Common rust", HealthStatus::Diseased, 0.8), "a.jpg", "aa", now - Duration::days(2));
        h.record(&pred("Potato", "Healthy", HealthStatus::Healthy, 0.9), "b.jpg", "bb", now - Duration::hours(1));

        let s = h.stats(now);
        assert_eq!(s.total_predictions, 2);
        assert_eq!(s.today_predictions, 1);
        assert_eq!(s.avg_confidence, 85.0);
        assert_eq!((s.healthy_plants, s.diseased_plants), (1, 1));

        let recent = h.recent(10, now);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].prediction, "Potato - Healthy");
        assert_eq!(recent[0].disease_name, None);
        assert_eq!(recent[0].timestamp, "1 hour ago");
        assert_eq!((recent[0].image_name.as_str(), recent[0].image_hash.as_str()), ("b.jpg", "bb"));
        assert_eq!(recent[1].disease_name.as_deref(), Some("Common rust"));
        assert_eq!(recent[1].confidence, 80.0);
        assert_eq!(h.recent(1, now).len(), 1);
    }

    #[test]
    fn test_capacity_keeps_newest_but_counts_all() {
        let now = Utc::now();
        let mut h = PredictionHistory::new();
        for _ in 0..HISTORY_CAPACITY + 10 {
            h.record(&pred("Tomato", "Leaf Mold", HealthStatus::Diseased, 0.75), "t.jpg", "cc", now);
        }
        assert_eq!(h.len(), HISTORY_CAPACITY);
        assert_eq!(h.stats(now).total_predictions, (HISTORY_CAPACITY + 10) as u64);
        assert_eq!(h.recent(1, now)[0].id, (HISTORY_CAPACITY + 10) as u64);
    }
}
