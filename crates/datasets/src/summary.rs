use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::DatasetEntry;

/// Per-folder row of the grouped dataset listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub id: String, // folder name
    pub name: String,
    pub disease_type: String,
    pub is_healthy: bool,
    pub image_count: u64,
    pub folder_path: PathBuf,
}

pub fn group_by_plant_type(datasets: &[DatasetEntry]) -> BTreeMap<String, Vec<DatasetSummary>> {
    let mut grouped: BTreeMap<String, Vec<DatasetSummary>> = BTreeMap::new();
    for d in datasets {
        grouped.entry(d.plant_type.clone()).or_default().push(DatasetSummary {
            id: d.folder_name.clone(),
            name: d.display_name.clone(),
            disease_type: d.disease_type.clone(),
            is_healthy: d.is_healthy,
            image_count: d.image_count,
            folder_path: d.folder_path.clone(),
        });
    }
    grouped
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantTypeStats {
    pub plant_type: String,
    pub dataset_count: usize,
    pub total_images: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSplit {
    pub datasets: usize,
    pub images: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStats {
    pub total_datasets: usize,
    pub total_images: u64,
    pub plant_types: Vec<PlantTypeStats>, // most images first
    pub healthy: HealthSplit,
    pub diseased: HealthSplit,
}

impl DatasetStats {
    pub fn from_entries(datasets: &[DatasetEntry]) -> Self {
        let mut by_plant: BTreeMap<&str, PlantTypeStats> = BTreeMap::new();
        let mut stats = DatasetStats {
            total_datasets: datasets.len(),
            ..Default::default()
        };

        for d in datasets {
            stats.total_images += d.image_count;

            let split = if d.is_healthy { &mut stats.healthy } else { &mut stats.diseased };
            split.datasets += 1;
            split.images += d.image_count;

            let p = by_plant.entry(&d.plant_type).or_insert_with(|| PlantTypeStats {
                plant_type: d.plant_type.clone(),
                dataset_count: 0,
                total_images: 0,
            });
            p.dataset_count += 1;
            p.total_images += d.image_count;
        }

        stats.plant_types = by_plant.into_values().collect();
        // stable sort keeps alphabetical order among ties
        stats.plant_types.sort_by(|a, b| b.total_images.cmp(&a.total_images));
        stats
    }
}
