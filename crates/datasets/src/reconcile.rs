use std::collections::BTreeMap;

use catalog::{Catalog, ClassEntry, ClassId};
use serde::{Deserialize, Serialize};

use crate::DatasetEntry;

/// A catalog class merged with the dataset folder that covers it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDatasetMatch {
    pub class_name: String,
    pub plant_type: String,
    pub disease_type: String,
    pub is_healthy: bool,
    pub display_name: String,
    pub image_count: u64,
}

/// Keyed by class id. Classes without a folder are absent.
pub type ClassDatasetMapping = BTreeMap<ClassId, ClassDatasetMatch>;

/// Does `dataset` cover the class `label`? Plant and disease are each a
/// case-insensitive substring test against the label's first-space split.
pub fn dataset_matches(label: &str, dataset: &DatasetEntry) -> bool {
    let parts = catalog::split_label(label);
    dataset.plant_type.to_lowercase().contains(&parts.plant.to_lowercase())
        && dataset.disease_type.to_lowercase().contains(&parts.descriptor.to_lowercase())
}

/// Best folder for `entry`: an exact (case-insensitive, trimmed) disease match
/// wins over a substring match; otherwise the first qualifying folder in
/// `datasets` order.
pub fn find_dataset<'a>(entry: &ClassEntry, datasets: &'a [DatasetEntry]) -> Option<&'a DatasetEntry> {
    let descriptor = entry.parts().descriptor.trim();
    let mut candidates = datasets.iter().filter(|d| dataset_matches(&entry.label, d));
    let first = candidates.next()?;
    if first.disease_type.trim().eq_ignore_ascii_case(descriptor) {
        return Some(first);
    }
    Some(
        candidates
            .find(|d| d.disease_type.trim().eq_ignore_ascii_case(descriptor))
            .unwrap_or(first),
    )
}

pub fn map_classes_to_datasets(catalog: &Catalog, datasets: &[DatasetEntry]) -> ClassDatasetMapping {
    catalog
        .iter()
        .filter_map(|entry| {
            let ds = find_dataset(entry, datasets)?;
            Some((
                entry.id,
                ClassDatasetMatch {
                    class_name: entry.label.clone(),
                    plant_type: ds.plant_type.clone(),
                    disease_type: ds.disease_type.clone(),
                    is_healthy: ds.is_healthy,
                    display_name: ds.display_name.clone(),
                    image_count: ds.image_count,
                },
            ))
        })
        .collect()
}

/// How much of the catalog the dataset tree covers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    pub total_classes: usize,
    pub matched_classes: usize,
    pub missing: Vec<ClassEntry>,
    pub total_images: u64,
}

pub fn coverage(catalog: &Catalog, mapping: &ClassDatasetMapping) -> CoverageReport {
    CoverageReport {
        total_classes: catalog.len(),
        matched_classes: mapping.len(),
        missing: catalog
            .iter()
            .filter(|e| !mapping.contains_key(&e.id))
            .cloned()
            .collect(),
        total_images: mapping.values().map(|m| m.image_count).sum(),
    }
}
