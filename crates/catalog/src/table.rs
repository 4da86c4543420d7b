use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{ClassEntry, ClassId, Degraded};

const BUILTIN_LABELS: [&str; 17] = [
    "Corn Cercospora leaf spot",
    "Corn Common rust",
    "Corn Northern Leaf Blight",
    "Corn healthy",
    "Potato Early blight",
    "Potato Late blight",
    "Potato healthy",
    "Tomato Bacterial spot",
    "Tomato Early blight",
    "Tomato Late blight",
    "Tomato Leaf Mold",
    "Tomato Septoria leaf spot",
    "Tomato Spider mites",
    "Tomato Target Spot",
    "Tomato Yellow Leaf Curl Virus",
    "Tomato mosaic virus",
    "Tomato healthy",
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not a JSON object of id -> label: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("class id key {0:?} is not a non-negative integer")]
    BadId(String),
    #[error("class id {0} appears under more than one key")]
    DuplicateId(ClassId),
    #[error("class ids must be contiguous from 0: expected {expected}, found {found}")]
    NonContiguous { expected: ClassId, found: ClassId },
    #[error("duplicate class label {0:?}")]
    DuplicateLabel(String),
    #[error("class label {0:?} has no '<Plant> <Descriptor>' form")]
    MalformedLabel(String),
}

/// The fixed universe of predictable classes, indexed by contiguous ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<ClassEntry>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_LABELS
                .iter()
                .enumerate()
                .map(|(i, l)| ClassEntry::new(i as ClassId, *l))
                .collect(),
        }
    }

    /// Build from labels in id order, checking uniqueness and label shape.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for (i, label) in labels.into_iter().enumerate() {
            let label: String = label.into();
            let trimmed = label.trim();
            match trimmed.split_once(' ') {
                Some((plant, rest)) if !plant.is_empty() && !rest.trim().is_empty() => {}
                _ => return Err(CatalogError::MalformedLabel(label)),
            }
            if !seen.insert(trimmed.to_string()) {
                return Err(CatalogError::DuplicateLabel(label));
            }
            entries.push(ClassEntry::new(i as ClassId, trimmed));
        }
        Ok(Self { entries })
    }

    /// Parse the `{"0": "Corn Cercospora leaf spot", ...}` catalog format.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, String> = serde_json::from_str(text)?;

        let mut by_id = BTreeMap::new();
        for (key, label) in raw {
            let id: ClassId = key.trim().parse().map_err(|_| CatalogError::BadId(key.clone()))?;
            if by_id.insert(id, label).is_some() {
                return Err(CatalogError::DuplicateId(id));
            }
        }

        for (expected, found) in by_id.keys().enumerate() {
            if expected as ClassId != *found {
                return Err(CatalogError::NonContiguous { expected: expected as ClassId, found: *found });
            }
        }

        Self::from_labels(by_id.into_values())
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Never fails: a missing or malformed file yields an empty catalog plus the issue.
    pub fn load_or_empty(path: &Path) -> Degraded<Self, CatalogError> {
        Degraded::from_result(Self::load(path))
    }

    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .entries
            .iter()
            .map(|e| (e.id.to_string(), serde_json::Value::String(e.label.clone())))
            .collect();
        serde_json::Value::Object(map)
    }

    pub fn get(&self, id: ClassId) -> Option<&ClassEntry> {
        self.entries.get(id as usize)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassEntry> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Ids whose label's plant token equals `plant` (case-insensitive).
    pub fn ids_for_plant(&self, plant: &str) -> Vec<ClassId> {
        self.entries
            .iter()
            .filter(|e| e.plant().eq_ignore_ascii_case(plant))
            .map(|e| e.id)
            .collect()
    }

    /// Distinct plant types in id order.
    pub fn plants(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for e in &self.entries {
            let p = e.plant();
            if !out.iter().any(|x| x.eq_ignore_ascii_case(p)) {
                out.push(p);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_shape() {
        let c = Catalog::builtin();
        assert_eq!(c.len(), 17);
        assert_eq!(c.ids_for_plant("Corn"), vec![0, 1, 2, 3]);
        assert_eq!(c.ids_for_plant("potato"), vec![4, 5, 6]);
        assert_eq!(c.ids_for_plant("Tomato"), (7..=16).collect::<Vec<_>>());
        assert_eq!(c.plants(), vec!["Corn", "Potato", "Tomato"]);
    }

    #[test]
    fn test_builtin_one_healthy_per_plant() {
        let c = Catalog::builtin();
        for plant in c.plants() {
            let healthy = c
                .ids_for_plant(plant)
                .into_iter()
                .filter(|id| c.get(*id).map(|e| e.is_healthy()).unwrap_or(false))
                .count();
            assert_eq!(healthy, 1, "{plant}");
        }
    }

    #[test]
    fn test_json_roundtrip_of_builtin() {
        let c = Catalog::builtin();
        let text = c.to_json().to_string();
        assert_eq!(Catalog::from_json(&text).unwrap(), c);
    }

    #[test]
    fn test_numeric_key_order() {
        // "10" sorts before "2" as a string; ids must still line up
        let text = r#"{"0":"A x","1":"A y","2":"A z","3":"A w","4":"A v","5":"A u","6":"A t","7":"A s","8":"A r","9":"A q","10":"A p"}"#;
        let c = Catalog::from_json(text).unwrap();
        assert_eq!(c.get(10).unwrap().label, "A p");
        assert_eq!(c.get(2).unwrap().label, "A z");
    }

    #[test]
    fn test_rejects_gap() {
        let err = Catalog::from_json(r#"{"0":"Corn healthy","2":"Corn Common rust"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::NonContiguous { expected: 1, found: 2 }));
    }

    #[test]
    fn test_rejects_duplicate_and_malformed() {
        let err = Catalog::from_json(r#"{"0":"Corn healthy","1":"Corn healthy"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateLabel(_)));

        let err = Catalog::from_json(r#"{"0":"Corn"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedLabel(_)));

        let err = Catalog::from_json(r#"{"zero":"Corn healthy"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::BadId(_)));
    }

    #[test]
    fn test_rejects_keys_naming_the_same_id() {
        let err = Catalog::from_json(r#"{"0":"Corn healthy","00":"Corn Common rust"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(0)));

        let err = Catalog::from_json(r#"{"1":"Corn healthy"," 1":"Corn Common rust","0":"Corn Gray spot"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(1)));
    }
}
