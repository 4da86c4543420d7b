use serde::{Deserialize, Serialize};

use crate::ReconcilerRules;

/// What a dataset folder name says about its contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFolder {
    pub folder_name: String,
    pub plant_type: String,
    pub disease_type: String,
    pub is_healthy: bool,
    pub display_name: String,
}

/// Parse `"<PlantRaw>___<DiseaseRaw>"`. Returns `None` for excluded names and
/// names without the separator; that is not an error.
pub fn parse_folder_name(name: &str, rules: &ReconcilerRules) -> Option<ParsedFolder> {
    let clean = rules
        .strip_suffixes
        .iter()
        .find_map(|s| name.strip_suffix(s.as_str()))
        .unwrap_or(name);

    if rules.excluded.contains(clean) {
        return None;
    }

    let mut parts = clean.split(rules.separator.as_str());
    let plant_raw = parts.next()?;
    let disease_raw = parts.next()?;

    let plant_part = plant_raw.replace(['(', ')'], "").replace('_', " ");
    let disease_type = disease_raw.replace('_', " ");

    let plant_type = rules
        .plant_keywords
        .plant_for(&plant_part)
        .map(str::to_string)
        .unwrap_or(plant_part);

    Some(ParsedFolder {
        folder_name: clean.to_string(),
        is_healthy: disease_type.to_lowercase().contains("healthy"),
        display_name: format!("{plant_type} {disease_type}").trim().to_string(),
        plant_type,
        disease_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(name: &str) -> Option<ParsedFolder> {
        parse_folder_name(name, &ReconcilerRules::default())
    }

    #[test]
    fn test_corn_healthy() {
        let p = parse("Corn_(maize)___healthy").unwrap();
        assert_eq!(p.folder_name, "Corn_(maize)___healthy");
        assert_eq!(p.plant_type, "Corn");
        assert_eq!(p.disease_type, "healthy");
        assert!(p.is_healthy);
        assert_eq!(p.display_name, "Corn healthy");
    }

    #[test]
    fn test_tomato_bacterial_spot() {
        let p = parse("Tomato___Bacterial_spot").unwrap();
        assert_eq!(p.plant_type, "Tomato");
        assert_eq!(p.disease_type, "Bacterial spot");
        assert!(!p.is_healthy);
        assert_eq!(p.display_name, "Tomato Bacterial spot");
    }

    #[test]
    fn test_unknown_plant_passes_through() {
        let p = parse("Pepper,_bell___Bacterial_spot").unwrap();
        assert_eq!(p.plant_type, "Pepper, bell");
        assert_eq!(p.display_name, "Pepper, bell Bacterial spot");
    }

    #[test]
    fn test_trailing_underscore_trimmed_in_display_only() {
        let p = parse("Corn_(maize)___Common_rust_").unwrap();
        assert_eq!(p.disease_type, "Common rust ");
        assert_eq!(p.display_name, "Corn Common rust");
    }

    #[test]
    fn test_skipped_names() {
        assert_eq!(parse("Model_CNN_Finished"), None);
        assert_eq!(parse("Model_CNN_Finished.h5"), None);
        assert_eq!(parse("massive_16-17"), None);
        assert_eq!(parse("model-massive_16-80.51.ipynb"), None);
        assert_eq!(parse("Tomato_Bacterial_spot"), None);
        assert_eq!(parse("README.txt"), None);
    }

    #[test]
    fn test_extra_denylist_entry() {
        let rules = ReconcilerRules::default().exclude("Tomato___scratch");
        assert_eq!(parse_folder_name("Tomato___scratch", &rules), None);
        assert!(parse_folder_name("Tomato___healthy", &rules).is_some());
    }
}
