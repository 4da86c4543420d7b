use serde::{Deserialize, Serialize};

pub type ClassId = u32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    pub id: ClassId,
    pub label: String, // "<PlantType> <DiseaseDescriptor>"
}

/// A label split on its first space: `"Potato Early blight"` -> ("Potato", "Early blight").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelParts<'a> {
    pub plant: &'a str,
    pub descriptor: &'a str,
}

impl<'a> LabelParts<'a> {
    pub fn is_healthy(&self) -> bool {
        self.descriptor.to_lowercase().contains("healthy")
    }
}

pub fn split_label(label: &str) -> LabelParts<'_> {
    match label.split_once(' ') {
        Some((plant, descriptor)) => LabelParts { plant, descriptor },
        None => LabelParts { plant: label, descriptor: "" },
    }
}

impl ClassEntry {
    pub fn new(id: ClassId, label: impl Into<String>) -> Self {
        Self { id, label: label.into() }
    }

    pub fn parts(&self) -> LabelParts<'_> {
        split_label(&self.label)
    }

    pub fn plant(&self) -> &str {
        self.parts().plant
    }

    pub fn is_healthy(&self) -> bool {
        self.parts().is_healthy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_first_space_only() {
        let p = split_label("Tomato Yellow Leaf Curl Virus");
        assert_eq!(p.plant, "Tomato");
        assert_eq!(p.descriptor, "Yellow Leaf Curl Virus");
    }

    #[test]
    fn test_split_without_space() {
        let p = split_label("Corn");
        assert_eq!(p.plant, "Corn");
        assert_eq!(p.descriptor, "");
        assert!(!p.is_healthy());
    }

    #[test]
    fn test_healthy_is_case_insensitive() {
        assert!(ClassEntry::new(3, "Corn healthy").is_healthy());
        assert!(ClassEntry::new(3, "Corn Healthy").is_healthy());
        assert!(!ClassEntry::new(1, "Corn Common rust").is_healthy());
    }
}
