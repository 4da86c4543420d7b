use std::collections::HashSet;

use catalog::PlantKeywords;

/// Data-driven knobs for folder parsing and image counting.
#[derive(Clone, Debug)]
pub struct ReconcilerRules {
    pub plant_keywords: PlantKeywords,
    /// Folder names (after suffix stripping) that are never datasets.
    pub excluded: HashSet<String>,
    /// Suffixes removed from a name before parsing.
    pub strip_suffixes: Vec<String>,
    pub separator: String,
    /// Lower-case, without the dot.
    pub image_extensions: Vec<String>,
}

impl Default for ReconcilerRules {
    fn default() -> Self {
        Self {
            plant_keywords: PlantKeywords::default(),
            excluded: ["model-massive_16-80.51", "massive_16-17", "Model_CNN_Finished"]
                .into_iter()
                .map(String::from)
                .collect(),
            strip_suffixes: [".h5", ".txt", ".ipynb"].into_iter().map(String::from).collect(),
            separator: "___".to_string(),
            image_extensions: ["jpg", "jpeg", "png", "gif", "webp"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl ReconcilerRules {
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.excluded.insert(name.into());
        self
    }

    pub fn is_image_name(&self, file_name: &str) -> bool {
        match std::path::Path::new(file_name).extension().and_then(|e| e.to_str()) {
            Some(ext) => {
                let ext = ext.to_lowercase();
                self.image_extensions.iter().any(|e| *e == ext)
            }
            None => false,
        }
    }
}
