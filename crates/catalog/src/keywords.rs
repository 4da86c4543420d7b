use serde::{Deserialize, Serialize};

/// Ordered `keyword -> plant type` table. The first keyword contained in the
/// (lower-cased) input wins, so order encodes priority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantKeywords {
    entries: Vec<(String, String)>,
}

impl Default for PlantKeywords {
    fn default() -> Self {
        Self::new([
            ("corn", "Corn"),
            ("maize", "Corn"),
            ("potato", "Potato"),
            ("tomato", "Tomato"),
        ])
    }
}

impl PlantKeywords {
    pub fn new<I, K, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, p)| (k.into().to_lowercase(), p.into()))
                .collect(),
        }
    }

    /// Plant type for the first keyword found in `text`, case-insensitively.
    pub fn plant_for(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.entries
            .iter()
            .find(|(kw, _)| lower.contains(kw.as_str()))
            .map(|(_, plant)| plant.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p.as_str()))
    }
}
