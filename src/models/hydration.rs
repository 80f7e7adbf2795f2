use serde::{Deserialize, Serialize};

/// Server-computed state snapshot delivered with a server-rendered page.
///
/// `slices` maps a slice name (`auth`, `products`, `menu`) to the subset of
/// that slice's fields the server filled in. Unknown slice names are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationSnapshot {
    pub navigation_id: String,
    #[serde(default)]
    pub slices: serde_json::Map<String, serde_json::Value>,
}

impl HydrationSnapshot {
    pub fn new(navigation_id: impl Into<String>) -> Self {
        Self {
            navigation_id: navigation_id.into(),
            slices: serde_json::Map::new(),
        }
    }

    pub fn with_slice(mut self, name: &str, fields: serde_json::Value) -> Self {
        self.slices.insert(name.to_string(), fields);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
