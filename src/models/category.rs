use serde::{Deserialize, Serialize};

/// Category node as returned by the commerce backend.
/// The tree is recursive; the storefront uses at least two levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<Category>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subcategories: Vec::new(),
        }
    }

    pub fn with_subcategories(mut self, subcategories: Vec<Category>) -> Self {
        self.subcategories = subcategories;
        self
    }

    /// Depth-first search by id, including this node
    pub fn find(&self, id: &str) -> Option<&Category> {
        if self.id == id {
            return Some(self);
        }
        self.subcategories.iter().find_map(|c| c.find(id))
    }

    /// Number of nodes in this subtree
    pub fn node_count(&self) -> usize {
        1 + self.subcategories.iter().map(Category::node_count).sum::<usize>()
    }
}

/// Product as far as the state core is concerned: an id, a display name and
/// whatever else the backend sent, kept untouched for the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Category {
        Category::new("c1", "Clothing").with_subcategories(vec![
            Category::new("c1-1", "Shirts"),
            Category::new("c1-2", "Shoes")
                .with_subcategories(vec![Category::new("c1-2-1", "Boots")]),
        ])
    }

    #[test]
    fn test_find_nested_category() {
        let root = tree();
        assert_eq!(root.find("c1-2-1").map(|c| c.name.as_str()), Some("Boots"));
        assert!(root.find("missing").is_none());
        assert_eq!(root.node_count(), 4);
    }

    #[test]
    fn test_category_without_subcategories_field() {
        let json = r#"[{"id":"a","name":"A","subcategories":[{"id":"b","name":"B"}]}]"#;
        let parsed: Vec<Category> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed[0].subcategories[0], Category::new("b", "B"));
    }

    #[test]
    fn test_product_keeps_unknown_attributes() {
        let json = r#"{"id":"p1","name":"Mug","price":{"centAmount":1200}}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Mug");
        assert_eq!(product.attributes["price"]["centAmount"], 1200);
    }
}
