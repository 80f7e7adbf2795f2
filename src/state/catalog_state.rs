// ============================================================================
// CATALOG STATE - categories tree + products
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::{Category, Product};

/// Catalog slice. `categories` is only ever replaced wholesale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogState {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    /// At least one category fetch is in flight
    pub loading: bool,
    pub in_flight: usize,
    /// Error of the most recent failed fetch, cleared by the next success
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    SetProducts(Vec<Product>),
    FetchCategoriesPending {
        request_id: u64,
    },
    FetchCategoriesFulfilled {
        request_id: u64,
        categories: Vec<Category>,
    },
    FetchCategoriesRejected {
        request_id: u64,
        error: String,
    },
}

/// Catalog fields present in a hydration snapshot
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPatch {
    pub products: Option<Vec<Product>>,
    pub categories: Option<Vec<Category>>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce(&self, action: CatalogAction) -> Self {
        match action {
            CatalogAction::SetProducts(products) => Self {
                products,
                ..self.clone()
            },
            CatalogAction::FetchCategoriesPending { request_id } => {
                log::debug!("📂 Category fetch #{} pending", request_id);
                let in_flight = self.in_flight + 1;
                Self {
                    in_flight,
                    loading: true,
                    ..self.clone()
                }
            }
            CatalogAction::FetchCategoriesFulfilled {
                request_id,
                categories,
            } => {
                log::debug!("📂 Category fetch #{} fulfilled", request_id);
                let in_flight = self.in_flight.saturating_sub(1);
                Self {
                    categories,
                    in_flight,
                    loading: in_flight > 0,
                    error: None,
                    ..self.clone()
                }
            }
            CatalogAction::FetchCategoriesRejected { request_id, error } => {
                log::debug!("📂 Category fetch #{} rejected: {}", request_id, error);
                let in_flight = self.in_flight.saturating_sub(1);
                Self {
                    in_flight,
                    loading: in_flight > 0,
                    error: Some(error),
                    ..self.clone()
                }
            }
        }
    }

    /// Merge into the nested fields; absent fields are left alone
    pub fn merge(&self, patch: CatalogPatch) -> Self {
        let mut next = self.clone();
        if let Some(products) = patch.products {
            next.products = products;
        }
        if let Some(categories) = patch.categories {
            next.categories = categories;
        }
        next
    }

    pub fn find_category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find_map(|c| c.find(id))
    }
}
