// ============================================================================
// CATALOG VIEWMODEL - category fetch coordination
// ============================================================================
// Pending is dispatched when the fetch is requested; the result is fed back
// through exactly one more dispatch. Concurrent fetches are not de-duplicated:
// whichever resolves last owns `categories`.
// ============================================================================

use std::future::Future;
use std::rc::Rc;

use crate::models::{Category, Product};
use crate::services::CatalogFetchService;
use crate::state::{AppStore, AsyncUnit, CatalogAction, PendingUnit};

#[derive(Clone)]
pub struct CatalogViewModel {
    store: AppStore,
    service: Rc<dyn CatalogFetchService>,
}

impl CatalogViewModel {
    pub fn new(store: AppStore, service: Rc<dyn CatalogFetchService>) -> Self {
        Self { store, service }
    }

    /// Start a category fetch.
    ///
    /// The pending transition is committed before this returns, so the view
    /// can show its loading state even if the future is polled later.
    pub fn fetch_categories(&self) -> impl Future<Output = AsyncUnit<Vec<Category>>> + 'static {
        let request_id = self.store.next_request_id();
        self.store
            .dispatch(CatalogAction::FetchCategoriesPending { request_id }.into());
        let pending = PendingUnit::new(request_id);

        let store = self.store.clone();
        let service = self.service.clone();
        async move {
            match service.get_categories_with_subcategories().await {
                Ok(categories) => {
                    log::info!("✅ Categories fetched (#{}): {}", request_id, categories.len());
                    store.dispatch(
                        CatalogAction::FetchCategoriesFulfilled {
                            request_id,
                            categories: categories.clone(),
                        }
                        .into(),
                    );
                    pending.fulfill(categories)
                }
                Err(e) => {
                    let error = e.to_string();
                    log::error!("❌ Category fetch #{} failed: {}", request_id, error);
                    store.dispatch(
                        CatalogAction::FetchCategoriesRejected {
                            request_id,
                            error: error.clone(),
                        }
                        .into(),
                    );
                    pending.reject(error)
                }
            }
        }
    }

    pub fn set_products(&self, products: Vec<Product>) {
        self.store.dispatch(CatalogAction::SetProducts(products).into());
    }

    pub fn categories(&self) -> Vec<Category> {
        self.store.select(|s| s.products.categories.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.store.select(|s| s.products.loading)
    }
}
