// ============================================================================
// APP - one store + view-models per application instance
// ============================================================================
// Created once when the page boots; everything that needs the store gets it
// from here instead of a global. Dropping the app drops the store.
// ============================================================================

use std::rc::Rc;

use crate::models::HydrationSnapshot;
use crate::services::{AuthService, CatalogFetchService};
use crate::state::{AppState, AppStore, HydrationReconciler, MenuAction};
use crate::viewmodels::{AuthViewModel, CatalogViewModel};

pub struct StorefrontApp {
    store: AppStore,
    catalog: CatalogViewModel,
    auth: AuthViewModel,
    hydration: HydrationReconciler,
}

impl StorefrontApp {
    pub fn new(
        catalog_service: Rc<dyn CatalogFetchService>,
        auth_service: Rc<dyn AuthService>,
    ) -> Self {
        let store = AppStore::new(AppState::new());
        Self {
            catalog: CatalogViewModel::new(store.clone(), catalog_service),
            auth: AuthViewModel::new(store.clone(), auth_service),
            hydration: HydrationReconciler::new(store.clone()),
            store,
        }
    }

    pub fn store(&self) -> &AppStore {
        &self.store
    }

    pub fn catalog(&self) -> &CatalogViewModel {
        &self.catalog
    }

    pub fn auth(&self) -> &AuthViewModel {
        &self.auth
    }

    pub fn hydration(&self) -> &HydrationReconciler {
        &self.hydration
    }

    /// Server-rendered navigation: merge the page's snapshot before the
    /// view layer reads anything
    pub fn on_navigation(&self, snapshot: Option<HydrationSnapshot>) -> bool {
        match snapshot {
            Some(snapshot) => self.hydration.hydrate(snapshot),
            None => false,
        }
    }

    pub fn set_burger_menu(&self, open: bool) {
        self.store.dispatch(MenuAction::SetBurgerMenu(open).into());
    }
}

#[cfg(target_arch = "wasm32")]
impl StorefrontApp {
    /// Fire-and-forget category fetch on the browser's event loop
    pub fn spawn_fetch_categories(&self) {
        let fetch = self.catalog.fetch_categories();
        wasm_bindgen_futures::spawn_local(async move {
            let _ = fetch.await;
        });
    }

    /// Snapshot embedded by the server in `<script id="__STOREFRONT_STATE__">`
    pub fn read_page_snapshot() -> Option<HydrationSnapshot> {
        use crate::utils::constants::HYDRATION_SCRIPT_ID;

        let json = web_sys::window()?
            .document()?
            .get_element_by_id(HYDRATION_SCRIPT_ID)?
            .text_content()?;

        match HydrationSnapshot::from_json(&json) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::error!("❌ Invalid hydration snapshot: {}", e);
                None
            }
        }
    }
}
