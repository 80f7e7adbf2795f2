// ============================================================================
// STOREFRONT STATE - client-side session & data-synchronization core
// ============================================================================
// - Models: shapes shared with the commerce backend
// - Services: backend collaborators behind traits (HTTP impl on wasm32)
// - State: slices, root reducer, store, hydration
// - ViewModels: async flows that feed results back through dispatch
// ============================================================================

pub mod app;
pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

pub use app::StorefrontApp;
pub use state::{Action, AppState, AppStore};

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use crate::config::CONFIG;
    use crate::models::Credentials;
    use crate::services::ApiClient;
    use crate::StorefrontApp;

    // One app per page. Created by `start`, dropped by `shutdown`.
    thread_local! {
        static APP: RefCell<Option<StorefrontApp>> = RefCell::new(None);
    }

    fn with_app<R>(f: impl FnOnce(&StorefrontApp) -> R) -> Option<R> {
        APP.with(|cell| cell.borrow().as_ref().map(f))
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if CONFIG.is_logging_enabled() {
            wasm_logger::init(wasm_logger::Config::default());
        }
        log::info!("🛒 Storefront state core starting ({})", CONFIG.environment);

        let client = Rc::new(ApiClient::new());
        let app = StorefrontApp::new(client.clone(), client);
        app.on_navigation(StorefrontApp::read_page_snapshot());

        APP.with(|cell| *cell.borrow_mut() = Some(app));
        Ok(())
    }

    /// Called by the router after a server-rendered navigation
    #[wasm_bindgen]
    pub fn storefront_hydrate(json: &str) -> Result<bool, JsValue> {
        with_app(|app| app.hydration().hydrate_json(json))
            .ok_or_else(|| JsValue::from_str("storefront app not started"))?
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen]
    pub fn storefront_fetch_categories() {
        if with_app(|app| app.spawn_fetch_categories()).is_none() {
            log::warn!("⚠️ fetch requested before start");
        }
    }

    #[wasm_bindgen]
    pub fn storefront_login(email: String, password: String) {
        let Some(auth) = with_app(|app| app.auth().clone()) else {
            log::warn!("⚠️ login requested before start");
            return;
        };
        wasm_bindgen_futures::spawn_local(async move {
            let credentials = Credentials::new(email, password);
            if let Some(error) = auth.login(&credentials).await.error() {
                log::warn!("⚠️ Login failed: {}", error);
            }
        });
    }

    #[wasm_bindgen]
    pub fn storefront_logout() {
        if let Some(auth) = with_app(|app| app.auth().clone()) {
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(error) = auth.logout().await.error() {
                    log::warn!("⚠️ Logout incomplete: {}", error);
                }
            });
        }
    }

    #[wasm_bindgen]
    pub fn storefront_set_burger_menu(open: bool) {
        with_app(|app| app.set_burger_menu(open));
    }

    /// Current state as JSON for the view bindings
    #[wasm_bindgen]
    pub fn storefront_state() -> Option<String> {
        with_app(|app| serde_json::to_string(&*app.store().get_state()).ok()).flatten()
    }

    /// Teardown: drops the store and every subscription tied to it
    #[wasm_bindgen]
    pub fn storefront_shutdown() {
        APP.with(|cell| cell.borrow_mut().take());
        log::info!("🛑 Storefront state core stopped");
    }
}
