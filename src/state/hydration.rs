// ============================================================================
// HYDRATION - merge server-rendered state into the live store
// ============================================================================
// Unhydrated -> Hydrated { navigation_id }. A snapshot for the navigation
// already applied is a no-op; comparison is by id, never by payload.
// ============================================================================

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::HydrationSnapshot;
use crate::state::{Action, AppState, AppStore, CatalogPatch, MenuPatch, SessionPatch};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum HydrationStatus {
    #[default]
    Unhydrated,
    Hydrated {
        #[serde(rename = "navigationId")]
        navigation_id: String,
    },
}

impl HydrationStatus {
    pub fn is_hydrated_for(&self, navigation_id: &str) -> bool {
        matches!(self, HydrationStatus::Hydrated { navigation_id: id } if id == navigation_id)
    }
}

/// Slices a snapshot may address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceName {
    Auth,
    Products,
    Menu,
}

impl SliceName {
    pub const ALL: [SliceName; 3] = [SliceName::Auth, SliceName::Products, SliceName::Menu];

    pub fn key(&self) -> &'static str {
        match self {
            SliceName::Auth => "auth",
            SliceName::Products => "products",
            SliceName::Menu => "menu",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

fn parse_patch<P: DeserializeOwned>(slice: SliceName, value: &serde_json::Value) -> Option<P> {
    match serde_json::from_value::<P>(value.clone()) {
        Ok(patch) => Some(patch),
        Err(e) => {
            log::warn!("⚠️ Hydration: skipping malformed '{}' slice: {}", slice.key(), e);
            None
        }
    }
}

/// Root transition for `Action::Hydrate`
pub(crate) fn apply_snapshot(state: &AppState, snapshot: HydrationSnapshot) -> AppState {
    if state.hydration.is_hydrated_for(&snapshot.navigation_id) {
        log::debug!("💧 Navigation {} already hydrated", snapshot.navigation_id);
        return state.clone();
    }

    let mut next = state.clone();
    for (key, value) in &snapshot.slices {
        match SliceName::from_key(key) {
            Some(slice @ SliceName::Auth) => {
                if let Some(patch) = parse_patch::<SessionPatch>(slice, value) {
                    next.session = next.session.merge(patch);
                }
            }
            Some(slice @ SliceName::Products) => {
                if let Some(patch) = parse_patch::<CatalogPatch>(slice, value) {
                    next.products = next.products.merge(patch);
                }
            }
            Some(slice @ SliceName::Menu) => {
                if let Some(patch) = parse_patch::<MenuPatch>(slice, value) {
                    next.menu = next.menu.merge(patch);
                }
            }
            None => log::debug!("💧 Hydration: ignoring unknown slice '{}'", key),
        }
    }

    log::info!("💧 Hydrated for navigation {}", snapshot.navigation_id);
    next.hydration = HydrationStatus::Hydrated {
        navigation_id: snapshot.navigation_id,
    };
    next
}

/// Feeds server snapshots into the store before the view layer reads it
#[derive(Clone)]
pub struct HydrationReconciler {
    store: AppStore,
}

impl HydrationReconciler {
    pub fn new(store: AppStore) -> Self {
        Self { store }
    }

    /// Returns `false` when this navigation was already hydrated
    pub fn hydrate(&self, snapshot: HydrationSnapshot) -> bool {
        if self
            .store
            .select(|s| s.hydration.is_hydrated_for(&snapshot.navigation_id))
        {
            return false;
        }
        self.store.dispatch(Action::Hydrate(snapshot));
        true
    }

    /// Same as [`hydrate`](Self::hydrate) for the raw JSON embedded in the page
    pub fn hydrate_json(&self, json: &str) -> Result<bool, serde_json::Error> {
        let snapshot = HydrationSnapshot::from_json(json)?;
        Ok(self.hydrate(snapshot))
    }

    pub fn status(&self) -> HydrationStatus {
        self.store.select(|s| s.hydration.clone())
    }
}
