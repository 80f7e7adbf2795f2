// ============================================================================
// APP STATE - root state composed of all slices
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::models::HydrationSnapshot;
use crate::state::hydration::{apply_snapshot, HydrationStatus};
use crate::state::{
    CatalogAction, CatalogState, MenuAction, MenuState, Reducible, SessionAction, SessionState,
    Store,
};

/// Root snapshot. Field names are the slice names used by hydration
/// (`auth`, `products`, `menu`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppState {
    #[serde(rename = "auth")]
    pub session: SessionState,
    pub products: CatalogState,
    pub menu: MenuState,
    #[serde(skip)]
    pub hydration: HydrationStatus,
}

/// Every transition the store knows about
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Session(SessionAction),
    Catalog(CatalogAction),
    Menu(MenuAction),
    Hydrate(HydrationSnapshot),
}

impl From<SessionAction> for Action {
    fn from(action: SessionAction) -> Self {
        Action::Session(action)
    }
}

impl From<CatalogAction> for Action {
    fn from(action: CatalogAction) -> Self {
        Action::Catalog(action)
    }
}

impl From<MenuAction> for Action {
    fn from(action: MenuAction) -> Self {
        Action::Menu(action)
    }
}

pub type AppStore = Store<AppState>;

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reducible for AppState {
    type Action = Action;

    fn reduce(&self, action: Action) -> Self {
        match action {
            Action::Session(action) => Self {
                session: self.session.reduce(action),
                ..self.clone()
            },
            Action::Catalog(action) => Self {
                products: self.products.reduce(action),
                ..self.clone()
            },
            Action::Menu(action) => Self {
                menu: self.menu.reduce(action),
                ..self.clone()
            },
            Action::Hydrate(snapshot) => apply_snapshot(self, snapshot),
        }
    }
}
