// ============================================================================
// STATE MODULE - slices, root state and the store
// ============================================================================

pub mod app_state;
pub mod async_unit;
pub mod catalog_state;
pub mod hydration;
pub mod menu_state;
pub mod reactivity;
pub mod session_state;

pub use app_state::{Action, AppState, AppStore};
pub use async_unit::{AsyncStatus, AsyncUnit, PendingUnit};
pub use catalog_state::{CatalogAction, CatalogPatch, CatalogState};
pub use hydration::{HydrationReconciler, HydrationStatus, SliceName};
pub use menu_state::{MenuAction, MenuPatch, MenuState};
pub use reactivity::{Reducible, Store, Subscription};
pub use session_state::{SessionAction, SessionPatch, SessionState};
