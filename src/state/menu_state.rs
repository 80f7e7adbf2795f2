// ============================================================================
// MENU STATE - header burger menu
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuState {
    pub burger_menu_open: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    SetBurgerMenu(bool),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuPatch {
    pub burger_menu_open: Option<bool>,
}

impl MenuState {
    pub fn reduce(&self, action: MenuAction) -> Self {
        match action {
            MenuAction::SetBurgerMenu(open) => Self {
                burger_menu_open: open,
            },
        }
    }

    pub fn merge(&self, patch: MenuPatch) -> Self {
        Self {
            burger_menu_open: patch.burger_menu_open.unwrap_or(self.burger_menu_open),
        }
    }
}
