pub mod auth_viewmodel;
pub mod catalog_viewmodel;

pub use auth_viewmodel::AuthViewModel;
pub use catalog_viewmodel::CatalogViewModel;
