pub mod auth_service;
pub mod catalog_service;
pub mod error;

#[cfg(target_arch = "wasm32")]
pub mod api_client;

pub use auth_service::AuthService;
pub use catalog_service::CatalogFetchService;
pub use error::ServiceError;

#[cfg(target_arch = "wasm32")]
pub use api_client::ApiClient;
