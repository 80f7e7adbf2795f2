pub mod auth;
pub mod category;
pub mod hydration;

pub use auth::{ApiErrorBody, ApiLoginResult, ApiResult, Credentials, HttpStatus, TokenInfo};
pub use category::{Category, Product};
pub use hydration::HydrationSnapshot;
