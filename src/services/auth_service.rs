use async_trait::async_trait;

use crate::models::{ApiLoginResult, Credentials};
use crate::services::ServiceError;

/// Customer authentication side of the commerce backend.
///
/// A non-OK login is NOT an `Err`: it comes back as an `ApiLoginResult`
/// carrying the status and the backend's message. `Err` is reserved for
/// transport failures.
#[async_trait(?Send)]
pub trait AuthService {
    async fn login(&self, credentials: &Credentials) -> Result<ApiLoginResult, ServiceError>;

    async fn logout(&self) -> Result<(), ServiceError>;

    /// Mint a new access token from a refresh token
    async fn refresh(&self, refresh_token: &str) -> Result<ApiLoginResult, ServiceError>;
}
