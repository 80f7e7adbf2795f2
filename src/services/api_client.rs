// ============================================================================
// API CLIENT - HTTP only (stateless)
// ============================================================================
// Talks to the storefront's API routes, which proxy the commerce backend.
// No business logic here: view-models decide what a response means.
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::Serialize;

use crate::config::CONFIG;
use crate::models::{ApiLoginResult, Category, Credentials};
use crate::services::{AuthService, CatalogFetchService, ServiceError};

/// Browser HTTP client for the commerce backend (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(CONFIG.backend_url())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, ServiceError> {
        Request::post(&self.url(path))
            .json(body)
            .map_err(|e| ServiceError::Parse(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))
    }

    /// Login/refresh routes answer with an `ApiLoginResult` even on 4xx, so
    /// the body is parsed first and the HTTP status is only a fallback.
    async fn read_login_result(response: Response) -> Result<ApiLoginResult, ServiceError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        match serde_json::from_str::<ApiLoginResult>(&text) {
            Ok(result) => Ok(result),
            Err(_) if !(200..300).contains(&status) => Err(ServiceError::Http {
                status,
                message: text,
            }),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl CatalogFetchService for ApiClient {
    async fn get_categories_with_subcategories(&self) -> Result<Vec<Category>, ServiceError> {
        let response = Request::get(&self.url("/api/categories"))
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ServiceError::Http {
                status: response.status(),
                message: response.status_text(),
            });
        }

        let categories = response
            .json::<Vec<Category>>()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))?;

        log::info!("📂 {} categories received", categories.len());
        Ok(categories)
    }
}

#[async_trait(?Send)]
impl AuthService for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<ApiLoginResult, ServiceError> {
        log::info!("🔐 Logging in {}", credentials.email);
        let response = self.post_json("/api/user/login", credentials).await?;
        Self::read_login_result(response).await
    }

    async fn logout(&self) -> Result<(), ServiceError> {
        let response = self.post_json("/api/user/logout", &serde_json::json!({})).await?;
        if !response.ok() {
            return Err(ServiceError::Http {
                status: response.status(),
                message: response.status_text(),
            });
        }
        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<ApiLoginResult, ServiceError> {
        let response = self
            .post_json("/api/user/refresh", &RefreshRequest { refresh_token })
            .await?;
        Self::read_login_result(response).await
    }
}
