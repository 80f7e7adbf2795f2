use async_trait::async_trait;

use crate::models::Category;
use crate::services::ServiceError;

/// Catalog side of the commerce backend.
///
/// Futures are `?Send`: the store lives on the browser's single thread.
#[async_trait(?Send)]
pub trait CatalogFetchService {
    async fn get_categories_with_subcategories(&self) -> Result<Vec<Category>, ServiceError>;
}
