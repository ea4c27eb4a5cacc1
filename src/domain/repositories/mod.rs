use async_trait::async_trait;

use crate::domain::models::Country;

#[async_trait]
pub trait CountryDirectory: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Country>>;
}
