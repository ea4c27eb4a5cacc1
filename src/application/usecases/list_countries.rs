use std::sync::Arc;

use crate::domain::{models::Country, repositories::CountryDirectory};

pub struct ListCountriesUseCase {
    directory: Arc<dyn CountryDirectory>,
}

impl ListCountriesUseCase {
    pub fn new(directory: Arc<dyn CountryDirectory>) -> Self {
        Self { directory }
    }

    pub async fn execute(&self) -> anyhow::Result<Vec<Country>> {
        self.directory.list().await
    }
}
