//! Read access to the flash design catalog.

use async_trait::async_trait;

use inkflow_core::design::FlashDesign;
use inkflow_core::store::StoreError;

use crate::client::SupabaseStore;

/// Source of the designs the booking surface can offer.
#[async_trait]
pub trait FlashCatalog: Send + Sync {
    /// Designs currently offered, cheapest first.
    async fn list_available(&self) -> Result<Vec<FlashDesign>, StoreError>;
}

#[async_trait]
impl FlashCatalog for SupabaseStore {
    async fn list_available(&self) -> Result<Vec<FlashDesign>, StoreError> {
        let url = format!(
            "{}?select=*&available=eq.true&order=price.asc",
            self.rest_url("flash_designs")
        );
        let designs: Vec<FlashDesign> = self.get_json(url).await?;
        tracing::debug!(count = designs.len(), "Fetched flash design catalog");
        Ok(designs)
    }
}
