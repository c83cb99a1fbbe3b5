//! Flash design catalog types.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// A pre-made design from the studio's flash catalog.
///
/// Mirrors a row of the `flash_designs` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashDesign {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub price: f64,
    pub category: String,
    pub available: bool,
}

/// The subset of a flash design a draft keeps hold of.
///
/// Linking stores only what submission and display need; the full catalog
/// row stays in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashDesignRef {
    pub id: DbId,
    pub title: String,
    pub price: f64,
}

impl FlashDesignRef {
    /// The idea text seeded into a draft when this design is selected.
    pub fn seeded_idea(&self) -> String {
        format!("Flash design: {}", self.title)
    }
}

impl From<&FlashDesign> for FlashDesignRef {
    fn from(design: &FlashDesign) -> Self {
        Self {
            id: design.id,
            title: design.title.clone(),
            price: design.price,
        }
    }
}
