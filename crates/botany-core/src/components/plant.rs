//! Plant holder component - trays, pots and anything else growing a plant.

use serde::{Deserialize, Serialize};

use super::SeedData;

/// Marks an entity as holding a plant. `seed` is `None` for an empty tray.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantHolder {
    pub seed: Option<SeedData>,
}

impl PlantHolder {
    pub fn new(seed: Option<SeedData>) -> Self {
        Self { seed }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}
