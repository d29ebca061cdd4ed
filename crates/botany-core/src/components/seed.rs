//! Seed data - the genetic record carried by plants and swabs.

use serde::{Deserialize, Serialize};

/// Genetic record of a plant.
///
/// Seed data is never edited in place once it is attached to an entity:
/// swabs and plants always receive a fresh clone or a crossed result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    pub name: String,
    pub potency: f32,
    pub yield_amount: u32,
    pub lifespan: f32,
    pub maturation: f32,
    pub production: f32,
    /// Chemical ids produced by the plant
    pub chemicals: Vec<String>,
}

impl SeedData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            potency: 10.0,
            yield_amount: 3,
            lifespan: 25.0,
            maturation: 6.0,
            production: 6.0,
            chemicals: Vec::new(),
        }
    }

    pub fn with_potency(mut self, potency: f32) -> Self {
        self.potency = potency;
        self
    }

    pub fn with_yield(mut self, yield_amount: u32) -> Self {
        self.yield_amount = yield_amount;
        self
    }

    pub fn with_chemical(mut self, chemical: impl Into<String>) -> Self {
        self.chemicals.push(chemical.into());
        self
    }
}

/// What a swab is carrying. `Empty` is a clean swab.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum SwabSample {
    #[default]
    Empty,
    Loaded(SeedData),
}

impl SwabSample {
    pub fn is_loaded(&self) -> bool {
        matches!(self, SwabSample::Loaded(_))
    }

    pub fn is_empty(&self) -> bool {
        !self.is_loaded()
    }

    pub fn seed(&self) -> Option<&SeedData> {
        match self {
            SwabSample::Loaded(seed) => Some(seed),
            SwabSample::Empty => None,
        }
    }
}

impl From<Option<SeedData>> for SwabSample {
    fn from(seed: Option<SeedData>) -> Self {
        match seed {
            Some(seed) => SwabSample::Loaded(seed),
            None => SwabSample::Empty,
        }
    }
}
