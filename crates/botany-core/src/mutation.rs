//! Crossing of two seed records.
//!
//! Swab logic treats crossing as a black box behind [`Mutation`]. The
//! reference [`RandomCross`] takes every trait from one parent or the other.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::components::SeedData;

/// Produces a new seed record from two parents
pub trait Mutation {
    fn cross(&mut self, a: &SeedData, b: &SeedData) -> SeedData;
}

/// Picks each trait from either parent with equal odds and keeps every
/// chemical found in either.
#[derive(Debug, Clone)]
pub struct RandomCross {
    rng: StdRng,
}

impl RandomCross {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick<T: Clone>(&mut self, a: &T, b: &T) -> T {
        if self.rng.gen_bool(0.5) {
            a.clone()
        } else {
            b.clone()
        }
    }
}

impl Mutation for RandomCross {
    fn cross(&mut self, a: &SeedData, b: &SeedData) -> SeedData {
        let mut chemicals = a.chemicals.clone();
        for chem in &b.chemicals {
            if !chemicals.contains(chem) {
                chemicals.push(chem.clone());
            }
        }

        SeedData {
            // The receiving plant keeps its species name
            name: b.name.clone(),
            potency: self.pick(&a.potency, &b.potency),
            yield_amount: self.pick(&a.yield_amount, &b.yield_amount),
            lifespan: self.pick(&a.lifespan, &b.lifespan),
            maturation: self.pick(&a.maturation, &b.maturation),
            production: self.pick(&a.production, &b.production),
            chemicals,
        }
    }
}
