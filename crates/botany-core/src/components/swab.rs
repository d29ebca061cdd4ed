//! Swab component - shared by bare swabs and applicator housings.

use serde::{Deserialize, Serialize};

use super::SwabSample;
use crate::config::SwabPrototype;

/// Identifier of a sound asset, handed to the audio sink untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoundCue(pub String);

impl SoundCue {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }
}

/// A swab that can pick up seed data from a plant and cross it into another.
///
/// An applicator carries this component too, together with a
/// [`ContainerSlot`](super::ContainerSlot); its `sample` mirrors the swab
/// inserted into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotanySwab {
    pub sample: SwabSample,
    /// Seconds a swabbing interaction takes
    pub swab_delay: f32,
    /// When depositing, take the plant's previous seed data onto the swab
    pub contaminate: bool,
    /// Use in hand wipes the sample
    pub cleanable: bool,
    /// When false an empty swab refuses to start an interaction
    pub usable_if_clean: bool,
    pub swab_sound: Option<SoundCue>,
    pub clean_sound: Option<SoundCue>,
}

impl Default for BotanySwab {
    fn default() -> Self {
        Self {
            sample: SwabSample::Empty,
            swab_delay: 2.0,
            contaminate: true,
            cleanable: false,
            usable_if_clean: true,
            swab_sound: None,
            clean_sound: None,
        }
    }
}

impl BotanySwab {
    pub fn with_sample(mut self, sample: SwabSample) -> Self {
        self.sample = sample;
        self
    }

    /// An empty swab that is not allowed to be used while empty
    pub fn is_unusable(&self) -> bool {
        !self.usable_if_clean && self.sample.is_empty()
    }
}

impl From<&SwabPrototype> for BotanySwab {
    fn from(proto: &SwabPrototype) -> Self {
        Self {
            sample: SwabSample::Empty,
            swab_delay: proto.swab_delay,
            contaminate: proto.contaminate,
            cleanable: proto.cleanable,
            usable_if_clean: proto.usable_if_clean,
            swab_sound: proto.swab_sound.clone(),
            clean_sound: proto.clean_sound.clone(),
        }
    }
}
