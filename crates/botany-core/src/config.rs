//! Swab prototypes and engine configuration.
//!
//! Prototypes describe how a kind of swab behaves: how long swabbing takes,
//! whether it picks up contamination, whether it can be wiped, and whether
//! it is an applicator housing. They load from a JSON array; every field
//! except `id` falls back to the plain botany swab defaults.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::SoundCue;
use crate::error::ConfigError;

/// Slot id given to applicator housings
pub const APPLICATOR_SLOT: &str = "swab_slot";

/// Blueprint for spawning a swab entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwabPrototype {
    pub id: String,
    pub name: String,
    pub swab_delay: f32,
    pub contaminate: bool,
    pub cleanable: bool,
    pub usable_if_clean: bool,
    pub swab_sound: Option<SoundCue>,
    pub clean_sound: Option<SoundCue>,
    /// When set, the spawned entity is a housing with a slot of this id
    pub container_slot: Option<String>,
}

impl Default for SwabPrototype {
    fn default() -> Self {
        Self::botany_swab()
    }
}

impl SwabPrototype {
    /// Single-use cotton swab
    pub fn botany_swab() -> Self {
        Self {
            id: "BotanySwab".into(),
            name: "botany swab".into(),
            swab_delay: 2.0,
            contaminate: true,
            cleanable: false,
            usable_if_clean: true,
            swab_sound: None,
            clean_sound: None,
            container_slot: None,
        }
    }

    /// Reusable synthetic swab: wipes clean, keeps its sample when depositing
    pub fn synth_swab() -> Self {
        Self {
            id: "SynthSwab".into(),
            name: "synthetic swab".into(),
            contaminate: false,
            cleanable: true,
            swab_sound: Some(SoundCue::new("/Audio/Items/Botany/swab.ogg")),
            clean_sound: Some(SoundCue::new("/Audio/Effects/Fluids/splat.ogg")),
            ..Self::botany_swab()
        }
    }

    /// Housing that takes a loaded swab and applies it without contamination
    pub fn swab_applicator() -> Self {
        Self {
            id: "SwabApplicator".into(),
            name: "swab applicator".into(),
            swab_delay: 1.0,
            contaminate: false,
            usable_if_clean: false,
            swab_sound: Some(SoundCue::new("/Audio/Items/Botany/swab.ogg")),
            container_slot: Some(APPLICATOR_SLOT.into()),
            ..Self::botany_swab()
        }
    }

    pub fn is_applicator(&self) -> bool {
        self.container_slot.is_some()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::Invalid {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty"));
        }
        if !self.swab_delay.is_finite() || self.swab_delay < 0.0 {
            return Err(invalid("swab_delay must be a non-negative number of seconds"));
        }
        if let Some(slot) = &self.container_slot {
            if slot.trim().is_empty() {
                return Err(invalid("container_slot must not be empty"));
            }
        }
        Ok(())
    }
}

/// A validated set of prototypes, looked up by id.
#[derive(Debug, Clone, Default)]
pub struct PrototypeSet {
    prototypes: Vec<SwabPrototype>,
}

impl PrototypeSet {
    pub fn builtin() -> Self {
        Self {
            prototypes: vec![
                SwabPrototype::botany_swab(),
                SwabPrototype::synth_swab(),
                SwabPrototype::swab_applicator(),
            ],
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let prototypes: Vec<SwabPrototype> = serde_json::from_str(json)?;
        Self::from_prototypes(prototypes)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn from_prototypes(prototypes: Vec<SwabPrototype>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        for proto in &prototypes {
            proto.validate()?;
            if !seen.insert(proto.id.as_str()) {
                return Err(ConfigError::Duplicate(proto.id.clone()));
            }
        }
        Ok(Self { prototypes })
    }

    pub fn get(&self, id: &str) -> Option<&SwabPrototype> {
        self.prototypes.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SwabPrototype> {
        self.prototypes.iter()
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}

/// Engine-wide tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How far (world units) a user may drift before a break-on-move do-after cancels
    pub movement_threshold: f32,
    /// Seed for the reference crossing service
    pub mutation_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            movement_threshold: 0.3,
            mutation_seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_prototypes_valid() {
        let set = PrototypeSet::builtin();
        assert_eq!(set.len(), 3);
        for proto in set.iter() {
            assert!(proto.validate().is_ok(), "{} invalid", proto.id);
        }
        assert!(set.get("SwabApplicator").unwrap().is_applicator());
        assert!(!set.get("BotanySwab").unwrap().is_applicator());
    }

    #[test]
    fn test_json_defaults_fill_missing_fields() {
        let set = PrototypeSet::from_json_str(
            r#"[
                {"id": "QuickSwab", "swab_delay": 0.5},
                {"id": "Wiper", "cleanable": true, "contaminate": false}
            ]"#,
        )
        .unwrap();

        let quick = set.get("QuickSwab").unwrap();
        assert_eq!(quick.swab_delay, 0.5);
        assert!(quick.contaminate);
        assert!(quick.usable_if_clean);

        let wiper = set.get("Wiper").unwrap();
        assert!(wiper.cleanable);
        assert!(!wiper.contaminate);
        assert_eq!(wiper.swab_delay, 2.0);
    }

    #[test]
    fn test_negative_delay_rejected() {
        let err = PrototypeSet::from_json_str(r#"[{"id": "Broken", "swab_delay": -1.0}]"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref id, .. } if id == "Broken"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = PrototypeSet::from_json_str(r#"[{"id": "A"}, {"id": "A"}]"#).unwrap_err();
        assert!(matches!(err, ConfigError::Duplicate(ref id) if id == "A"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            PrototypeSet::from_json_str("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_engine_config_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_shipped_data_matches_builtin() {
        let shipped =
            PrototypeSet::from_json_str(include_str!("../../../data/swab_prototypes.json")).unwrap();
        let builtin = PrototypeSet::builtin();
        assert_eq!(shipped.len(), builtin.len());
        for proto in builtin.iter() {
            assert_eq!(shipped.get(&proto.id), Some(proto));
        }
    }
}
