//! Localization keys and a lookup table for rendering them.
//!
//! Systems only ever emit keys; turning a key into text is the host's job.

use std::collections::HashMap;

use crate::error::ConfigError;

pub const SWAB_USED: &str = "swab-used";
pub const SWAB_UNUSED: &str = "swab-unused";
pub const BOTANY_SWAB_UNUSABLE: &str = "botany-swab-unusable";
pub const BOTANY_SWAB_FROM: &str = "botany-swab-from";
pub const BOTANY_SWAB_TO: &str = "botany-swab-to";
pub const BOTANY_SWAB_CLEAN: &str = "botany-swab-clean";
pub const SWAB_APPLICATOR_NEEDS_POLLEN: &str = "swab-applicator-needs-pollen";
pub const SWAB_APPLICATOR_NO_NESTING: &str = "swab-applicator-no-nesting";

const ENGLISH: &[(&str, &str)] = &[
    (SWAB_USED, "This swab has been used."),
    (SWAB_UNUSED, "This swab is unused."),
    (BOTANY_SWAB_UNUSABLE, "The applicator has no swab loaded."),
    (BOTANY_SWAB_FROM, "You carefully collect pollen from the plant."),
    (BOTANY_SWAB_TO, "You carefully dust pollen on the plant."),
    (BOTANY_SWAB_CLEAN, "You wipe the swab clean."),
    (
        SWAB_APPLICATOR_NEEDS_POLLEN,
        "The applicator only accepts a swab with pollen on it.",
    ),
    (
        SWAB_APPLICATOR_NO_NESTING,
        "The applicator takes a swab, not another applicator.",
    ),
];

/// Key to text table. Unknown keys render as the key itself.
#[derive(Debug, Clone, Default)]
pub struct Localization {
    strings: HashMap<String, String>,
}

impl Localization {
    /// Built-in English strings
    pub fn english() -> Self {
        Self {
            strings: ENGLISH
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Parse a flat JSON object of `"key": "text"` pairs
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let strings: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { strings })
    }

    /// Overlay `other` on top of this table
    pub fn merge(&mut self, other: Localization) {
        self.strings.extend(other.strings);
    }

    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings.get(key).map(String::as_str).unwrap_or(key)
    }
}
