//! Container components - single-slot housings and their contents.

use hecs::Entity;
use serde::{Deserialize, Serialize};

/// A housing that can hold exactly one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerSlot {
    pub id: String,
    /// Entity currently inside the slot.
    /// Not serialized directly (Entity is not serializable), see persistence
    #[serde(skip)]
    pub contained: Option<Entity>,
}

impl ContainerSlot {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            contained: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contained.is_none()
    }
}

/// Present on an entity while it sits inside a [`ContainerSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InContainer {
    pub container: Entity,
}
