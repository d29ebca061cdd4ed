//! Error types for operations that can fail outside of gameplay rules.
//!
//! Gameplay rejections (unusable swab, clean swab in an applicator) are not
//! errors: they surface as popups. These types cover misuse of the API,
//! persistence and configuration.

use hecs::Entity;
use thiserror::Error;

/// Container insert/remove failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerError {
    #[error("entity {0:?} does not exist")]
    NoSuchEntity(Entity),
    #[error("entity {0:?} has no container slot")]
    NotAContainer(Entity),
    #[error("container {0:?} is already holding something")]
    SlotOccupied(Entity),
    #[error("container {0:?} is empty")]
    SlotEmpty(Entity),
    #[error("entity {0:?} is already inside a container")]
    AlreadyContained(Entity),
    #[error("entity {0:?} cannot be inserted into itself")]
    SelfInsert(Entity),
    #[error("insertion of {item:?} into {container:?} was refused")]
    Vetoed { item: Entity, container: Entity },
}

/// Do-after start failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DoAfterError {
    #[error("user {0:?} does not exist")]
    NoSuchUser(Entity),
    #[error("user {0:?} has no free hand")]
    NoFreeHand(Entity),
}

/// Errors that can occur during save/load
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("Invalid entity handle {0} in save data")]
    InvalidEntity(u64),
}

/// Errors loading swab prototypes
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read prototypes: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse prototypes: {0}")]
    Json(#[from] serde_json::Error),
    #[error("prototype '{id}': {reason}")]
    Invalid { id: String, reason: String },
    #[error("duplicate prototype id '{0}'")]
    Duplicate(String),
}
