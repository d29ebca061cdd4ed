//! Event payloads. Handlers receive them by `&mut` so they can set flags
//! (`handled`, cancellation) that later handlers and the raiser observe.

use hecs::Entity;

/// Raised on an entity someone is examining
#[derive(Debug, Clone)]
pub struct ExaminedEvent {
    pub examiner: Entity,
    pub is_in_details_range: bool,
    markup: Vec<String>,
}

impl ExaminedEvent {
    pub fn new(examiner: Entity, is_in_details_range: bool) -> Self {
        Self {
            examiner,
            is_in_details_range,
            markup: Vec::new(),
        }
    }

    pub fn push_markup(&mut self, key: &str) {
        self.markup.push(key.to_string());
    }

    pub fn markup(&self) -> &[String] {
        &self.markup
    }

    pub fn into_markup(self) -> Vec<String> {
        self.markup
    }
}

/// Raised on the held item after `user` clicked `target` with it
#[derive(Debug, Clone)]
pub struct AfterInteractEvent {
    pub user: Entity,
    pub target: Option<Entity>,
    pub can_reach: bool,
}

impl AfterInteractEvent {
    pub fn new(user: Entity, target: Option<Entity>, can_reach: bool) -> Self {
        Self {
            user,
            target,
            can_reach,
        }
    }
}

/// Raised on an item activated in its holder's hand
#[derive(Debug, Clone)]
pub struct UseInHandEvent {
    pub user: Entity,
    pub handled: bool,
}

impl UseInHandEvent {
    pub fn new(user: Entity) -> Self {
        Self {
            user,
            handled: false,
        }
    }
}

/// Raised on an item about to be inserted into `container`. Any handler may veto.
#[derive(Debug, Clone)]
pub struct ContainerInsertAttempt {
    pub container: Entity,
    cancelled: bool,
}

impl ContainerInsertAttempt {
    pub fn new(container: Entity) -> Self {
        Self {
            container,
            cancelled: false,
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Raised on an item right after it entered `container`
#[derive(Debug, Clone, Copy)]
pub struct InsertedIntoContainer {
    pub container: Entity,
}

/// Raised on an item right after it left `container`
#[derive(Debug, Clone, Copy)]
pub struct RemovedFromContainer {
    pub container: Entity,
}
