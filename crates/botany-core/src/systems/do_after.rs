//! Do-after system - actions that complete after a delay
//!
//! Starting a do-after records who is acting, on what, and where they stood.
//! The engine advances the scheduler every tick; a do-after finishes either
//! by running its full delay or by being cancelled (user gone, user moved,
//! user lost their hands, or an explicit cancel). Finished do-afters come back
//! as [`DoAfterEvent`]s for the engine to raise on their event target.

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use crate::components::{Hands, Position, Vec3};
use crate::error::DoAfterError;

/// Correlation id of a do-after
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoAfterId(pub u32);

/// What a do-after does when it completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoAfterKind {
    /// Swab a plant: pick up or deposit seed data
    BotanySwab,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoAfterArgs {
    pub user: Entity,
    /// Seconds until completion
    pub delay: f32,
    pub kind: DoAfterKind,
    /// Entity the completion event is raised on
    pub event_target: Option<Entity>,
    pub target: Option<Entity>,
    pub used: Option<Entity>,
    /// Also raise the completion event on the broadcast channel
    pub broadcast: bool,
    /// Cancel if the user moves past the movement threshold
    pub break_on_move: bool,
    /// Cancel if the user has no free hand
    pub need_hand: bool,
}

impl DoAfterArgs {
    pub fn new(user: Entity, delay: f32, kind: DoAfterKind, event_target: Option<Entity>) -> Self {
        Self {
            user,
            delay,
            kind,
            event_target,
            target: None,
            used: None,
            broadcast: false,
            break_on_move: false,
            need_hand: false,
        }
    }

    pub fn with_target(mut self, target: Entity) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_used(mut self, used: Entity) -> Self {
        self.used = Some(used);
        self
    }

    pub fn broadcast(mut self, broadcast: bool) -> Self {
        self.broadcast = broadcast;
        self
    }

    pub fn break_on_move(mut self, break_on_move: bool) -> Self {
        self.break_on_move = break_on_move;
        self
    }

    pub fn need_hand(mut self, need_hand: bool) -> Self {
        self.need_hand = need_hand;
        self
    }
}

/// A finished do-after, raised on its event target
#[derive(Debug, Clone)]
pub struct DoAfterEvent {
    pub id: DoAfterId,
    pub args: DoAfterArgs,
    pub cancelled: bool,
    /// Set by the first handler that consumes the completion
    pub handled: bool,
}

impl DoAfterEvent {
    pub fn new(id: DoAfterId, args: DoAfterArgs, cancelled: bool) -> Self {
        Self {
            id,
            args,
            cancelled,
            handled: false,
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveDoAfter {
    id: DoAfterId,
    args: DoAfterArgs,
    elapsed: f32,
    start_position: Option<Vec3>,
    cancelled: bool,
}

impl ActiveDoAfter {
    /// Advance by `delta`. `Some(cancelled)` once finished.
    fn advance(&mut self, world: &World, delta: f32, movement_threshold: f32) -> Option<bool> {
        if self.cancelled {
            return Some(true);
        }
        if !world.contains(self.args.user) {
            log::debug!("do-after {:?}: user {:?} is gone", self.id, self.args.user);
            return Some(true);
        }
        if self.args.break_on_move {
            if let (Some(start), Some(now)) = (self.start_position, user_position(world, self.args.user)) {
                if start.distance(&now) > movement_threshold {
                    log::debug!("do-after {:?}: user moved", self.id);
                    return Some(true);
                }
            }
        }
        if self.args.need_hand && !has_free_hand(world, self.args.user) {
            log::debug!("do-after {:?}: user has no free hand", self.id);
            return Some(true);
        }

        self.elapsed += delta;
        (self.elapsed >= self.args.delay).then_some(false)
    }
}

fn user_position(world: &World, user: Entity) -> Option<Vec3> {
    world.get::<&Position>(user).ok().map(|p| p.local)
}

fn has_free_hand(world: &World, user: Entity) -> bool {
    world
        .get::<&Hands>(user)
        .map(|hands| hands.has_free_hand())
        .unwrap_or(false)
}

/// Pending do-afters, in start order
#[derive(Debug, Clone)]
pub struct DoAfterScheduler {
    active: Vec<ActiveDoAfter>,
    next_id: u32,
    movement_threshold: f32,
}

impl Default for DoAfterScheduler {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl DoAfterScheduler {
    pub fn new(movement_threshold: f32) -> Self {
        Self {
            active: Vec::new(),
            next_id: 0,
            movement_threshold,
        }
    }

    /// Start a do-after. Fails when the user does not exist, or needs a hand and has none.
    pub fn start(&mut self, world: &World, args: DoAfterArgs) -> Result<DoAfterId, DoAfterError> {
        if !world.contains(args.user) {
            return Err(DoAfterError::NoSuchUser(args.user));
        }
        if args.need_hand && !has_free_hand(world, args.user) {
            return Err(DoAfterError::NoFreeHand(args.user));
        }

        let id = DoAfterId(self.next_id);
        self.next_id += 1;

        log::debug!(
            "do-after {:?} started: {:?} by {:?} on {:?} ({}s)",
            id,
            args.kind,
            args.user,
            args.target,
            args.delay
        );

        self.active.push(ActiveDoAfter {
            id,
            start_position: user_position(world, args.user),
            args,
            elapsed: 0.0,
            cancelled: false,
        });
        Ok(id)
    }

    /// Mark a do-after cancelled. It is reported on the next update.
    pub fn cancel(&mut self, id: DoAfterId) -> bool {
        match self.active.iter_mut().find(|d| d.id == id && !d.cancelled) {
            Some(doafter) => {
                doafter.cancelled = true;
                true
            }
            None => false,
        }
    }

    pub fn movement_threshold(&self) -> f32 {
        self.movement_threshold
    }

    pub fn is_active(&self, id: DoAfterId) -> bool {
        self.active.iter().any(|d| d.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Ids of the do-afters `user` is performing
    pub fn active_for(&self, user: Entity) -> Vec<DoAfterId> {
        self.active
            .iter()
            .filter(|d| d.args.user == user)
            .map(|d| d.id)
            .collect()
    }

    /// Advance every do-after by `delta` seconds and return the ones that finished
    pub fn update(&mut self, world: &World, delta: f32) -> Vec<DoAfterEvent> {
        let threshold = self.movement_threshold;
        let mut finished = Vec::new();
        let mut running = Vec::with_capacity(self.active.len());

        for mut doafter in self.active.drain(..) {
            match doafter.advance(world, delta, threshold) {
                Some(cancelled) => {
                    finished.push(DoAfterEvent::new(doafter.id, doafter.args, cancelled))
                }
                None => running.push(doafter),
            }
        }

        self.active = running;
        finished
    }
}
