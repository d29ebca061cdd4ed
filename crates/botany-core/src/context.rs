//! Borrowed view of everything a system handler may touch.

use hecs::World;

use crate::mutation::Mutation;
use crate::services::{AudioSink, PopupSink};
use crate::systems::DoAfterScheduler;

/// Passed to every event handler. Built fresh by the engine for each dispatch.
pub struct SystemContext<'a> {
    pub world: &'a mut World,
    pub do_afters: &'a mut DoAfterScheduler,
    pub popups: &'a mut dyn PopupSink,
    pub audio: &'a mut dyn AudioSink,
    pub mutation: &'a mut dyn Mutation,
}
