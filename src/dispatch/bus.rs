//! In-process event bus between the engine and its subscribers.

use std::sync::mpsc::{channel, Receiver, Sender};

use tracing::warn;

use crate::dispatch::events::NavigationEvent;

/// Producer side of the outbound event channel.
///
/// Emission is fire-and-forget: the engine never waits on subscribers and a
/// disconnected receiver only produces a warning.
#[derive(Clone)]
pub struct EventBus {
    sender: Sender<NavigationEvent>,
}

impl EventBus {
    pub fn new_pair() -> (Self, Receiver<NavigationEvent>) {
        let (sender, receiver) = channel();
        (Self { sender }, receiver)
    }

    pub fn emit(&self, event: NavigationEvent) {
        let name = event.name();
        if let Err(err) = self.sender.send(event) {
            warn!(event = name, error = %err, "dropping navigation event, no receiver");
        }
    }
}
