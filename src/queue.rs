//! Multi-producer signal ingestion.
//!
//! Producers on any thread enqueue [`Signal`]s through cloneable
//! [`SignalSender`]s; the coordination thread drains the queue into the engine,
//! which applies signals in arrival order.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use crate::engine::NavigationEngine;
use crate::navigation::{FrameDetails, FrameInfo};
use crate::signal::Signal;
use crate::types::{ContainerId, FrameHandle};

#[derive(Clone)]
pub struct SignalSender {
    sender: Sender<Signal>,
}

impl SignalSender {
    /// Enqueue a signal. Returns `false` if the queue is gone.
    pub fn send(&self, signal: Signal) -> bool {
        let name = signal.name();
        match self.sender.send(signal) {
            Ok(()) => true,
            Err(_) => {
                warn!(signal = name, "signal queue closed, dropping signal");
                false
            }
        }
    }
}

pub struct SignalQueue {
    receiver: Receiver<Signal>,
}

impl SignalQueue {
    pub fn new_pair() -> (SignalSender, SignalQueue) {
        let (sender, receiver) = channel();
        (SignalSender { sender }, SignalQueue { receiver })
    }

    /// Apply every queued signal to `engine`. Returns how many were applied.
    pub fn drain_into(&self, engine: &mut NavigationEngine) -> usize {
        let mut applied = 0;
        for signal in self.receiver.try_iter() {
            engine.handle(signal);
            applied += 1;
        }
        applied
    }
}

/// An engine shared between the coordination thread and query callers.
#[derive(Clone)]
pub struct SharedEngine(Arc<Mutex<NavigationEngine>>);

impl SharedEngine {
    pub fn new(engine: NavigationEngine) -> Self {
        Self(Arc::new(Mutex::new(engine)))
    }

    pub fn drain(&self, queue: &SignalQueue) -> usize {
        queue.drain_into(&mut self.0.lock())
    }

    pub fn handle(&self, signal: Signal) {
        self.0.lock().handle(signal);
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut NavigationEngine) -> R) -> R {
        f(&mut self.0.lock())
    }

    pub fn get_frame(&self, container: ContainerId, frame: FrameHandle) -> Option<FrameInfo> {
        self.0.lock().get_frame(container, frame)
    }

    pub fn get_all_frames(&self, container: ContainerId) -> Vec<FrameDetails> {
        self.0.lock().get_all_frames(container)
    }
}
