//! navtrack: Navigation Lifecycle Tracking
//!
//! Observes low-level page-load signals for every frame of every tracked content
//! container and turns them into ordered, deduplicated lifecycle events for
//! subscribers.

pub mod arena;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod queue;
pub mod signal;
pub mod transition;
pub mod types;

pub use crate::config::{EngineConfig, NavtrackConfig};
pub use dispatch::{EventBus, EventEnvelope, EventIngestor, EventLog, EventSink, NavigationEvent};
pub use engine::NavigationEngine;
pub use error::EngineError;
pub use queue::{SharedEngine, SignalQueue, SignalSender};
pub use signal::Signal;
