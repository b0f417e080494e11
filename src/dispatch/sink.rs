//! Event subscribers.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::dispatch::events::EventEnvelope;
use crate::error::EngineError;

/// Receives sequenced events from the ingestor.
pub trait EventSink: Send {
    fn deliver(&mut self, envelope: &EventEnvelope) -> Result<(), EngineError>;
}

/// In-memory subscriber. Clones share the same log.
#[derive(Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<EventEnvelope>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EventEnvelope> {
        self.events.lock().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(|e| e.event.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for EventLog {
    fn deliver(&mut self, envelope: &EventEnvelope) -> Result<(), EngineError> {
        self.events.lock().push(envelope.clone());
        Ok(())
    }
}

/// Writes one JSON object per event.
pub struct JsonLinesSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn deliver(&mut self, envelope: &EventEnvelope) -> Result<(), EngineError> {
        serde_json::to_writer(&mut self.writer, envelope)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}
