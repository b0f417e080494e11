//! Event ingestion: sequence assignment and fan-out to subscribers.

use std::sync::mpsc::Receiver;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use crate::dispatch::events::{EventEnvelope, NavigationEvent};
use crate::dispatch::sink::EventSink;

pub struct EventIngestor {
    receiver: Receiver<NavigationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    next_seq: u64,
}

impl EventIngestor {
    pub fn new(receiver: Receiver<NavigationEvent>) -> Self {
        Self {
            receiver,
            sinks: Vec::new(),
            next_seq: 1,
        }
    }

    pub fn subscribe(&mut self, sink: impl EventSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn subscriber_count(&self) -> usize {
        self.sinks.len()
    }

    /// Deliver every queued event. Returns how many events were ingested.
    ///
    /// A failing subscriber is logged and skipped; it does not hold back delivery
    /// to the others.
    pub fn ingest_pending(&mut self) -> usize {
        let mut count = 0usize;
        while let Ok(event) = self.receiver.try_recv() {
            self.ingest_one(event);
            count += 1;
        }
        count
    }

    fn ingest_one(&mut self, event: NavigationEvent) {
        let envelope = EventEnvelope::with_now(self.next_seq, event);
        self.next_seq += 1;
        for sink in &mut self.sinks {
            if let Err(err) = sink.deliver(&envelope) {
                warn!(
                    seq = envelope.seq,
                    event = envelope.event.name(),
                    error = %err,
                    "event sink rejected delivery"
                );
            }
        }
    }
}

#[derive(Clone)]
pub struct SharedIngestor(Arc<Mutex<EventIngestor>>);

impl SharedIngestor {
    pub fn new(inner: EventIngestor) -> Self {
        Self(Arc::new(Mutex::new(inner)))
    }

    pub fn subscribe(&self, sink: impl EventSink + 'static) {
        self.0.lock().subscribe(sink);
    }

    pub fn drain(&self) -> usize {
        self.0.lock().ingest_pending()
    }
}
