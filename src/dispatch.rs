//! Outbound dispatch: event schema, bus, ingestion and subscribers.

pub mod bus;
pub mod events;
pub mod ingestor;
pub mod sink;

pub use bus::EventBus;
pub use events::{
    CommitDetails, ContainerReplacedDetails, ErrorDetails, EventEnvelope, FrameEventDetails,
    NavigationEvent, NavigationTargetDetails,
};
pub use ingestor::{EventIngestor, SharedIngestor};
pub use sink::{EventLog, EventSink, JsonLinesSink};
