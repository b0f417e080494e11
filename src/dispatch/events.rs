//! Outbound lifecycle event schema.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::transition::{PageTransition, TransitionQualifier, TransitionType};
use crate::types::{ContainerId, FrameHandle, ProcessId};

/// Fields common to every per-frame event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameEventDetails {
    pub container: ContainerId,
    pub frame: FrameHandle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_frame: Option<FrameHandle>,
    pub process_id: ProcessId,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetails {
    #[serde(flatten)]
    pub frame: FrameEventDetails,
    pub transition_type: TransitionType,
    pub transition_qualifiers: Vec<TransitionQualifier>,
}

impl CommitDetails {
    pub fn new(frame: FrameEventDetails, transition: PageTransition) -> Self {
        Self {
            frame,
            transition_type: transition.core,
            transition_qualifiers: transition.qualifiers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    #[serde(flatten)]
    pub frame: FrameEventDetails,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTargetDetails {
    pub source_container: ContainerId,
    pub source_frame: FrameHandle,
    pub source_process_id: ProcessId,
    pub container: ContainerId,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerReplacedDetails {
    pub replaced_container: ContainerId,
    pub container: ContainerId,
}

/// A lifecycle event as seen by subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum NavigationEvent {
    #[serde(rename = "onBeforeNavigate")]
    BeforeNavigate(FrameEventDetails),
    #[serde(rename = "onCommitted")]
    Committed(CommitDetails),
    #[serde(rename = "onReferenceFragmentUpdated")]
    ReferenceFragmentUpdated(CommitDetails),
    #[serde(rename = "onHistoryStateUpdated")]
    HistoryStateUpdated(CommitDetails),
    #[serde(rename = "onDOMContentLoaded")]
    DomContentLoaded(FrameEventDetails),
    #[serde(rename = "onCompleted")]
    Completed(FrameEventDetails),
    #[serde(rename = "onErrorOccurred")]
    ErrorOccurred(ErrorDetails),
    #[serde(rename = "onCreatedNavigationTarget")]
    CreatedNavigationTarget(NavigationTargetDetails),
    #[serde(rename = "onTabReplaced")]
    TabReplaced(ContainerReplacedDetails),
}

impl NavigationEvent {
    pub fn name(&self) -> &'static str {
        match self {
            NavigationEvent::BeforeNavigate(_) => "onBeforeNavigate",
            NavigationEvent::Committed(_) => "onCommitted",
            NavigationEvent::ReferenceFragmentUpdated(_) => "onReferenceFragmentUpdated",
            NavigationEvent::HistoryStateUpdated(_) => "onHistoryStateUpdated",
            NavigationEvent::DomContentLoaded(_) => "onDOMContentLoaded",
            NavigationEvent::Completed(_) => "onCompleted",
            NavigationEvent::ErrorOccurred(_) => "onErrorOccurred",
            NavigationEvent::CreatedNavigationTarget(_) => "onCreatedNavigationTarget",
            NavigationEvent::TabReplaced(_) => "onTabReplaced",
        }
    }

    /// Container the event is reported for.
    pub fn container(&self) -> ContainerId {
        match self {
            NavigationEvent::BeforeNavigate(d)
            | NavigationEvent::DomContentLoaded(d)
            | NavigationEvent::Completed(d) => d.container,
            NavigationEvent::Committed(d)
            | NavigationEvent::ReferenceFragmentUpdated(d)
            | NavigationEvent::HistoryStateUpdated(d) => d.frame.container,
            NavigationEvent::ErrorOccurred(d) => d.frame.container,
            NavigationEvent::CreatedNavigationTarget(d) => d.source_container,
            NavigationEvent::TabReplaced(d) => d.container,
        }
    }

    /// Per-frame details, for events that are about a single frame.
    pub fn frame_details(&self) -> Option<&FrameEventDetails> {
        match self {
            NavigationEvent::BeforeNavigate(d)
            | NavigationEvent::DomContentLoaded(d)
            | NavigationEvent::Completed(d) => Some(d),
            NavigationEvent::Committed(d)
            | NavigationEvent::ReferenceFragmentUpdated(d)
            | NavigationEvent::HistoryStateUpdated(d) => Some(&d.frame),
            NavigationEvent::ErrorOccurred(d) => Some(&d.frame),
            NavigationEvent::CreatedNavigationTarget(_) | NavigationEvent::TabReplaced(_) => None,
        }
    }

    pub fn frame(&self) -> Option<FrameHandle> {
        match self {
            NavigationEvent::CreatedNavigationTarget(d) => Some(d.source_frame),
            other => other.frame_details().map(|d| d.frame),
        }
    }

    pub fn url(&self) -> Option<&Url> {
        match self {
            NavigationEvent::CreatedNavigationTarget(d) => Some(&d.url),
            other => other.frame_details().map(|d| &d.url),
        }
    }
}

/// An event after ingestion: sequenced and timestamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub seq: u64,
    pub ts: String,
    #[serde(flatten)]
    pub event: NavigationEvent,
}

impl EventEnvelope {
    pub fn with_now(seq: u64, event: NavigationEvent) -> Self {
        Self {
            seq,
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            event,
        }
    }
}
