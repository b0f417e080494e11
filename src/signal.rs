//! Inbound signals from the rendering and container-management layers.
//!
//! Every engine entry point has a matching `Signal` variant so that signals can be
//! queued, replayed from a script, or shipped across threads.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::EngineError;
use crate::navigation::RetargetingDetails;
use crate::transition::{NetError, PageTransition};
use crate::types::{
    ContainerId, FrameHandle, FrameHost, ProcessId, ResourceType, ViewKind, WindowDisposition,
};

fn default_view_kind() -> ViewKind {
    ViewKind::TabContents
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum Signal {
    ContainerCreated {
        container: ContainerId,
        main_frame: FrameHandle,
        process_id: ProcessId,
        #[serde(default = "default_view_kind")]
        view_kind: ViewKind,
    },
    ContainerAdded {
        container: ContainerId,
    },
    ContainerDestroyed {
        container: ContainerId,
    },
    ContainerReplaced {
        old: ContainerId,
        new: ContainerId,
        old_url: Url,
        new_url: Url,
    },
    ViewKindChanged {
        container: ContainerId,
        view_kind: ViewKind,
    },
    FrameHostCreated {
        container: ContainerId,
        frame: FrameHandle,
        #[serde(default)]
        parent: Option<FrameHandle>,
        process_id: ProcessId,
    },
    FrameHostDestroying {
        container: ContainerId,
        frame: FrameHandle,
    },
    FrameDestroyed {
        container: ContainerId,
        frame: FrameHandle,
    },
    FrameHostReplaced {
        container: ContainerId,
        #[serde(default)]
        old: Option<FrameHandle>,
        new: FrameHandle,
        #[serde(default)]
        parent: Option<FrameHandle>,
        process_id: ProcessId,
    },
    NavigationStarted {
        container: ContainerId,
        frame: FrameHandle,
        url: Url,
        #[serde(default)]
        is_error_page: bool,
        #[serde(default)]
        is_iframe_srcdoc: bool,
    },
    NavigationCommitted {
        container: ContainerId,
        frame: FrameHandle,
        url: Url,
        #[serde(default)]
        transition: PageTransition,
    },
    NavigationFailed {
        container: ContainerId,
        frame: FrameHandle,
        url: Url,
        error: NetError,
    },
    DocumentParsed {
        container: ContainerId,
        frame: FrameHandle,
    },
    LoadFinished {
        container: ContainerId,
        frame: FrameHandle,
        url: Url,
    },
    LoadFailed {
        container: ContainerId,
        frame: FrameHandle,
        url: Url,
        error: NetError,
    },
    ResourceRedirected {
        container: ContainerId,
        frame: FrameHandle,
        resource_type: ResourceType,
    },
    OpenedNewContainer {
        container: ContainerId,
        source_frame: FrameHandle,
        new_container: ContainerId,
        url: Url,
        disposition: WindowDisposition,
    },
    Retargeted(RetargetingDetails),
}

impl Signal {
    pub fn name(&self) -> &'static str {
        match self {
            Signal::ContainerCreated { .. } => "container_created",
            Signal::ContainerAdded { .. } => "container_added",
            Signal::ContainerDestroyed { .. } => "container_destroyed",
            Signal::ContainerReplaced { .. } => "container_replaced",
            Signal::ViewKindChanged { .. } => "view_kind_changed",
            Signal::FrameHostCreated { .. } => "frame_host_created",
            Signal::FrameHostDestroying { .. } => "frame_host_destroying",
            Signal::FrameDestroyed { .. } => "frame_destroyed",
            Signal::FrameHostReplaced { .. } => "frame_host_replaced",
            Signal::NavigationStarted { .. } => "navigation_started",
            Signal::NavigationCommitted { .. } => "navigation_committed",
            Signal::NavigationFailed { .. } => "navigation_failed",
            Signal::DocumentParsed { .. } => "document_parsed",
            Signal::LoadFinished { .. } => "load_finished",
            Signal::LoadFailed { .. } => "load_failed",
            Signal::ResourceRedirected { .. } => "resource_redirected",
            Signal::OpenedNewContainer { .. } => "opened_new_container",
            Signal::Retargeted(_) => "retargeted",
        }
    }

    pub(crate) fn frame_host(frame: FrameHandle, parent: Option<FrameHandle>, process_id: ProcessId) -> FrameHost {
        FrameHost {
            frame,
            parent,
            process_id,
        }
    }
}

/// Parse a JSON-lines signal script. Blank lines and lines starting with `#` are
/// skipped.
pub fn parse_script(text: &str) -> Result<Vec<Signal>, EngineError> {
    let mut signals = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let signal = serde_json::from_str(trimmed).map_err(|e| EngineError::SignalDecode {
            line: index + 1,
            message: e.to_string(),
        })?;
        signals.push(signal);
    }
    Ok(signals)
}
