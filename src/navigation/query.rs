//! Read-only frame snapshots for external callers.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::navigation::registry::Registry;
use crate::types::{ContainerId, FrameHandle, ProcessId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInfo {
    pub url: Url,
    pub error_occurred: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_frame: Option<FrameHandle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDetails {
    pub url: Url,
    pub frame: FrameHandle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_frame: Option<FrameHandle>,
    pub process_id: ProcessId,
    pub error_occurred: bool,
}

/// Snapshot of one frame, or `None` if the container or frame is unknown or the
/// frame's URL is not trackable.
pub fn get_frame(registry: &Registry, container: ContainerId, frame: FrameHandle) -> Option<FrameInfo> {
    let state = registry.get(container)?.frame_navigation_state();
    let record = state.get(frame)?;
    let url = record.url()?;
    if !state.is_valid_url(url) {
        return None;
    }
    Some(FrameInfo {
        url: url.clone(),
        error_occurred: record.error_occurred(),
        parent_frame: record.parent(),
    })
}

/// Snapshot of every trackable frame of `container`, in creation order.
pub fn get_all_frames(registry: &Registry, container: ContainerId) -> Vec<FrameDetails> {
    let Some(observer) = registry.get(container) else {
        return Vec::new();
    };
    let state = observer.frame_navigation_state();
    state
        .iter()
        .filter_map(|record| {
            let url = record.url()?;
            if !state.is_valid_url(url) {
                return None;
            }
            Some(FrameDetails {
                url: url.clone(),
                frame: record.handle(),
                parent_frame: record.parent(),
                process_id: record.process_id(),
                error_occurred: record.error_occurred(),
            })
        })
        .collect()
}
