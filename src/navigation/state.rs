//! Per-container frame navigation state.
//!
//! Tracks every currently instantiated frame of one container along with the
//! progress of its latest navigation. Setters on unknown handles are no-ops: frames
//! can be torn down while signals for them are still in flight.

use std::sync::Arc;

use tracing::trace;
use url::Url;

use crate::arena::Arena;
use crate::navigation::policy::{about_srcdoc, TrackingPolicy};
use crate::types::{FrameHandle, FrameHost, ProcessId, ViewKind};

/// Navigation progress of one frame.
#[derive(Debug, Clone)]
pub struct FrameRecord {
    handle: FrameHandle,
    parent: Option<FrameHandle>,
    process_id: ProcessId,
    url: Option<Url>,
    started: bool,
    committed: bool,
    completed: bool,
    parsing_finished: bool,
    error_occurred: bool,
    server_redirected: bool,
    is_error_page: bool,
    is_iframe_srcdoc: bool,
}

impl FrameRecord {
    fn new(host: FrameHost) -> Self {
        Self {
            handle: host.frame,
            parent: host.parent,
            process_id: host.process_id,
            url: None,
            started: false,
            committed: false,
            completed: false,
            parsing_finished: false,
            error_occurred: false,
            server_redirected: false,
            is_error_page: false,
            is_iframe_srcdoc: false,
        }
    }

    pub fn handle(&self) -> FrameHandle {
        self.handle
    }

    pub fn parent(&self) -> Option<FrameHandle> {
        self.parent
    }

    pub fn process_id(&self) -> ProcessId {
        self.process_id
    }

    /// URL as reported to subscribers; srcdoc iframes report `about:srcdoc`.
    pub fn url(&self) -> Option<&Url> {
        if self.is_iframe_srcdoc {
            return Some(about_srcdoc());
        }
        self.url.as_ref()
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn committed(&self) -> bool {
        self.committed
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn parsing_finished(&self) -> bool {
        self.parsing_finished
    }

    pub fn error_occurred(&self) -> bool {
        self.error_occurred
    }

    pub fn server_redirected(&self) -> bool {
        self.server_redirected
    }

    pub fn is_error_page(&self) -> bool {
        self.is_error_page
    }

    pub fn is_iframe_srcdoc(&self) -> bool {
        self.is_iframe_srcdoc
    }
}

/// Frame records of one container, in insertion order.
pub struct FrameNavigationState {
    frames: Arena<FrameHandle, FrameRecord>,
    order: Vec<FrameHandle>,
    view_kind: ViewKind,
    policy: Arc<TrackingPolicy>,
}

impl FrameNavigationState {
    pub fn new(view_kind: ViewKind, policy: Arc<TrackingPolicy>) -> Self {
        Self {
            frames: Arena::new(),
            order: Vec::new(),
            view_kind,
            policy,
        }
    }

    pub fn view_kind(&self) -> ViewKind {
        self.view_kind
    }

    pub fn set_view_kind(&mut self, view_kind: ViewKind) {
        self.view_kind = view_kind;
    }

    pub fn policy(&self) -> &TrackingPolicy {
        &self.policy
    }

    /// Start tracking a newly instantiated frame, replacing any record under the
    /// same handle.
    pub fn frame_created(&mut self, host: FrameHost) {
        match self.frames.insert(host.frame, FrameRecord::new(host)) {
            Ok(Some(_)) => {}
            Ok(None) => {
                // A newer generation in a reused slot evicts the stale occupant.
                self.order
                    .retain(|existing| existing.slot() != host.frame.slot());
                self.order.push(host.frame);
            }
            Err(stale) => {
                trace!(frame = %host.frame, error = %stale, "ignoring frame creation");
            }
        }
    }

    pub fn frame_deleted(&mut self, frame: FrameHandle) {
        if self.frames.remove(frame).is_some() {
            self.order.retain(|existing| *existing != frame);
        }
    }

    /// Begin a new navigation on `frame`, superseding whatever was in flight.
    pub fn start_tracking(
        &mut self,
        frame: FrameHandle,
        url: Url,
        is_error_page: bool,
        is_iframe_srcdoc: bool,
    ) {
        let Some(record) = self.frames.get_mut(frame) else {
            trace!(frame = %frame, "start_tracking for unknown frame");
            return;
        };
        record.url = Some(url);
        record.started = true;
        record.committed = false;
        record.completed = false;
        record.parsing_finished = false;
        record.server_redirected = false;
        // Error pages are never reported, so they start out errored.
        record.error_occurred = is_error_page;
        record.is_error_page = is_error_page;
        record.is_iframe_srcdoc = is_iframe_srcdoc;
    }

    pub fn update_frame(&mut self, frame: FrameHandle, url: Url) {
        if let Some(record) = self.frames.get_mut(frame) {
            record.url = Some(url);
        }
    }

    pub fn set_committed(&mut self, frame: FrameHandle) {
        if let Some(record) = self.frames.get_mut(frame) {
            record.committed = true;
        }
    }

    pub fn set_completed(&mut self, frame: FrameHandle) {
        if let Some(record) = self.frames.get_mut(frame) {
            record.completed = true;
        }
    }

    pub fn set_parsing_finished(&mut self, frame: FrameHandle) {
        if let Some(record) = self.frames.get_mut(frame) {
            record.parsing_finished = true;
        }
    }

    pub fn set_error(&mut self, frame: FrameHandle) {
        if let Some(record) = self.frames.get_mut(frame) {
            record.error_occurred = true;
        }
    }

    pub fn set_server_redirected(&mut self, frame: FrameHandle) {
        if let Some(record) = self.frames.get_mut(frame) {
            record.server_redirected = true;
        }
    }

    pub fn get(&self, frame: FrameHandle) -> Option<&FrameRecord> {
        self.frames.get(frame)
    }

    pub fn get_url(&self, frame: FrameHandle) -> Option<&Url> {
        self.get(frame).and_then(FrameRecord::url)
    }

    pub fn get_error_occurred(&self, frame: FrameHandle) -> bool {
        self.get(frame).is_some_and(FrameRecord::error_occurred)
    }

    pub fn get_navigation_committed(&self, frame: FrameHandle) -> bool {
        self.get(frame).is_some_and(FrameRecord::committed)
    }

    pub fn get_navigation_completed(&self, frame: FrameHandle) -> bool {
        self.get(frame).is_some_and(FrameRecord::completed)
    }

    pub fn get_parsing_finished(&self, frame: FrameHandle) -> bool {
        self.get(frame).is_some_and(FrameRecord::parsing_finished)
    }

    pub fn get_is_server_redirected(&self, frame: FrameHandle) -> bool {
        self.get(frame).is_some_and(FrameRecord::server_redirected)
    }

    /// The handle names a frame that is currently instantiated.
    pub fn is_valid_frame(&self, frame: FrameHandle) -> bool {
        self.frames.contains(frame)
    }

    pub fn is_valid_url(&self, url: &Url) -> bool {
        self.policy.is_valid_url(url)
    }

    /// Events may be emitted for `frame`: it is live, its current navigation has
    /// not errored, its URL is trackable and the container is a trackable view.
    pub fn can_send_events(&self, frame: FrameHandle) -> bool {
        let Some(record) = self.get(frame) else {
            return false;
        };
        if record.error_occurred {
            return false;
        }
        let url_ok = record.url().is_some_and(|url| self.is_valid_url(url));
        url_ok && self.policy.is_trackable_view(self.view_kind)
    }

    /// Tracked frames in the order they were created.
    pub fn iter(&self) -> impl Iterator<Item = &FrameRecord> {
        self.order.iter().filter_map(|frame| self.frames.get(*frame))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
