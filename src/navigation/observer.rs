//! Per-container observer: turns raw load signals into lifecycle events.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::dispatch::{
    CommitDetails, ErrorDetails, EventBus, FrameEventDetails, NavigationEvent,
    NavigationTargetDetails,
};
use crate::navigation::policy::{is_reference_fragment_navigation, load_url_matches, TrackingPolicy};
use crate::navigation::state::FrameNavigationState;
use crate::transition::{NetError, PageTransition, TransitionQualifier};
use crate::types::{
    ContainerId, FrameHandle, FrameHost, ResourceType, ViewKind, WindowDisposition,
};

/// Observes one container and owns its [`FrameNavigationState`].
pub struct ContainerObserver {
    container: ContainerId,
    state: FrameNavigationState,
}

impl ContainerObserver {
    pub fn new(
        container: ContainerId,
        main_frame: FrameHost,
        view_kind: ViewKind,
        policy: Arc<TrackingPolicy>,
    ) -> Self {
        let mut state = FrameNavigationState::new(view_kind, policy);
        state.frame_created(main_frame);
        Self { container, state }
    }

    pub fn container(&self) -> ContainerId {
        self.container
    }

    pub fn frame_navigation_state(&self) -> &FrameNavigationState {
        &self.state
    }

    pub fn set_view_kind(&mut self, view_kind: ViewKind) {
        self.state.set_view_kind(view_kind);
    }

    pub fn frame_host_created(&mut self, host: FrameHost) {
        self.state.frame_created(host);
    }

    /// The frame host is about to go away. An unfinished navigation is reported
    /// as aborted.
    pub fn frame_host_destroying(&mut self, frame: FrameHandle, out: &EventBus) {
        if !self.state.get_navigation_completed(frame) {
            self.report_error(frame, NetError::ABORTED, out);
        }
    }

    pub fn frame_destroyed(&mut self, frame: FrameHandle) {
        self.state.frame_deleted(frame);
    }

    /// The occupant of a frame position moved to a new host.
    pub fn frame_host_replaced(
        &mut self,
        old: Option<FrameHandle>,
        new: FrameHost,
        out: &EventBus,
    ) {
        if let Some(old) = old {
            self.frame_host_destroying(old, out);
            self.state.frame_deleted(old);
        }
        self.state.frame_created(new);
    }

    pub fn navigation_started(
        &mut self,
        frame: FrameHandle,
        url: Url,
        is_error_page: bool,
        is_iframe_srcdoc: bool,
        out: &EventBus,
    ) {
        debug!(
            container = %self.container,
            frame = %frame,
            url = %url,
            is_error_page,
            is_iframe_srcdoc,
            "navigation started"
        );
        self.state
            .start_tracking(frame, url, is_error_page, is_iframe_srcdoc);

        if !self.state.can_send_events(frame) {
            return;
        }
        if let Some(details) = self.frame_details(frame) {
            out.emit(NavigationEvent::BeforeNavigate(details));
        }
    }

    pub fn navigation_committed(
        &mut self,
        frame: FrameHandle,
        url: Url,
        transition: PageTransition,
        out: &EventBus,
    ) {
        debug!(container = %self.container, frame = %frame, url = %url, "navigation committed");
        let is_reference_fragment = self
            .state
            .get_url(frame)
            .is_some_and(|existing| is_reference_fragment_navigation(existing, &url));
        let is_history_state_update = self.state.get_navigation_committed(frame);

        self.state.update_frame(frame, url);
        self.state.set_committed(frame);

        if !self.state.can_send_events(frame) {
            return;
        }
        let Some(details) = self.frame_details(frame) else {
            return;
        };

        let event = if is_reference_fragment {
            NavigationEvent::ReferenceFragmentUpdated(CommitDetails::new(details, transition))
        } else if is_history_state_update {
            NavigationEvent::HistoryStateUpdated(CommitDetails::new(details, transition))
        } else {
            let transition = if self.state.get_is_server_redirected(frame) {
                transition.with_qualifier(TransitionQualifier::ServerRedirect)
            } else {
                transition
            };
            NavigationEvent::Committed(CommitDetails::new(details, transition))
        };
        out.emit(event);
    }

    pub fn navigation_failed(
        &mut self,
        frame: FrameHandle,
        url: &Url,
        error: NetError,
        out: &EventBus,
    ) {
        debug!(container = %self.container, frame = %frame, url = %url, %error, "navigation failed");
        self.report_error(frame, error, out);
    }

    pub fn document_parsed(&mut self, frame: FrameHandle, out: &EventBus) {
        debug!(container = %self.container, frame = %frame, "document parsed");
        if !self.state.can_send_events(frame) {
            return;
        }
        self.state.set_parsing_finished(frame);
        let Some(details) = self.frame_details(frame) else {
            return;
        };
        out.emit(NavigationEvent::DomContentLoaded(details.clone()));

        // The load may have finished before parsing did; completion was held back
        // until now.
        if self.state.get_navigation_completed(frame) {
            out.emit(NavigationEvent::Completed(details));
        }
    }

    pub fn load_finished(&mut self, frame: FrameHandle, url: &Url, out: &EventBus) {
        debug!(container = %self.container, frame = %frame, url = %url, "load finished");
        // Replacement content can produce load signals for frames that never loaded.
        if !self.state.is_valid_frame(frame) {
            return;
        }
        self.state.set_completed(frame);
        if !self.state.can_send_events(frame) {
            return;
        }

        // A newer navigation may have started; its predecessor's completion is stale.
        let current = self.state.get_url(frame);
        if !current.is_some_and(|tracked| load_url_matches(tracked, url)) {
            return;
        }

        if !self.state.get_parsing_finished(frame) {
            return;
        }
        if let Some(details) = self.frame_details(frame) {
            out.emit(NavigationEvent::Completed(details));
        }
    }

    pub fn load_failed(&mut self, frame: FrameHandle, url: &Url, error: NetError, out: &EventBus) {
        debug!(container = %self.container, frame = %frame, url = %url, %error, "load failed");
        if !self.state.is_valid_frame(frame) {
            return;
        }
        self.report_error(frame, error, out);
    }

    pub fn resource_redirected(&mut self, frame: FrameHandle, resource_type: ResourceType) {
        if !resource_type.is_frame() {
            return;
        }
        self.state.set_server_redirected(frame);
    }

    /// A new container was opened from `source_frame` and is already attached.
    pub fn opened_new_container(
        &self,
        source_frame: FrameHandle,
        new_container: ContainerId,
        url: Url,
        disposition: WindowDisposition,
        out: &EventBus,
    ) {
        if !self.state.can_send_events(source_frame) {
            return;
        }
        if !disposition.opens_new_container() {
            return;
        }
        self.dispatch_created_navigation_target(source_frame, new_container, url, out);
    }

    pub(crate) fn dispatch_created_navigation_target(
        &self,
        source_frame: FrameHandle,
        target: ContainerId,
        url: Url,
        out: &EventBus,
    ) {
        let Some(record) = self.state.get(source_frame) else {
            return;
        };
        out.emit(NavigationEvent::CreatedNavigationTarget(
            NavigationTargetDetails {
                source_container: self.container,
                source_frame,
                source_process_id: record.process_id(),
                container: target,
                url,
            },
        ));
    }

    /// Single path for every error-marking signal. Eligibility is sampled before
    /// the error flag is set.
    fn report_error(&mut self, frame: FrameHandle, error: NetError, out: &EventBus) {
        if self.state.can_send_events(frame) {
            if let Some(details) = self.frame_details(frame) {
                out.emit(NavigationEvent::ErrorOccurred(ErrorDetails {
                    frame: details,
                    error: error.to_string(),
                }));
            }
        }
        self.state.set_error(frame);
    }

    fn frame_details(&self, frame: FrameHandle) -> Option<FrameEventDetails> {
        let record = self.state.get(frame)?;
        Some(FrameEventDetails {
            container: self.container,
            frame,
            parent_frame: record.parent(),
            process_id: record.process_id(),
            url: record.url()?.clone(),
        })
    }
}
