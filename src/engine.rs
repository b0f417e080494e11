//! The single entry point for inbound signals.
//!
//! [`NavigationEngine`] owns the [`Registry`], the [`CrossContainerRouter`] and the
//! producer side of the event bus. Signals naming containers or frames the engine
//! does not know are dropped and logged at `trace`.

use std::sync::Arc;

use tracing::{debug, trace};
use url::Url;

use crate::config::EngineConfig;
use crate::dispatch::EventBus;
use crate::navigation::{
    get_all_frames, get_frame, ContainerObserver, CrossContainerRouter, FrameDetails, FrameInfo,
    Registry, RetargetingDetails, TrackingPolicy,
};
use crate::signal::Signal;
use crate::transition::{NetError, PageTransition};
use crate::types::{
    ContainerId, FrameHandle, FrameHost, ResourceType, ViewKind, WindowDisposition,
};

pub struct NavigationEngine {
    registry: Registry,
    router: CrossContainerRouter,
    bus: EventBus,
}

impl NavigationEngine {
    pub fn new(config: &EngineConfig, bus: EventBus) -> Self {
        let policy = Arc::new(TrackingPolicy::from_config(config));
        Self {
            registry: Registry::new(policy),
            router: CrossContainerRouter::new(config.scope),
            bus,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn router(&self) -> &CrossContainerRouter {
        &self.router
    }

    /// Apply one signal.
    pub fn handle(&mut self, signal: Signal) {
        trace!(signal = signal.name(), "handling signal");
        match signal {
            Signal::ContainerCreated {
                container,
                main_frame,
                process_id,
                view_kind,
            } => self.container_created(
                container,
                Signal::frame_host(main_frame, None, process_id),
                view_kind,
            ),
            Signal::ContainerAdded { container } => self.container_added(container),
            Signal::ContainerDestroyed { container } => self.container_destroyed(container),
            Signal::ContainerReplaced {
                old,
                new,
                old_url,
                new_url,
            } => self.container_replaced(old, new, &old_url, &new_url),
            Signal::ViewKindChanged {
                container,
                view_kind,
            } => self.view_kind_changed(container, view_kind),
            Signal::FrameHostCreated {
                container,
                frame,
                parent,
                process_id,
            } => self.frame_host_created(container, Signal::frame_host(frame, parent, process_id)),
            Signal::FrameHostDestroying { container, frame } => {
                self.frame_host_destroying(container, frame)
            }
            Signal::FrameDestroyed { container, frame } => self.frame_destroyed(container, frame),
            Signal::FrameHostReplaced {
                container,
                old,
                new,
                parent,
                process_id,
            } => self.frame_host_replaced(
                container,
                old,
                Signal::frame_host(new, parent, process_id),
            ),
            Signal::NavigationStarted {
                container,
                frame,
                url,
                is_error_page,
                is_iframe_srcdoc,
            } => self.navigation_started(container, frame, url, is_error_page, is_iframe_srcdoc),
            Signal::NavigationCommitted {
                container,
                frame,
                url,
                transition,
            } => self.navigation_committed(container, frame, url, transition),
            Signal::NavigationFailed {
                container,
                frame,
                url,
                error,
            } => self.navigation_failed(container, frame, &url, error),
            Signal::DocumentParsed { container, frame } => self.document_parsed(container, frame),
            Signal::LoadFinished {
                container,
                frame,
                url,
            } => self.load_finished(container, frame, &url),
            Signal::LoadFailed {
                container,
                frame,
                url,
                error,
            } => self.load_failed(container, frame, &url, error),
            Signal::ResourceRedirected {
                container,
                frame,
                resource_type,
            } => self.resource_redirected(container, frame, resource_type),
            Signal::OpenedNewContainer {
                container,
                source_frame,
                new_container,
                url,
                disposition,
            } => self.opened_new_container(container, source_frame, new_container, url, disposition),
            Signal::Retargeted(details) => self.retargeted(details),
        }
    }

    // Container lifecycle

    pub fn container_created(&mut self, container: ContainerId, main_frame: FrameHost, view_kind: ViewKind) {
        if self.registry.track(container, main_frame, view_kind) {
            debug!(container = %container, view = view_kind.as_str(), "tracking container");
        }
    }

    pub fn container_added(&mut self, container: ContainerId) {
        self.router.container_added(&self.registry, container, &self.bus);
    }

    pub fn container_destroyed(&mut self, container: ContainerId) {
        if self.registry.remove(container).is_some() {
            debug!(container = %container, "container destroyed");
        }
        self.router.container_destroyed(container);
    }

    pub fn container_replaced(&mut self, old: ContainerId, new: ContainerId, old_url: &Url, new_url: &Url) {
        self.router
            .container_replaced(&self.registry, old, new, old_url, new_url, &self.bus);
    }

    pub fn view_kind_changed(&mut self, container: ContainerId, view_kind: ViewKind) {
        self.with_observer(container, |observer, _| observer.set_view_kind(view_kind));
    }

    // Frame lifecycle

    pub fn frame_host_created(&mut self, container: ContainerId, host: FrameHost) {
        self.with_observer(container, |observer, _| observer.frame_host_created(host));
    }

    pub fn frame_host_destroying(&mut self, container: ContainerId, frame: FrameHandle) {
        self.with_observer(container, |observer, bus| {
            observer.frame_host_destroying(frame, bus)
        });
    }

    pub fn frame_destroyed(&mut self, container: ContainerId, frame: FrameHandle) {
        self.with_observer(container, |observer, _| observer.frame_destroyed(frame));
    }

    pub fn frame_host_replaced(&mut self, container: ContainerId, old: Option<FrameHandle>, new: FrameHost) {
        self.with_observer(container, |observer, bus| {
            observer.frame_host_replaced(old, new, bus)
        });
    }

    // Navigation

    pub fn navigation_started(
        &mut self,
        container: ContainerId,
        frame: FrameHandle,
        url: Url,
        is_error_page: bool,
        is_iframe_srcdoc: bool,
    ) {
        self.with_observer(container, |observer, bus| {
            observer.navigation_started(frame, url, is_error_page, is_iframe_srcdoc, bus)
        });
    }

    pub fn navigation_committed(
        &mut self,
        container: ContainerId,
        frame: FrameHandle,
        url: Url,
        transition: PageTransition,
    ) {
        self.with_observer(container, |observer, bus| {
            observer.navigation_committed(frame, url, transition, bus)
        });
    }

    pub fn navigation_failed(&mut self, container: ContainerId, frame: FrameHandle, url: &Url, error: NetError) {
        self.with_observer(container, |observer, bus| {
            observer.navigation_failed(frame, url, error, bus)
        });
    }

    pub fn document_parsed(&mut self, container: ContainerId, frame: FrameHandle) {
        self.with_observer(container, |observer, bus| {
            observer.document_parsed(frame, bus)
        });
    }

    pub fn load_finished(&mut self, container: ContainerId, frame: FrameHandle, url: &Url) {
        self.with_observer(container, |observer, bus| {
            observer.load_finished(frame, url, bus)
        });
    }

    pub fn load_failed(&mut self, container: ContainerId, frame: FrameHandle, url: &Url, error: NetError) {
        self.with_observer(container, |observer, bus| {
            observer.load_failed(frame, url, error, bus)
        });
    }

    pub fn resource_redirected(&mut self, container: ContainerId, frame: FrameHandle, resource_type: ResourceType) {
        self.with_observer(container, |observer, _| observer.resource_redirected(frame, resource_type));
    }

    // New containers

    pub fn opened_new_container(
        &mut self,
        container: ContainerId,
        source_frame: FrameHandle,
        new_container: ContainerId,
        url: Url,
        disposition: WindowDisposition,
    ) {
        match self.registry.get(container) {
            Some(observer) => {
                observer.opened_new_container(source_frame, new_container, url, disposition, &self.bus)
            }
            None => trace!(container = %container, "signal for untracked container"),
        }
    }

    pub fn retargeted(&mut self, details: RetargetingDetails) {
        self.router.retargeted(&self.registry, details, &self.bus);
    }

    // Queries

    pub fn get_frame(&self, container: ContainerId, frame: FrameHandle) -> Option<FrameInfo> {
        get_frame(&self.registry, container, frame)
    }

    pub fn get_all_frames(&self, container: ContainerId) -> Vec<FrameDetails> {
        get_all_frames(&self.registry, container)
    }

    fn with_observer(
        &mut self,
        container: ContainerId,
        f: impl FnOnce(&mut ContainerObserver, &EventBus),
    ) {
        match self.registry.get_mut(container) {
            Some(observer) => f(observer, &self.bus),
            None => trace!(container = %container, "signal for untracked container"),
        }
    }
}
