//! Cross-container routing of retargeted navigations.
//!
//! A navigation can open its destination in a brand new container. The new
//! container is often created before the UI attaches it, in which case the
//! `onCreatedNavigationTarget` event is parked until the attach signal arrives.
//! Every parked target ends in exactly one of: emitted on attach, dropped because
//! the target died, dropped because the source died.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::dispatch::{ContainerReplacedDetails, EventBus, NavigationEvent};
use crate::navigation::registry::Registry;
use crate::types::{ContainerId, FrameHandle, ScopeId};

/// A navigation was retargeted into a new container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetargetingDetails {
    #[serde(default)]
    pub scope: ScopeId,
    pub source_container: ContainerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_frame: Option<FrameHandle>,
    pub target_container: ContainerId,
    pub target_url: Url,
    #[serde(default)]
    pub not_yet_attached: bool,
}

/// A spawned container whose UI attachment has not been observed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTarget {
    pub source_container: ContainerId,
    pub source_frame: FrameHandle,
    pub target_container: ContainerId,
    pub target_url: Url,
}

pub struct CrossContainerRouter {
    scope: ScopeId,
    pending: HashMap<ContainerId, PendingTarget>,
}

impl CrossContainerRouter {
    pub fn new(scope: ScopeId) -> Self {
        Self {
            scope,
            pending: HashMap::new(),
        }
    }

    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    pub fn retargeted(&mut self, registry: &Registry, details: RetargetingDetails, out: &EventBus) {
        if details.scope.original() != self.scope {
            return;
        }
        let Some(source_frame) = details.source_frame else {
            return;
        };
        let Some(observer) = registry.get(details.source_container) else {
            debug!(
                container = %details.source_container,
                "retargeting from a container without observer"
            );
            return;
        };
        if !observer.frame_navigation_state().can_send_events(source_frame) {
            return;
        }

        if details.not_yet_attached {
            debug!(
                source = %details.source_container,
                target = %details.target_container,
                "parking navigation target until attached"
            );
            self.pending.insert(
                details.target_container,
                PendingTarget {
                    source_container: details.source_container,
                    source_frame,
                    target_container: details.target_container,
                    target_url: details.target_url,
                },
            );
        } else {
            observer.dispatch_created_navigation_target(
                source_frame,
                details.target_container,
                details.target_url,
                out,
            );
        }
    }

    /// `container` became visible in the UI.
    pub fn container_added(&mut self, registry: &Registry, container: ContainerId, out: &EventBus) {
        let Some(pending) = self.pending.remove(&container) else {
            return;
        };
        let Some(observer) = registry.get(pending.source_container) else {
            debug!(
                container = %pending.source_container,
                "pending navigation target lost its source observer"
            );
            return;
        };
        if !observer
            .frame_navigation_state()
            .can_send_events(pending.source_frame)
        {
            return;
        }
        observer.dispatch_created_navigation_target(
            pending.source_frame,
            pending.target_container,
            pending.target_url,
            out,
        );
    }

    /// Drop every pending target that names `container` as target or source.
    pub fn container_destroyed(&mut self, container: ContainerId) {
        self.pending.remove(&container);
        self.pending
            .retain(|_, pending| pending.source_container != container);
    }

    /// A container's contents were swapped for another container.
    pub fn container_replaced(
        &self,
        registry: &Registry,
        old: ContainerId,
        new: ContainerId,
        old_url: &Url,
        new_url: &Url,
        out: &EventBus,
    ) {
        if !registry.contains(old) {
            debug!(container = %old, "replaced container has no observer");
            return;
        }
        let policy = registry.policy();
        if !policy.is_valid_url(old_url) || !policy.is_valid_url(new_url) {
            return;
        }
        out.emit(NavigationEvent::TabReplaced(ContainerReplacedDetails {
            replaced_container: old,
            container: new,
        }));
    }

    pub fn pending(&self, target: ContainerId) -> Option<&PendingTarget> {
        self.pending.get(&target)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
