//! Registry: container identity to observer.

use std::sync::Arc;

use tracing::debug;

use crate::arena::Arena;
use crate::navigation::observer::ContainerObserver;
use crate::navigation::policy::TrackingPolicy;
use crate::types::{ContainerId, FrameHost, ViewKind};

/// Owns one [`ContainerObserver`] per live tracked container.
pub struct Registry {
    observers: Arena<ContainerId, ContainerObserver>,
    policy: Arc<TrackingPolicy>,
}

impl Registry {
    pub fn new(policy: Arc<TrackingPolicy>) -> Self {
        Self {
            observers: Arena::new(),
            policy,
        }
    }

    pub fn policy(&self) -> &Arc<TrackingPolicy> {
        &self.policy
    }

    /// Register `container` unless it is already tracked or hosts an internal view.
    ///
    /// Returns whether an observer exists for the container afterwards.
    pub fn track(&mut self, container: ContainerId, main_frame: FrameHost, view_kind: ViewKind) -> bool {
        if self.observers.contains(container) {
            return true;
        }
        if view_kind.is_internal() {
            debug!(container = %container, view = view_kind.as_str(), "not tracking internal view");
            return false;
        }
        let observer =
            ContainerObserver::new(container, main_frame, view_kind, Arc::clone(&self.policy));
        match self.observers.insert(container, observer) {
            Ok(_) => true,
            Err(stale) => {
                debug!(container = %container, error = %stale, "not tracking stale container");
                false
            }
        }
    }

    pub fn get(&self, container: ContainerId) -> Option<&ContainerObserver> {
        self.observers.get(container)
    }

    pub fn get_mut(&mut self, container: ContainerId) -> Option<&mut ContainerObserver> {
        self.observers.get_mut(container)
    }

    pub fn contains(&self, container: ContainerId) -> bool {
        self.observers.contains(container)
    }

    pub fn remove(&mut self, container: ContainerId) -> Option<ContainerObserver> {
        self.observers.remove(container)
    }

    pub fn containers(&self) -> Vec<ContainerId> {
        self.observers.iter().map(|(id, _)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
