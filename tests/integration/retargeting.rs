//! Cross-container routing: new containers, retargeting and replacement.

use crate::integration::test_utils::*;
use navtrack::dispatch::NavigationEvent;
use navtrack::navigation::RetargetingDetails;
use navtrack::types::{ContainerId, FrameHandle, ScopeId, WindowDisposition};
use navtrack::Signal;

const TARGET: ContainerId = ContainerId::new(1, 1);

fn retarget(attached: bool) -> Signal {
    Signal::Retargeted(RetargetingDetails {
        scope: ScopeId::default(),
        source_container: TAB,
        source_frame: Some(MAIN),
        target_container: TARGET,
        target_url: url("http://b.com/"),
        not_yet_attached: !attached,
    })
}

fn loaded_tab() -> Harness {
    let mut harness = Harness::with_tab();
    harness.apply(started(TAB, MAIN, "http://a.com/"));
    harness.apply(committed(TAB, MAIN, "http://a.com/"));
    harness.take();
    harness
}

#[test]
fn test_source_destruction_cancels_pending_target() {
    let mut harness = loaded_tab();
    harness.apply(retarget(false));
    harness.apply(Signal::ContainerDestroyed { container: TAB });
    harness.apply(Signal::ContainerAdded { container: TARGET });
    assert!(harness.take_names().is_empty());
    assert_eq!(harness.engine.router().pending_len(), 0);
}

#[test]
fn test_pending_target_emits_exactly_once_on_attach() {
    let mut harness = loaded_tab();
    harness.apply(retarget(false));
    assert!(harness.take_names().is_empty());

    harness.apply(Signal::ContainerAdded { container: TARGET });
    harness.apply(Signal::ContainerAdded { container: TARGET });
    let events = harness.take();
    assert_eq!(events.len(), 1);
    match &events[0].event {
        NavigationEvent::CreatedNavigationTarget(target) => {
            assert_eq!(target.source_container, TAB);
            assert_eq!(target.source_frame, MAIN);
            assert_eq!(target.container, TARGET);
            assert_eq!(target.url, url("http://b.com/"));
        }
        other => panic!("expected onCreatedNavigationTarget, got {:?}", other),
    }
}

#[test]
fn test_target_destruction_cancels_pending_target() {
    let mut harness = loaded_tab();
    harness.apply(retarget(false));
    harness.apply(Signal::ContainerDestroyed { container: TARGET });
    harness.apply(Signal::ContainerAdded { container: TARGET });
    assert!(harness.take_names().is_empty());
}

#[test]
fn test_attached_retarget_emits_immediately() {
    let mut harness = loaded_tab();
    harness.apply(retarget(true));
    assert_eq!(harness.take_names(), vec!["onCreatedNavigationTarget"]);
}

#[test]
fn test_opened_new_container_respects_disposition() {
    let mut harness = loaded_tab();
    let open = |disposition| Signal::OpenedNewContainer {
        container: TAB,
        source_frame: MAIN,
        new_container: TARGET,
        url: url("http://b.com/"),
        disposition,
    };
    harness.apply(open(WindowDisposition::CurrentTab));
    harness.apply(open(WindowDisposition::SaveToDisk));
    assert!(harness.take_names().is_empty());

    harness.apply(open(WindowDisposition::NewBackgroundTab));
    harness.apply(open(WindowDisposition::NewPopup));
    assert_eq!(
        harness.take_names(),
        vec!["onCreatedNavigationTarget", "onCreatedNavigationTarget"]
    );
}

#[test]
fn test_ineligible_source_frame_opens_nothing() {
    let mut harness = Harness::with_tab();
    harness.apply(started(TAB, MAIN, "chrome://newtab/"));
    harness.apply(retarget(true));
    harness.apply(Signal::OpenedNewContainer {
        container: TAB,
        source_frame: MAIN,
        new_container: TARGET,
        url: url("http://b.com/"),
        disposition: WindowDisposition::NewForegroundTab,
    });
    harness.apply(Signal::OpenedNewContainer {
        container: TAB,
        source_frame: FrameHandle::new(5, 1),
        new_container: TARGET,
        url: url("http://b.com/"),
        disposition: WindowDisposition::NewForegroundTab,
    });
    assert!(harness.take_names().is_empty());
}

#[test]
fn test_container_replacement_emits_tab_replaced() {
    let mut harness = loaded_tab();
    let new = ContainerId::new(2, 1);
    harness.apply(Signal::ContainerReplaced {
        old: TAB,
        new,
        old_url: url("http://a.com/"),
        new_url: url("http://a.com/"),
    });
    let events = harness.take();
    assert_eq!(events.len(), 1);
    match &events[0].event {
        NavigationEvent::TabReplaced(replaced) => {
            assert_eq!(replaced.replaced_container, TAB);
            assert_eq!(replaced.container, new);
        }
        other => panic!("expected onTabReplaced, got {:?}", other),
    }

    harness.apply(Signal::ContainerReplaced {
        old: ContainerId::new(7, 1),
        new,
        old_url: url("http://a.com/"),
        new_url: url("http://a.com/"),
    });
    assert!(harness.take_names().is_empty());
}
