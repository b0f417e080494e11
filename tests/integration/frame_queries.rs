//! Query surface snapshots.

use crate::integration::test_utils::*;
use navtrack::transition::NetError;
use navtrack::types::{ContainerId, FrameHandle, ProcessId};

fn populated() -> Harness {
    let mut harness = Harness::with_tab();
    let grandchild = FrameHandle::new(2, 1);
    harness.apply(child_created(TAB, CHILD, MAIN));
    harness.apply(child_created(TAB, grandchild, CHILD));
    harness.apply(started(TAB, MAIN, "http://a.com/"));
    harness.apply(started(TAB, CHILD, "http://b.com/"));
    harness.apply(started(TAB, grandchild, "view-source:http://c.com/"));
    harness.apply(failed(TAB, CHILD, "http://b.com/", NetError::ACCESS_DENIED));
    harness
}

#[test]
fn test_get_all_frames_is_ordered_and_filtered() {
    let harness = populated();
    let frames = harness.engine.get_all_frames(TAB);
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].frame, MAIN);
    assert_eq!(frames[0].parent_frame, None);
    assert_eq!(frames[0].process_id, ProcessId(1));
    assert!(!frames[0].error_occurred);
    assert_eq!(frames[1].frame, CHILD);
    assert_eq!(frames[1].parent_frame, Some(MAIN));
    assert!(frames[1].error_occurred);
}

#[test]
fn test_get_all_frames_is_idempotent() {
    let harness = populated();
    let first = harness.engine.get_all_frames(TAB);
    let second = harness.engine.get_all_frames(TAB);
    assert_eq!(first, second);
}

#[test]
fn test_get_frame_reflects_latest_commit() {
    let mut harness = populated();
    harness.apply(committed(TAB, MAIN, "http://a.com/#section"));
    let info = harness.engine.get_frame(TAB, MAIN).unwrap();
    assert_eq!(info.url, url("http://a.com/#section"));
    assert!(!info.error_occurred);
}

#[test]
fn test_queries_on_unknown_targets_are_empty() {
    let harness = populated();
    assert!(harness.engine.get_frame(TAB, FrameHandle::new(2, 1)).is_none());
    assert!(harness.engine.get_frame(TAB, FrameHandle::new(40, 1)).is_none());
    assert!(harness.engine.get_frame(ContainerId::new(3, 1), MAIN).is_none());
    assert!(harness.engine.get_all_frames(ContainerId::new(3, 1)).is_empty());
}

#[test]
fn test_frames_leave_snapshot_when_destroyed() {
    let mut harness = populated();
    harness.apply(navtrack::Signal::FrameDestroyed {
        container: TAB,
        frame: CHILD,
    });
    let handles: Vec<_> = harness
        .engine
        .get_all_frames(TAB)
        .iter()
        .map(|f| f.frame)
        .collect();
    assert_eq!(handles, vec![MAIN]);
}

#[test]
fn test_distant_handle_slots_are_tracked() {
    let far_tab = ContainerId::new(4_000_000_000, 1);
    let far_frame = FrameHandle::new(u32::MAX, 7);
    let mut harness = Harness::new();
    harness.open(far_tab, far_frame);
    harness.apply(started(far_tab, far_frame, "http://far.test/"));
    assert_eq!(harness.take_names(), vec!["onBeforeNavigate"]);

    let frames = harness.engine.get_all_frames(far_tab);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].frame, far_frame);
    assert!(harness.engine.get_all_frames(TAB).is_empty());
}
