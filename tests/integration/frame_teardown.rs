//! Frame destruction and host replacement.

use crate::integration::test_utils::*;
use navtrack::arena::HandleAllocator;
use navtrack::dispatch::NavigationEvent;
use navtrack::types::{FrameHandle, ProcessId};
use navtrack::Signal;

#[test]
fn test_destroying_unfinished_frame_reports_abort() {
    let mut harness = Harness::with_tab();
    harness.apply(child_created(TAB, CHILD, MAIN));
    harness.apply(started(TAB, CHILD, "http://ads.test/"));
    harness.take();

    harness.apply(Signal::FrameHostDestroying {
        container: TAB,
        frame: CHILD,
    });
    harness.apply(Signal::FrameDestroyed {
        container: TAB,
        frame: CHILD,
    });
    let events = harness.take();
    assert_eq!(events.len(), 1);
    match &events[0].event {
        NavigationEvent::ErrorOccurred(error) => {
            assert_eq!(error.error, "net::ERR_ABORTED");
            assert_eq!(error.frame.parent_frame, Some(MAIN));
            assert_eq!(error.frame.process_id, ProcessId(2));
        }
        other => panic!("expected onErrorOccurred, got {:?}", other),
    }
    assert!(harness.engine.get_frame(TAB, CHILD).is_none());
}

#[test]
fn test_destroying_completed_frame_is_silent() {
    let mut harness = Harness::with_tab();
    harness.apply(started(TAB, MAIN, "http://a.com/"));
    harness.apply(committed(TAB, MAIN, "http://a.com/"));
    harness.apply(parsed(TAB, MAIN));
    harness.apply(finished(TAB, MAIN, "http://a.com/"));
    harness.take();

    harness.apply(Signal::FrameHostDestroying {
        container: TAB,
        frame: MAIN,
    });
    assert!(harness.take_names().is_empty());
}

#[test]
fn test_host_replacement_aborts_old_and_tracks_new() {
    let mut harness = Harness::with_tab();
    harness.apply(started(TAB, MAIN, "http://a.com/"));
    harness.take();

    let swapped = FrameHandle::new(3, 1);
    harness.apply(Signal::FrameHostReplaced {
        container: TAB,
        old: Some(MAIN),
        new: swapped,
        parent: None,
        process_id: ProcessId(9),
    });
    assert_eq!(harness.take_names(), vec!["onErrorOccurred"]);
    assert!(harness.engine.get_frame(TAB, MAIN).is_none());

    harness.apply(started(TAB, swapped, "http://a.com/"));
    let events = harness.take();
    assert_eq!(events[0].event.frame(), Some(swapped));
}

#[test]
fn test_stale_frame_signals_are_ignored() {
    let mut frames = HandleAllocator::<FrameHandle>::new();
    assert_eq!(frames.allocate(), MAIN);
    let child = frames.allocate();
    assert_eq!(child, CHILD);

    let mut harness = Harness::with_tab();
    harness.apply(child_created(TAB, child, MAIN));
    harness.apply(Signal::FrameDestroyed {
        container: TAB,
        frame: child,
    });
    assert!(frames.release(child));
    let reused = frames.allocate();
    assert_eq!(reused.slot(), CHILD.slot());
    assert_ne!(reused, CHILD);
    harness.apply(child_created(TAB, reused, MAIN));

    harness.apply(started(TAB, CHILD, "http://stale.test/"));
    harness.apply(parsed(TAB, CHILD));
    harness.apply(finished(TAB, CHILD, "http://stale.test/"));
    assert!(harness.take_names().is_empty());

    harness.apply(started(TAB, reused, "http://fresh.test/"));
    assert_eq!(harness.take_names(), vec!["onBeforeNavigate"]);
}
