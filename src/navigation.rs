//! Navigation tracking: per-frame state, per-container observers, cross-container
//! routing and the registry tying them together.

pub mod observer;
pub mod policy;
pub mod query;
pub mod registry;
pub mod router;
pub mod state;

pub use observer::ContainerObserver;
pub use policy::TrackingPolicy;
pub use query::{get_all_frames, get_frame, FrameDetails, FrameInfo};
pub use registry::Registry;
pub use router::{CrossContainerRouter, PendingTarget, RetargetingDetails};
pub use state::{FrameNavigationState, FrameRecord};
