//! Identity and classification types shared across the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::arena::{ArenaKey, RawHandle};
use crate::error::HandleParseError;

macro_rules! handle_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(RawHandle);

        impl $name {
            pub const fn new(slot: u32, generation: u32) -> Self {
                Self(RawHandle::new(slot, generation))
            }

            pub fn slot(self) -> u32 {
                self.0.slot
            }

            pub fn generation(self) -> u32 {
                self.0.generation
            }
        }

        impl ArenaKey for $name {
            fn from_raw(raw: RawHandle) -> Self {
                Self(raw)
            }

            fn raw(self) -> RawHandle {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}:{}", self.0.slot, self.0.generation)
            }
        }

        impl FromStr for $name {
            type Err = HandleParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let (slot, generation) = s
                    .split_once(':')
                    .ok_or_else(|| HandleParseError(s.to_string()))?;
                let slot = slot.trim().parse().map_err(|_| HandleParseError(s.to_string()))?;
                let generation = generation
                    .trim()
                    .parse()
                    .map_err(|_| HandleParseError(s.to_string()))?;
                Ok(Self::new(slot, generation))
            }
        }

        impl TryFrom<String> for $name {
            type Error = HandleParseError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.to_string()
            }
        }
    };
}

handle_type!(
    /// Identity of a tracked content container (tab or window contents).
    ContainerId
);

handle_type!(
    /// Identity of one frame instance within a container.
    FrameHandle
);

/// Renderer process that owns a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(pub u32);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Browsing scope (profile) an engine instance serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeId {
    pub profile: u32,
    #[serde(default)]
    pub off_the_record: bool,
}

impl ScopeId {
    pub const fn new(profile: u32) -> Self {
        Self {
            profile,
            off_the_record: false,
        }
    }

    /// The regular scope an off-the-record scope was derived from.
    pub fn original(self) -> Self {
        Self::new(self.profile)
    }
}

impl Default for ScopeId {
    fn default() -> Self {
        Self::new(0)
    }
}

/// What kind of view a container hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    TabContents,
    AppWindow,
    Panel,
    BackgroundContents,
    Prerender,
    ExtensionBackgroundPage,
    ExtensionDialog,
    ExtensionGuest,
    ExtensionPopup,
}

impl ViewKind {
    /// Internal views never get an observer; their signals are dropped at the
    /// registry boundary.
    pub fn is_internal(self) -> bool {
        matches!(
            self,
            ViewKind::ExtensionBackgroundPage
                | ViewKind::ExtensionDialog
                | ViewKind::ExtensionGuest
                | ViewKind::ExtensionPopup
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::TabContents => "tab_contents",
            ViewKind::AppWindow => "app_window",
            ViewKind::Panel => "panel",
            ViewKind::BackgroundContents => "background_contents",
            ViewKind::Prerender => "prerender",
            ViewKind::ExtensionBackgroundPage => "extension_background_page",
            ViewKind::ExtensionDialog => "extension_dialog",
            ViewKind::ExtensionGuest => "extension_guest",
            ViewKind::ExtensionPopup => "extension_popup",
        }
    }
}

/// Where the host decided to open a requested URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowDisposition {
    Unknown,
    CurrentTab,
    SingletonTab,
    NewForegroundTab,
    NewBackgroundTab,
    NewPopup,
    NewWindow,
    SaveToDisk,
    OffTheRecord,
    IgnoreAction,
}

impl WindowDisposition {
    /// Dispositions that end up creating a new container.
    pub fn opens_new_container(self) -> bool {
        matches!(
            self,
            WindowDisposition::SingletonTab
                | WindowDisposition::NewForegroundTab
                | WindowDisposition::NewBackgroundTab
                | WindowDisposition::NewPopup
                | WindowDisposition::NewWindow
                | WindowDisposition::OffTheRecord
        )
    }
}

/// Resource type of a request that was redirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    MainFrame,
    SubFrame,
    Stylesheet,
    Script,
    Image,
    FontResource,
    Media,
    Xhr,
    Ping,
    Other,
}

impl ResourceType {
    pub fn is_frame(self) -> bool {
        matches!(self, ResourceType::MainFrame | ResourceType::SubFrame)
    }
}

/// Description of a frame host as announced by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameHost {
    pub frame: FrameHandle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<FrameHandle>,
    pub process_id: ProcessId,
}

impl FrameHost {
    pub fn main(frame: FrameHandle, process_id: ProcessId) -> Self {
        Self {
            frame,
            parent: None,
            process_id,
        }
    }

    pub fn child(frame: FrameHandle, parent: FrameHandle, process_id: ProcessId) -> Self {
        Self {
            frame,
            parent: Some(parent),
            process_id,
        }
    }
}
