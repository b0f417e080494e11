//! Page transition metadata and network error codes carried by events.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Core transition type of a committed navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionType {
    Link,
    Typed,
    AutoBookmark,
    AutoSubframe,
    ManualSubframe,
    Generated,
    StartPage,
    FormSubmit,
    Reload,
    Keyword,
    KeywordGenerated,
}

/// Qualifier flags attached to a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionQualifier {
    ClientRedirect,
    ServerRedirect,
    ForwardBack,
    FromAddressBar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTransition {
    pub core: TransitionType,
    #[serde(default)]
    pub qualifiers: Vec<TransitionQualifier>,
}

impl PageTransition {
    pub fn new(core: TransitionType) -> Self {
        Self {
            core,
            qualifiers: Vec::new(),
        }
    }

    pub fn has(&self, qualifier: TransitionQualifier) -> bool {
        self.qualifiers.contains(&qualifier)
    }

    /// Add `qualifier` unless already present.
    pub fn with_qualifier(mut self, qualifier: TransitionQualifier) -> Self {
        if !self.has(qualifier) {
            self.qualifiers.push(qualifier);
        }
        self
    }
}

impl Default for PageTransition {
    fn default() -> Self {
        Self::new(TransitionType::Link)
    }
}

/// Numeric network error code as reported by the loading layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetError(pub i32);

impl NetError {
    pub const FAILED: NetError = NetError(-2);
    pub const ABORTED: NetError = NetError(-3);
    pub const TIMED_OUT: NetError = NetError(-7);
    pub const ACCESS_DENIED: NetError = NetError(-10);
    pub const BLOCKED_BY_CLIENT: NetError = NetError(-20);
    pub const CONNECTION_REFUSED: NetError = NetError(-102);
    pub const CONNECTION_RESET: NetError = NetError(-101);
    pub const NAME_NOT_RESOLVED: NetError = NetError(-105);
    pub const INTERNET_DISCONNECTED: NetError = NetError(-106);
    pub const CERT_INVALID: NetError = NetError(-207);
    pub const INVALID_URL: NetError = NetError(-300);
    pub const TOO_MANY_REDIRECTS: NetError = NetError(-310);

    fn symbol(self) -> Option<&'static str> {
        let name = match self {
            NetError::FAILED => "FAILED",
            NetError::ABORTED => "ABORTED",
            NetError::TIMED_OUT => "TIMED_OUT",
            NetError::ACCESS_DENIED => "ACCESS_DENIED",
            NetError::BLOCKED_BY_CLIENT => "BLOCKED_BY_CLIENT",
            NetError::CONNECTION_REFUSED => "CONNECTION_REFUSED",
            NetError::CONNECTION_RESET => "CONNECTION_RESET",
            NetError::NAME_NOT_RESOLVED => "NAME_NOT_RESOLVED",
            NetError::INTERNET_DISCONNECTED => "INTERNET_DISCONNECTED",
            NetError::CERT_INVALID => "CERT_INVALID",
            NetError::INVALID_URL => "INVALID_URL",
            NetError::TOO_MANY_REDIRECTS => "TOO_MANY_REDIRECTS",
            _ => return None,
        };
        Some(name)
    }
}

/// Renders as `net::ERR_<NAME>`; unknown codes fall back to the number.
impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(name) => write!(f, "net::ERR_{}", name),
            None => write!(f, "net::ERR_{}", self.0),
        }
    }
}
