//! Shared test utilities for integration tests
//!
//! An engine wired to an ingestor with an in-memory log, signal builders, and
//! isolated XDG/HOME directories for configuration tests.

use navtrack::dispatch::{EventBus, EventIngestor, EventLog};
use navtrack::transition::{NetError, PageTransition};
use navtrack::types::{ContainerId, FrameHandle, FrameHost, ProcessId, ViewKind};
use navtrack::{EngineConfig, EventEnvelope, NavigationEngine, Signal};
use std::sync::Mutex;
use tempfile::TempDir;
use url::Url;

pub const TAB: ContainerId = ContainerId::new(0, 1);
pub const MAIN: FrameHandle = FrameHandle::new(0, 1);
pub const CHILD: FrameHandle = FrameHandle::new(1, 1);

pub fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

/// Engine plus ingestor; every applied signal is ingested immediately.
pub struct Harness {
    pub engine: NavigationEngine,
    ingestor: EventIngestor,
    log: EventLog,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        let (bus, receiver) = EventBus::new_pair();
        let mut ingestor = EventIngestor::new(receiver);
        let log = EventLog::new();
        ingestor.subscribe(log.clone());
        Self {
            engine: NavigationEngine::new(config, bus),
            ingestor,
            log,
        }
    }

    /// Harness with `TAB` already tracked, main frame `MAIN` in process 1.
    pub fn with_tab() -> Self {
        let mut harness = Self::new();
        harness.open(TAB, MAIN);
        harness
    }

    pub fn open(&mut self, container: ContainerId, main_frame: FrameHandle) {
        self.engine.container_created(
            container,
            FrameHost::main(main_frame, ProcessId(1)),
            ViewKind::TabContents,
        );
    }

    pub fn apply(&mut self, signal: Signal) {
        self.engine.handle(signal);
        self.ingestor.ingest_pending();
    }

    pub fn apply_all(&mut self, signals: Vec<Signal>) {
        for signal in signals {
            self.apply(signal);
        }
    }

    /// Events ingested since the last call.
    pub fn take(&mut self) -> Vec<EventEnvelope> {
        self.ingestor.ingest_pending();
        let events = self.log.events();
        self.log.clear();
        events
    }

    /// Event names ingested since the last call.
    pub fn take_names(&mut self) -> Vec<&'static str> {
        self.take().iter().map(|e| e.event.name()).collect()
    }
}

pub fn started(container: ContainerId, frame: FrameHandle, to: &str) -> Signal {
    Signal::NavigationStarted {
        container,
        frame,
        url: url(to),
        is_error_page: false,
        is_iframe_srcdoc: false,
    }
}

pub fn committed(container: ContainerId, frame: FrameHandle, to: &str) -> Signal {
    Signal::NavigationCommitted {
        container,
        frame,
        url: url(to),
        transition: PageTransition::default(),
    }
}

pub fn parsed(container: ContainerId, frame: FrameHandle) -> Signal {
    Signal::DocumentParsed { container, frame }
}

pub fn finished(container: ContainerId, frame: FrameHandle, at: &str) -> Signal {
    Signal::LoadFinished {
        container,
        frame,
        url: url(at),
    }
}

pub fn failed(container: ContainerId, frame: FrameHandle, at: &str, error: NetError) -> Signal {
    Signal::LoadFailed {
        container,
        frame,
        url: url(at),
        error,
    }
}

pub fn child_created(container: ContainerId, frame: FrameHandle, parent: FrameHandle) -> Signal {
    Signal::FrameHostCreated {
        container,
        frame,
        parent: Some(parent),
        process_id: ProcessId(2),
    }
}

/// Global mutex to serialize HOME/XDG environment variable access across tests
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
        }
    }

    fn restore(self) {
        match self.home {
            Some(orig) => std::env::set_var("HOME", orig),
            None => std::env::remove_var("HOME"),
        }
        match self.xdg_config_home {
            Some(orig) => std::env::set_var("XDG_CONFIG_HOME", orig),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}

/// Run `f` with HOME at `<test_dir>/home` and XDG_CONFIG_HOME at
/// `<test_dir>/xdg`, restoring the environment afterwards.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    let test_config_home = test_dir.path().join("xdg");
    std::fs::create_dir_all(&test_home).unwrap();
    std::fs::create_dir_all(&test_config_home).unwrap();
    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", &test_config_home);

    let result = f();

    env_state.restore();
    result
}
