//! # Events — Structured Progress Reporting for Benchmark Runs
//!
//! The engine and algorithms report progress through an injected
//! [`ProgressObserver`] rather than printing — the core has no process-wide
//! output side channel. Observers are threaded through call sites as
//! `Option<&dyn ProgressObserver>`; `None` means no reporting.
//!
//! | Variant | Emitted When |
//! |---------|-------------|
//! | `TrialStarted` | The engine begins timing one factorization trial |
//! | `TrialFinished` | The trial completed (success or failure) |
//! | `AttemptStarted` | The period-finding loop begins one attempt |
//! | `AttemptFinished` | The attempt ended (factors found or retrying) |
//!
//! [`EventLog`] is a bounded in-memory observer for tests and embedders that
//! want to inspect the event stream after a run.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;

/// Events emitted during a benchmark run.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BenchmarkEvent {
    TrialStarted {
        trial: u32,
        n: u64,
    },
    TrialFinished {
        trial: u32,
        n: u64,
        success: bool,
        elapsed: Duration,
    },
    AttemptStarted {
        n: u64,
        attempt: u32,
        max_attempts: u32,
    },
    AttemptFinished {
        n: u64,
        attempt: u32,
        factors_found: bool,
    },
}

/// Callback invoked at well-defined points of a benchmark run.
///
/// Implementations must be cheap and must not panic; the engine calls them
/// outside the timed region so observation cost never enters the statistics.
pub trait ProgressObserver {
    fn observe(&self, event: &BenchmarkEvent);
}

/// Maximum events retained by an [`EventLog`] before the oldest are dropped.
const EVENT_LOG_CAP: usize = 1024;

/// Bounded in-memory observer. Keeps the most recent [`EVENT_LOG_CAP`] events.
#[derive(Default)]
pub struct EventLog {
    events: Mutex<VecDeque<BenchmarkEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog {
            events: Mutex::new(VecDeque::with_capacity(EVENT_LOG_CAP)),
        }
    }

    /// Snapshot of the retained events, oldest first.
    pub fn events(&self) -> Vec<BenchmarkEvent> {
        self.events.lock().unwrap().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }
}

impl ProgressObserver for EventLog {
    fn observe(&self, event: &BenchmarkEvent) {
        let mut events = self.events.lock().unwrap();
        if events.len() == EVENT_LOG_CAP {
            events.pop_front();
        }
        events.push_back(event.clone());
    }
}
