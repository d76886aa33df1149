// One-shot diagnostics
//
// Unknown locations and degenerate projection inputs surface once per
// distinct key, then go quiet; a single missing data point must not spam the
// log on every update tick.

use std::collections::HashSet;

use parking_lot::Mutex;
use tracing::{debug, warn};

/// Alert severity, mapped onto the tracing levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Warn,
}

/// Deduplicated alert sink
#[derive(Debug, Default)]
pub struct AlertFlags {
    seen: Mutex<HashSet<String>>,
}

impl AlertFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit an alert once per key; repeats are swallowed.
    ///
    /// Returns whether the alert actually fired.
    pub fn report_once(&self, key: &str, severity: Severity, message: &str) -> bool {
        let mut seen = self.seen.lock();
        if !seen.insert(key.to_string()) {
            return false;
        }

        match severity {
            Severity::Debug => debug!("{}", message),
            Severity::Warn => warn!("{}", message),
        }
        true
    }

    /// Forget all raised alerts (e.g. after a data reload)
    pub fn clear(&self) {
        self.seen.lock().clear();
    }

    /// Number of distinct alerts raised so far
    pub fn raised_count(&self) -> usize {
        self.seen.lock().len()
    }
}
