use std::collections::HashSet;
use std::time::Duration;

/// Configuration for one wait cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitSpec {
    /// Phases that end the wait successfully. Absence of the resource always
    /// counts as success, so this may be empty.
    pub target_phases: HashSet<String>,
    /// Phases that mean "still going", keep polling.
    pub pending_phases: HashSet<String>,
    /// Maximum wall-clock time spent waiting.
    pub timeout: Duration,
    /// Fixed delay between two polls.
    pub poll_interval: Duration,
}

impl Default for WaitSpec {
    fn default() -> Self {
        Self {
            target_phases: HashSet::new(),
            pending_phases: HashSet::new(),
            timeout: Duration::from_secs(300),
            poll_interval: Duration::from_secs(2),
        }
    }
}

impl WaitSpec {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Default::default()
        }
    }

    pub fn pending<I, S>(mut self, phases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pending_phases.extend(phases.into_iter().map(Into::into));
        self
    }

    pub fn target<I, S>(mut self, phases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_phases.extend(phases.into_iter().map(Into::into));
        self
    }

    pub fn poll_every(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn is_target(&self, phase: &str) -> bool {
        self.target_phases.contains(phase)
    }

    pub fn is_pending(&self, phase: &str) -> bool {
        self.pending_phases.contains(phase)
    }
}
