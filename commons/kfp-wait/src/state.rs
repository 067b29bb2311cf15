use crate::{ClientError, WaitError, WaitSpec};

/// Result of a single status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The resource is gone (`phase == None`) or reached a target phase.
    Terminated { phase: Option<String> },
    Pending(String),
    Failed(WaitError),
}

impl PollOutcome {
    /// Classify what one `get` returned. `observed` is the reported phase when
    /// the resource still exists.
    pub fn classify(
        spec: &WaitSpec,
        id: &str,
        observed: Result<String, ClientError>,
    ) -> Self {
        match observed {
            Err(e) if e.is_not_found() => PollOutcome::Terminated { phase: None },
            Err(e) => PollOutcome::Failed(WaitError::GetFailed {
                id: id.to_string(),
                source: e,
            }),
            Ok(phase) if spec.is_target(&phase) => {
                PollOutcome::Terminated { phase: Some(phase) }
            }
            Ok(phase) if spec.is_pending(&phase) => PollOutcome::Pending(phase),
            Ok(phase) => PollOutcome::Failed(WaitError::UnexpectedPhase {
                id: id.to_string(),
                phase,
            }),
        }
    }
}

/// Position of a deletion wait. `Terminated` and `Failed` are absorbing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitState {
    Pending { last_phase: Option<String> },
    Terminated { phase: Option<String> },
    Failed(WaitError),
}

impl Default for WaitState {
    fn default() -> Self {
        WaitState::Pending { last_phase: None }
    }
}

impl WaitState {
    pub fn step(
        self,
        spec: &WaitSpec,
        id: &str,
        observed: Result<String, ClientError>,
    ) -> Self {
        if self.is_terminal() {
            return self;
        }
        match PollOutcome::classify(spec, id, observed) {
            PollOutcome::Terminated { phase } => WaitState::Terminated { phase },
            PollOutcome::Pending(phase) => WaitState::Pending {
                last_phase: Some(phase),
            },
            PollOutcome::Failed(e) => WaitState::Failed(e),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, WaitState::Pending { .. })
    }

    pub fn last_phase(&self) -> Option<&str> {
        match self {
            WaitState::Pending { last_phase } => last_phase.as_deref(),
            WaitState::Terminated { phase } => phase.as_deref(),
            WaitState::Failed(WaitError::UnexpectedPhase { phase, .. }) => {
                Some(phase)
            }
            WaitState::Failed(_) => None,
        }
    }
}
