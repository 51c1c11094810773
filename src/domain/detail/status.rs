//! Detail dialog lifecycle.

use crate::domain::foundation::StateMachine;

/// `Idle -> Resolving -> Resolved | Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailStatus {
    #[default]
    Idle,
    Resolving,
    Resolved,
    Failed,
}

impl StateMachine for DetailStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DetailStatus::*;
        matches!(
            (self, target),
            (Idle, Resolving) | (Idle, Failed) | (Resolving, Resolved) | (Resolving, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DetailStatus::*;
        match self {
            Idle => vec![Resolving, Failed],
            Resolving => vec![Resolved, Failed],
            Resolved => vec![],
            Failed => vec![],
        }
    }
}
