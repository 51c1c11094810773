//! State machine trait for lifecycle status enums.
//!
//! Used by view-level lifecycles such as the detail dialog
//! (`Idle -> Resolving -> Resolved | Failed`).

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors list their legal transitions; `transition_to` and
/// `is_terminal` come for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for DetailStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Idle, Resolving) | (Resolving, Resolved))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Idle => vec![Resolving],
///             Resolving => vec![Resolved],
///             Resolved => vec![],
///         }
///     }
/// }
///
/// let next = DetailStatus::Idle.transition_to(DetailStatus::Resolving)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Request {
        Pending,
        InFlight,
        Done,
    }

    impl StateMachine for Request {
        fn can_transition_to(&self, target: &Self) -> bool {
            use Request::*;
            matches!((self, target), (Pending, InFlight) | (InFlight, Done))
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use Request::*;
            match self {
                Pending => vec![InFlight],
                InFlight => vec![Done],
                Done => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(
            Request::Pending.transition_to(Request::InFlight),
            Ok(Request::InFlight)
        );
    }

    #[test]
    fn transition_to_fails_when_skipping_a_state() {
        let result = Request::Pending.transition_to(Request::Done);
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn only_done_is_terminal() {
        assert!(Request::Done.is_terminal());
        assert!(!Request::Pending.is_terminal());
        assert!(!Request::InFlight.is_terminal());
    }
}
