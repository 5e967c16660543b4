//! Closed status enums with explicit transition tables.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot move from '{from}' to '{to}'")]
pub struct TransitionError {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status '{0}'")]
pub struct UnknownStatus(pub String);

pub trait StatusMachine: Copy + Eq + fmt::Display + Sized + 'static {
    /// Statuses reachable in one step. Self-transitions are never listed.
    fn allowed_next(&self) -> &'static [Self];

    fn can_transition_to(&self, next: Self) -> bool {
        self.allowed_next().contains(&next)
    }

    fn is_terminal(&self) -> bool {
        self.allowed_next().is_empty()
    }

    fn transition(self, next: Self) -> Result<Self, TransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }
}
