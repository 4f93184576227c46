use std::fmt::Display;

/// Error returned when a status change is not permitted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} cannot move from {from} to {to}")]
pub struct TransitionError {
    pub entity: &'static str,
    pub from: String,
    pub to: String,
}

/// A status enum with a fixed set of allowed moves
pub trait Lifecycle: Copy + PartialEq + Display {
    /// Name used in error messages
    const ENTITY: &'static str;

    /// Whether `self -> next` is an allowed move
    fn allows(self, next: Self) -> bool;

    fn is_terminal(self) -> bool;

    /// Performs the move, or explains why it is not allowed
    fn transition(self, next: Self) -> Result<Self, TransitionError> {
        if self.allows(next) {
            Ok(next)
        } else {
            Err(TransitionError {
                entity: Self::ENTITY,
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }

    /// Like `transition`, but staying put is always allowed
    fn transition_or_stay(self, next: Self) -> Result<Self, TransitionError> {
        if self == next {
            Ok(self)
        } else {
            self.transition(next)
        }
    }
}
