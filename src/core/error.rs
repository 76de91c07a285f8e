//=========================================================================
// Core Errors
//=========================================================================
//
// Failure conditions of the tick-synchronous core.
//
// Only two families exist: a fixed-capacity pool or list is full, or an
// object's script call stack has no free frame. Everything else the core
// does is total over its documented domain.
//
//=========================================================================

//=== Capacity ============================================================

/// Identifies which fixed-capacity store rejected an insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    /// The global delayed-event pool.
    EventPool,

    /// The per-tick pointer candidate list.
    CandidateList,
}

impl std::fmt::Display for Capacity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventPool => write!(f, "event pool"),
            Self::CandidateList => write!(f, "candidate list"),
        }
    }
}

//=== CoreError ===========================================================

/// Errors raised by the event queue and pointer engine.
///
/// Both variants indicate a sizing problem in game data rather than a
/// condition to retry. The tick driver propagates them so the runner can
/// log and abort deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A fixed-capacity store had no free entry.
    CapacityExceeded { resource: Capacity, capacity: usize },

    /// An object's script call stack is already at its deepest level.
    StackOverflow { capacity: usize },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityExceeded { resource, capacity } => {
                write!(f, "{} capacity exceeded ({} entries)", resource, capacity)
            }
            Self::StackOverflow { capacity } => {
                write!(f, "script stack overflow ({} levels)", capacity)
            }
        }
    }
}

impl std::error::Error for CoreError {}

/// Convenience alias used throughout the core.
pub type CoreResult<T> = Result<T, CoreError>;

//=========================================================================
// Unit Tests
//=========================================================================
