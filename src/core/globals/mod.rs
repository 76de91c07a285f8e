//=========================================================================
// Global Engine State
//=========================================================================
//
// Shared data read and written by both the event queue and the pointer
// engine.
//
// Architecture:
//   GlobalVars:    by-index script variable table (owned by the driver)
//   GlobalContext: per-call borrow of vars + collaborators
//
//=========================================================================

//=== Module Declarations =================================================

mod global_context;
mod global_vars;

//=== Public API ==========================================================

pub use global_context::GlobalContext;
pub use global_vars::{GlobalVar, GlobalVars, MouseStatus, GLOBAL_VAR_COUNT};
