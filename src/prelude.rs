//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use adventure_core::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};

// Driver and context
pub use crate::core::globals::{GlobalContext, GlobalVar, GlobalVars, MouseStatus};
pub use crate::core::{GameServices, PointerSample, TickDriver};

// Errors
pub use crate::core::error::{CoreError, CoreResult};

// Collaborators
pub use crate::core::collaborators::{
    DisplayLayer, SceneLogic, ScriptDispatcher, ScriptEnv, SpriteSource, TopMenu,
};

// Objects and events
pub use crate::core::events::{GlobalEventQueue, ScriptControl};
pub use crate::core::object::{
    InteractiveObject, LogicMode, MouseBox, ObjectId, ObjectRegistry, ObjectTable, ScriptId,
};

// Pointer
pub use crate::core::pointer::{
    CandidateList, PointerConfig, PointerEngine, PointerFlags, PointerSprite, SpriteId,
};
