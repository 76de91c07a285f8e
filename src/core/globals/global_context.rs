//=========================================================================
// Global Context
//=========================================================================
//
// Borrowed view of everything a pointer-engine call may touch.
//
// Contains:
// - vars / events: shared script state
// - registry: object lookup
// - scripts, menu, display, sprites: external collaborators
//
// Built fresh for each call by the tick driver (or by a test harness), so
// no component holds on to shared state between ticks.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::GlobalVars;
use crate::core::collaborators::{
    DisplayLayer, ScriptDispatcher, ScriptEnv, SpriteSource, TopMenu,
};
use crate::core::events::GlobalEventQueue;
use crate::core::object::{ObjectId, ObjectRegistry, ScriptId};

//=== GlobalContext =======================================================

/// Explicit context threaded through pointer-engine operations.
pub struct GlobalContext<'a> {
    pub vars: &'a mut GlobalVars,
    pub events: &'a mut GlobalEventQueue,
    pub registry: &'a mut dyn ObjectRegistry,
    pub scripts: &'a mut dyn ScriptDispatcher,
    pub menu: &'a mut dyn TopMenu,
    pub display: &'a mut dyn DisplayLayer,
    pub sprites: &'a dyn SpriteSource,
}

impl GlobalContext<'_> {
    /// Dispatches `script`, bound to `object` when one is given.
    ///
    /// An object id the registry no longer knows is logged and the script
    /// is skipped.
    pub fn run_script(&mut self, object: Option<ObjectId>, script: ScriptId) {
        let target = match object {
            Some(id) => match self.registry.fetch_object(id) {
                Some(target) => Some(target),
                None => {
                    warn!("Script {} targets unknown object {}", script, id);
                    return;
                }
            },
            None => None,
        };

        trace!("Dispatching script {} (object: {:?})", script, object);

        let mut env = ScriptEnv {
            vars: &mut *self.vars,
            events: &mut *self.events,
        };
        self.scripts.run_script(&mut env, target, script);
    }
}
