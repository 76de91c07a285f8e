//=========================================================================
// Collaborator Contracts
//=========================================================================
//
// Traits implemented by the game around the core.
//
// The core schedules and decides; these collaborators execute. A script
// interpreter runs scripts, a menu overlay owns the top band, a display
// layer shows the cursor, a resource layer supplies pointer sprites, and
// scene logic fills the candidate list every tick.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::CoreResult;
use crate::core::events::GlobalEventQueue;
use crate::core::globals::GlobalVars;
use crate::core::object::{InteractiveObject, ObjectRegistry, ScriptId};
use crate::core::pointer::{CandidateList, PointerSprite, SpriteId};

//=== ScriptEnv ===========================================================

/// State a running script may touch besides its own object.
pub struct ScriptEnv<'a> {
    pub vars: &'a mut GlobalVars,
    pub events: &'a mut GlobalEventQueue,
}

//=== ScriptDispatcher ====================================================

/// Runs a script to completion (or until it asks to pause).
///
/// Dispatch is synchronous: the core waits for `run_script` to return.
/// `object` is `None` for scripts that are not bound to an object, such as
/// leave scripts and menu scripts.
pub trait ScriptDispatcher {
    fn run_script(
        &mut self,
        env: &mut ScriptEnv<'_>,
        object: Option<&mut InteractiveObject>,
        script: ScriptId,
    );
}

//=== TopMenu =============================================================

/// Persistent overlay occupying the top band of the screen.
pub trait TopMenu {
    /// Cursor entered the band.
    fn start_menu(&mut self, vars: &mut GlobalVars);

    /// Called every tick while the cursor stays in the band.
    fn check_menu(&mut self, vars: &mut GlobalVars);

    /// Cursor left the band, or the band was disabled.
    fn end_menu(&mut self, vars: &mut GlobalVars);

    /// Script of the menu entry under the cursor, run on a click.
    fn click_script(&self, _vars: &GlobalVars) -> Option<ScriptId> {
        None
    }
}

//=== DisplayLayer ========================================================

/// Hardware or software cursor output.
pub trait DisplayLayer {
    fn set_cursor_image(
        &mut self,
        pixels: &[u8],
        width: u16,
        height: u16,
        hotspot_x: u16,
        hotspot_y: u16,
        transparent: u8,
    );

    fn set_cursor_visible(&mut self, visible: bool);
}

//=== SpriteSource ========================================================

/// Decoded pointer sprites by resource id.
pub trait SpriteSource {
    fn fetch_sprite(&self, id: SpriteId) -> Option<&PointerSprite>;
}

//=== SceneLogic ==========================================================

/// Fills the pointer candidate list before the pointer engine runs.
pub trait SceneLogic {
    /// # Errors
    ///
    /// Implementations forward [`CandidateList::add`] failures.
    fn populate_candidates(
        &mut self,
        registry: &mut dyn ObjectRegistry,
        candidates: &mut CandidateList,
    ) -> CoreResult<()>;
}
