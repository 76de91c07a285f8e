//=========================================================================
// Pointer Interaction Engine
//=========================================================================
//
// Per-tick pointer pipeline: debounce, menu band, hit test, dispatch.
//
// Architecture:
// ```text
//   raw edges ─► InputDebounce ─► gate (MouseStatus::ENABLED)
//                                     │
//            menu band enter/check/leave (TopMenu)
//                                     │
//            screen → world (scroll offsets + bias) → GlobalVars
//                                     │
//            CandidateList::hit_test ─► leave / enter scripts
//                                     │
//            down edges ─► menu click script, object click script
//                                     │
//            candidate list cleared
// ```
//
// The engine also owns the composed cursor sprite: pointer and carried
// item ids, the current animation frame, and the mouse status commands
// (enable/disable/lock/unlock) that decide whether it is shown.
//
//=========================================================================

//=== Submodules ==========================================================

mod candidates;
mod config;
mod debounce;
mod sprite;

//=== Public API ==========================================================

pub use candidates::{Candidate, CandidateList, MAX_CANDIDATES, PRIORITY_LEVELS};
pub use config::PointerConfig;
pub use debounce::{InputDebounce, PointerFlags};
pub use sprite::{PointerSprite, SpriteId, TRANSPARENT_INDEX};

//=== External Dependencies ===============================================

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::CoreResult;
use crate::core::globals::{GlobalContext, GlobalVar, GlobalVars, MouseStatus};
use crate::core::object::{InteractiveObject, ObjectId, ScriptId};

//=== SavedPointer ========================================================

/// Cursor state stashed while the control panel overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SavedPointer {
    pointer: Option<SpriteId>,
    carried: Option<SpriteId>,
}

//=== PointerEngine =======================================================

/// Debounced pointer input, priority hit-testing, and cursor management.
pub struct PointerEngine {
    config: PointerConfig,
    debounce: InputDebounce,
    candidates: CandidateList,

    //--- Pointer State ----------------------------------------------------
    position: (u16, u16),
    in_top_menu: bool,
    leave_script: Option<ScriptId>,

    //--- Cursor Image -----------------------------------------------------
    pointer_id: Option<SpriteId>,
    carried_id: Option<SpriteId>,
    current: Option<PointerSprite>,
    frame: usize,
    active_frame: Option<usize>,
    override_active: bool,
    saved: Option<SavedPointer>,
}

impl PointerEngine {
    //--- Construction -----------------------------------------------------

    pub fn new(config: PointerConfig) -> Self {
        Self {
            config,
            debounce: InputDebounce::new(),
            candidates: CandidateList::new(),
            position: (0, 0),
            in_top_menu: false,
            leave_script: None,
            pointer_id: None,
            carried_id: None,
            current: None,
            frame: 0,
            active_frame: None,
            override_active: false,
            saved: None,
        }
    }

    pub fn config(&self) -> &PointerConfig {
        &self.config
    }

    //--- Candidate Registration -------------------------------------------

    /// Registers an interaction candidate for the next [`engine`](Self::engine) call.
    ///
    /// # Errors
    ///
    /// Rejects the entry once [`MAX_CANDIDATES`] are queued this tick.
    pub fn add_to_list(&mut self, id: ObjectId, object: &InteractiveObject) -> CoreResult<()> {
        self.candidates.add(id, object)
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    pub fn candidates_mut(&mut self) -> &mut CandidateList {
        &mut self.candidates
    }

    //--- Per-Tick Pipeline ------------------------------------------------

    /// Runs one tick of pointer interaction at screen position `(x, y)`.
    ///
    /// The candidate list is always empty afterwards; scene logic must
    /// repopulate it before the next call.
    pub fn engine(&mut self, ctx: &mut GlobalContext<'_>, x: u16, y: u16, raw: PointerFlags) {
        //--- 1. Debounce ---------------------------------------------------
        let state = self.debounce.update(raw);
        self.position = (x, y);

        //--- 2. Gate on human interaction --------------------------------
        if !ctx.vars.mouse_status().is_enabled() {
            self.candidates.clear();
            return;
        }

        //--- 3. Menu band ---------------------------------------------------
        self.update_menu_band(ctx, y);

        //--- 4. World coordinates -----------------------------------------
        let (world_x, world_y) = self.world_position(ctx.vars, x, y);
        ctx.vars.set(GlobalVar::MouseX, world_x);
        ctx.vars.set(GlobalVar::MouseY, world_y);

        //--- 5/6. Hit test and enter/leave ---------------------------------
        if self.in_top_menu {
            ctx.vars.set_special_item(None);
        } else {
            let touched = self.candidates.hit_test(world_x, world_y);
            self.update_highlight(ctx, touched);
        }

        //--- 7. Clicks -------------------------------------------------------
        if state.has_down() {
            self.dispatch_click(ctx, state);
        }

        //--- 8. Reset --------------------------------------------------------
        self.candidates.clear();
    }

    /// Advances the cursor animation by one frame.
    ///
    /// Runs only while interaction is enabled and unlocked, or while the
    /// control panel override is active. The display is updated only when
    /// the frame actually changes.
    pub fn animate(&mut self, ctx: &mut GlobalContext<'_>) {
        if ctx.vars.mouse_status() != MouseStatus::ENABLED && !self.override_active {
            return;
        }

        let Some(sprite) = &self.current else {
            return;
        };
        if sprite.frames == 0 {
            return;
        }

        self.frame = (self.frame + 1) % sprite.frames as usize;
        if self.active_frame == Some(self.frame) {
            return;
        }

        ctx.display.set_cursor_image(
            sprite.frame(self.frame),
            sprite.width,
            sprite.height,
            sprite.hotspot_x,
            sprite.hotspot_y,
            TRANSPARENT_INDEX,
        );
        self.active_frame = Some(self.frame);
    }

    //--- Cursor Image -----------------------------------------------------

    /// Switches the pointer sprite; `None` hides the cursor.
    pub fn set_pointer(&mut self, ctx: &mut GlobalContext<'_>, sprite: Option<SpriteId>) {
        self.pointer_id = sprite;
        self.frame = 0;
        self.rebuild(ctx);

        let enabled = ctx.vars.mouse_status().is_enabled();
        if sprite.is_none() || (!enabled && !self.override_active) {
            ctx.display.set_cursor_visible(false);
        } else {
            self.animate(ctx);
            ctx.display.set_cursor_visible(true);
        }
    }

    /// Switches the carried-object sprite; shown from the next animation step.
    pub fn set_carried_object(&mut self, ctx: &mut GlobalContext<'_>, sprite: Option<SpriteId>) {
        self.carried_id = sprite;
        self.rebuild(ctx);
    }

    /// Hides the pointer.
    pub fn blank(&mut self, ctx: &mut GlobalContext<'_>) {
        self.set_pointer(ctx, None);
    }

    /// Restores the default pointer.
    pub fn normal(&mut self, ctx: &mut GlobalContext<'_>) {
        self.set_pointer(ctx, self.config.default_pointer);
    }

    //--- Mouse Status -----------------------------------------------------

    /// Hands control to the player. Ignored while locked.
    pub fn enable(&mut self, ctx: &mut GlobalContext<'_>) {
        if ctx.vars.mouse_status().is_locked() {
            debug!("Enable ignored, mouse is locked");
            return;
        }

        ctx.vars.set_mouse_status(MouseStatus::ENABLED);
        ctx.vars.set_special_item(None);
        self.leave_script = self.config.standard_leave_script;
        self.set_pointer(ctx, self.config.default_pointer);
    }

    /// Takes control from the player. Ignored while locked.
    pub fn disable(&mut self, ctx: &mut GlobalContext<'_>) {
        if ctx.vars.mouse_status().is_locked() {
            debug!("Disable ignored, mouse is locked");
            return;
        }

        ctx.vars.set_mouse_status(MouseStatus::empty());
        self.set_carried_object(ctx, None);
        self.set_pointer(ctx, None);
    }

    pub fn lock(&mut self, vars: &mut GlobalVars) {
        vars.set_mouse_status(vars.mouse_status() | MouseStatus::LOCKED);
    }

    pub fn unlock(&mut self, vars: &mut GlobalVars) {
        vars.set_mouse_status(vars.mouse_status() & MouseStatus::ENABLED);
    }

    //--- Control Panel Override -------------------------------------------

    /// Forces the default pointer regardless of mouse status.
    pub fn enter_control_panel(&mut self, ctx: &mut GlobalContext<'_>) {
        if self.saved.is_none() {
            self.saved = Some(SavedPointer {
                pointer: self.pointer_id,
                carried: self.carried_id,
            });
        }

        self.override_active = true;
        self.set_carried_object(ctx, None);
        self.set_pointer(ctx, self.config.default_pointer);
    }

    /// Restores the cursor saved by [`enter_control_panel`](Self::enter_control_panel).
    pub fn leave_control_panel(&mut self, ctx: &mut GlobalContext<'_>) {
        self.override_active = false;

        let saved = self.saved.take().unwrap_or(SavedPointer {
            pointer: self.pointer_id,
            carried: self.carried_id,
        });
        self.set_carried_object(ctx, saved.carried);
        self.set_pointer(ctx, saved.pointer);
    }

    //--- Queries ----------------------------------------------------------

    /// Last screen position passed to [`engine`](Self::engine).
    pub fn cursor_position(&self) -> (u16, u16) {
        self.position
    }

    /// Debounced state of the last tick.
    pub fn reported_state(&self) -> PointerFlags {
        self.debounce.reported()
    }

    pub fn in_menu_band(&self) -> bool {
        self.in_top_menu
    }

    pub fn current_sprite(&self) -> Option<&PointerSprite> {
        self.current.as_ref()
    }

    pub fn pointer_id(&self) -> Option<SpriteId> {
        self.pointer_id
    }

    pub fn carried_id(&self) -> Option<SpriteId> {
        self.carried_id
    }

    //--- Internal Helpers -------------------------------------------------

    fn update_menu_band(&mut self, ctx: &mut GlobalContext<'_>, y: u16) {
        let holding = ctx.vars.is_set(GlobalVar::ObjectHeld);

        if ctx.vars.is_set(GlobalVar::TopMenuDisabled) {
            if self.in_top_menu {
                debug!("Menu band disabled while open");
                ctx.menu.end_menu(ctx.vars);
                self.in_top_menu = false;
            }
            return;
        }

        if y < self.config.menu_band_height {
            if !self.in_top_menu {
                debug!("Entered menu band");
                if !holding {
                    ctx.menu.start_menu(ctx.vars);
                }
                self.set_pointer(ctx, self.config.default_pointer);
            }
            ctx.menu.check_menu(ctx.vars);
            self.in_top_menu = true;
        } else if self.in_top_menu {
            debug!("Left menu band");
            if !holding {
                ctx.menu.end_menu(ctx.vars);
            }
            self.in_top_menu = false;
        }
    }

    fn world_position(&self, vars: &GlobalVars, x: u16, y: u16) -> (u32, u32) {
        let (bias_x, bias_y) = self.config.world_bias;
        (
            vars.get(GlobalVar::ScrollOffsetX)
                .wrapping_add(x as u32)
                .wrapping_add(bias_x),
            vars.get(GlobalVar::ScrollOffsetY)
                .wrapping_add(y as u32)
                .wrapping_add(bias_y),
        )
    }

    fn update_highlight(&mut self, ctx: &mut GlobalContext<'_>, touched: Option<Candidate>) {
        let touched_id = touched.map(|c| c.id);
        if touched_id == ctx.vars.special_item() {
            return;
        }

        debug!(
            "Highlight changed: {:?} → {:?}",
            ctx.vars.special_item(),
            touched_id
        );
        ctx.vars.set_special_item(touched_id);

        if let Some(script) = self.leave_script.take() {
            ctx.run_script(None, script);
        }

        if let Some(candidate) = touched {
            if let Some(script) = candidate.on_enter {
                ctx.run_script(Some(candidate.id), script);
            }
            self.leave_script = candidate.on_leave;
        }
    }

    fn dispatch_click(&mut self, ctx: &mut GlobalContext<'_>, state: PointerFlags) {
        let down = state & PointerFlags::DOWN;
        trace!("Click {:?}", down);

        if self.in_top_menu {
            if let Some(script) = ctx.menu.click_script(ctx.vars) {
                ctx.run_script(None, script);
            }
        }

        ctx.vars.set(GlobalVar::MouseButton, down.bits() as u32);

        if let Some(id) = ctx.vars.special_item() {
            match ctx.registry.fetch_object(id) {
                Some(object) => {
                    if let Some(script) = object.on_click {
                        ctx.run_script(Some(id), script);
                    }
                }
                None => warn!("Highlighted object {} is not registered", id),
            }
        }
    }

    fn rebuild(&mut self, ctx: &GlobalContext<'_>) {
        self.current = None;
        self.active_frame = None;

        let Some(pointer_id) = self.pointer_id else {
            return;
        };
        let Some(pointer) = ctx.sprites.fetch_sprite(pointer_id) else {
            warn!("Unknown pointer sprite {}", pointer_id);
            return;
        };

        let carried = self.carried_id.and_then(|id| {
            let sprite = ctx.sprites.fetch_sprite(id);
            if sprite.is_none() {
                warn!("Unknown carried-object sprite {}", id);
            }
            sprite
        });

        let sprite = PointerSprite::compose(pointer, carried, self.config.interlaced);
        debug!(
            "Pointer rebuilt: {:?} + {:?} → {}x{}x{}",
            self.pointer_id, self.carried_id, sprite.width, sprite.height, sprite.frames
        );
        self.current = Some(sprite);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
