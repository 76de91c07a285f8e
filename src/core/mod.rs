//=========================================================================
// Tick Driver
//=========================================================================
//
// Owns the platform-independent state and runs one logic tick at a time.
//
// Tick order:
// ```text
//   GlobalEventQueue::tick            countdown, expired slots freed
//        │
//   check_for_event(object)           for every live object, in order
//        │
//   SceneLogic::populate_candidates   fills the pointer candidate list
//        │
//   PointerEngine::engine             debounce, menu band, hit test, clicks
//        │
//   PointerEngine::animate            cursor frame
// ```
//
// The driver is single-threaded. Platform input reaches it as a
// `PointerSample`, already folded together by the event collector.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod collaborators;
pub mod error;
pub mod events;
pub mod globals;
pub mod object;
pub mod pointer;

pub(crate) mod platform_bridge;

#[cfg(test)]
pub(crate) mod test_support;

//=== Public API ==========================================================

pub use platform_bridge::PointerSample;

//=== External Dependencies ===============================================

use log::{info, trace};

//=== Internal Dependencies ===============================================

use collaborators::{DisplayLayer, SceneLogic, ScriptDispatcher, SpriteSource, TopMenu};
use error::CoreResult;
use events::GlobalEventQueue;
use globals::{GlobalContext, GlobalVars};
use object::ObjectRegistry;
use pointer::{PointerConfig, PointerEngine};

//=== GameServices ========================================================

/// Game-side collaborators the driver calls into every tick.
pub struct GameServices {
    pub registry: Box<dyn ObjectRegistry>,
    pub scripts: Box<dyn ScriptDispatcher>,
    pub menu: Box<dyn TopMenu>,
    pub display: Box<dyn DisplayLayer>,
    pub sprites: Box<dyn SpriteSource>,
    pub scene: Box<dyn SceneLogic>,
}

impl GameServices {
    pub fn new(
        registry: impl ObjectRegistry + 'static,
        scripts: impl ScriptDispatcher + 'static,
        menu: impl TopMenu + 'static,
        display: impl DisplayLayer + 'static,
        sprites: impl SpriteSource + 'static,
        scene: impl SceneLogic + 'static,
    ) -> Self {
        Self {
            registry: Box::new(registry),
            scripts: Box::new(scripts),
            menu: Box::new(menu),
            display: Box::new(display),
            sprites: Box::new(sprites),
            scene: Box::new(scene),
        }
    }

    /// Borrows every collaborator together with the shared script state.
    pub fn context<'a>(
        &'a mut self,
        vars: &'a mut GlobalVars,
        events: &'a mut GlobalEventQueue,
    ) -> GlobalContext<'a> {
        GlobalContext {
            vars,
            events,
            registry: &mut *self.registry,
            scripts: &mut *self.scripts,
            menu: &mut *self.menu,
            display: &mut *self.display,
            sprites: &*self.sprites,
        }
    }
}

//=== TickDriver ==========================================================

pub struct TickDriver {
    vars: GlobalVars,
    events: GlobalEventQueue,
    pointer: PointerEngine,
    services: GameServices,
    cursor: (u16, u16),
    ticks: u64,
}

impl TickDriver {
    //--- Construction -----------------------------------------------------

    pub fn new(config: PointerConfig, services: GameServices) -> Self {
        info!(
            "Tick driver created (menu band: {} rows, bias: {:?})",
            config.menu_band_height, config.world_bias
        );

        Self {
            vars: GlobalVars::new(),
            events: GlobalEventQueue::new(),
            pointer: PointerEngine::new(config),
            services,
            cursor: (0, 0),
            ticks: 0,
        }
    }

    //--- Tick -------------------------------------------------------------

    /// Runs one logic tick with the pointer input gathered since the last.
    ///
    /// A sample without a position keeps the cursor where it was.
    ///
    /// # Errors
    ///
    /// Propagates pool and stack exhaustion from event matching and
    /// candidate population. The tick is abandoned at the failing step.
    pub fn tick(&mut self, sample: PointerSample) -> CoreResult<()> {
        self.ticks += 1;
        trace!("Tick {} ({:?})", self.ticks, sample);

        //--- 1. Event countdown -------------------------------------------
        self.events.tick();

        //--- 2. Event matching --------------------------------------------
        let registry = &mut *self.services.registry;
        for id in registry.live_objects() {
            if let Some(object) = registry.fetch_object(id) {
                self.events.check_for_event(object)?;
            }
        }

        //--- 3. Candidates --------------------------------------------------
        self.pointer.candidates_mut().clear();
        self.services
            .scene
            .populate_candidates(&mut *self.services.registry, self.pointer.candidates_mut())?;

        //--- 4. Pointer -----------------------------------------------------
        if let Some(position) = sample.position {
            self.cursor = position;
        }
        let (x, y) = self.cursor;

        let mut ctx = self.services.context(&mut self.vars, &mut self.events);
        self.pointer.engine(&mut ctx, x, y, sample.flags);

        //--- 5. Cursor animation --------------------------------------------
        self.pointer.animate(&mut ctx);

        Ok(())
    }

    //--- Pointer Commands -------------------------------------------------

    /// Runs `command` against the pointer engine with a full context.
    ///
    /// Used for the script-facing cursor commands (enable, lock, set
    /// pointer, control panel) between ticks.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// driver.with_pointer(|pointer, ctx| pointer.enable(ctx));
    /// ```
    pub fn with_pointer<R>(
        &mut self,
        command: impl FnOnce(&mut PointerEngine, &mut GlobalContext<'_>) -> R,
    ) -> R {
        let mut ctx = self.services.context(&mut self.vars, &mut self.events);
        command(&mut self.pointer, &mut ctx)
    }

    //--- Accessors --------------------------------------------------------

    pub fn vars(&self) -> &GlobalVars {
        &self.vars
    }

    pub fn vars_mut(&mut self) -> &mut GlobalVars {
        &mut self.vars
    }

    pub fn events(&self) -> &GlobalEventQueue {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut GlobalEventQueue {
        &mut self.events
    }

    pub fn pointer(&self) -> &PointerEngine {
        &self.pointer
    }

    pub fn services_mut(&mut self) -> &mut GameServices {
        &mut self.services
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
