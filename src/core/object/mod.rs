//=========================================================================
// Interactive Objects
//=========================================================================
//
// The object abstraction shared by the event queue and pointer engine.
//
// Objects are owned by game logic (see `ObjectRegistry`). The core only
// reads them and briefly mutates their logic mode, pause counter, and
// script stack.
//
//=========================================================================

//=== Module Declarations =================================================

mod registry;
mod script_stack;

//=== Public API ==========================================================

pub use registry::{ObjectRegistry, ObjectTable};
pub use script_stack::{ScriptFrame, ScriptStack, SCRIPT_LEVELS};

use crate::core::error::CoreResult;

//=== Identifiers =========================================================

/// Object identifier. 0 never names a live object.
pub type ObjectId = u32;

/// Script identifier as understood by the script dispatcher.
pub type ScriptId = u32;

/// Global event identifier. 0 marks an unused local slot.
pub type EventId = u32;

/// Number of local pending-event slots on every object.
pub const LOCAL_EVENT_SLOTS: usize = 5;

//=== LogicMode ===========================================================

/// How the object's logic is currently driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogicMode {
    #[default]
    Idle,

    /// Run the script at the top of the call stack.
    Script,

    /// Play an animation sequence.
    Animate,

    /// Count down `pause` ticks.
    Pause,

    /// Count down `pause` ticks unless a matching event arrives first.
    PauseForEvent,
}

//=== MouseBox ============================================================

/// World-space hit rectangle, inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl MouseBox {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

//=== LocalEvent ==========================================================

/// Object-side subscription: run `script` when global `event` fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalEvent {
    pub event: EventId,
    pub script: ScriptId,
}

//=== InteractiveObject ===================================================

/// A scriptable scene object.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractiveObject {
    pub id: ObjectId,
    pub logic: LogicMode,
    pub pause: u32,

    /// Hit-test band, 0 (checked first) to 9.
    pub priority: u8,
    pub mouse_box: MouseBox,

    /// "Mouse-on" script.
    pub on_enter: Option<ScriptId>,
    /// "Mouse-off" script.
    pub on_leave: Option<ScriptId>,
    pub on_click: Option<ScriptId>,

    pub events: [Option<LocalEvent>; LOCAL_EVENT_SLOTS],
    pub stack: ScriptStack,
}

impl InteractiveObject {
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_mouse_box(mut self, mouse_box: MouseBox) -> Self {
        self.mouse_box = mouse_box;
        self
    }

    pub fn with_scripts(
        mut self,
        on_enter: Option<ScriptId>,
        on_leave: Option<ScriptId>,
        on_click: Option<ScriptId>,
    ) -> Self {
        self.on_enter = on_enter;
        self.on_leave = on_leave;
        self.on_click = on_click;
        self
    }

    /// Fills local slot `slot`; `event == 0` clears it.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= LOCAL_EVENT_SLOTS`.
    pub fn set_event(&mut self, slot: usize, event: EventId, script: ScriptId) {
        assert!(
            slot < LOCAL_EVENT_SLOTS,
            "Local event slot {} out of range",
            slot
        );
        self.events[slot] = (event != 0).then_some(LocalEvent { event, script });
    }

    /// Armed local subscriptions in slot order.
    pub fn local_events(&self) -> impl Iterator<Item = LocalEvent> + '_ {
        self.events.iter().flatten().copied()
    }

    /// Switches to script mode and pushes a frame for `script`.
    pub(crate) fn start_script(&mut self, script: ScriptId) -> CoreResult<()> {
        self.stack.push(script)?;
        self.logic = LogicMode::Script;
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
