//=========================================================================
// Test Support
//=========================================================================
//
// Recording fakes of the external collaborators and a harness that
// assembles a `GlobalContext` from them.
//
//=========================================================================

use std::collections::HashMap;

use crate::core::collaborators::{DisplayLayer, ScriptDispatcher, ScriptEnv, TopMenu};
use crate::core::events::GlobalEventQueue;
use crate::core::globals::{GlobalContext, GlobalVars};
use crate::core::object::{InteractiveObject, ObjectId, ObjectTable, ScriptId};
use crate::core::pointer::{PointerSprite, SpriteId};

//=== RecordingScripts ====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScriptCall {
    pub object: Option<ObjectId>,
    pub script: ScriptId,
}

impl ScriptCall {
    pub fn new(object: Option<ObjectId>, script: ScriptId) -> Self {
        Self { object, script }
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingScripts {
    pub calls: Vec<ScriptCall>,
}

impl ScriptDispatcher for RecordingScripts {
    fn run_script(
        &mut self,
        _env: &mut ScriptEnv<'_>,
        object: Option<&mut InteractiveObject>,
        script: ScriptId,
    ) {
        self.calls.push(ScriptCall::new(object.map(|o| o.id), script));
    }
}

//=== RecordingMenu =======================================================

#[derive(Debug, Default)]
pub(crate) struct RecordingMenu {
    pub started: usize,
    pub checked: usize,
    pub ended: usize,
    pub click: Option<ScriptId>,
}

impl TopMenu for RecordingMenu {
    fn start_menu(&mut self, _vars: &mut GlobalVars) {
        self.started += 1;
    }

    fn check_menu(&mut self, _vars: &mut GlobalVars) {
        self.checked += 1;
    }

    fn end_menu(&mut self, _vars: &mut GlobalVars) {
        self.ended += 1;
    }

    fn click_script(&self, _vars: &GlobalVars) -> Option<ScriptId> {
        self.click
    }
}

//=== RecordingDisplay ====================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DisplayCall {
    Image {
        pixels: Vec<u8>,
        width: u16,
        height: u16,
    },
    Visible(bool),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingDisplay {
    pub calls: Vec<DisplayCall>,
}

impl RecordingDisplay {
    /// Pixel data of every uploaded image, in order.
    pub fn images(&self) -> Vec<Vec<u8>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DisplayCall::Image { pixels, .. } => Some(pixels.clone()),
                DisplayCall::Visible(_) => None,
            })
            .collect()
    }
}

impl DisplayLayer for RecordingDisplay {
    fn set_cursor_image(
        &mut self,
        pixels: &[u8],
        width: u16,
        height: u16,
        _hotspot_x: u16,
        _hotspot_y: u16,
        _transparent: u8,
    ) {
        self.calls.push(DisplayCall::Image {
            pixels: pixels.to_vec(),
            width,
            height,
        });
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.calls.push(DisplayCall::Visible(visible));
    }
}

//=== Harness =============================================================

#[derive(Default)]
pub(crate) struct Harness {
    pub vars: GlobalVars,
    pub events: GlobalEventQueue,
    pub registry: ObjectTable,
    pub scripts: RecordingScripts,
    pub menu: RecordingMenu,
    pub display: RecordingDisplay,
    pub sprites: HashMap<SpriteId, PointerSprite>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ctx(&mut self) -> GlobalContext<'_> {
        GlobalContext {
            vars: &mut self.vars,
            events: &mut self.events,
            registry: &mut self.registry,
            scripts: &mut self.scripts,
            menu: &mut self.menu,
            display: &mut self.display,
            sprites: &self.sprites,
        }
    }
}
