//=========================================================================
// Pointer Configuration
//=========================================================================

//=== Internal Dependencies ===============================================

use super::SpriteId;
use crate::core::object::ScriptId;

//=== PointerConfig =======================================================

/// Game-specific constants of the pointer engine.
///
/// # Default Values
///
/// - **Menu band**: top 40 screen rows
/// - **World bias**: `(128, 88)`, i.e. world = scroll + screen + (128, 128 - 40)
/// - **Default pointer / standard leave script**: none
/// - **Interlaced**: off
///
/// # Examples
///
/// ```
/// use adventure_core::core::pointer::PointerConfig;
///
/// let config = PointerConfig::new()
///     .with_default_pointer(0x0405_0000)
///     .with_standard_leave_script(0x0001_0002)
///     .with_interlaced(true);
/// assert_eq!(config.menu_band_height, 40);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerConfig {
    /// Screen rows `0..menu_band_height` belong to the top menu.
    pub menu_band_height: u16,

    /// Added to scroll offset + screen position to get world coordinates.
    pub world_bias: (u32, u32),

    /// Sprite shown on enable, on menu entry, and by "normal mouse".
    pub default_pointer: Option<SpriteId>,

    /// Leave script armed whenever interaction is enabled.
    pub standard_leave_script: Option<ScriptId>,

    /// Source sprites are stored at half height.
    pub interlaced: bool,
}

impl PointerConfig {
    pub fn new() -> Self {
        Self {
            menu_band_height: 40,
            world_bias: (128, 128 - 40),
            default_pointer: None,
            standard_leave_script: None,
            interlaced: false,
        }
    }

    pub fn with_menu_band_height(mut self, rows: u16) -> Self {
        self.menu_band_height = rows;
        self
    }

    pub fn with_world_bias(mut self, x: u32, y: u32) -> Self {
        self.world_bias = (x, y);
        self
    }

    pub fn with_default_pointer(mut self, sprite: SpriteId) -> Self {
        self.default_pointer = Some(sprite);
        self
    }

    pub fn with_standard_leave_script(mut self, script: ScriptId) -> Self {
        self.standard_leave_script = Some(script);
        self
    }

    pub fn with_interlaced(mut self, interlaced: bool) -> Self {
        self.interlaced = interlaced;
        self
    }
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
