//=========================================================================
// Global Variables
//=========================================================================
//
// The shared script variable table.
//
// Scripts address variables by index; engine code uses the `GlobalVar`
// names. Only the slots the core touches are named here, the rest of the
// table belongs to game scripts.
//
//=========================================================================

//=== External Dependencies ===============================================

use bitflags::bitflags;

//=== Internal Dependencies ===============================================

use crate::core::object::ObjectId;

//=== Constants ===========================================================

/// Total number of script variables.
pub const GLOBAL_VAR_COUNT: usize = 256;

//=== GlobalVar ===========================================================

/// Named slots of the variable table used by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum GlobalVar {
    /// [`MouseStatus`] bits.
    MouseStatus = 0,
    /// Id of the highlighted object, 0 for none.
    SpecialItem = 1,
    /// Menu item under the cursor while in the menu band.
    SecondItem = 2,
    /// Down edges of the last click.
    MouseButton = 3,
    /// Cursor position in world coordinates.
    MouseX = 4,
    MouseY = 5,
    ScrollOffsetX = 6,
    ScrollOffsetY = 7,
    /// Non-zero while the player carries an object.
    ObjectHeld = 8,
    /// Non-zero disables the top menu band.
    TopMenuDisabled = 9,
}

impl GlobalVar {
    pub const fn index(self) -> usize {
        self as usize
    }
}

//=== MouseStatus =========================================================

bitflags! {
    /// Pointer interaction state stored in [`GlobalVar::MouseStatus`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MouseStatus: u32 {
        /// The player may interact with the scene.
        const ENABLED = 1 << 0;
        /// Enable/disable requests are ignored.
        const LOCKED  = 1 << 1;
    }
}

impl MouseStatus {
    pub fn is_enabled(self) -> bool {
        self.contains(Self::ENABLED)
    }

    pub fn is_locked(self) -> bool {
        self.contains(Self::LOCKED)
    }
}

//=== GlobalVars ==========================================================

/// Fixed-size variable table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalVars {
    values: [u32; GLOBAL_VAR_COUNT],
}

impl GlobalVars {
    pub fn new() -> Self {
        Self {
            values: [0; GLOBAL_VAR_COUNT],
        }
    }

    //--- Named Access -----------------------------------------------------

    pub fn get(&self, var: GlobalVar) -> u32 {
        self.values[var.index()]
    }

    pub fn set(&mut self, var: GlobalVar, value: u32) {
        self.values[var.index()] = value;
    }

    /// True if `var` holds a non-zero value.
    pub fn is_set(&self, var: GlobalVar) -> bool {
        self.get(var) != 0
    }

    //--- Indexed Access ---------------------------------------------------

    /// Script-side read; `None` for an index outside the table.
    pub fn get_index(&self, index: usize) -> Option<u32> {
        self.values.get(index).copied()
    }

    /// Script-side write; returns `false` for an index outside the table.
    pub fn set_index(&mut self, index: usize, value: u32) -> bool {
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    //--- Typed Helpers ----------------------------------------------------

    /// Unknown bits are discarded.
    pub fn mouse_status(&self) -> MouseStatus {
        MouseStatus::from_bits_truncate(self.get(GlobalVar::MouseStatus))
    }

    pub fn set_mouse_status(&mut self, status: MouseStatus) {
        self.set(GlobalVar::MouseStatus, status.bits());
    }

    /// Highlighted object, if any.
    pub fn special_item(&self) -> Option<ObjectId> {
        match self.get(GlobalVar::SpecialItem) {
            0 => None,
            id => Some(id),
        }
    }

    pub fn set_special_item(&mut self, id: Option<ObjectId>) {
        self.set(GlobalVar::SpecialItem, id.unwrap_or(0));
    }
}

impl Default for GlobalVars {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
