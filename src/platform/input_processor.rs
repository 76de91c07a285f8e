//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit pointer events into engine pointer edges and positions.
//
// Architecture:
//   Winit Events → InputProcessor → PointerFlags / (x, y) → InputBuffer
//
// Positions arrive in physical pixels; the processor tracks the window's
// scale factor and reports logical pixels, clamped to the u16 range the
// pointer engine works in. Buttons other than left and right are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta},
};

//=== Internal Dependencies ===============================================

use crate::core::pointer::PointerFlags;

//=== InputProcessor ======================================================

pub(crate) struct InputProcessor {
    scale_factor: f64,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self { scale_factor: 1.0 }
    }

    //--- Scale Factor -----------------------------------------------------

    pub(crate) fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
    }

    #[cfg(test)]
    pub(crate) fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    //--- Event Processing -------------------------------------------------

    /// Maps a left/right button transition to its edge flag.
    pub(crate) fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> Option<PointerFlags> {
        match (button, state) {
            (WinitMouseButton::Left, ElementState::Pressed) => Some(PointerFlags::LEFT_DOWN),
            (WinitMouseButton::Left, ElementState::Released) => Some(PointerFlags::LEFT_UP),
            (WinitMouseButton::Right, ElementState::Pressed) => Some(PointerFlags::RIGHT_DOWN),
            (WinitMouseButton::Right, ElementState::Released) => Some(PointerFlags::RIGHT_UP),
            _ => None,
        }
    }

    /// Maps a scroll delta to a wheel edge (positive `y` is away from the user).
    pub(crate) fn process_wheel(&self, delta: MouseScrollDelta) -> Option<PointerFlags> {
        let y = match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64,
            MouseScrollDelta::PixelDelta(position) => position.y,
        };

        if y > 0.0 {
            Some(PointerFlags::WHEEL_UP)
        } else if y < 0.0 {
            Some(PointerFlags::WHEEL_DOWN)
        } else {
            None
        }
    }

    /// Converts a physical cursor position to clamped logical pixels.
    pub(crate) fn process_cursor_move(&self, position: PhysicalPosition<f64>) -> (u16, u16) {
        let logical = position.to_logical::<f64>(self.scale_factor);
        (clamp_axis(logical.x), clamp_axis(logical.y))
    }
}

//--- Helpers -------------------------------------------------------------

fn clamp_axis(value: f64) -> u16 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, u16::MAX as f64) as u16
}

//=========================================================================
// Unit Tests
//=========================================================================
