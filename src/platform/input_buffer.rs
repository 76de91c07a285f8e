//=========================================================================
// Input Buffer
//
// Accumulates pointer input between two frame boundaries.
//
// Responsibilities:
// - OR together every edge seen during the frame
// - Keep only the latest cursor position
// - Hand the frame over as one `PointerSample` via `drain()`
//
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::pointer::PointerFlags;
use crate::core::PointerSample;

//=== InputBuffer Struct ==================================================
pub(crate) struct InputBuffer {
    position: Option<(u16, u16)>,
    flags: PointerFlags,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    pub fn new() -> Self {
        Self {
            position: None,
            flags: PointerFlags::empty(),
        }
    }

    //--- Edges ------------------------------------------------------------
    pub fn push_flags(&mut self, flags: PointerFlags) {
        self.flags |= flags;
    }

    //--- Position ---------------------------------------------------------
    //
    // The latest position always replaces any previous one.
    //
    pub fn set_position(&mut self, x: u16, y: u16) {
        self.position = Some((x, y));
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns the frame's input and clears the buffer. Nothing is returned
    // for a frame without movement or edges.
    //
    pub fn drain(&mut self) -> Option<PointerSample> {
        if self.is_empty() {
            return None;
        }

        let sample = PointerSample::new(self.position.take(), self.flags);
        self.flags = PointerFlags::empty();
        Some(sample)
    }

    //--- Utilities --------------------------------------------------------
    pub fn clear(&mut self) {
        self.position = None;
        self.flags = PointerFlags::empty();
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.flags.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_accumulate() {
        let mut buffer = InputBuffer::new();
        buffer.push_flags(PointerFlags::LEFT_DOWN);
        buffer.push_flags(PointerFlags::LEFT_UP);
        buffer.push_flags(PointerFlags::LEFT_DOWN);

        let sample = buffer.drain().unwrap();
        assert_eq!(sample.flags, PointerFlags::LEFT_DOWN | PointerFlags::LEFT_UP);
        assert_eq!(sample.position, None);
    }

    #[test]
    fn test_position_overwrite() {
        let mut buffer = InputBuffer::new();
        buffer.set_position(10, 10);
        buffer.set_position(20, 30);

        let sample = buffer.drain().unwrap();
        assert_eq!(sample.position, Some((20, 30)));
    }

    #[test]
    fn test_drain_clears_buffer() {
        let mut buffer = InputBuffer::new();
        buffer.push_flags(PointerFlags::RIGHT_DOWN);
        buffer.set_position(5, 5);

        assert!(buffer.drain().is_some());
        assert!(buffer.is_empty());
        assert!(buffer.drain().is_none());
    }

    #[test]
    fn test_clear_behavior() {
        let mut buffer = InputBuffer::new();
        buffer.push_flags(PointerFlags::WHEEL_UP);
        buffer.set_position(1, 2);
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
