//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Platform-to-core interface types (events and errors).
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::pointer::PointerFlags;

//=== PointerSample =======================================================

/// Pointer input accumulated over one platform frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerSample {
    /// Latest cursor position in screen pixels, if the cursor moved.
    pub position: Option<(u16, u16)>,

    /// Every edge seen during the frame.
    pub flags: PointerFlags,
}

impl PointerSample {
    pub fn new(position: Option<(u16, u16)>, flags: PointerFlags) -> Self {
        Self { position, flags }
    }

    /// Folds a later sample into this one.
    pub fn merge(&mut self, later: PointerSample) {
        if later.position.is_some() {
            self.position = later.position;
        }
        self.flags |= later.flags;
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.flags.is_empty()
    }
}

//=== PlatformEvent =======================================================

/// Events sent from platform to core.
#[derive(Debug, Clone)]
pub(crate) enum PlatformEvent {
    /// Pointer input buffered during a frame.
    Pointer(PointerSample),

    /// Window close requested.
    WindowClosed,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug)]
pub(crate) enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(String),

    /// Event loop execution error.
    EventLoopExecution(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_latest_position_and_all_edges() {
        let mut sample = PointerSample::new(Some((1, 2)), PointerFlags::LEFT_DOWN);
        sample.merge(PointerSample::new(None, PointerFlags::LEFT_UP));
        sample.merge(PointerSample::new(Some((5, 6)), PointerFlags::empty()));

        assert_eq!(sample.position, Some((5, 6)));
        assert_eq!(sample.flags, PointerFlags::LEFT_DOWN | PointerFlags::LEFT_UP);
    }

    #[test]
    fn default_sample_is_empty() {
        assert!(PointerSample::default().is_empty());
        assert!(!PointerSample::new(Some((0, 0)), PointerFlags::empty()).is_empty());
    }

    #[test]
    fn platform_error_display() {
        let err = PlatformError::EventLoopCreation("no display".into());
        assert_eq!(err.to_string(), "Event loop creation failed: no display");
    }
}
