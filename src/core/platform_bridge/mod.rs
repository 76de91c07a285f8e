//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit) with the tick driver.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Core-side draining of the platform channel
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::{PlatformError, PlatformEvent};
pub use interface::PointerSample;
