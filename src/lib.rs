//=========================================================================
// Adventure Core: Library Root
//
// Interaction core of a point-and-click adventure runtime: a bounded
// delayed-event scheduler for game objects and a pointer engine that turns
// debounced mouse input into enter/leave/click script dispatch.
//
// Typical usage:
// ```no_run
// use adventure_core::EngineBuilder;
// # fn services() -> adventure_core::core::GameServices { unimplemented!() }
//
// fn main() {
//     EngineBuilder::new().build(services()).run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds all platform-independent logic (events, pointer, globals)
// and the collaborator traits a game implements.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` is the winit adapter; `engine` wires it to the tick driver.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
