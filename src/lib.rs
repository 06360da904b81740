//=========================================================================
// Aetheric UI — Library Root
//
// This crate defines the public API surface of the Aetheric UI screen
// system.
//
// Responsibilities:
// - Expose the screen orchestrator (`ScreenOrchestrator`) and its builder
// - Expose the building blocks (registry, stacks, controllers, render
//   model) for hosts that need finer control
// - Stay independent of any windowing or rendering backend
//
// Typical usage:
// ```no_run
// use aetheric_ui::prelude::*;
//
// let mut ui = OrchestratorBuilder::new(registry).build();
// ui.initialize(RenderRoot::new());
// ui.initialize_screens();
// ui.show_screen(Ui::MainMenu, true, true);
//
// loop {
//     ui.update(delta_time);
//     for event in ui.drain_events() { /* react */ }
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains every screen system. It is exposed publicly for hosts
// that plug in their own animator or template source; most application
// code only needs the prelude.
//
pub mod core;

// `prelude` re-exports the types needed to register and drive screens.
pub mod prelude;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the orchestrator and its builder as the main entry points.
//
pub use crate::core::orchestrator::{OrchestratorBuilder, ScreenOrchestrator};
