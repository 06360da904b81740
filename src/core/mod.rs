//=========================================================================
// Core UI Systems
//
// Everything the screen system is built from, bottom-up:
//
// - `screen`:       keys, behaviour trait, categories, registry
// - `stack`:        per-category stack bookkeeping
// - `render`:       render root, containers, elements, templates
// - `animation`:    animator contract and one-shot completions
// - `controller`:   per-screen show/hide state machine
// - `orchestrator`: top-level service tying the above together
// - `error`:        failure types absorbed at the orchestrator boundary
//
// Notes:
// All systems are single-threaded and driven from the host's update
// loop through `ScreenOrchestrator::update`.
//
//=========================================================================

//=== Public Modules ======================================================

pub mod animation;
pub mod controller;
pub mod error;
pub mod orchestrator;
pub mod render;
pub mod screen;
pub mod stack;

//=== Re-exports ==========================================================

pub use animation::{Animation, Animator};
pub use controller::{ScreenController, ScreenState};
pub use error::{ScreenError, TemplateError};
pub use orchestrator::{OrchestratorBuilder, ScreenEvent, ScreenOrchestrator};
pub use screen::{Screen, ScreenCategory, ScreenKey};
pub use stack::CategoryStackManager;
