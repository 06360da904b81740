//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_ui::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Orchestrator
pub use crate::core::orchestrator::{
    OrchestratorBuilder, OrchestratorConfig, ScreenEvent, ScreenInstance, ScreenOrchestrator,
};

// Screen definitions
pub use crate::core::screen::{
    CategoryPolicies, CategoryPolicy, PlainScreen, Screen, ScreenCategory, ScreenKey, ScreenMetadata,
    ScreenRegistry,
};

// Controllers
pub use crate::core::controller::{ScreenController, ScreenState};

// Animation
pub use crate::core::animation::{
    Animation, Animator, Completion, Edge, ImmediateAnimator, TimedAnimator,
};

// Render model
pub use crate::core::render::{Element, InMemoryTemplates, RenderRoot, Template, TemplateProvider};

// Errors
pub use crate::core::error::{ScreenError, TemplateError};
