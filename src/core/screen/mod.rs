//=========================================================================
// Screen Definitions
//=========================================================================
//
// Identity, behaviour and registration data for screens.
//
// Architecture:
//   ScreenRegistry
//     ├─ metadata: HashMap<K, ScreenMetadata<K>>
//     └─ factories: HashMap<K, ScreenFactory<K>>
//
// Flow:
//   register() → ScreenOrchestrator::initialize_screens() → factory()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use crate::core::animation::Animation;
use crate::core::controller::ScreenController;

//=== Module Declarations =================================================

mod category;
mod registry;

//=== Public API ==========================================================

pub use category::{CategoryPolicies, CategoryPolicy, ScreenCategory};
pub use registry::{ScreenFactory, ScreenMetadata, ScreenRegistry};

//=== Screen Key Trait ====================================================

/// Marker trait for screen identifiers.
///
/// Screen keys uniquely identify screens in the registry and in every
/// orchestrator map. Typically implemented by game-specific enums.
pub trait ScreenKey: Clone + Copy + Eq + Hash + Debug + 'static {}

//=== AsAny ===============================================================

/// Upcast to `Any` for typed screen lookups.
///
/// Implemented automatically for every sized `'static` type.
pub trait AsAny: Any {
    /// Downcasts to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Downcasts to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=== Screen Trait ========================================================

/// Behaviour attached to a registered screen.
///
/// One instance is created per key by the registered factory and lives
/// until the orchestrator is disposed. Every hook has an empty default.
///
/// # Minimal Implementation
///
/// ```rust
/// # use aetheric_ui::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Ui { Loading }
/// # impl ScreenKey for Ui {}
/// struct LoadingScreen {
///     elapsed: f32,
/// }
///
/// impl Screen<Ui> for LoadingScreen {
///     fn update(&mut self, delta_time: f32) {
///         self.elapsed += delta_time;
///     }
/// }
/// ```
pub trait Screen<K: ScreenKey>: AsAny {
    /// Called once after the controller and its container exist.
    ///
    /// Screens whose template failed to load can build their content here
    /// through the controller's content mutators.
    fn on_initialize(&mut self, _controller: &mut ScreenController<K>) {}

    /// Called before the show transition starts.
    fn on_before_show(&mut self) {}

    /// Called once the show transition has completed.
    fn on_after_show(&mut self) {}

    /// Called before the hide transition starts.
    fn on_before_hide(&mut self) {}

    /// Called once the hide transition has completed.
    fn on_after_hide(&mut self) {}

    /// Called every tick while the screen is visible.
    fn update(&mut self, _delta_time: f32) {}

    /// Called when the orchestrator is disposed.
    fn on_dispose(&mut self) {}

    /// Animation used when the screen appears.
    fn show_animation(&self) -> Animation {
        Animation::FadeIn
    }

    /// Animation used when the screen disappears.
    fn hide_animation(&self) -> Animation {
        Animation::FadeOut
    }

    /// Transition duration in seconds, or `None` for the configured default.
    fn animation_duration(&self) -> Option<f32> {
        None
    }
}

//=== PlainScreen =========================================================

/// Screen with no behaviour of its own.
///
/// Used for purely template-driven screens.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainScreen;

impl<K: ScreenKey> Screen<K> for PlainScreen {}
