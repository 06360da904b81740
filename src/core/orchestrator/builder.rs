//=========================================================================
// Orchestrator Builder
//=========================================================================
//
// Fluent construction of a ScreenOrchestrator.
//
// Architecture:
//   OrchestratorBuilder ──build()──> ScreenOrchestrator
//       │                                │
//       ├─ with_animation_duration()     ├─ initialize(root)
//       ├─ with_template_root()          └─ initialize_screens()
//       ├─ with_policy()
//       ├─ with_animator()
//       └─ with_templates()
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use super::ScreenOrchestrator;
use crate::core::animation::{Animator, ImmediateAnimator};
use crate::core::render::{InMemoryTemplates, TemplateProvider};
use crate::core::screen::{CategoryPolicies, CategoryPolicy, ScreenCategory, ScreenKey, ScreenRegistry};

//=== OrchestratorConfig ==================================================

/// Tunables resolved by the builder.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorConfig {
    /// Transition length in seconds for screens without their own.
    pub animation_duration: f32,

    /// Prefix joined to every template path before loading.
    pub template_root: String,

    /// Per-category stacking rules.
    pub policies: CategoryPolicies,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            animation_duration: 0.3,
            template_root: "UI/Templates/".to_string(),
            policies: CategoryPolicies::default(),
        }
    }
}

//=== OrchestratorBuilder =================================================

/// Builder for configuring and constructing a [`ScreenOrchestrator`].
///
/// # Default Values
///
/// - **Animation duration**: 0.3 seconds
/// - **Template root**: `"UI/Templates/"`
/// - **Policies**: the built-in per-category table
/// - **Animator**: [`ImmediateAnimator`]
/// - **Templates**: empty [`InMemoryTemplates`]
///
/// # Examples
///
/// ```rust
/// # use aetheric_ui::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Ui { Hud }
/// # impl ScreenKey for Ui {}
/// let mut registry = ScreenRegistry::new();
/// registry
///     .register(ScreenMetadata::new(Ui::Hud, ScreenCategory::Persistent, 0), || PlainScreen)
///     .unwrap();
///
/// let orchestrator = OrchestratorBuilder::new(registry)
///     .with_animation_duration(0.25)
///     .with_animator(TimedAnimator::new())
///     .build();
///
/// assert!(!orchestrator.is_initialized());
/// ```
pub struct OrchestratorBuilder<K: ScreenKey> {
    registry: ScreenRegistry<K>,
    config: OrchestratorConfig,
    animator: Box<dyn Animator<K>>,
    templates: Box<dyn TemplateProvider>,
}

impl<K: ScreenKey> OrchestratorBuilder<K> {
    /// Creates a builder around a populated registry.
    pub fn new(registry: ScreenRegistry<K>) -> Self {
        Self {
            registry,
            config: OrchestratorConfig::default(),
            animator: Box::new(ImmediateAnimator),
            templates: Box::new(InMemoryTemplates::new()),
        }
    }

    /// Sets the default transition duration in seconds.
    ///
    /// Default: 0.3
    ///
    /// # Panics
    ///
    /// Panics if `seconds` is negative or not finite.
    pub fn with_animation_duration(mut self, seconds: f32) -> Self {
        assert!(
            seconds.is_finite() && seconds >= 0.0,
            "Animation duration must be a non-negative number of seconds, got {}",
            seconds
        );
        self.config.animation_duration = seconds;
        self
    }

    /// Sets the prefix joined to every template path.
    ///
    /// Default: `"UI/Templates/"`
    pub fn with_template_root(mut self, root: impl Into<String>) -> Self {
        self.config.template_root = root.into();
        self
    }

    /// Overrides the policy of one category.
    pub fn with_policy(mut self, category: ScreenCategory, policy: CategoryPolicy) -> Self {
        self.config.policies[category] = policy;
        self
    }

    /// Replaces the whole policy table.
    pub fn with_policies(mut self, policies: CategoryPolicies) -> Self {
        self.config.policies = policies;
        self
    }

    /// Sets the animation backend.
    pub fn with_animator(mut self, animator: impl Animator<K> + 'static) -> Self {
        self.animator = Box::new(animator);
        self
    }

    /// Sets the template source.
    pub fn with_templates(mut self, templates: impl TemplateProvider + 'static) -> Self {
        self.templates = Box::new(templates);
        self
    }

    /// Builds the orchestrator.
    ///
    /// The result still needs [`ScreenOrchestrator::initialize`] and
    /// [`ScreenOrchestrator::initialize_screens`] before screens can be shown.
    pub fn build(self) -> ScreenOrchestrator<K> {
        info!(
            "Building screen orchestrator ({} screens, duration: {}s, templates: {})",
            self.registry.len(),
            self.config.animation_duration,
            self.config.template_root
        );

        ScreenOrchestrator::new(self.registry, self.config, self.animator, self.templates)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScreen {
        Title,
    }

    impl ScreenKey for TestScreen {}

    #[test]
    fn defaults_match_documented_values() {
        let config = OrchestratorConfig::default();
        assert_eq!(config.animation_duration, 0.3);
        assert_eq!(config.template_root, "UI/Templates/");
        assert_eq!(config.policies, CategoryPolicies::default());
    }

    #[test]
    fn overrides_reach_the_orchestrator() {
        let strict = CategoryPolicy::default();
        let orchestrator = OrchestratorBuilder::<TestScreen>::new(ScreenRegistry::new())
            .with_animation_duration(1.5)
            .with_template_root("ui/")
            .with_policy(ScreenCategory::Popup, strict)
            .build();

        let config = orchestrator.config();
        assert_eq!(config.animation_duration, 1.5);
        assert_eq!(config.template_root, "ui/");
        assert_eq!(config.policies[ScreenCategory::Popup], strict);
        assert_eq!(orchestrator.category_stacks().policy(ScreenCategory::Popup), strict);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn negative_duration_panics() {
        let _ = OrchestratorBuilder::<TestScreen>::new(ScreenRegistry::new()).with_animation_duration(-0.1);
    }
}
