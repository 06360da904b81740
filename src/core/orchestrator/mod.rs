//=========================================================================
// Screen Orchestrator
//=========================================================================
//
// Top-level screen service. Owns every controller and instance, the
// priority-sorted visible set, the back-navigation history and the
// category stacks, and routes all show/hide requests through them.
//
// Architecture:
//   ScreenOrchestrator
//     ├─ registry: ScreenRegistry<K>                (read-only)
//     ├─ controllers: HashMap<K, ScreenController>  (state machines)
//     ├─ instances: HashMap<K, ScreenInstance>      (behaviour)
//     ├─ visible: Vec<K>                            (priority desc)
//     ├─ history: Vec<K>
//     ├─ stacks: CategoryStackManager<K>
//     └─ events: EventQueue<K>
//
// Flow (animated show):
//   show_screen() → stacks.push() → controller.show() → Animator
//   ... update(dt) → animator.advance() → Completion fires
//   → process_completions() → visible set + render order → Shown(key)
//
// Category stacks change when a request is accepted; the visible set
// changes when the transition completes.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::animation::{Animator, TransitionDone, TransitionKind};
use crate::core::controller::{ScreenController, ScreenState, TransitionStatus};
use crate::core::error::{ScreenError, TemplateError};
use crate::core::render::{RenderRoot, Template, TemplateProvider};
use crate::core::screen::{Screen, ScreenCategory, ScreenKey, ScreenMetadata, ScreenRegistry};
use crate::core::stack::CategoryStackManager;

//=== Module Declarations =================================================

mod builder;
mod event_queue;
mod instance;

//=== Public API ==========================================================

pub use builder::{OrchestratorBuilder, OrchestratorConfig};
pub use event_queue::{EventQueue, ScreenEvent};
pub use instance::ScreenInstance;

//=== ScreenOrchestrator ==================================================

/// Coordinates screen lifecycle, stacking, ordering and navigation.
///
/// Created through [`OrchestratorBuilder`]. Public operations never fail:
/// configuration errors are logged and the call becomes a no-op.
///
/// # Lifecycle
///
/// 1. [`initialize`](Self::initialize) binds the render root.
/// 2. [`initialize_screens`](Self::initialize_screens) creates every
///    registered screen.
/// 3. [`update`](Self::update) is called once per tick.
/// 4. [`dispose`](Self::dispose) releases everything (also run on drop).
///
/// # Example
///
/// ```rust
/// # use aetheric_ui::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Ui { MainMenu }
/// # impl ScreenKey for Ui {}
/// let mut registry = ScreenRegistry::new();
/// registry
///     .register(ScreenMetadata::new(Ui::MainMenu, ScreenCategory::Screen, 10), || PlainScreen)
///     .unwrap();
///
/// let mut ui = OrchestratorBuilder::new(registry).build();
/// ui.initialize(RenderRoot::new());
/// ui.initialize_screens();
///
/// ui.show_screen(Ui::MainMenu, false, true);
/// assert!(ui.is_screen_visible(Ui::MainMenu));
/// assert_eq!(ui.drain_events(), vec![ScreenEvent::Shown(Ui::MainMenu)]);
/// ```
pub struct ScreenOrchestrator<K: ScreenKey> {
    config: OrchestratorConfig,
    registry: ScreenRegistry<K>,
    animator: Box<dyn Animator<K>>,
    templates: Box<dyn TemplateProvider>,
    root: Option<RenderRoot>,

    controllers: HashMap<K, ScreenController<K>>,
    instances: HashMap<K, ScreenInstance<K>>,
    creation_order: Vec<K>,

    visible: Vec<K>,
    history: Vec<K>,
    stacks: CategoryStackManager<K>,
    events: EventQueue<K>,

    completion_tx: Sender<TransitionDone<K>>,
    completion_rx: Receiver<TransitionDone<K>>,

    screens_initialized: bool,
    disposed: bool,
}

impl<K: ScreenKey> ScreenOrchestrator<K> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        registry: ScreenRegistry<K>,
        config: OrchestratorConfig,
        animator: Box<dyn Animator<K>>,
        templates: Box<dyn TemplateProvider>,
    ) -> Self {
        let (completion_tx, completion_rx) = unbounded();
        let stacks = CategoryStackManager::with_policies(config.policies);

        Self {
            config,
            registry,
            animator,
            templates,
            root: None,
            controllers: HashMap::new(),
            instances: HashMap::new(),
            creation_order: Vec::new(),
            visible: Vec::new(),
            history: Vec::new(),
            stacks,
            events: EventQueue::new(),
            completion_tx,
            completion_rx,
            screens_initialized: false,
            disposed: false,
        }
    }

    //--- Initialization ---------------------------------------------------

    /// Binds the render root every screen container is attached to.
    ///
    /// Only the first call has an effect.
    pub fn initialize(&mut self, root: RenderRoot) {
        if self.root.is_some() {
            warn!("Screen orchestrator already initialized, ignoring new render root");
            return;
        }

        self.root = Some(root);
        info!("Screen orchestrator bound to render root");
    }

    /// Creates a controller and instance for every registered screen.
    ///
    /// Screens are created in registration order. A template failure is
    /// logged and the screen is created with empty content.
    pub fn initialize_screens(&mut self) {
        if self.disposed {
            warn!("Screen orchestrator disposed, cannot initialize screens");
            return;
        }
        if self.screens_initialized {
            warn!("Screens already initialized");
            return;
        }
        if self.root.is_none() {
            error!("Cannot initialize screens: {}", ScreenError::RootNotBound);
            return;
        }

        let keys: Vec<K> = self.registry.keys().collect();
        for key in keys {
            if let Err(err) = self.create_screen(key) {
                error!("Failed to create screen {:?}: {}", key, err);
            }
        }

        self.screens_initialized = true;
        info!("Initialized {} screens", self.controllers.len());
    }

    /// Returns true once the root is bound and screens are created.
    pub fn is_initialized(&self) -> bool {
        self.root.is_some() && self.screens_initialized
    }

    //--- Show / Hide ------------------------------------------------------

    /// Shows a screen.
    ///
    /// Ignored if the screen is not hidden. With `add_to_history`, the
    /// current topmost visible screen (if different) is recorded for
    /// [`go_back`](Self::go_back).
    pub fn show_screen(&mut self, key: K, animate: bool, add_to_history: bool) {
        if let Err(err) = self.try_show(key, animate, add_to_history) {
            error!("Cannot show screen: {}", err);
        }
    }

    /// Hides a screen. Ignored unless the screen is visible.
    pub fn hide_screen(&mut self, key: K, animate: bool) {
        if let Err(err) = self.try_hide(key, animate) {
            error!("Cannot hide screen: {}", err);
        }
    }

    /// Hides every visible screen with the given key.
    pub fn hide_screens_of_type(&mut self, key: K, animate: bool) {
        self.hide_where(animate, |candidate, _| candidate == key);
    }

    /// Hides every visible screen in a category.
    pub fn hide_screens_in_category(&mut self, category: ScreenCategory, animate: bool) {
        self.hide_where(animate, |_, candidate| candidate == category);
    }

    /// Hides every visible popup.
    pub fn hide_all_popups(&mut self, animate: bool) {
        self.hide_screens_in_category(ScreenCategory::Popup, animate);
    }

    /// Hides every visible modal.
    pub fn hide_all_modals(&mut self, animate: bool) {
        self.hide_screens_in_category(ScreenCategory::Modal, animate);
    }

    /// Hides everything except system and persistent screens.
    pub fn hide_all_game_screens(&mut self, animate: bool) {
        self.hide_where(animate, |_, category| {
            !matches!(category, ScreenCategory::System | ScreenCategory::Persistent)
        });
    }

    /// Hides every visible screen.
    pub fn hide_all_screens(&mut self, animate: bool) {
        self.hide_where(animate, |_, _| true);
    }

    //--- Navigation -------------------------------------------------------

    /// Returns to the most recent history entry.
    ///
    /// Hides the topmost visible screen and shows the popped one. Returns
    /// false, changing nothing, if the history is empty.
    pub fn go_back(&mut self, animate: bool) -> bool {
        let Some(previous) = self.history.pop() else {
            debug!("History empty, go_back ignored");
            return false;
        };

        // The restore target may already be topmost, e.g. once a modal
        // shown over it has been hidden
        match self.visible.first().copied() {
            Some(current) if current == previous => {}
            Some(current) => self.hide_screen(current, animate),
            None => {}
        }
        self.show_screen(previous, animate, false);

        debug!("Navigated back to {:?} (history: {})", previous, self.history.len());
        true
    }

    /// Back-navigation history, oldest first.
    pub fn history(&self) -> &[K] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    //--- Tick -------------------------------------------------------------

    /// Advances the animator, applies finished transitions, then updates
    /// every visible screen.
    pub fn update(&mut self, delta_time: f32) {
        if self.disposed {
            return;
        }

        self.animator.advance(delta_time);
        self.process_completions();

        for key in &self.visible {
            if let Some(instance) = self.instances.get_mut(key) {
                instance.screen_mut().update(delta_time);
            }
        }
    }

    /// Applies every completion delivered since the last call.
    ///
    /// Returns how many transitions finished. Stale completions and those
    /// arriving after disposal are dropped.
    pub fn process_completions(&mut self) -> usize {
        let mut applied = 0;

        while let Ok(done) = self.completion_rx.try_recv() {
            if self.disposed {
                debug!("Ignoring completion for {:?} after dispose", done.key);
                continue;
            }
            let Some(controller) = self.controllers.get_mut(&done.key) else {
                debug!("Completion for unknown screen {:?}", done.key);
                continue;
            };
            if controller.finish_transition(done.kind) {
                self.apply_transition(done.key, done.kind);
                applied += 1;
            }
        }

        applied
    }

    //--- Events -----------------------------------------------------------

    /// Events not yet drained.
    pub fn events(&self) -> &EventQueue<K> {
        &self.events
    }

    /// Takes every pending event, oldest first.
    pub fn drain_events(&mut self) -> Vec<ScreenEvent<K>> {
        self.events.take()
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_screen_visible(&self, key: K) -> bool {
        self.instances.get(&key).is_some_and(ScreenInstance::is_visible)
    }

    /// Visible screens, highest priority first.
    pub fn visible_screens(&self) -> Vec<K> {
        self.visible.clone()
    }

    /// Every created screen, highest priority first.
    ///
    /// Equal priorities keep registration order.
    pub fn screens_by_priority(&self) -> Vec<K> {
        let mut keys = self.creation_order.clone();
        keys.sort_by_key(|key| Reverse(self.priority_of(*key)));
        keys
    }

    pub fn screen(&self, key: K) -> Option<&ScreenInstance<K>> {
        self.instances.get(&key)
    }

    pub fn screen_mut(&mut self, key: K) -> Option<&mut ScreenInstance<K>> {
        self.instances.get_mut(&key)
    }

    /// First created screen whose behaviour is a `T`.
    pub fn screen_of<T: Screen<K>>(&self) -> Option<&T> {
        self.creation_order
            .iter()
            .filter_map(|key| self.instances.get(key))
            .find_map(|instance| instance.downcast_ref::<T>())
    }

    /// Behaviour of `key`, if it is a `T`.
    pub fn screen_as<T: Screen<K>>(&self, key: K) -> Option<&T> {
        self.instances.get(&key)?.downcast_ref::<T>()
    }

    /// Mutable behaviour of `key`, if it is a `T`.
    pub fn screen_as_mut<T: Screen<K>>(&mut self, key: K) -> Option<&mut T> {
        self.instances.get_mut(&key)?.downcast_mut::<T>()
    }

    pub fn controller(&self, key: K) -> Option<&ScreenController<K>> {
        self.controllers.get(&key)
    }

    pub fn controller_mut(&mut self, key: K) -> Option<&mut ScreenController<K>> {
        self.controllers.get_mut(&key)
    }

    /// Advisory: true if a blocking category above `category` is occupied.
    pub fn is_blocked_by_higher_category(&self, category: ScreenCategory) -> bool {
        self.stacks.is_blocked_by_higher_category(category)
    }

    pub fn category_stacks(&self) -> &CategoryStackManager<K> {
        &self.stacks
    }

    pub fn render_root(&self) -> Option<&RenderRoot> {
        self.root.as_ref()
    }

    pub fn registry(&self) -> &ScreenRegistry<K> {
        &self.registry
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    //--- Mutation ---------------------------------------------------------

    /// Changes a screen's priority and re-applies ordering.
    pub fn set_screen_priority(&mut self, key: K, priority: i32) {
        let (Some(controller), Some(instance)) =
            (self.controllers.get_mut(&key), self.instances.get_mut(&key))
        else {
            error!("Cannot set priority: {}", unknown(key));
            return;
        };

        controller.set_priority(priority);
        instance.set_priority(priority);

        self.sort_visible();
        self.apply_render_order();
        debug!("Priority of {:?} set to {}", key, priority);
    }

    //--- Disposal ---------------------------------------------------------

    /// Releases every screen.
    ///
    /// In-flight transitions are completed first, without events. Every
    /// screen then gets `on_dispose` and its container is detached. Later
    /// calls do nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        for key in &self.creation_order {
            if let Some(controller) = self.controllers.get_mut(key) {
                if let Some(kind) = controller.force_complete() {
                    debug!("Force-completed {:?} transition of {:?}", kind, key);
                }
            }
        }

        for key in &self.creation_order {
            if let Some(instance) = self.instances.get_mut(key) {
                instance.screen_mut().on_dispose();
            }
        }

        if let Some(root) = self.root.as_mut() {
            for controller in self.controllers.values() {
                root.detach(controller.container().id());
            }
        }

        let released = self.controllers.len();
        self.controllers.clear();
        self.instances.clear();
        self.creation_order.clear();
        self.visible.clear();
        self.history.clear();
        self.stacks.clear_all();
        self.events.clear();
        while self.completion_rx.try_recv().is_ok() {}

        info!("Screen orchestrator disposed ({} screens released)", released);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    //--- Internal Helpers -------------------------------------------------

    fn create_screen(&mut self, key: K) -> Result<(), ScreenError> {
        let metadata = self.registry.metadata(key).cloned().ok_or_else(|| unknown(key))?;

        let template = self.load_template(&metadata).unwrap_or_else(|err| {
            error!("{}", err);
            None
        });

        let root = self.root.as_mut().ok_or(ScreenError::RootNotBound)?;
        let mut controller = ScreenController::new(
            key,
            metadata.category,
            metadata.priority,
            template.as_ref(),
            root,
            self.completion_tx.clone(),
        );

        let mut screen = self.registry.create(key).ok_or_else(|| unknown(key))?;
        screen.on_initialize(&mut controller);

        self.controllers.insert(key, controller);
        self.instances
            .insert(key, ScreenInstance::new(key, metadata.category, metadata.priority, screen));
        self.creation_order.push(key);

        debug!("Created screen {:?} ({:?}, priority {})", key, metadata.category, metadata.priority);
        Ok(())
    }

    fn load_template(&self, metadata: &ScreenMetadata<K>) -> Result<Option<Template>, ScreenError> {
        let Some(path) = metadata.template.as_deref() else {
            return Ok(None);
        };

        let loaded = if path.is_empty() {
            Err(TemplateError::EmptyPath)
        } else {
            self.templates.load(&format!("{}{}", self.config.template_root, path))
        };

        loaded.map(Some).map_err(|source| ScreenError::Template {
            screen: format!("{:?}", metadata.key),
            source,
        })
    }

    fn try_show(&mut self, key: K, animate: bool, add_to_history: bool) -> Result<(), ScreenError> {
        let controller = self.controllers.get(&key).ok_or_else(|| unknown(key))?;
        if controller.state() != ScreenState::Hidden {
            debug!("Show of {:?} ignored ({:?})", key, controller.state());
            return Ok(());
        }
        let category = controller.category();

        if add_to_history {
            if let Some(current) = self.visible.first().copied().filter(|current| *current != key) {
                self.history.push(current);
            }
        }

        self.stacks.push(key, category);
        self.stacks.log_state();

        let instance = self.instances.get_mut(&key).ok_or_else(|| unknown(key))?;
        instance.screen_mut().on_before_show();
        let animation = instance.screen().show_animation();
        let duration = instance
            .screen()
            .animation_duration()
            .unwrap_or(self.config.animation_duration);

        let controller = self.controllers.get_mut(&key).ok_or_else(|| unknown(key))?;
        let status = controller.show(&mut *self.animator, animation, duration, animate, None);

        if status == TransitionStatus::Completed {
            self.apply_transition(key, TransitionKind::Show);
        }
        Ok(())
    }

    fn try_hide(&mut self, key: K, animate: bool) -> Result<(), ScreenError> {
        let controller = self.controllers.get(&key).ok_or_else(|| unknown(key))?;
        if controller.state() != ScreenState::Visible {
            debug!("Hide of {:?} ignored ({:?})", key, controller.state());
            return Ok(());
        }
        let category = controller.category();

        self.stacks.pop_specific(key, category);

        let instance = self.instances.get_mut(&key).ok_or_else(|| unknown(key))?;
        instance.screen_mut().on_before_hide();
        let animation = instance.screen().hide_animation();
        let duration = instance
            .screen()
            .animation_duration()
            .unwrap_or(self.config.animation_duration);

        let controller = self.controllers.get_mut(&key).ok_or_else(|| unknown(key))?;
        let status = controller.hide(&mut *self.animator, animation, duration, animate, None);

        if status == TransitionStatus::Completed {
            self.apply_transition(key, TransitionKind::Hide);
        }
        Ok(())
    }

    fn hide_where(&mut self, animate: bool, mut filter: impl FnMut(K, ScreenCategory) -> bool) {
        let targets: Vec<K> = self
            .visible
            .iter()
            .copied()
            .filter(|key| {
                self.instances
                    .get(key)
                    .is_some_and(|instance| filter(*key, instance.category()))
            })
            .collect();

        for key in targets {
            self.hide_screen(key, animate);
        }
    }

    // Runs after the controller has settled; updates orchestrator state
    // and queues the event last.
    fn apply_transition(&mut self, key: K, kind: TransitionKind) {
        let Some(instance) = self.instances.get_mut(&key) else {
            return;
        };

        match kind {
            TransitionKind::Show => {
                instance.set_visible(true);
                instance.screen_mut().on_after_show();
                if !self.visible.contains(&key) {
                    self.visible.push(key);
                }
                self.sort_visible();
                self.apply_render_order();
                self.events.push(ScreenEvent::Shown(key));
            }
            TransitionKind::Hide => {
                instance.set_visible(false);
                instance.screen_mut().on_after_hide();
                self.visible.retain(|visible| *visible != key);
                self.events.push(ScreenEvent::Hidden(key));
                if self.visible.is_empty() {
                    self.events.push(ScreenEvent::AllHidden);
                }
            }
        }
    }

    fn priority_of(&self, key: K) -> i32 {
        self.instances.get(&key).map_or(i32::MIN, ScreenInstance::priority)
    }

    fn sort_visible(&mut self) {
        let instances = &self.instances;
        self.visible
            .sort_by_key(|key| Reverse(instances.get(key).map_or(i32::MIN, ScreenInstance::priority)));
    }

    // Lowest priority is raised first so the highest ends up on top
    fn apply_render_order(&mut self) {
        let Some(root) = self.root.as_mut() else {
            return;
        };

        let mut ordered: Vec<&ScreenController<K>> = self
            .creation_order
            .iter()
            .filter_map(|key| self.controllers.get(key))
            .collect();
        ordered.sort_by_key(|controller| controller.priority());

        for controller in ordered {
            root.bring_to_front(controller.container().id());
        }
    }
}

impl<K: ScreenKey> Drop for ScreenOrchestrator<K> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<K: ScreenKey> fmt::Debug for ScreenOrchestrator<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenOrchestrator")
            .field("screens", &self.creation_order)
            .field("visible", &self.visible)
            .field("history", &self.history)
            .field("initialized", &self.is_initialized())
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

fn unknown<K: ScreenKey>(key: K) -> ScreenError {
    ScreenError::UnknownScreen(format!("{:?}", key))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::animation::{Animation, Completion, ImmediateAnimator, TimedAnimator};
    use crate::core::render::{Element, InMemoryTemplates, ScreenContainer};
    use crate::core::screen::PlainScreen;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum Ui {
        Splash,
        Maintenance,
        Loading,
        Confirm,
        Reward,
        Toast,
        MainMenu,
        Settings,
        Shop,
        Hud,
    }

    impl ScreenKey for Ui {}

    const CATALOGUE: &[(Ui, ScreenCategory, i32)] = &[
        (Ui::Splash, ScreenCategory::System, 100),
        (Ui::Loading, ScreenCategory::Overlay, 90),
        (Ui::Confirm, ScreenCategory::Modal, 50),
        (Ui::Reward, ScreenCategory::Popup, 40),
        (Ui::Toast, ScreenCategory::Popup, 30),
        (Ui::MainMenu, ScreenCategory::Screen, 10),
        (Ui::Settings, ScreenCategory::Screen, 12),
        (Ui::Shop, ScreenCategory::Screen, 11),
        (Ui::Hud, ScreenCategory::Persistent, 0),
    ];

    //--- Fixtures ---------------------------------------------------------

    // Parks completions so tests decide when each animation ends
    struct ManualAnimator<K: ScreenKey> {
        parked: Rc<RefCell<Vec<Completion<K>>>>,
    }

    impl<K: ScreenKey> ManualAnimator<K> {
        fn new() -> (Self, Rc<RefCell<Vec<Completion<K>>>>) {
            let parked = Rc::new(RefCell::new(Vec::new()));
            (Self { parked: Rc::clone(&parked) }, parked)
        }
    }

    impl<K: ScreenKey> Animator<K> for ManualAnimator<K> {
        fn animate(
            &mut self,
            _container: &mut ScreenContainer,
            _animation: Animation,
            _duration: f32,
            completion: Completion<K>,
        ) {
            self.parked.borrow_mut().push(completion);
        }
    }

    fn finish_all<K: ScreenKey>(parked: &Rc<RefCell<Vec<Completion<K>>>>) {
        let pending: Vec<_> = parked.borrow_mut().drain(..).collect();
        for completion in pending {
            completion.complete();
        }
    }

    fn build<K: ScreenKey>(
        entries: &[(K, ScreenCategory, i32)],
        animator: impl Animator<K> + 'static,
    ) -> ScreenOrchestrator<K> {
        let mut registry = ScreenRegistry::new();
        for &(key, category, priority) in entries {
            registry
                .register(ScreenMetadata::new(key, category, priority), || PlainScreen)
                .unwrap();
        }

        let mut orchestrator = OrchestratorBuilder::new(registry).with_animator(animator).build();
        orchestrator.initialize(RenderRoot::new());
        orchestrator.initialize_screens();
        orchestrator
    }

    fn catalogue() -> ScreenOrchestrator<Ui> {
        build(CATALOGUE, ImmediateAnimator)
    }

    // Records lifecycle hooks and accumulates update time
    struct Tracked {
        log: Rc<RefCell<Vec<&'static str>>>,
        elapsed: f32,
    }

    impl Screen<Ui> for Tracked {
        fn on_initialize(&mut self, controller: &mut ScreenController<Ui>) {
            controller.add_element(Element::new("tracked"));
            self.log.borrow_mut().push("initialize");
        }

        fn on_before_show(&mut self) {
            self.log.borrow_mut().push("before_show");
        }

        fn on_after_show(&mut self) {
            self.log.borrow_mut().push("after_show");
        }

        fn on_before_hide(&mut self) {
            self.log.borrow_mut().push("before_hide");
        }

        fn on_after_hide(&mut self) {
            self.log.borrow_mut().push("after_hide");
        }

        fn update(&mut self, delta_time: f32) {
            self.elapsed += delta_time;
        }

        fn on_dispose(&mut self) {
            self.log.borrow_mut().push("dispose");
        }
    }

    fn tracked(animator: impl Animator<Ui> + 'static) -> (ScreenOrchestrator<Ui>, Rc<RefCell<Vec<&'static str>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let shared = Rc::clone(&log);

        let mut registry = ScreenRegistry::new();
        registry
            .register(ScreenMetadata::new(Ui::Shop, ScreenCategory::Screen, 10), move || Tracked {
                log: Rc::clone(&shared),
                elapsed: 0.0,
            })
            .unwrap();
        registry
            .register(ScreenMetadata::new(Ui::Hud, ScreenCategory::Persistent, 0), || PlainScreen)
            .unwrap();

        let mut orchestrator = OrchestratorBuilder::new(registry).with_animator(animator).build();
        orchestrator.initialize(RenderRoot::new());
        orchestrator.initialize_screens();
        (orchestrator, log)
    }

    //--- Initialization ---------------------------------------------------

    #[test]
    fn screens_require_bound_root() {
        let mut registry = ScreenRegistry::new();
        registry
            .register(ScreenMetadata::new(Ui::MainMenu, ScreenCategory::Screen, 10), || PlainScreen)
            .unwrap();
        let mut orchestrator = OrchestratorBuilder::new(registry).build();

        orchestrator.initialize_screens();
        assert!(orchestrator.controller(Ui::MainMenu).is_none());
        assert!(!orchestrator.is_initialized());

        orchestrator.initialize(RenderRoot::new());
        orchestrator.initialize_screens();
        assert!(orchestrator.controller(Ui::MainMenu).is_some());
        assert!(orchestrator.is_initialized());
    }

    #[test]
    fn repeated_initialization_is_ignored() {
        let mut orchestrator = catalogue();

        let mut foreign = RenderRoot::new();
        foreign.attach("foreign");
        orchestrator.initialize(foreign);
        orchestrator.initialize_screens();

        let root = orchestrator.render_root().unwrap();
        assert_eq!(root.len(), CATALOGUE.len());
        assert!(!root.front_to_back().contains(&"foreign"));
    }

    #[test]
    fn template_failure_does_not_stop_other_screens() {
        let templates = InMemoryTemplates::new().with(
            "UI/Templates/main_menu",
            Template::new(Element::new("menu").with_child(Element::new("screen-container"))),
        );

        let mut registry = ScreenRegistry::new();
        registry
            .register(
                ScreenMetadata::new(Ui::MainMenu, ScreenCategory::Screen, 10).with_template("main_menu"),
                || PlainScreen,
            )
            .unwrap();
        registry
            .register(
                ScreenMetadata::new(Ui::Shop, ScreenCategory::Screen, 11).with_template("missing"),
                || PlainScreen,
            )
            .unwrap();
        registry
            .register(
                ScreenMetadata::new(Ui::Settings, ScreenCategory::Screen, 12).with_template(""),
                || PlainScreen,
            )
            .unwrap();

        let mut orchestrator = OrchestratorBuilder::new(registry).with_templates(templates).build();
        orchestrator.initialize(RenderRoot::new());
        orchestrator.initialize_screens();

        let menu = orchestrator.controller(Ui::MainMenu).unwrap();
        assert!(menu
            .element_with_class("screen-container", "screen-mainmenu")
            .is_some());
        assert!(orchestrator.controller(Ui::Shop).unwrap().elements().is_empty());
        assert!(orchestrator.controller(Ui::Settings).unwrap().elements().is_empty());

        // Empty screens still show
        orchestrator.show_screen(Ui::Shop, false, false);
        assert!(orchestrator.is_screen_visible(Ui::Shop));
    }

    //--- Show / Hide ------------------------------------------------------

    #[test]
    fn unknown_screen_is_a_no_op() {
        let mut orchestrator = build(&[(Ui::MainMenu, ScreenCategory::Screen, 10)], ImmediateAnimator);

        orchestrator.show_screen(Ui::Shop, false, true);
        orchestrator.hide_screen(Ui::Shop, false);

        assert!(orchestrator.visible_screens().is_empty());
        assert!(orchestrator.events().is_empty());
        assert!(orchestrator.history().is_empty());
    }

    #[test]
    fn double_show_emits_single_event() {
        let mut orchestrator = catalogue();

        orchestrator.show_screen(Ui::MainMenu, false, true);
        orchestrator.show_screen(Ui::MainMenu, false, true);

        assert_eq!(orchestrator.drain_events(), vec![ScreenEvent::Shown(Ui::MainMenu)]);
        assert!(orchestrator.history().is_empty());
    }

    #[test]
    fn double_animated_show_starts_one_transition() {
        let (animator, parked) = ManualAnimator::new();
        let mut orchestrator = build(CATALOGUE, animator);

        orchestrator.show_screen(Ui::Reward, true, false);
        orchestrator.show_screen(Ui::Reward, true, false);
        assert_eq!(parked.borrow().len(), 1);

        finish_all(&parked);
        orchestrator.update(0.0);
        assert_eq!(orchestrator.drain_events(), vec![ScreenEvent::Shown(Ui::Reward)]);
    }

    #[test]
    fn sync_show_emits_before_return_animated_after_completion() {
        let (animator, parked) = ManualAnimator::new();
        let mut orchestrator = build(CATALOGUE, animator);

        orchestrator.show_screen(Ui::Loading, false, false);
        assert_eq!(orchestrator.drain_events(), vec![ScreenEvent::Shown(Ui::Loading)]);
        assert!(orchestrator.is_screen_visible(Ui::Loading));

        orchestrator.hide_screen(Ui::Loading, false);
        orchestrator.drain_events();

        orchestrator.show_screen(Ui::Loading, true, false);
        assert!(orchestrator.events().is_empty());
        assert!(!orchestrator.is_screen_visible(Ui::Loading));
        assert_eq!(orchestrator.controller(Ui::Loading).unwrap().state(), ScreenState::Showing);

        // Ticking without completion changes nothing
        orchestrator.update(0.016);
        assert!(orchestrator.events().is_empty());

        finish_all(&parked);
        assert!(orchestrator.events().is_empty());

        orchestrator.update(0.016);
        assert_eq!(orchestrator.drain_events(), vec![ScreenEvent::Shown(Ui::Loading)]);
        assert!(orchestrator.is_screen_visible(Ui::Loading));
    }

    #[test]
    fn timed_animator_completes_on_update() {
        let mut orchestrator = build(CATALOGUE, TimedAnimator::new());

        orchestrator.show_screen(Ui::Toast, true, false);
        orchestrator.update(0.1);
        assert!(!orchestrator.is_screen_visible(Ui::Toast));

        orchestrator.update(0.25);
        assert!(orchestrator.is_screen_visible(Ui::Toast));
        assert_eq!(orchestrator.drain_events(), vec![ScreenEvent::Shown(Ui::Toast)]);
    }

    #[test]
    fn hiding_last_screen_emits_all_hidden() {
        let mut orchestrator = catalogue();

        orchestrator.show_screen(Ui::MainMenu, false, false);
        orchestrator.show_screen(Ui::Hud, false, false);
        orchestrator.drain_events();

        orchestrator.hide_screen(Ui::MainMenu, false);
        assert_eq!(orchestrator.drain_events(), vec![ScreenEvent::Hidden(Ui::MainMenu)]);

        orchestrator.hide_screen(Ui::Hud, false);
        assert_eq!(
            orchestrator.drain_events(),
            vec![ScreenEvent::Hidden(Ui::Hud), ScreenEvent::AllHidden]
        );
    }

    #[test]
    fn hide_leaves_category_stack_at_request() {
        let (animator, parked) = ManualAnimator::new();
        let mut orchestrator = build(CATALOGUE, animator);

        orchestrator.show_screen(Ui::Confirm, false, false);
        assert!(orchestrator.is_blocked_by_higher_category(ScreenCategory::Screen));

        orchestrator.hide_screen(Ui::Confirm, true);
        assert!(!orchestrator.is_blocked_by_higher_category(ScreenCategory::Screen));
        assert!(orchestrator.is_screen_visible(Ui::Confirm));

        finish_all(&parked);
        orchestrator.update(0.0);
        assert!(!orchestrator.is_screen_visible(Ui::Confirm));
    }

    #[test]
    fn lifecycle_hooks_run_around_transitions() {
        let (mut orchestrator, log) = tracked(ImmediateAnimator);

        orchestrator.show_screen(Ui::Shop, false, false);
        orchestrator.hide_screen(Ui::Shop, false);

        assert_eq!(
            *log.borrow(),
            vec!["initialize", "before_show", "after_show", "before_hide", "after_hide"]
        );
        assert!(orchestrator.controller(Ui::Shop).unwrap().element("tracked").is_some());
    }

    //--- Ordering ---------------------------------------------------------

    #[test]
    fn visible_set_and_render_order_follow_priority() {
        #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
        enum Layer {
            High,
            Low,
            Mid,
        }

        impl ScreenKey for Layer {}

        let mut orchestrator = build(
            &[
                (Layer::High, ScreenCategory::Persistent, 5),
                (Layer::Low, ScreenCategory::Persistent, 1),
                (Layer::Mid, ScreenCategory::Persistent, 3),
            ],
            ImmediateAnimator,
        );

        orchestrator.show_screen(Layer::High, false, false);
        orchestrator.show_screen(Layer::Low, false, false);
        orchestrator.show_screen(Layer::Mid, false, false);

        assert_eq!(orchestrator.visible_screens(), vec![Layer::High, Layer::Mid, Layer::Low]);
        assert_eq!(
            orchestrator.render_root().unwrap().front_to_back(),
            vec!["screen-high", "screen-mid", "screen-low"]
        );
    }

    #[test]
    fn screen_and_modal_scenario() {
        let mut orchestrator = build(
            &[
                (Ui::MainMenu, ScreenCategory::Screen, 10),
                (Ui::Confirm, ScreenCategory::Modal, 50),
            ],
            ImmediateAnimator,
        );

        orchestrator.show_screen(Ui::MainMenu, false, true);
        orchestrator.show_screen(Ui::Confirm, false, true);
        assert_eq!(orchestrator.visible_screens(), vec![Ui::Confirm, Ui::MainMenu]);
        assert!(orchestrator.is_blocked_by_higher_category(ScreenCategory::Screen));

        orchestrator.hide_screen(Ui::Confirm, false);
        assert_eq!(orchestrator.visible_screens(), vec![Ui::MainMenu]);
        assert!(!orchestrator.is_blocked_by_higher_category(ScreenCategory::Screen));
    }

    #[test]
    fn hard_replaced_screen_stays_on_screen_but_leaves_stack() {
        let mut orchestrator = build(
            &[
                (Ui::Splash, ScreenCategory::System, 100),
                (Ui::Maintenance, ScreenCategory::System, 110),
                (Ui::MainMenu, ScreenCategory::Screen, 10),
            ],
            ImmediateAnimator,
        );

        orchestrator.show_screen(Ui::Splash, false, false);
        orchestrator.show_screen(Ui::Maintenance, false, false);
        let stacks = orchestrator.category_stacks();
        assert_eq!(stacks.entries(ScreenCategory::System), &[Ui::Maintenance]);
        assert!(!stacks.is_visible(Ui::Splash));

        orchestrator.hide_screen(Ui::Maintenance, false);

        // Stack bookkeeping is advisory: the replaced screen keeps its state
        assert!(orchestrator.is_screen_visible(Ui::Splash));
        assert_eq!(orchestrator.visible_screens(), vec![Ui::Splash]);
        assert_eq!(orchestrator.category_stacks().depth(ScreenCategory::System), 0);
        assert!(!orchestrator.is_blocked_by_higher_category(ScreenCategory::Screen));
    }

    #[test]
    fn screens_by_priority_covers_hidden_screens() {
        let orchestrator = catalogue();
        let ordered = orchestrator.screens_by_priority();

        assert_eq!(ordered.len(), CATALOGUE.len());
        assert_eq!(ordered.first(), Some(&Ui::Splash));
        assert_eq!(ordered.last(), Some(&Ui::Hud));
    }

    #[test]
    fn priority_change_reorders_visible_set() {
        let mut orchestrator = catalogue();
        orchestrator.show_screen(Ui::Hud, false, false);
        orchestrator.show_screen(Ui::MainMenu, false, false);
        assert_eq!(orchestrator.visible_screens(), vec![Ui::MainMenu, Ui::Hud]);

        orchestrator.set_screen_priority(Ui::Hud, 500);

        assert_eq!(orchestrator.visible_screens(), vec![Ui::Hud, Ui::MainMenu]);
        assert_eq!(orchestrator.screen(Ui::Hud).unwrap().priority(), 500);
        assert_eq!(orchestrator.render_root().unwrap().front_to_back()[0], "screen-hud");
    }

    //--- Bulk Operations --------------------------------------------------

    fn show_everything(orchestrator: &mut ScreenOrchestrator<Ui>) {
        for &(key, _, _) in CATALOGUE {
            orchestrator.show_screen(key, false, false);
        }
        orchestrator.drain_events();
    }

    #[test]
    fn hide_all_popups_only_touches_popups() {
        let mut orchestrator = catalogue();
        show_everything(&mut orchestrator);

        orchestrator.hide_all_popups(false);

        assert!(!orchestrator.is_screen_visible(Ui::Reward));
        assert!(!orchestrator.is_screen_visible(Ui::Toast));
        assert!(orchestrator.is_screen_visible(Ui::Confirm));
        assert_eq!(
            orchestrator.drain_events(),
            vec![ScreenEvent::Hidden(Ui::Reward), ScreenEvent::Hidden(Ui::Toast)]
        );
    }

    #[test]
    fn hide_all_game_screens_keeps_system_and_persistent() {
        let mut orchestrator = catalogue();
        show_everything(&mut orchestrator);

        orchestrator.hide_all_game_screens(false);

        assert_eq!(orchestrator.visible_screens(), vec![Ui::Splash, Ui::Hud]);
    }

    #[test]
    fn category_and_type_filters() {
        let mut orchestrator = catalogue();
        show_everything(&mut orchestrator);

        orchestrator.hide_all_modals(false);
        assert!(!orchestrator.is_screen_visible(Ui::Confirm));

        orchestrator.hide_screens_in_category(ScreenCategory::Overlay, false);
        assert!(!orchestrator.is_screen_visible(Ui::Loading));

        orchestrator.hide_screens_of_type(Ui::Shop, false);
        assert!(!orchestrator.is_screen_visible(Ui::Shop));
        assert!(orchestrator.is_screen_visible(Ui::Settings));
    }

    #[test]
    fn hide_all_screens_ends_with_all_hidden() {
        let mut orchestrator = catalogue();
        show_everything(&mut orchestrator);

        orchestrator.hide_all_screens(false);

        assert!(orchestrator.visible_screens().is_empty());
        let events = orchestrator.drain_events();
        assert_eq!(events.len(), CATALOGUE.len() + 1);
        assert_eq!(events.last(), Some(&ScreenEvent::AllHidden));
    }

    //--- Navigation -------------------------------------------------------

    #[test]
    fn go_back_with_empty_history_does_nothing() {
        let mut orchestrator = catalogue();
        orchestrator.show_screen(Ui::MainMenu, false, true);
        orchestrator.drain_events();

        assert!(!orchestrator.go_back(false));
        assert_eq!(orchestrator.visible_screens(), vec![Ui::MainMenu]);
        assert!(orchestrator.events().is_empty());
    }

    #[test]
    fn go_back_restores_previous_screen() {
        let mut orchestrator = catalogue();

        orchestrator.show_screen(Ui::MainMenu, false, true);
        orchestrator.show_screen(Ui::Settings, false, true);
        assert_eq!(orchestrator.history(), &[Ui::MainMenu]);

        orchestrator.hide_screen(Ui::MainMenu, false);
        orchestrator.drain_events();

        assert!(orchestrator.go_back(false));
        assert!(orchestrator.history().is_empty());
        assert_eq!(orchestrator.visible_screens(), vec![Ui::MainMenu]);
        assert_eq!(
            orchestrator.drain_events(),
            vec![
                ScreenEvent::Hidden(Ui::Settings),
                ScreenEvent::AllHidden,
                ScreenEvent::Shown(Ui::MainMenu),
            ]
        );
    }

    #[test]
    fn go_back_keeps_target_already_on_top() {
        let (animator, parked) = ManualAnimator::new();
        let mut orchestrator = build(CATALOGUE, animator);

        orchestrator.show_screen(Ui::MainMenu, false, true);
        orchestrator.show_screen(Ui::Confirm, false, true);
        orchestrator.hide_screen(Ui::Confirm, false);
        assert_eq!(orchestrator.history(), &[Ui::MainMenu]);
        orchestrator.drain_events();

        assert!(orchestrator.go_back(true));
        finish_all(&parked);
        orchestrator.update(0.0);

        assert!(orchestrator.is_screen_visible(Ui::MainMenu));
        assert_eq!(orchestrator.visible_screens(), vec![Ui::MainMenu]);
        assert!(orchestrator.history().is_empty());
        assert!(orchestrator.events().is_empty());
    }

    #[test]
    fn go_back_animated_swaps_screens() {
        let (animator, parked) = ManualAnimator::new();
        let mut orchestrator = build(CATALOGUE, animator);

        orchestrator.show_screen(Ui::MainMenu, false, true);
        orchestrator.show_screen(Ui::Settings, false, true);
        orchestrator.hide_screen(Ui::MainMenu, false);
        orchestrator.drain_events();

        assert!(orchestrator.go_back(true));
        assert_eq!(parked.borrow().len(), 2);
        assert!(orchestrator.events().is_empty());

        finish_all(&parked);
        orchestrator.update(0.0);

        assert_eq!(orchestrator.visible_screens(), vec![Ui::MainMenu]);
        assert_eq!(
            orchestrator.drain_events(),
            vec![
                ScreenEvent::Hidden(Ui::Settings),
                ScreenEvent::AllHidden,
                ScreenEvent::Shown(Ui::MainMenu),
            ]
        );
    }

    #[test]
    fn history_records_topmost_only_when_requested() {
        let mut orchestrator = catalogue();

        orchestrator.show_screen(Ui::MainMenu, false, true);
        orchestrator.show_screen(Ui::Hud, false, false);
        orchestrator.show_screen(Ui::Shop, false, true);
        assert_eq!(orchestrator.history(), &[Ui::MainMenu]);

        orchestrator.clear_history();
        assert!(orchestrator.history().is_empty());
    }

    //--- Queries ----------------------------------------------------------

    #[test]
    fn typed_lookup_and_updates() {
        let (mut orchestrator, _log) = tracked(ImmediateAnimator);

        assert!(orchestrator.screen_of::<Tracked>().is_some());
        assert!(orchestrator.screen_as::<Tracked>(Ui::Hud).is_none());
        assert!(orchestrator.screen_as::<PlainScreen>(Ui::Hud).is_some());

        orchestrator.update(1.0);
        assert_eq!(orchestrator.screen_as::<Tracked>(Ui::Shop).unwrap().elapsed, 0.0);

        orchestrator.show_screen(Ui::Shop, false, false);
        orchestrator.update(0.5);
        orchestrator.update(0.25);
        assert_eq!(orchestrator.screen_of::<Tracked>().unwrap().elapsed, 0.75);

        if let Some(shop) = orchestrator.screen_as_mut::<Tracked>(Ui::Shop) {
            shop.elapsed = 0.0;
        }
        assert_eq!(orchestrator.screen_as::<Tracked>(Ui::Shop).unwrap().elapsed, 0.0);
    }

    #[test]
    fn events_allow_reentrant_requests() {
        let mut orchestrator = catalogue();
        orchestrator.show_screen(Ui::Splash, false, false);

        for event in orchestrator.drain_events() {
            if event == ScreenEvent::Shown(Ui::Splash) {
                orchestrator.hide_screen(Ui::Splash, false);
                orchestrator.show_screen(Ui::MainMenu, false, false);
            }
        }

        assert_eq!(orchestrator.visible_screens(), vec![Ui::MainMenu]);
    }

    //--- Disposal ---------------------------------------------------------

    #[test]
    fn dispose_settles_transitions_and_releases_screens() {
        let (animator, parked) = ManualAnimator::new();
        let (mut orchestrator, log) = tracked(animator);

        orchestrator.show_screen(Ui::Shop, true, false);
        orchestrator.dispose();

        assert_eq!(*log.borrow(), vec!["initialize", "before_show", "dispose"]);
        assert!(orchestrator.is_disposed());
        assert!(orchestrator.render_root().unwrap().is_empty());
        assert!(orchestrator.controller(Ui::Shop).is_none());

        // Late completion and further requests are ignored
        finish_all(&parked);
        assert_eq!(orchestrator.process_completions(), 0);
        orchestrator.show_screen(Ui::Shop, false, false);
        assert!(orchestrator.events().is_empty());

        orchestrator.dispose();
        orchestrator.initialize_screens();
        assert!(orchestrator.controller(Ui::Shop).is_none());
    }
}
