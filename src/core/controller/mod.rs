//=========================================================================
// Screen Controller
//=========================================================================
//
// Owns one screen's persistent container and its visibility state machine.
//
// State machine:
//   Hidden ──show()──> Showing ──(done)──> Visible
//   Visible ──hide()──> Hiding ──(done)──> Hidden
//
// Requests made in any other state are dropped, never queued. The
// state machine is the only re-entrancy guard.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use crossbeam_channel::Sender;
use log::{debug, trace};

//=== Internal Dependencies ===============================================

use crate::core::animation::{Animation, Animator, Completion, TransitionDone, TransitionKind};
use crate::core::render::{Element, RenderRoot, ScreenContainer, Template};
use crate::core::screen::{ScreenCategory, ScreenKey};

//=== ScreenState =========================================================

/// Visibility state of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenState {
    #[default]
    Hidden,
    Showing,
    Visible,
    Hiding,
}

//=== TransitionStatus ====================================================

/// Outcome of a `show` or `hide` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStatus {
    /// The controller was not in the required state; nothing happened.
    Ignored,
    /// Handed to the animator; completes later.
    Pending,
    /// Completed before returning.
    Completed,
}

//=== Callbacks ===========================================================

/// One-shot callback run when a transition completes.
pub type OnComplete = Box<dyn FnOnce()>;

/// Listener notified with the controller's key.
pub type ControllerListener<K> = Box<dyn FnMut(K)>;

struct Listeners<K: ScreenKey> {
    shown: Vec<ControllerListener<K>>,
    hidden: Vec<ControllerListener<K>>,
    animation_started: Vec<ControllerListener<K>>,
    animation_completed: Vec<ControllerListener<K>>,
}

fn notify<K: ScreenKey>(listeners: &mut [ControllerListener<K>], key: K) {
    for listener in listeners {
        listener(key);
    }
}

//=== ScreenController ====================================================

/// Drives one screen's container through show and hide transitions.
pub struct ScreenController<K: ScreenKey> {
    key: K,
    category: ScreenCategory,
    priority: i32,
    state: ScreenState,
    container: ScreenContainer,
    completions: Sender<TransitionDone<K>>,
    on_complete: Option<OnComplete>,
    listeners: Listeners<K>,
}

impl<K: ScreenKey> ScreenController<K> {
    //--- Construction -----------------------------------------------------

    /// Creates the controller and attaches its container to `root`.
    ///
    /// The container starts inactive. If a template is given it is
    /// instantiated into the container; an element named
    /// `screen-container` inside it is tagged with the screen's class.
    pub fn new(
        key: K,
        category: ScreenCategory,
        priority: i32,
        template: Option<&Template>,
        root: &mut RenderRoot,
        completions: Sender<TransitionDone<K>>,
    ) -> Self {
        let slug = format!("{:?}", key).to_lowercase();
        let name = format!("screen-{}", slug);

        let mut container = ScreenContainer::new(root.attach(name.clone()), name.clone());
        container.add_class("ui-screen");
        container.add_class(format!("ui-screen--{}", slug));

        if let Some(template) = template {
            let mut instance = template.instantiate();
            if let Some(inner) = instance.find_mut("screen-container") {
                inner.add_class(name);
            }
            container.add(instance);
        }

        Self {
            key,
            category,
            priority,
            state: ScreenState::Hidden,
            container,
            completions,
            on_complete: None,
            listeners: Listeners {
                shown: Vec::new(),
                hidden: Vec::new(),
                animation_started: Vec::new(),
                animation_completed: Vec::new(),
            },
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn key(&self) -> K {
        self.key
    }

    pub fn category(&self) -> ScreenCategory {
        self.category
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Changes the priority. The orchestrator re-sorts afterwards.
    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == ScreenState::Visible
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, ScreenState::Showing | ScreenState::Hiding)
    }

    pub fn container(&self) -> &ScreenContainer {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut ScreenContainer {
        &mut self.container
    }

    //--- Listeners --------------------------------------------------------

    pub fn on_shown(&mut self, listener: impl FnMut(K) + 'static) {
        self.listeners.shown.push(Box::new(listener));
    }

    pub fn on_hidden(&mut self, listener: impl FnMut(K) + 'static) {
        self.listeners.hidden.push(Box::new(listener));
    }

    pub fn on_animation_started(&mut self, listener: impl FnMut(K) + 'static) {
        self.listeners.animation_started.push(Box::new(listener));
    }

    pub fn on_animation_completed(&mut self, listener: impl FnMut(K) + 'static) {
        self.listeners.animation_completed.push(Box::new(listener));
    }

    //--- Transitions ------------------------------------------------------

    /// Starts showing the screen.
    ///
    /// Ignored unless the controller is [`ScreenState::Hidden`]. With
    /// `animate == false` the transition completes before returning.
    pub fn show(
        &mut self,
        animator: &mut dyn Animator<K>,
        animation: Animation,
        duration: f32,
        animate: bool,
        on_complete: Option<OnComplete>,
    ) -> TransitionStatus {
        if self.state != ScreenState::Hidden {
            trace!("show({:?}) ignored in state {:?}", self.key, self.state);
            return TransitionStatus::Ignored;
        }

        self.state = ScreenState::Showing;
        self.on_complete = on_complete;
        notify(&mut self.listeners.animation_started, self.key);
        self.container.set_active(true);

        if animate {
            animation.prepare(self.container.transform_mut());
            let completion = Completion::new(self.key, TransitionKind::Show, self.completions.clone());
            animator.animate(&mut self.container, animation, duration, completion);
            TransitionStatus::Pending
        } else {
            self.complete_show();
            TransitionStatus::Completed
        }
    }

    /// Starts hiding the screen.
    ///
    /// Ignored unless the controller is [`ScreenState::Visible`].
    pub fn hide(
        &mut self,
        animator: &mut dyn Animator<K>,
        animation: Animation,
        duration: f32,
        animate: bool,
        on_complete: Option<OnComplete>,
    ) -> TransitionStatus {
        if self.state != ScreenState::Visible {
            trace!("hide({:?}) ignored in state {:?}", self.key, self.state);
            return TransitionStatus::Ignored;
        }

        self.state = ScreenState::Hiding;
        self.on_complete = on_complete;
        notify(&mut self.listeners.animation_started, self.key);

        if animate {
            let completion = Completion::new(self.key, TransitionKind::Hide, self.completions.clone());
            animator.animate(&mut self.container, animation, duration, completion);
            TransitionStatus::Pending
        } else {
            self.complete_hide();
            TransitionStatus::Completed
        }
    }

    /// Applies a completion delivered by the animator.
    ///
    /// Returns false for completions that do not match the in-flight
    /// transition, which are dropped.
    pub fn finish_transition(&mut self, kind: TransitionKind) -> bool {
        match (self.state, kind) {
            (ScreenState::Showing, TransitionKind::Show) => {
                self.complete_show();
                true
            }
            (ScreenState::Hiding, TransitionKind::Hide) => {
                self.complete_hide();
                true
            }
            (state, kind) => {
                debug!("Stale {:?} completion for {:?} in state {:?}", kind, self.key, state);
                false
            }
        }
    }

    /// Completes an in-flight transition immediately.
    ///
    /// Returns the direction that was completed, if any. A completion the
    /// animator delivers later is then stale and dropped.
    pub fn force_complete(&mut self) -> Option<TransitionKind> {
        match self.state {
            ScreenState::Showing => {
                self.complete_show();
                Some(TransitionKind::Show)
            }
            ScreenState::Hiding => {
                self.complete_hide();
                Some(TransitionKind::Hide)
            }
            ScreenState::Hidden | ScreenState::Visible => None,
        }
    }

    //--- Content Access ---------------------------------------------------

    /// First element with the given name.
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.container.query(name)
    }

    /// First element with the given name that also carries `class`.
    pub fn element_with_class(&self, name: &str, class: &str) -> Option<&Element> {
        self.container
            .query_all()
            .into_iter()
            .find(|element| element.name() == name && element.has_class(class))
    }

    /// Every element of the screen, depth-first.
    pub fn elements(&self) -> Vec<&Element> {
        self.container.query_all()
    }

    /// Replaces all content with a single element.
    pub fn set_custom_content(&mut self, content: Element) {
        self.container.clear();
        self.container.add(content);
    }

    pub fn add_element(&mut self, element: Element) {
        self.container.add(element);
    }

    /// Removes a top-level element by name.
    pub fn remove_element(&mut self, name: &str) -> Option<Element> {
        self.container.remove(name)
    }

    pub fn clear_content(&mut self) {
        self.container.clear();
    }

    //--- Internal Helpers -------------------------------------------------

    fn complete_show(&mut self) {
        self.state = ScreenState::Visible;
        self.container.reset_transform();

        notify(&mut self.listeners.shown, self.key);
        notify(&mut self.listeners.animation_completed, self.key);
        if let Some(on_complete) = self.on_complete.take() {
            on_complete();
        }
    }

    fn complete_hide(&mut self) {
        self.state = ScreenState::Hidden;
        self.container.set_active(false);
        self.container.reset_transform();

        notify(&mut self.listeners.hidden, self.key);
        notify(&mut self.listeners.animation_completed, self.key);
        if let Some(on_complete) = self.on_complete.take() {
            on_complete();
        }
    }
}

impl<K: ScreenKey> fmt::Debug for ScreenController<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenController")
            .field("key", &self.key)
            .field("category", &self.category)
            .field("priority", &self.priority)
            .field("state", &self.state)
            .field("container", &self.container.name())
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
