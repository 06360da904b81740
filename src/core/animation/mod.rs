//=========================================================================
// Animation
//=========================================================================
//
// Contract between screen controllers and the host's animation backend.
//
// Flow:
//   ScreenController::show()
//     → Animation::prepare(transform)
//     → Animator::animate(container, animation, duration, completion)
//     → ... later ...
//     → Completion::complete()
//
// The tween math itself lives in the host; this module only names the
// visual operations and defines how completion is signalled.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::render::{ScreenContainer, Transform};
use crate::core::screen::ScreenKey;

//=== Module Declarations =================================================

mod animators;
mod completion;

//=== Public API ==========================================================

pub use animators::{ImmediateAnimator, TimedAnimator};
pub use completion::{Completion, TransitionDone, TransitionKind};

//=== Edge ================================================================

/// Surface edge used by slide animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    /// Offset, in container extents, that places the container just past
    /// this edge.
    pub const fn offset(self) -> (f32, f32) {
        match self {
            Edge::Top => (0.0, -1.0),
            Edge::Right => (1.0, 0.0),
            Edge::Bottom => (0.0, 1.0),
            Edge::Left => (-1.0, 0.0),
        }
    }
}

//=== Animation ===========================================================

/// Named visual operation performed by an [`Animator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Animation {
    FadeIn,
    FadeOut,
    ScaleIn,
    ScaleOut,
    SlideIn(Edge),
    SlideOut(Edge),
}

impl Animation {
    /// Returns true for animations that bring a screen on.
    pub const fn is_entrance(self) -> bool {
        matches!(self, Animation::FadeIn | Animation::ScaleIn | Animation::SlideIn(_))
    }

    /// Sets the starting transform of an entrance animation.
    ///
    /// Exit animations start from the current transform and leave it as is.
    pub fn prepare(self, transform: &mut Transform) {
        match self {
            Animation::FadeIn => {
                transform.opacity = 0.0;
            }
            Animation::ScaleIn => {
                transform.opacity = 0.0;
                transform.scale = 0.0;
            }
            Animation::SlideIn(edge) => {
                transform.opacity = 1.0;
                transform.translate = edge.offset();
            }
            Animation::FadeOut | Animation::ScaleOut | Animation::SlideOut(_) => {}
        }
    }

    /// Transform at the end of the animation.
    pub fn target(self) -> Transform {
        match self {
            Animation::FadeOut => Transform {
                opacity: 0.0,
                ..Transform::IDENTITY
            },
            Animation::ScaleOut => Transform {
                opacity: 0.0,
                scale: 0.0,
                ..Transform::IDENTITY
            },
            Animation::SlideOut(edge) => Transform {
                translate: edge.offset(),
                ..Transform::IDENTITY
            },
            Animation::FadeIn | Animation::ScaleIn | Animation::SlideIn(_) => Transform::IDENTITY,
        }
    }
}

//=== Animator Trait ======================================================

/// Performs screen transitions on behalf of controllers.
///
/// Implementations must eventually consume every [`Completion`] they
/// receive, on the update thread. Completing inside `animate` is allowed;
/// the orchestrator still applies the result on its next completion pass.
pub trait Animator<K: ScreenKey> {
    /// Starts `animation` on `container` over `duration` seconds.
    fn animate(
        &mut self,
        container: &mut ScreenContainer,
        animation: Animation,
        duration: f32,
        completion: Completion<K>,
    );

    /// Advances time-driven animations. Called once per orchestrator tick.
    fn advance(&mut self, _delta_time: f32) {}
}

//=========================================================================
// Unit Tests
//=========================================================================
