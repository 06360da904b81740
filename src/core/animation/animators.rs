//=========================================================================
// Built-in Animators
//=========================================================================
//
// ImmediateAnimator: jumps to the end state and completes at once.
// TimedAnimator:     holds completions until their duration has elapsed
//                    on the orchestrator clock.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::{Animation, Animator, Completion};
use crate::core::render::ScreenContainer;
use crate::core::screen::ScreenKey;

//=== ImmediateAnimator ===================================================

/// Applies the final transform and completes within `animate`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateAnimator;

impl<K: ScreenKey> Animator<K> for ImmediateAnimator {
    fn animate(
        &mut self,
        container: &mut ScreenContainer,
        animation: Animation,
        _duration: f32,
        completion: Completion<K>,
    ) {
        *container.transform_mut() = animation.target();
        completion.complete();
    }
}

//=== TimedAnimator =======================================================

struct PendingTransition<K: ScreenKey> {
    remaining: f32,
    completion: Completion<K>,
}

/// Completes transitions after their duration, driven by `advance`.
///
/// Visual interpolation is left to the host renderer, which reads the
/// starting transform prepared by the controller.
pub struct TimedAnimator<K: ScreenKey> {
    pending: Vec<PendingTransition<K>>,
}

impl<K: ScreenKey> TimedAnimator<K> {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    /// Number of transitions still running.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}

impl<K: ScreenKey> Default for TimedAnimator<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ScreenKey> Animator<K> for TimedAnimator<K> {
    fn animate(
        &mut self,
        _container: &mut ScreenContainer,
        animation: Animation,
        duration: f32,
        completion: Completion<K>,
    ) {
        trace!("{:?} on {:?} for {}s", animation, completion.key(), duration);

        if duration <= 0.0 {
            completion.complete();
            return;
        }

        self.pending.push(PendingTransition {
            remaining: duration,
            completion,
        });
    }

    fn advance(&mut self, delta_time: f32) {
        for transition in &mut self.pending {
            transition.remaining -= delta_time;
        }

        // Completions fire in start order
        let (finished, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|t| t.remaining <= 0.0);

        self.pending = running;
        for transition in finished {
            transition.completion.complete();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::animation::{TransitionDone, TransitionKind};
    use crate::core::render::{RenderRoot, Transform};
    use crossbeam_channel::unbounded;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScreen {
        A,
        B,
    }

    impl ScreenKey for TestScreen {}

    fn container() -> ScreenContainer {
        let mut root = RenderRoot::new();
        let id = root.attach("screen-a");
        ScreenContainer::new(id, "screen-a")
    }

    #[test]
    fn immediate_completes_and_applies_target() {
        let (tx, rx) = unbounded();
        let mut container = container();
        let mut animator = ImmediateAnimator;

        Animator::<TestScreen>::animate(
            &mut animator,
            &mut container,
            Animation::FadeOut,
            0.3,
            Completion::new(TestScreen::A, TransitionKind::Hide, tx),
        );

        assert_eq!(container.transform().opacity, 0.0);
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn timed_waits_for_duration() {
        let (tx, rx) = unbounded();
        let mut container = container();
        let mut animator = TimedAnimator::new();

        animator.animate(
            &mut container,
            Animation::FadeIn,
            0.3,
            Completion::new(TestScreen::A, TransitionKind::Show, tx.clone()),
        );
        animator.animate(
            &mut container,
            Animation::FadeIn,
            0.5,
            Completion::new(TestScreen::B, TransitionKind::Show, tx),
        );
        assert_eq!(animator.in_flight(), 2);

        animator.advance(0.2);
        assert!(rx.try_recv().is_err());

        animator.advance(0.2);
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![TransitionDone {
                key: TestScreen::A,
                kind: TransitionKind::Show
            }]
        );
        assert_eq!(animator.in_flight(), 1);

        animator.advance(0.2);
        assert_eq!(rx.try_iter().count(), 1);
        assert_eq!(animator.in_flight(), 0);
        assert_eq!(container.transform(), Transform::IDENTITY);
    }

    #[test]
    fn timed_completes_zero_duration_immediately() {
        let (tx, rx) = unbounded();
        let mut container = container();
        let mut animator = TimedAnimator::new();

        animator.animate(
            &mut container,
            Animation::ScaleIn,
            0.0,
            Completion::new(TestScreen::A, TransitionKind::Show, tx),
        );

        assert_eq!(animator.in_flight(), 0);
        assert_eq!(rx.try_iter().count(), 1);
    }
}
