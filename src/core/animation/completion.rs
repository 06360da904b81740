//=========================================================================
// Transition Completion
//=========================================================================
//
// One-shot signal that a screen transition has finished.
//
// Architecture:
//   Animator ── Completion::complete() ──> Sender<TransitionDone<K>>
//                                                 ↓
//   ScreenOrchestrator::process_completions() ← Receiver
//
// A completion fires exactly once: `complete` consumes the handle, and a
// handle dropped without firing completes itself.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::screen::ScreenKey;

//=== TransitionKind ======================================================

/// Direction of a screen transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    Show,
    Hide,
}

//=== TransitionDone ======================================================

/// Message delivered when a transition finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionDone<K: ScreenKey> {
    pub key: K,
    pub kind: TransitionKind,
}

//=== Completion ==========================================================

/// Single-use completion handle handed to an animator.
#[derive(Debug)]
pub struct Completion<K: ScreenKey> {
    transition: TransitionDone<K>,
    sender: Option<Sender<TransitionDone<K>>>,
}

impl<K: ScreenKey> Completion<K> {
    pub(crate) fn new(key: K, kind: TransitionKind, sender: Sender<TransitionDone<K>>) -> Self {
        Self {
            transition: TransitionDone { key, kind },
            sender: Some(sender),
        }
    }

    /// Screen whose transition this completes.
    pub fn key(&self) -> K {
        self.transition.key
    }

    /// Direction of the transition.
    pub fn kind(&self) -> TransitionKind {
        self.transition.kind
    }

    /// Signals that the transition has finished.
    pub fn complete(mut self) {
        self.fire();
    }

    fn fire(&mut self) {
        if let Some(sender) = self.sender.take() {
            if sender.send(self.transition).is_err() {
                trace!("Completion for {:?} dropped, receiver gone", self.transition.key);
            }
        }
    }
}

impl<K: ScreenKey> Drop for Completion<K> {
    fn drop(&mut self) {
        if self.sender.is_some() {
            warn!(
                "{:?} transition of {:?} dropped without completing",
                self.transition.kind, self.transition.key
            );
            self.fire();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
