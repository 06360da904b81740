//=========================================================================
// Screen Event Queue
//=========================================================================
//
// Outbound notifications from the orchestrator.
//
// Events are appended when a transition has fully completed and all
// orchestrator state has been updated. Consumers drain the queue after
// calling into the orchestrator, so reacting to an event with another
// show or hide never re-enters it.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::screen::ScreenKey;

//=== ScreenEvent =========================================================

/// Notification emitted by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent<K: ScreenKey> {
    /// A show transition completed; the screen is in the visible set.
    Shown(K),

    /// A hide transition completed; the screen left the visible set.
    Hidden(K),

    /// The visible set became empty as the result of a hide.
    AllHidden,
}

//=== EventQueue ==========================================================

/// FIFO of pending [`ScreenEvent`]s.
#[derive(Debug)]
pub struct EventQueue<K: ScreenKey> {
    queue: Vec<ScreenEvent<K>>,
}

impl<K: ScreenKey> EventQueue<K> {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub(crate) fn push(&mut self, event: ScreenEvent<K>) {
        self.queue.push(event);
    }

    /// Returns an iterator over the pending events.
    pub fn iter(&self) -> impl Iterator<Item = &ScreenEvent<K>> {
        self.queue.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear()
    }

    /// Takes all pending events, leaving the queue empty.
    pub fn take(&mut self) -> Vec<ScreenEvent<K>> {
        std::mem::take(&mut self.queue)
    }
}

impl<K: ScreenKey> Default for EventQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
