//=========================================================================
// Category Stack Manager
//=========================================================================
//
// Tracks which screen keys are active in each category and applies the
// category's policy on every push.
//
// Push policy:
//   stacking=false & key present  → rejected
//   multiple=false & history=false → clear, then push (hard replace)
//   multiple=false & history=true  → push, previous stays beneath
//   multiple=true                  → push
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::screen::{CategoryPolicies, CategoryPolicy, ScreenCategory, ScreenKey};

//=== CategoryStackManager ================================================

/// Pure bookkeeping of active keys per category.
///
/// Holds no screen objects and has no failure paths: invalid requests are
/// reported through return values and otherwise ignored.
#[derive(Debug, Clone)]
pub struct CategoryStackManager<K: ScreenKey> {
    stacks: [Vec<K>; ScreenCategory::COUNT],
    visible: HashSet<K>,
    policies: CategoryPolicies,
}

impl<K: ScreenKey> CategoryStackManager<K> {
    //--- Construction -----------------------------------------------------

    /// Creates a manager with the default policy table.
    pub fn new() -> Self {
        Self::with_policies(CategoryPolicies::default())
    }

    /// Creates a manager with a custom policy table.
    pub fn with_policies(policies: CategoryPolicies) -> Self {
        Self {
            stacks: std::array::from_fn(|_| Vec::new()),
            visible: HashSet::new(),
            policies,
        }
    }

    //--- Stack Operations -------------------------------------------------

    /// Pushes a key onto its category stack according to the category policy.
    ///
    /// Returns `false` if the category disallows duplicates and already
    /// holds `key`.
    pub fn push(&mut self, key: K, category: ScreenCategory) -> bool {
        let policy = self.policies[category];
        let stack = &mut self.stacks[category.rank()];

        if !policy.allow_stacking && stack.contains(&key) {
            debug!("{:?} already active in {:?} stack, push rejected", key, category);
            return false;
        }

        if !policy.allow_multiple && !policy.track_history {
            for replaced in stack.drain(..) {
                self.visible.remove(&replaced);
            }
        }

        stack.push(key);
        self.visible.insert(key);

        debug!("Pushed {:?} to {:?} stack (depth: {})", key, category, stack.len());
        true
    }

    /// Pops the top key of a category.
    pub fn pop(&mut self, category: ScreenCategory) -> Option<K> {
        let key = self.stacks[category.rank()].pop()?;
        self.release(key, category);

        debug!(
            "Popped {:?} from {:?} stack (remaining: {})",
            key,
            category,
            self.depth(category)
        );
        Some(key)
    }

    /// Removes the topmost occurrence of `key` from anywhere in the stack.
    ///
    /// Entries above and below keep their relative order.
    pub fn pop_specific(&mut self, key: K, category: ScreenCategory) -> bool {
        let stack = &mut self.stacks[category.rank()];
        let Some(pos) = stack.iter().rposition(|&k| k == key) else {
            return false;
        };

        stack.remove(pos);
        self.release(key, category);

        debug!("Removed {:?} from {:?} stack at position {}", key, category, pos);
        true
    }

    /// Returns the top key of a category without removing it.
    pub fn peek(&self, category: ScreenCategory) -> Option<K> {
        self.stacks[category.rank()].last().copied()
    }

    /// Removes every key from a category.
    pub fn clear_category(&mut self, category: ScreenCategory) {
        for key in self.stacks[category.rank()].drain(..) {
            self.visible.remove(&key);
        }
        debug!("Cleared {:?} stack", category);
    }

    /// Removes every key from every category.
    pub fn clear_all(&mut self) {
        for stack in &mut self.stacks {
            stack.clear();
        }
        self.visible.clear();
        debug!("Cleared all category stacks");
    }

    //--- Queries ----------------------------------------------------------

    /// Returns true if `key` is active in any category.
    pub fn is_visible(&self, key: K) -> bool {
        self.visible.contains(&key)
    }

    /// Returns true if a strictly higher category that blocks lower ones
    /// currently holds at least one key.
    ///
    /// Advisory only: nothing in the crate refuses to show a screen
    /// because of this.
    pub fn is_blocked_by_higher_category(&self, category: ScreenCategory) -> bool {
        category.higher().iter().any(|&higher| {
            self.policies[higher].blocks_lower_categories && !self.stacks[higher.rank()].is_empty()
        })
    }

    /// Number of entries in a category stack.
    pub fn depth(&self, category: ScreenCategory) -> usize {
        self.stacks[category.rank()].len()
    }

    /// Entries of a category, bottom to top.
    pub fn entries(&self, category: ScreenCategory) -> &[K] {
        &self.stacks[category.rank()]
    }

    /// Returns true if `key` is somewhere in the category stack.
    pub fn contains(&self, key: K, category: ScreenCategory) -> bool {
        self.stacks[category.rank()].contains(&key)
    }

    /// Every active key, in no particular order.
    pub fn visible(&self) -> impl Iterator<Item = K> + '_ {
        self.visible.iter().copied()
    }

    /// Policy applied to a category.
    pub fn policy(&self, category: ScreenCategory) -> CategoryPolicy {
        self.policies[category]
    }

    /// Dumps every non-empty stack at debug level.
    pub fn log_state(&self) {
        debug!("=== UI stack state ===");
        for category in ScreenCategory::ALL {
            let stack = &self.stacks[category.rank()];
            if stack.is_empty() {
                continue;
            }
            debug!("{:?} ({}):", category, stack.len());
            for key in stack.iter().rev() {
                debug!("  - {:?}", key);
            }
        }
        debug!("Total active screens: {}", self.visible.len());
    }

    //--- Internal Helpers -------------------------------------------------

    // Duplicates may remain in stacking categories; only forget the key
    // once its last occurrence is gone.
    fn release(&mut self, key: K, category: ScreenCategory) {
        if !self.stacks[category.rank()].contains(&key) {
            self.visible.remove(&key);
        }
    }
}

impl<K: ScreenKey> Default for CategoryStackManager<K> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
