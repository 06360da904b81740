//=========================================================================
// Screen Categories
//=========================================================================
//
// Fixed, totally ordered set of screen tiers and their stacking policies.
//
// Precedence (highest first):
//   System > Overlay > Modal > Popup > Screen > Persistent
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ops::{Index, IndexMut};

//=== ScreenCategory ======================================================

/// Classification governing stacking, multiplicity, history and blocking.
///
/// Variants are declared highest precedence first, so the derived `Ord`
/// places `System` before `Persistent`. A category *outranks* another
/// when it compares less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScreenCategory {
    /// Splash, maintenance. Exclusive and blocking.
    System,
    /// Loading, login.
    Overlay,
    /// Dialogs that block interaction below them.
    Modal,
    /// Non-blocking popups and notifications.
    Popup,
    /// Regular full-surface screens.
    Screen,
    /// HUD, backgrounds.
    Persistent,
}

impl ScreenCategory {
    /// Number of categories.
    pub const COUNT: usize = 6;

    /// Every category, highest precedence first.
    pub const ALL: [ScreenCategory; Self::COUNT] = [
        ScreenCategory::System,
        ScreenCategory::Overlay,
        ScreenCategory::Modal,
        ScreenCategory::Popup,
        ScreenCategory::Screen,
        ScreenCategory::Persistent,
    ];

    /// Zero-based precedence rank; 0 is the highest.
    pub const fn rank(self) -> usize {
        self as usize
    }

    /// Returns true if `self` has strictly higher precedence than `other`.
    pub fn outranks(self, other: ScreenCategory) -> bool {
        self.rank() < other.rank()
    }

    /// Categories with strictly higher precedence than `self`.
    pub fn higher(self) -> &'static [ScreenCategory] {
        &Self::ALL[..self.rank()]
    }

    /// Policy this category carries unless overridden.
    pub const fn default_policy(self) -> CategoryPolicy {
        match self {
            ScreenCategory::System => CategoryPolicy {
                allow_stacking: false,
                allow_multiple: false,
                track_history: false,
                blocks_lower_categories: true,
            },
            ScreenCategory::Overlay | ScreenCategory::Modal => CategoryPolicy {
                allow_stacking: true,
                allow_multiple: true,
                track_history: true,
                blocks_lower_categories: true,
            },
            ScreenCategory::Popup => CategoryPolicy {
                allow_stacking: true,
                allow_multiple: true,
                track_history: true,
                blocks_lower_categories: false,
            },
            ScreenCategory::Screen => CategoryPolicy {
                allow_stacking: false,
                allow_multiple: false,
                track_history: true,
                blocks_lower_categories: false,
            },
            ScreenCategory::Persistent => CategoryPolicy {
                allow_stacking: false,
                allow_multiple: true,
                track_history: false,
                blocks_lower_categories: false,
            },
        }
    }
}

//=== CategoryPolicy ======================================================

/// Per-category stacking rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryPolicy {
    /// The same key may appear more than once in the category stack.
    pub allow_stacking: bool,

    /// More than one key may be active in the category at once.
    pub allow_multiple: bool,

    /// Replaced keys stay beneath the new top for later restoration.
    pub track_history: bool,

    /// While non-empty, every lower category is reported as blocked.
    pub blocks_lower_categories: bool,
}

//=== CategoryPolicies ====================================================

/// Complete policy table, one entry per category.
///
/// Built once and handed to the stack manager; never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPolicies {
    table: [CategoryPolicy; ScreenCategory::COUNT],
}

impl CategoryPolicies {
    /// Replaces the policy of a single category.
    pub fn with(mut self, category: ScreenCategory, policy: CategoryPolicy) -> Self {
        self.table[category.rank()] = policy;
        self
    }
}

impl Default for CategoryPolicies {
    fn default() -> Self {
        Self {
            table: ScreenCategory::ALL.map(ScreenCategory::default_policy),
        }
    }
}

impl Index<ScreenCategory> for CategoryPolicies {
    type Output = CategoryPolicy;

    fn index(&self, category: ScreenCategory) -> &CategoryPolicy {
        &self.table[category.rank()]
    }
}

impl IndexMut<ScreenCategory> for CategoryPolicies {
    fn index_mut(&mut self, category: ScreenCategory) -> &mut CategoryPolicy {
        &mut self.table[category.rank()]
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
