//=========================================================================
// Screen Instance
//=========================================================================
//
// Runtime pairing of a registered screen's identity with its behaviour
// object. The controller lives beside it in the orchestrator.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::screen::{Screen, ScreenCategory, ScreenKey};

//=== ScreenInstance ======================================================

/// A created screen: metadata snapshot plus behaviour.
pub struct ScreenInstance<K: ScreenKey> {
    key: K,
    category: ScreenCategory,
    priority: i32,
    visible: bool,
    screen: Box<dyn Screen<K>>,
}

impl<K: ScreenKey> ScreenInstance<K> {
    pub(crate) fn new(key: K, category: ScreenCategory, priority: i32, screen: Box<dyn Screen<K>>) -> Self {
        Self {
            key,
            category,
            priority,
            visible: false,
            screen,
        }
    }

    pub fn key(&self) -> K {
        self.key
    }

    pub fn category(&self) -> ScreenCategory {
        self.category
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// True while the screen is in the orchestrator's visible set.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn screen(&self) -> &dyn Screen<K> {
        self.screen.as_ref()
    }

    pub fn screen_mut(&mut self) -> &mut dyn Screen<K> {
        self.screen.as_mut()
    }

    /// Typed access to the behaviour object.
    pub fn downcast_ref<T: Screen<K>>(&self) -> Option<&T> {
        self.screen.as_ref().as_any().downcast_ref::<T>()
    }

    /// Typed mutable access to the behaviour object.
    pub fn downcast_mut<T: Screen<K>>(&mut self) -> Option<&mut T> {
        self.screen.as_mut().as_any_mut().downcast_mut::<T>()
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }
}

impl<K: ScreenKey> fmt::Debug for ScreenInstance<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenInstance")
            .field("key", &self.key)
            .field("category", &self.category)
            .field("priority", &self.priority)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::screen::PlainScreen;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScreen {
        Inventory,
    }

    impl ScreenKey for TestScreen {}

    struct InventoryScreen {
        slots: usize,
    }

    impl Screen<TestScreen> for InventoryScreen {}

    #[test]
    fn downcast_matches_concrete_type_only() {
        let mut instance = ScreenInstance::new(
            TestScreen::Inventory,
            ScreenCategory::Screen,
            10,
            Box::new(InventoryScreen { slots: 4 }),
        );

        assert_eq!(instance.downcast_ref::<InventoryScreen>().map(|s| s.slots), Some(4));
        assert!(instance.downcast_ref::<PlainScreen>().is_none());

        if let Some(screen) = instance.downcast_mut::<InventoryScreen>() {
            screen.slots = 8;
        }
        assert_eq!(instance.downcast_ref::<InventoryScreen>().map(|s| s.slots), Some(8));
    }
}
