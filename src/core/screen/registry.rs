//=========================================================================
// Screen Registry
//=========================================================================
//
// Static mapping from screen key to metadata and factory.
//
// Populated once at startup and moved into the orchestrator, which only
// reads from it. Registration order is preserved so screen creation is
// deterministic.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fmt;

use log::warn;

//=== Internal Dependencies ===============================================

use super::{Screen, ScreenCategory, ScreenKey};
use crate::core::error::ScreenError;

//=== ScreenFactory =======================================================

/// Creates the behaviour object for one screen.
pub type ScreenFactory<K> = Box<dyn Fn() -> Box<dyn Screen<K>>>;

//=== ScreenMetadata ======================================================

/// Immutable registration data for a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenMetadata<K: ScreenKey> {
    /// Identity of the screen.
    pub key: K,

    /// Stacking tier.
    pub category: ScreenCategory,

    /// Front-to-back rank among visible screens; higher is nearer the front.
    pub priority: i32,

    /// Template path, relative to the configured template root.
    pub template: Option<String>,
}

impl<K: ScreenKey> ScreenMetadata<K> {
    /// Metadata without a template.
    pub fn new(key: K, category: ScreenCategory, priority: i32) -> Self {
        Self {
            key,
            category,
            priority,
            template: None,
        }
    }

    /// Sets the template path.
    pub fn with_template(mut self, path: impl Into<String>) -> Self {
        self.template = Some(path.into());
        self
    }
}

//=== ScreenRegistry ======================================================

struct RegistryEntry<K: ScreenKey> {
    metadata: ScreenMetadata<K>,
    factory: ScreenFactory<K>,
}

/// Read-only catalogue of every screen the orchestrator can create.
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
///     .register(
///         ScreenMetadata::new(Ui::MainMenu, ScreenCategory::Screen, 10)
///             .with_template("main_menu"),
///         || PlainScreen,
///     )
///     .unwrap();
///
/// assert!(registry.contains(Ui::MainMenu));
/// ```
pub struct ScreenRegistry<K: ScreenKey> {
    entries: HashMap<K, RegistryEntry<K>>,
    order: Vec<K>,
}

impl<K: ScreenKey> ScreenRegistry<K> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a screen with its behaviour factory.
    ///
    /// The first registration for a key wins; later ones are rejected
    /// with [`ScreenError::DuplicateRegistration`] and change nothing.
    pub fn register<S, F>(&mut self, metadata: ScreenMetadata<K>, factory: F) -> Result<(), ScreenError>
    where
        S: Screen<K> + 'static,
        F: Fn() -> S + 'static,
    {
        let key = metadata.key;
        if self.entries.contains_key(&key) {
            warn!("Screen {:?} was already registered, keeping the first registration", key);
            return Err(ScreenError::DuplicateRegistration(format!("{:?}", key)));
        }

        let factory: ScreenFactory<K> = Box::new(move || -> Box<dyn Screen<K>> { Box::new(factory()) });
        self.entries.insert(key, RegistryEntry { metadata, factory });
        self.order.push(key);
        Ok(())
    }

    //--- Queries ----------------------------------------------------------

    /// Metadata for a key.
    pub fn metadata(&self, key: K) -> Option<&ScreenMetadata<K>> {
        self.entries.get(&key).map(|entry| &entry.metadata)
    }

    /// Builds a fresh behaviour object for a key.
    pub fn create(&self, key: K) -> Option<Box<dyn Screen<K>>> {
        self.entries.get(&key).map(|entry| (entry.factory)())
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.order.iter().copied()
    }

    /// Returns true if the key has been registered.
    pub fn contains(&self, key: K) -> bool {
        self.entries.contains_key(&key)
    }

    /// Number of registered screens.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<K: ScreenKey> Default for ScreenRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ScreenKey> fmt::Debug for ScreenRegistry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metadata: Vec<_> = self
            .order
            .iter()
            .filter_map(|key| self.metadata(*key))
            .collect();
        f.debug_struct("ScreenRegistry")
            .field("screens", &metadata)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
