//=========================================================================
// Screen Container
//=========================================================================
//
// Persistent visual subtree owned by one screen controller.
//
// Created once per screen, attached to the render root, and toggled
// active/inactive for the rest of its life. Content is replaced in place
// rather than rebuilding the container.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::element::Element;
use super::root::ContainerId;

//=== Transform ===========================================================

/// Transient visual state driven by transitions.
///
/// Translation is expressed as a fraction of the container's extent so it
/// stays meaningful without a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub opacity: f32,
    pub scale: f32,
    pub translate: (f32, f32),
}

impl Transform {
    /// Fully opaque, unscaled, untranslated.
    pub const IDENTITY: Transform = Transform {
        opacity: 1.0,
        scale: 1.0,
        translate: (0.0, 0.0),
    };
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

//=== ScreenContainer =====================================================

/// Root element of one screen, as seen by the render root.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenContainer {
    id: ContainerId,
    name: String,
    classes: Vec<String>,
    active: bool,
    transform: Transform,
    content: Vec<Element>,
}

impl ScreenContainer {
    /// Creates an inactive, empty container.
    pub(crate) fn new(id: ContainerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            classes: Vec::new(),
            active: false,
            transform: Transform::IDENTITY,
            content: Vec::new(),
        }
    }

    //--- Accessors --------------------------------------------------------

    /// Handle of this container in the render root.
    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
    }

    /// Returns true while the container is displayed.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Mutable transform, for animators.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub(crate) fn reset_transform(&mut self) {
        self.transform = Transform::IDENTITY;
    }

    //--- Content Queries --------------------------------------------------

    /// Top-level content elements.
    pub fn content(&self) -> &[Element] {
        &self.content
    }

    /// First element with the given name, searching depth-first.
    pub fn query(&self, name: &str) -> Option<&Element> {
        self.content.iter().find_map(|element| element.find(name))
    }

    /// Mutable variant of [`ScreenContainer::query`].
    pub fn query_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.content.iter_mut().find_map(|element| element.find_mut(name))
    }

    /// Every element in the container, depth-first.
    pub fn query_all(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        for element in &self.content {
            element.collect(&mut out);
        }
        out
    }

    //--- Content Mutation -------------------------------------------------

    pub fn add(&mut self, element: Element) {
        self.content.push(element);
    }

    /// Removes the first top-level element with the given name.
    pub fn remove(&mut self, name: &str) -> Option<Element> {
        let pos = self.content.iter().position(|e| e.name() == name)?;
        Some(self.content.remove(pos))
    }

    pub fn clear(&mut self) {
        self.content.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
