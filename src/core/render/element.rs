//=========================================================================
// Elements & Templates
//=========================================================================
//
// Minimal retained element tree used for screen content.
//
// Only structure is modelled (names, classes, children); layout and
// drawing belong to the host renderer.
//
//=========================================================================

//=== Element =============================================================

/// Named node in a screen's content tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    classes: Vec<String>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an element with no classes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds a class (builder form).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    /// Adds a child (builder form).
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Adds a class unless already present.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    //--- Queries ----------------------------------------------------------

    /// Depth-first search of this element and its descendants.
    pub fn find(&self, name: &str) -> Option<&Element> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Mutable depth-first search.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Element> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(name))
    }

    /// Pushes this element and every descendant, depth-first.
    pub(crate) fn collect<'a>(&'a self, out: &mut Vec<&'a Element>) {
        out.push(self);
        for child in &self.children {
            child.collect(out);
        }
    }
}

//=== Template ============================================================

/// Structural template instantiated into a screen container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    root: Element,
}

impl Template {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Produces a fresh copy of the template tree.
    pub fn instantiate(&self) -> Element {
        self.root.clone()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
