//=========================================================================
// Render Root
//=========================================================================
//
// Single shared surface holding every screen container in draw order.
//
// Children are stored back to front: the last child is drawn last and is
// therefore topmost. `bring_to_front` moves a child to the end.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== ContainerId =========================================================

/// Handle for a container attached to a [`RenderRoot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u32);

//=== RenderRoot ==========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct Child {
    id: ContainerId,
    label: String,
}

/// Draw-order model of the UI surface.
#[derive(Debug, Clone, Default)]
pub struct RenderRoot {
    children: Vec<Child>,
    next_id: u32,
}

impl RenderRoot {
    /// Creates an empty root.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Children ---------------------------------------------------------

    /// Attaches a new container on top of the current children.
    pub fn attach(&mut self, label: impl Into<String>) -> ContainerId {
        let id = ContainerId(self.next_id);
        self.next_id += 1;
        self.children.push(Child {
            id,
            label: label.into(),
        });
        id
    }

    /// Detaches a container. Returns false if it was not attached.
    pub fn detach(&mut self, id: ContainerId) -> bool {
        let before = self.children.len();
        self.children.retain(|child| child.id != id);
        before != self.children.len()
    }

    /// Moves a container above every other one.
    pub fn bring_to_front(&mut self, id: ContainerId) -> bool {
        let Some(pos) = self.children.iter().position(|child| child.id == id) else {
            debug!("bring_to_front on detached container {:?}", id);
            return false;
        };
        let child = self.children.remove(pos);
        self.children.push(child);
        true
    }

    //--- Queries ----------------------------------------------------------

    /// Labels ordered topmost first.
    pub fn front_to_back(&self) -> Vec<&str> {
        self.children.iter().rev().map(|child| child.label.as_str()).collect()
    }

    /// Container handles in draw order (bottom first).
    pub fn draw_order(&self) -> Vec<ContainerId> {
        self.children.iter().map(|child| child.id).collect()
    }

    /// Topmost container, if any.
    pub fn front(&self) -> Option<ContainerId> {
        self.children.last().map(|child| child.id)
    }

    pub fn contains(&self, id: ContainerId) -> bool {
        self.children.iter().any(|child| child.id == id)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_places_new_child_on_top() {
        let mut root = RenderRoot::new();
        let a = root.attach("a");
        let b = root.attach("b");

        assert_ne!(a, b);
        assert_eq!(root.front(), Some(b));
        assert_eq!(root.front_to_back(), vec!["b", "a"]);
    }

    #[test]
    fn bring_to_front_reorders() {
        let mut root = RenderRoot::new();
        let a = root.attach("a");
        root.attach("b");
        root.attach("c");

        assert!(root.bring_to_front(a));
        assert_eq!(root.front_to_back(), vec!["a", "c", "b"]);
    }

    #[test]
    fn detach_removes_and_reports() {
        let mut root = RenderRoot::new();
        let a = root.attach("a");

        assert!(root.detach(a));
        assert!(!root.detach(a));
        assert!(!root.bring_to_front(a));
        assert!(root.is_empty());
    }
}
