//=========================================================================
// Render Model
//=========================================================================
//
// Retained structure the screen system manipulates: the shared render
// root, per-screen containers, content elements and templates.
//
// Architecture:
//   RenderRoot
//     └─ children: [ContainerId]   (back → front)
//
//   ScreenContainer (owned by ScreenController)
//     ├─ transform, active flag
//     └─ content: [Element]
//
//=========================================================================

//=== Module Declarations =================================================

mod container;
mod element;
mod root;
mod template;

//=== Public API ==========================================================

pub use container::{ScreenContainer, Transform};
pub use element::{Element, Template};
pub use root::{ContainerId, RenderRoot};
pub use template::{InMemoryTemplates, TemplateProvider};
