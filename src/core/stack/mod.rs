//=========================================================================
// Category Stacks
//=========================================================================
//
// Per-category LIFO bookkeeping of active screens.
//
// Architecture:
//   CategoryStackManager
//     ├─ stacks: [Vec<K>; 6]   (one per ScreenCategory, bottom → top)
//     ├─ visible: HashSet<K>
//     └─ policies: CategoryPolicies
//
// Blocking is reported, never enforced.
//
//=========================================================================

//=== Module Declarations =================================================

mod category_stack;

//=== Public API ==========================================================

pub use category_stack::CategoryStackManager;
