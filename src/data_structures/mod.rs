pub mod graph;
pub mod int_stack;
pub mod list_collection;
pub mod union_find;

pub use self::graph::{ArcKind, Graph, GraphError};
pub use self::int_stack::IntStack;
pub use self::list_collection::ListCollection;
pub use self::union_find::UnionFind;

/// Universal sentinel for "no vertex", "no arc" and adjacency end markers.
///
/// All linkage in the engine is by index into preallocated arenas, so a
/// single out-of-range value covers every absent-link role.
pub const NIL: usize = usize::MAX;
