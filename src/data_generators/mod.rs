pub mod graphs;

pub use self::graphs::{random_graph, random_graph_with_edges};
