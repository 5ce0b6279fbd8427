//! Linear-time planarity and outerplanarity testing by edge addition.
//!
//! Decides whether an undirected simple graph admits a planar (or
//! outerplanar) embedding, produces the combinatorial embedding in the
//! affirmative case and isolates a topological obstruction (a K5 or K3,3
//! subdivision; K4 or K2,3 for outerplanarity) in the negative case.
//!
//! The embedding engine implements
//! J. M. Boyer and W. J. Myrvold, "On the Cutting Edge: Simplified O(n)
//! Planarity by Edge Addition", Journal of Graph Algorithms and
//! Applications, Vol. 8, No. 3, pp. 241-273, 2004.

pub mod algorithms;
pub mod data_generators;
pub mod data_structures;
pub mod helpers;
pub mod io;
