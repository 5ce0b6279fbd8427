use std::fmt;

use log::trace;

use super::{IntStack, ListCollection, NIL};

/// Classification a DFS assigns to each half-edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArcKind {
    Unknown,
    /// Tree edge, stored at the parent (or its root copy).
    TreeChild,
    /// Tree edge, stored at the child.
    TreeParent,
    /// Cycle edge, stored at the descendant endpoint.
    Back,
    /// Cycle edge, stored at the ancestor endpoint until embedded.
    Forward,
}

/// A half-edge. Twins sit at adjacent indices so `twin(a) = a ^ 1`.
///
/// `link[0]` leads toward the last end of the owning adjacency list and
/// `link[1]` toward the first end; `NIL` is the end marker on both sides.
/// The same two-sided protocol applies to vertices, which lets insertion
/// and splicing run the identical arithmetic for either end.
#[derive(Clone, Debug)]
pub struct Arc {
    pub(crate) neighbor: usize,
    pub(crate) link: [usize; 2],
    pub(crate) kind: ArcKind,
    /// On tree-child arcs: the subtree below must be flipped.
    pub(crate) inverted: bool,
}

impl Arc {
    fn new(neighbor: usize) -> Self {
        Self {
            neighbor,
            link: [NIL, NIL],
            kind: ArcKind::Unknown,
            inverted: false,
        }
    }
}

/// A vertex record. Indices `[0, n)` are primary vertices; `[n, 2n)` are
/// virtual root copies, one per potential DFS child: the root copy paired
/// with child `c` lives at `c + n` and represents the biconnected
/// component whose root edge is `(parent(c), c)`.
#[derive(Clone, Debug)]
pub struct Vertex {
    /// DFI once sorted by DFI, the input id otherwise.
    pub(crate) index: usize,
    pub(crate) parent: usize,
    pub(crate) visited: bool,
    /// Step marker: any value greater than the current step means
    /// unvisited in that step.
    pub(crate) visited_info: usize,
    pub(crate) least_ancestor: usize,
    pub(crate) lowpoint: usize,
    /// Head of the DFS child list, ordered by child DFI.
    pub(crate) sorted_dfs_child_list: usize,
    /// Head of the not-yet-merged DFS child list, ordered by lowpoint.
    pub(crate) separated_dfs_child_list: usize,
    /// Head of the child bicomps currently pertinent to the step vertex.
    pub(crate) pertinent_bicomp_list: usize,
    /// Head of the circular list of forward arcs to DFS descendants.
    pub(crate) fwd_arc_list: usize,
    /// Forward arc of the unembedded back edge ending here, if any.
    pub(crate) pertinent_adjacency_info: usize,
    /// First and last arc of the adjacency list.
    pub(crate) link: [usize; 2],
    /// The two external face neighbors.
    pub(crate) ext_face: [usize; 2],
    /// Relative orientation marker for two-vertex external faces.
    pub(crate) ext_face_inversion_flag: bool,
}

impl Vertex {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            parent: NIL,
            visited: false,
            visited_info: NIL,
            least_ancestor: NIL,
            lowpoint: NIL,
            sorted_dfs_child_list: NIL,
            separated_dfs_child_list: NIL,
            pertinent_bicomp_list: NIL,
            fwd_arc_list: NIL,
            pertinent_adjacency_info: NIL,
            link: [NIL, NIL],
            ext_face: [NIL, NIL],
            ext_face_inversion_flag: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    VertexOutOfRange { vertex: usize, order: usize },
    SelfLoop { vertex: usize },
    DuplicateEdge { u: usize, v: usize },
    EdgeCapacityExceeded { capacity: usize },
    StackCapacityTooSmall { required: usize, capacity: usize },
    AlreadyProcessed,
    InconsistentState(&'static str),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let err = match self {
            GraphError::VertexOutOfRange { vertex, order } => {
                format!("vertex {} out of range for a graph on {} vertices", vertex, order)
            }
            GraphError::SelfLoop { vertex } => {
                format!("self-loop at vertex {} rejected", vertex)
            }
            GraphError::DuplicateEdge { u, v } => {
                format!("duplicate edge ({}, {}) rejected", u, v)
            }
            GraphError::EdgeCapacityExceeded { capacity } => {
                format!("edge capacity {} exhausted", capacity)
            }
            GraphError::StackCapacityTooSmall { required, capacity } => {
                format!("stack capacity {} below required {}", capacity, required)
            }
            GraphError::AlreadyProcessed => {
                String::from("graph already processed; reinitialize before reuse")
            }
            GraphError::InconsistentState(what) => format!("inconsistent state: {}", what),
        };
        write!(f, "{err}")
    }
}

impl std::error::Error for GraphError {}

/// The embedding graph store.
///
/// Everything lives in preallocated arenas and all linkage is by index,
/// which gives constant-time twin lookup and lets the engine mutate
/// adjacency structure freely while holding a single `&mut Graph`.
#[derive(Clone, Debug)]
pub struct Graph {
    pub(crate) n: usize,
    pub(crate) edge_capacity: usize,
    pub(crate) m: usize,
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) arcs: Vec<Arc>,
    /// The input edges in input vertex ids; survives embedding untouched.
    pub(crate) edge_list: Vec<(usize, usize)>,
    pub(crate) stack: IntStack,
    pub(crate) sorted_child_lists: ListCollection,
    pub(crate) separated_child_lists: ListCollection,
    pub(crate) bicomp_lists: ListCollection,
    pub(crate) bin: ListCollection,
    pub(crate) buckets: Vec<usize>,
    pub(crate) dfs_numbered: bool,
    pub(crate) sorted_by_dfi: bool,
}

impl Graph {
    /// A graph on `n` vertices with the default edge capacity of `3n`,
    /// enough for any planar graph plus room to hold a few edges past the
    /// density bound so that non-planar inputs can be represented.
    pub fn new(n: usize) -> Self {
        Self::with_capacity(n, 3 * n.max(1))
    }

    pub fn with_capacity(n: usize, edge_capacity: usize) -> Self {
        Self {
            n,
            edge_capacity,
            m: 0,
            vertices: (0..2 * n).map(Vertex::new).collect(),
            arcs: Vec::with_capacity(2 * edge_capacity),
            edge_list: Vec::new(),
            stack: IntStack::with_capacity(4 * edge_capacity),
            sorted_child_lists: ListCollection::new(n),
            separated_child_lists: ListCollection::new(n),
            bicomp_lists: ListCollection::new(n),
            bin: ListCollection::new(n),
            buckets: vec![NIL; n],
            dfs_numbered: false,
            sorted_by_dfi: false,
        }
    }

    /// Rebuild a graph from another's input edge list (copyGraph with a
    /// fresh target is covered by `Clone`; this resets the receiver).
    pub fn reinitialize(&mut self) {
        let edges = std::mem::take(&mut self.edge_list);
        *self = Self::with_capacity(self.n, self.edge_capacity);
        for (u, v) in edges {
            // Edges were validated on first insertion.
            self.add_edge(u, v)
                .expect("reinitialize replays previously accepted edges");
        }
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.m
    }

    #[inline]
    pub fn edge_capacity(&self) -> usize {
        self.edge_capacity
    }

    #[inline]
    pub fn is_sorted_by_dfi(&self) -> bool {
        self.sorted_by_dfi
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edge_list
    }

    /// Add the undirected edge (u, v). Only simple graphs are accepted.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<(), GraphError> {
        if self.dfs_numbered {
            return Err(GraphError::AlreadyProcessed);
        }
        for vertex in [u, v] {
            if vertex >= self.n {
                return Err(GraphError::VertexOutOfRange { vertex, order: self.n });
            }
        }
        if u == v {
            return Err(GraphError::SelfLoop { vertex: u });
        }
        if self.adjacency_arcs(u).any(|a| self.arcs[a].neighbor == v) {
            return Err(GraphError::DuplicateEdge { u, v });
        }
        if self.m >= self.edge_capacity {
            return Err(GraphError::EdgeCapacityExceeded { capacity: self.edge_capacity });
        }

        let a = self.arcs.len();
        self.arcs.push(Arc::new(v));
        self.arcs.push(Arc::new(u));
        self.insert_arc(u, 1, a);
        self.insert_arc(v, 1, a ^ 1);
        self.m += 1;
        self.edge_list.push((u, v));
        Ok(())
    }

    pub fn add_edges(&mut self, edges: &[(usize, usize)]) -> Result<(), GraphError> {
        for &(u, v) in edges {
            self.add_edge(u, v)?;
        }
        Ok(())
    }

    #[inline]
    pub fn twin(&self, arc: usize) -> usize {
        arc ^ 1
    }

    #[inline]
    pub(crate) fn first_arc(&self, v: usize) -> usize {
        self.vertices[v].link[0]
    }

    #[inline]
    pub(crate) fn last_arc(&self, v: usize) -> usize {
        self.vertices[v].link[1]
    }

    #[inline]
    pub fn neighbor(&self, arc: usize) -> usize {
        self.arcs[arc].neighbor
    }

    #[inline]
    pub fn arc_kind(&self, arc: usize) -> ArcKind {
        self.arcs[arc].kind
    }

    /// The vertex owning `arc`, read through its twin.
    #[inline]
    pub fn arc_owner(&self, arc: usize) -> usize {
        self.arcs[self.twin(arc)].neighbor
    }

    /// Iterate the adjacency list of `v` from the first arc to the last.
    pub fn adjacency_arcs(&self, v: usize) -> AdjacencyArcs<'_> {
        AdjacencyArcs {
            graph: self,
            cur: self.first_arc(v),
        }
    }

    pub fn degree(&self, v: usize) -> usize {
        self.adjacency_arcs(v).count()
    }

    /// Insert arc `e` at side `side` of the adjacency list of `v`.
    pub(crate) fn insert_arc(&mut self, v: usize, side: usize, e: usize) {
        let old_end = self.vertices[v].link[side];
        self.arcs[e].link[side] = old_end;
        self.arcs[e].link[1 ^ side] = NIL;
        if old_end == NIL {
            self.vertices[v].link[1 ^ side] = e;
        } else {
            self.arcs[old_end].link[1 ^ side] = e;
        }
        self.vertices[v].link[side] = e;
    }

    /// Unlink arc `e` from the adjacency list of its owner `v`.
    pub(crate) fn remove_arc(&mut self, v: usize, e: usize) {
        let toward_last = self.arcs[e].link[0];
        let toward_first = self.arcs[e].link[1];
        if toward_first == NIL {
            self.vertices[v].link[0] = toward_last;
        } else {
            self.arcs[toward_first].link[0] = toward_last;
        }
        if toward_last == NIL {
            self.vertices[v].link[1] = toward_first;
        } else {
            self.arcs[toward_last].link[1] = toward_first;
        }
        self.arcs[e].link = [NIL, NIL];
    }

    /// Flip the rotation of a single vertex: every arc's two links swap,
    /// the first/last arcs swap and the external face pair swaps. O(deg).
    pub(crate) fn invert_vertex(&mut self, v: usize) {
        trace!("invert_vertex v={}", v);
        let mut j = self.vertices[v].link[0];
        while j != NIL {
            let next = self.arcs[j].link[0];
            self.arcs[j].link.swap(0, 1);
            j = next;
        }
        self.vertices[v].link.swap(0, 1);
        self.vertices[v].ext_face.swap(0, 1);
    }

    /// Reset a consumed root copy (or any record) to its pristine state.
    pub(crate) fn init_vertex_record(&mut self, v: usize) {
        self.vertices[v] = Vertex::new(v);
    }

    /// Rearrange the primary vertices so that each lands at the position
    /// named by its `index` field, which afterwards holds the former
    /// position. Arc neighbors and DFS parents are rewritten through the
    /// permutation. Applying the sort twice restores the arrangement, so
    /// this converts between DFI order and input order.
    pub fn sort_vertices(&mut self) -> Result<(), GraphError> {
        if !self.dfs_numbered {
            return Err(GraphError::InconsistentState(
                "vertex sort requires DFS numbering",
            ));
        }
        let n = self.n;
        let perm: Vec<usize> = (0..n).map(|p| self.vertices[p].index).collect();
        if perm.iter().any(|&target| target >= n) {
            return Err(GraphError::InconsistentState("vertex index out of range"));
        }

        for arc in &mut self.arcs {
            if arc.neighbor < n {
                arc.neighbor = perm[arc.neighbor];
            }
        }
        for p in 0..n {
            let parent = self.vertices[p].parent;
            if parent != NIL {
                self.vertices[p].parent = perm[parent];
            }
        }

        let all = std::mem::take(&mut self.vertices);
        let mut primaries: Vec<Option<Vertex>> = (0..n).map(|_| None).collect();
        let mut root_copies = Vec::with_capacity(n);
        for (pos, mut rec) in all.into_iter().enumerate() {
            if pos < n {
                let target = perm[pos];
                rec.index = pos;
                if primaries[target].is_some() {
                    return Err(GraphError::InconsistentState(
                        "vertex indices are not a permutation",
                    ));
                }
                primaries[target] = Some(rec);
            } else {
                root_copies.push(rec);
            }
        }
        let mut vertices = Vec::with_capacity(2 * n);
        for slot in primaries {
            vertices.push(slot.ok_or(GraphError::InconsistentState(
                "vertex indices are not a permutation",
            ))?);
        }
        vertices.extend(root_copies);
        self.vertices = vertices;
        self.sorted_by_dfi = !self.sorted_by_dfi;
        Ok(())
    }
}

/// Iterator over the arc indices of one adjacency list.
pub struct AdjacencyArcs<'a> {
    graph: &'a Graph,
    cur: usize,
}

impl Iterator for AdjacencyArcs<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur == NIL {
            return None;
        }
        let arc = self.cur;
        self.cur = self.graph.arcs[arc].link[0];
        Some(arc)
    }
}
