//! Compact adjacency-list graph representation used by the mining core.
//!
//! [`CompactGraph`] is built once by [`crate::preprocess`] and is immutable for the
//! rest of the run: every vertex's edge list is a contiguous slice into a single
//! backing allocation, addressed by range rather than raw pointer so the whole
//! structure stays safe without lifetimes tying it to itself.

use hashbrown::HashMap;
use std::ops::Range;

/// Integer label attached to a vertex.
pub type VertexLabel = i64;
/// Integer label attached to an edge.
pub type EdgeLabel = i64;
/// Identifier of an input graph, as given in the `t # <id>` line.
pub type GraphId = i64;
/// Dense, graph-local vertex index.
pub type VertexId = u32;
/// Dense, graph-local edge index, shared by both half-edges of an undirected edge.
pub type EdgeId = u32;

/// One half-edge: `from -> to`, labeled, carrying the shared id of its undirected edge.
///
/// Invariant: for every stored half-edge `(u, v, label, id)` there is exactly one matching
/// half-edge `(v, u, label, id)` elsewhere in the graph.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Edge {
    /// Endpoint this half-edge is stored under.
    pub from: VertexId,
    /// The other endpoint.
    pub to: VertexId,
    /// Edge label.
    pub label: EdgeLabel,
    /// Id shared by both half-edges of this undirected edge.
    pub id: EdgeId,
}

/// A vertex in a [`CompactGraph`]; `edges` is a range into the graph's shared edge arena.
#[derive(Clone, Debug)]
pub struct CompactVertex {
    /// Vertex label.
    pub label: VertexLabel,
    /// Index of this vertex into its graph's `vertices`.
    pub id: VertexId,
    edges: Range<u32>,
}

/// Preprocessed, immutable graph: one flat arena of half-edges, vertices referencing
/// contiguous slices of it.
///
/// `vertex.id` always equals its index into `vertices`.
#[derive(Clone, Debug)]
pub struct CompactGraph {
    /// Id as given in the input file's `t # <id>` line.
    pub id: GraphId,
    /// Number of undirected edges (half the arena length).
    pub n_edges: u32,
    vertices: Box<[CompactVertex]>,
    edge_arena: Box<[Edge]>,
}

impl CompactGraph {
    /// Builds a compact graph from, for each surviving vertex (in final dense order), its
    /// label and the list of its surviving half-edges (`to`, `label`); `id` fields are
    /// assigned densely by position, and `n_edges` is the number of undirected edges (each
    /// contributing two half-edges to the arena).
    pub fn build(id: GraphId, n_edges: u32, per_vertex: Vec<(VertexLabel, Vec<Edge>)>) -> Self {
        let mut edge_arena = Vec::with_capacity(per_vertex.iter().map(|(_, e)| e.len()).sum());
        let mut vertices = Vec::with_capacity(per_vertex.len());
        for (vid, (label, edges)) in per_vertex.into_iter().enumerate() {
            let start = edge_arena.len() as u32;
            edge_arena.extend(edges);
            let end = edge_arena.len() as u32;
            vertices.push(CompactVertex {
                label,
                id: vid as VertexId,
                edges: start..end,
            });
        }
        CompactGraph {
            id,
            n_edges,
            vertices: vertices.into_boxed_slice(),
            edge_arena: edge_arena.into_boxed_slice(),
        }
    }

    /// This graph's vertices, in dense id order.
    pub fn vertices(&self) -> &[CompactVertex] {
        &self.vertices
    }

    /// The vertex at `id`.
    pub fn vertex(&self, id: VertexId) -> &CompactVertex {
        &self.vertices[id as usize]
    }

    /// The half-edges incident to `id`.
    pub fn vertex_edges(&self, id: VertexId) -> &[Edge] {
        let range = self.vertices[id as usize].edges.clone();
        &self.edge_arena[range.start as usize..range.end as usize]
    }
}

impl CompactVertex {
    /// Number of half-edges incident to this vertex.
    pub fn edge_count(&self) -> usize {
        (self.edges.end - self.edges.start) as usize
    }
}

/// Owns the preprocessed graph database and lets callers holding a [`GraphId`] (for
/// instance, from a [`crate::projection::ProjectionLink`]) look up its [`CompactGraph`]
/// without assuming id equals position: [`crate::preprocess::preprocess`] may drop
/// graphs with no surviving edges, and input `t # <id>` values need not be dense,
/// 0-based, or even non-negative.
#[derive(Debug)]
pub struct GraphDatabase {
    graphs: Box<[CompactGraph]>,
    by_id: HashMap<GraphId, u32>,
}

impl GraphDatabase {
    /// Builds the lookup index once over the preprocessed graphs.
    pub fn new(graphs: Vec<CompactGraph>) -> Self {
        let by_id = graphs.iter().enumerate().map(|(pos, g)| (g.id, pos as u32)).collect();
        GraphDatabase { graphs: graphs.into_boxed_slice(), by_id }
    }

    /// All preprocessed graphs, in storage order (not necessarily id order).
    pub fn graphs(&self) -> &[CompactGraph] {
        &self.graphs
    }

    /// The graph whose original `t # <id>` is `id`.
    ///
    /// Panics if `id` does not name a surviving graph; every [`GraphId`] reachable
    /// through a live [`crate::projection::ProjectionLink`] was stamped from a graph
    /// that survived preprocessing, so this never fires on valid mining state.
    pub fn by_id(&self, id: GraphId) -> &CompactGraph {
        &self.graphs[self.by_id[&id] as usize]
    }
}

/// A vertex as seen by the text parser, before frequency filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ParsedVertex {
    /// Vertex id as declared by its `v` line; must be dense from 0 within a graph.
    pub id: VertexId,
    /// Vertex label.
    pub label: VertexLabel,
}

/// An edge as seen by the text parser, before frequency filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ParsedEdge {
    /// Tail vertex id, as declared.
    pub from: VertexId,
    /// Head vertex id, as declared.
    pub to: VertexId,
    /// Edge label.
    pub label: EdgeLabel,
}

/// A graph as read from the input file, prior to [`crate::preprocess::preprocess`].
#[derive(Clone, Debug, Default)]
pub struct ParsedGraph {
    /// Id as given in the `t # <id>` line.
    pub id: GraphId,
    /// Vertices, in declaration order.
    pub vertices: Vec<ParsedVertex>,
    /// Edges, in declaration order.
    pub edges: Vec<ParsedEdge>,
}
