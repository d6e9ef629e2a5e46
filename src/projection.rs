//! Projection links (the embedding forest tying a pattern's DFS code to concrete
//! edges of the input graphs) and the projection view that exposes O(1) membership
//! queries over one embedding at a time.

use crate::graph::{CompactGraph, Edge, EdgeId, GraphId, VertexId};
use std::rc::Rc;

/// One edge of one embedding of the current pattern. `prev` chains back to the link
/// realising the previous DFS edge of the same embedding, so embeddings that share a
/// prefix share the corresponding `Rc` nodes — a forest of shared-prefix chains with
/// automatic, frame-independent lifetime management instead of a hand-rolled arena.
#[derive(Clone, Debug)]
pub struct ProjectionLink {
    /// Input graph this embedding lives in.
    pub graph_id: GraphId,
    /// The concrete half-edge realising this DFS edge in the embedding.
    pub edge: Edge,
    /// Link realising the previous DFS edge of the same embedding, or `None` for the first.
    pub prev: Option<Rc<ProjectionLink>>,
}

/// Scratch structure materialising "which edges/vertices of the current host graph are
/// used by this embedding" in O(1), reused across many embeddings to amortise
/// allocation. Supports both a full rebuild and, when consecutive calls are against the
/// same host graph, an incremental update proportional to the divergence depth.
pub struct ProjectionView {
    has_edge: Vec<bool>,
    vertex_refcount: Vec<u32>,
    contained_edges: Vec<Edge>,
    current_graph_id: Option<GraphId>,
    current_link: Option<Rc<ProjectionLink>>,
}

impl ProjectionView {
    /// An empty view with no backing capacity yet.
    pub fn new() -> Self {
        ProjectionView {
            has_edge: Vec::new(),
            vertex_refcount: Vec::new(),
            contained_edges: Vec::new(),
            current_graph_id: None,
            current_link: None,
        }
    }

    fn ensure_capacity(&mut self, n_edges: usize, n_vertices: usize) {
        if self.has_edge.len() < n_edges {
            self.has_edge.resize(n_edges, false);
        }
        if self.vertex_refcount.len() < n_vertices {
            self.vertex_refcount.resize(n_vertices, 0);
        }
    }

    /// Materialises the embedding ending at `start`, within `graph`.
    pub fn build_view(&mut self, start: &Rc<ProjectionLink>, graph: &CompactGraph) {
        self.ensure_capacity(graph.n_edges as usize, graph.vertices().len());

        if self.current_graph_id != Some(graph.id) {
            self.full_rebuild(start, graph);
        } else {
            self.incremental_rebuild(start);
        }
        self.current_link = Some(Rc::clone(start));
        self.current_graph_id = Some(graph.id);
    }

    fn full_rebuild(&mut self, start: &Rc<ProjectionLink>, graph: &CompactGraph) {
        for b in self.has_edge[..graph.n_edges as usize].iter_mut() {
            *b = false;
        }
        for r in self.vertex_refcount[..graph.vertices().len()].iter_mut() {
            *r = 0;
        }
        self.contained_edges.clear();

        let mut cur = Some(Rc::clone(start));
        while let Some(link) = cur {
            self.contained_edges.push(link.edge);
            self.has_edge[link.edge.id as usize] = true;
            self.vertex_refcount[link.edge.from as usize] += 1;
            self.vertex_refcount[link.edge.to as usize] += 1;
            cur = link.prev.clone();
        }
    }

    /// Walks the new and previous embedding chains in lockstep, touching only the
    /// suffix where they diverge. Assumes both chains have the same length and are
    /// over the same (already current) host graph.
    fn incremental_rebuild(&mut self, start: &Rc<ProjectionLink>) {
        let mut new_link = Rc::clone(start);
        let mut old_link = self
            .current_link
            .clone()
            .expect("incremental rebuild requires a previously built view");
        let mut index = 0usize;

        loop {
            if index < self.contained_edges.len() {
                self.contained_edges[index] = new_link.edge;
            } else {
                self.contained_edges.push(new_link.edge);
            }
            index += 1;

            self.has_edge[old_link.edge.id as usize] ^= true;
            self.vertex_refcount[old_link.edge.from as usize] -= 1;
            self.vertex_refcount[old_link.edge.to as usize] -= 1;

            self.has_edge[new_link.edge.id as usize] ^= true;
            self.vertex_refcount[new_link.edge.from as usize] += 1;
            self.vertex_refcount[new_link.edge.to as usize] += 1;

            match (new_link.prev.clone(), old_link.prev.clone()) {
                (Some(next_new), Some(next_old)) => {
                    if Rc::ptr_eq(&next_new, &next_old) {
                        break;
                    }
                    new_link = next_new;
                    old_link = next_old;
                }
                (None, None) => break,
                _ => break,
            }
        }
    }

    /// Whether host edge `id` is used by the currently built embedding.
    pub fn has_edge(&self, id: EdgeId) -> bool {
        self.has_edge[id as usize]
    }

    /// Whether host vertex `id` is used by the currently built embedding.
    pub fn has_vertex(&self, id: VertexId) -> bool {
        self.vertex_refcount[id as usize] != 0
    }

    /// Returns the concrete edge realising the `i`-th edge of the DFS code.
    pub fn get_edge(&self, dfs_position: usize) -> Edge {
        let k = self.contained_edges.len();
        self.contained_edges[k - dfs_position - 1]
    }
}

impl Default for ProjectionView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CompactGraph;

    fn triangle() -> CompactGraph {
        // 0-1(lbl 5), 1-2(lbl 5), 2-0(lbl 5), all vertices label 1.
        CompactGraph::build(
            0,
            3,
            vec![
                (
                    1,
                    vec![
                        Edge { from: 0, to: 1, label: 5, id: 0 },
                        Edge { from: 0, to: 2, label: 5, id: 2 },
                    ],
                ),
                (
                    1,
                    vec![
                        Edge { from: 1, to: 0, label: 5, id: 0 },
                        Edge { from: 1, to: 2, label: 5, id: 1 },
                    ],
                ),
                (
                    1,
                    vec![
                        Edge { from: 2, to: 1, label: 5, id: 1 },
                        Edge { from: 2, to: 0, label: 5, id: 2 },
                    ],
                ),
            ],
        )
    }

    #[test]
    fn full_rebuild_marks_exactly_the_chain() {
        let graph = triangle();
        let link0 = Rc::new(ProjectionLink {
            graph_id: 0,
            edge: Edge { from: 0, to: 1, label: 5, id: 0 },
            prev: None,
        });
        let link1 = Rc::new(ProjectionLink {
            graph_id: 0,
            edge: Edge { from: 1, to: 2, label: 5, id: 1 },
            prev: Some(link0.clone()),
        });

        let mut view = ProjectionView::new();
        view.build_view(&link1, &graph);

        assert!(view.has_edge(0));
        assert!(view.has_edge(1));
        assert!(!view.has_edge(2));
        assert!(view.has_vertex(0));
        assert!(view.has_vertex(1));
        assert!(view.has_vertex(2));
        assert_eq!(view.get_edge(0).id, 0);
        assert_eq!(view.get_edge(1).id, 1);
    }

    #[test]
    fn incremental_matches_full_rebuild() {
        let graph = triangle();
        let link_a0 = Rc::new(ProjectionLink {
            graph_id: 0,
            edge: Edge { from: 0, to: 1, label: 5, id: 0 },
            prev: None,
        });
        let link_a1 = Rc::new(ProjectionLink {
            graph_id: 0,
            edge: Edge { from: 1, to: 2, label: 5, id: 1 },
            prev: Some(link_a0.clone()),
        });
        let link_b1 = Rc::new(ProjectionLink {
            graph_id: 0,
            edge: Edge { from: 2, to: 0, label: 5, id: 2 },
            prev: Some(link_a0.clone()),
        });

        let mut incremental = ProjectionView::new();
        incremental.build_view(&link_a1, &graph);
        incremental.build_view(&link_b1, &graph);

        let mut fresh = ProjectionView::new();
        fresh.build_view(&link_b1, &graph);

        assert_eq!(incremental.has_edge(0), fresh.has_edge(0));
        assert_eq!(incremental.has_edge(1), fresh.has_edge(1));
        assert_eq!(incremental.has_edge(2), fresh.has_edge(2));
        assert_eq!(incremental.has_vertex(0), fresh.has_vertex(0));
        assert_eq!(incremental.has_vertex(1), fresh.has_vertex(1));
        assert_eq!(incremental.has_vertex(2), fresh.has_vertex(2));
    }

    #[test]
    fn shared_vertex_refcount_survives_partial_removal() {
        // Two edges sharing vertex 0: 0-1 and 0-2. Incrementally moving from one chain
        // to a sibling chain must not mark vertex 0 as absent.
        let graph = triangle();
        let link0 = Rc::new(ProjectionLink {
            graph_id: 0,
            edge: Edge { from: 0, to: 1, label: 5, id: 0 },
            prev: None,
        });
        let sibling = Rc::new(ProjectionLink {
            graph_id: 0,
            edge: Edge { from: 0, to: 2, label: 5, id: 2 },
            prev: None,
        });

        let mut view = ProjectionView::new();
        view.build_view(&link0, &graph);
        view.build_view(&sibling, &graph);

        assert!(view.has_vertex(0));
        assert!(!view.has_vertex(1));
        assert!(view.has_vertex(2));
    }
}
