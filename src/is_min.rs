//! Minimality test: decides whether a DFS code is the lexicographically minimum code
//! over its subgraph's isomorphism class, by growing the minimum code of a concrete
//! "min graph" built from the candidate and comparing step by step.

use crate::dfs_code::{cmp_backward, cmp_first, cmp_forward, rightmost_path, DfsCode, DfsEdge};
use crate::graph::{Edge, EdgeId, VertexId, VertexLabel};
use std::cmp::Ordering;

#[derive(Clone)]
struct MinVertex {
    label: VertexLabel,
    edges: Vec<Edge>,
}

/// A concrete graph realising one DFS code, built fresh for each `is_min` call.
struct MinGraph {
    vertices: Vec<MinVertex>,
    n_edges: usize,
}

impl MinGraph {
    fn vertex_label(&self, id: VertexId) -> VertexLabel {
        self.vertices[id as usize].label
    }

    fn vertex_edges(&self, id: VertexId) -> &[Edge] {
        &self.vertices[id as usize].edges
    }

    fn add_edge(&mut self, from: VertexId, label: i64, to: VertexId, id: EdgeId) {
        self.vertices[to as usize].edges.push(Edge { from: to, to: from, label, id });
        self.vertices[from as usize].edges.push(Edge { from, to, label, id });
    }
}

fn build_min_graph(code: &DfsCode) -> MinGraph {
    let last_vertex = code.iter().map(|e| e.from.max(e.to)).max().expect("non-empty code");
    let mut vertices = vec![MinVertex { label: 0, edges: Vec::new() }; (last_vertex + 1) as usize];
    vertices[0].label = code[0].from_label;
    for edge in code {
        if edge.is_forwards() {
            vertices[edge.to as usize].label = edge.to_label;
        }
    }
    let mut graph = MinGraph { vertices, n_edges: code.len() };
    for (index, edge) in code.iter().enumerate() {
        graph.add_edge(edge.from, edge.edge_label, edge.to, index as EdgeId);
    }
    graph
}

/// A node in the minimality search's own embedding forest: an index-addressed flat
/// array avoids pointer invalidation as the vector grows.
#[derive(Clone, Copy)]
struct MinProjectionLink {
    edge: Edge,
    prev: Option<usize>,
}

struct MinProjectionView {
    has_edge: Vec<bool>,
    vertex_present: Vec<bool>,
    contained_edges: Vec<Edge>,
}

impl MinProjectionView {
    fn new() -> Self {
        MinProjectionView { has_edge: Vec::new(), vertex_present: Vec::new(), contained_edges: Vec::new() }
    }

    fn build_edges_only(&mut self, graph: &MinGraph, links: &[MinProjectionLink], start: usize) {
        if self.has_edge.len() < graph.n_edges {
            self.has_edge.resize(graph.n_edges, false);
        }
        for b in self.has_edge[..graph.n_edges].iter_mut() {
            *b = false;
        }
        self.contained_edges.clear();

        let mut cur = Some(start);
        while let Some(i) = cur {
            let link = &links[i];
            self.contained_edges.push(link.edge);
            self.has_edge[link.edge.id as usize] = true;
            cur = link.prev;
        }
    }

    fn build_vertices_only(&mut self, graph: &MinGraph, links: &[MinProjectionLink], start: usize) {
        let n_vertices = graph.vertices.len();
        if self.vertex_present.len() < n_vertices {
            self.vertex_present.resize(n_vertices, false);
        }
        for v in self.vertex_present[..n_vertices].iter_mut() {
            *v = false;
        }
        self.contained_edges.clear();

        let mut cur = Some(start);
        while let Some(i) = cur {
            let link = &links[i];
            self.contained_edges.push(link.edge);
            self.vertex_present[link.edge.from as usize] = true;
            self.vertex_present[link.edge.to as usize] = true;
            cur = link.prev;
        }
    }

    fn has_edge(&self, id: EdgeId) -> bool {
        self.has_edge[id as usize]
    }

    fn has_vertex(&self, id: VertexId) -> bool {
        self.vertex_present[id as usize]
    }

    fn get_edge(&self, dfs_position: usize) -> Edge {
        let k = self.contained_edges.len();
        self.contained_edges[k - dfs_position - 1]
    }
}

/// Seeds `min_instances` with every first-edge candidate equal to `code[0]`.
/// Returns `None` if some candidate is strictly smaller (code is not minimal).
fn first_instances(first_code: &DfsEdge, graph: &MinGraph) -> Option<Vec<MinProjectionLink>> {
    let mut instances = Vec::new();
    for vertex in &graph.vertices {
        for edge in &vertex.edges {
            let dst_label = graph.vertex_label(edge.to);
            if vertex.label > dst_label {
                continue;
            }
            let candidate = DfsEdge {
                from: 0,
                to: 1,
                from_label: vertex.label,
                edge_label: edge.label,
                to_label: dst_label,
            };
            if cmp_first(&candidate, first_code) == Ordering::Less {
                return None;
            }
            if candidate == *first_code {
                instances.push(MinProjectionLink { edge: *edge, prev: None });
            }
        }
    }
    Some(instances)
}

fn exists_backwards(
    min_instances: &[MinProjectionLink],
    start: usize,
    end: usize,
    view: &mut MinProjectionView,
    graph: &MinGraph,
    rmp: &[EdgeId],
) -> bool {
    for index in start..end {
        view.build_edges_only(graph, min_instances, index);
        let last_edge = view.get_edge(rmp[0] as usize);

        let found = graph.vertex_edges(last_edge.to).iter().any(|edge| {
            if view.has_edge(edge.id) {
                return false;
            }
            rmp[1..].iter().any(|&rmp_index| {
                let rmp_edge = view.get_edge(rmp_index as usize);
                edge.to == rmp_edge.from
            })
        });

        if found {
            return true;
        }
    }
    false
}

fn is_backwards_min(
    min_instances: &mut Vec<MinProjectionLink>,
    start: usize,
    end: usize,
    view: &mut MinProjectionView,
    graph: &MinGraph,
    rmp: &[EdgeId],
    sublist: &DfsCode,
) -> bool {
    let target = *sublist.last().expect("non-empty sublist");

    for index in start..end {
        view.build_edges_only(graph, min_instances, index);
        let last_edge = view.get_edge(rmp[0] as usize);
        let last_node_label = graph.vertex_label(last_edge.to);

        for edge in graph.vertex_edges(last_edge.to) {
            if view.has_edge(edge.id) {
                continue;
            }

            let rmp_match = rmp[1..].iter().find_map(|&rmp_index| {
                let rmp_edge = view.get_edge(rmp_index as usize);
                (edge.to == rmp_edge.from).then_some(rmp_index)
            });
            let Some(rmp_index) = rmp_match else {
                continue;
            };
            let rmp_edge = view.get_edge(rmp_index as usize);
            let to_label = graph.vertex_label(rmp_edge.from);

            let candidate = DfsEdge {
                from: sublist[rmp[0] as usize].to,
                to: sublist[rmp_index as usize].from,
                from_label: last_node_label,
                edge_label: edge.label,
                to_label,
            };

            debug_assert_eq!(candidate.from, target.from);
            debug_assert_eq!(candidate.from_label, target.from_label);

            if cmp_backward(&candidate, &target) == Ordering::Less {
                return false;
            }
            if candidate == target {
                min_instances.push(MinProjectionLink { edge: *edge, prev: Some(index) });
            }
        }
    }
    true
}

#[allow(clippy::too_many_arguments)]
fn check_forward_extensions(
    graph: &MinGraph,
    view: &MinProjectionView,
    edges: &[Edge],
    node_id: VertexId,
    node_label: VertexLabel,
    to_id: VertexId,
    target: &DfsEdge,
    min_instances: &mut Vec<MinProjectionLink>,
    instance_index: usize,
) -> bool {
    for edge in edges {
        if view.has_vertex(edge.to) {
            continue;
        }
        let to_label = graph.vertex_label(edge.to);
        let candidate = DfsEdge {
            from: node_id,
            to: to_id,
            from_label: node_label,
            edge_label: edge.label,
            to_label,
        };
        debug_assert_eq!(candidate.to, target.to);
        if cmp_forward(&candidate, target) == Ordering::Less {
            return false;
        }
        if candidate == *target {
            min_instances.push(MinProjectionLink { edge: *edge, prev: Some(instance_index) });
        }
    }
    true
}

fn is_forwards_min(
    min_instances: &mut Vec<MinProjectionLink>,
    start: usize,
    end: usize,
    view: &mut MinProjectionView,
    graph: &MinGraph,
    rmp: &[EdgeId],
    sublist: &DfsCode,
) -> bool {
    let target = *sublist.last().expect("non-empty sublist");

    for index in start..end {
        view.build_vertices_only(graph, min_instances, index);
        let to_id = sublist[rmp[0] as usize].to + 1;

        let last_forward_edge = view.get_edge(rmp[0] as usize);
        let rightmost_node_id = last_forward_edge.to;
        let rightmost_node_label = graph.vertex_label(rightmost_node_id);
        let rightmost_pattern_id = sublist[rmp[0] as usize].to;

        if !check_forward_extensions(
            graph,
            view,
            graph.vertex_edges(rightmost_node_id),
            rightmost_pattern_id,
            rightmost_node_label,
            to_id,
            &target,
            min_instances,
            index,
        ) {
            return false;
        }
        if target.from == rightmost_pattern_id {
            continue;
        }

        for &rmp_index in rmp {
            let rmp_edge = view.get_edge(rmp_index as usize);
            let ancestor_id = rmp_edge.from;
            let ancestor_label = graph.vertex_label(ancestor_id);
            let ancestor_pattern_id = sublist[rmp_index as usize].from;

            if !check_forward_extensions(
                graph,
                view,
                graph.vertex_edges(ancestor_id),
                ancestor_pattern_id,
                ancestor_label,
                to_id,
                &target,
                min_instances,
                index,
            ) {
                return false;
            }
            if target.from == ancestor_pattern_id {
                break;
            }
        }
    }
    true
}

/// Returns `true` iff `code` is the minimum DFS code of the connected labeled
/// subgraph it represents.
///
/// # Panics (debug only)
/// Panics in debug builds if `code` is empty, its first edge is not `(0, 1)`, or its
/// first edge doesn't satisfy `from_label <= to_label`. Callers must only invoke this
/// on codes built from a normalized first edge.
pub fn is_min(code: &DfsCode) -> bool {
    debug_assert!(!code.is_empty(), "is_min requires a non-empty DFS code");
    debug_assert_eq!(code[0].from, 0, "first DFS edge must be (0, 1)");
    debug_assert_eq!(code[0].to, 1, "first DFS edge must be (0, 1)");
    debug_assert!(
        code[0].from_label <= code[0].to_label,
        "is_min requires a normalized first edge"
    );

    if code.len() == 1 {
        return true;
    }

    let min_graph = build_min_graph(code);
    let Some(mut min_instances) = first_instances(&code[0], &min_graph) else {
        return false;
    };

    let mut rmp: Vec<EdgeId> = vec![0];
    let mut instance_start = 0usize;
    let mut view = MinProjectionView::new();

    for n_codes in 2..=code.len() {
        let sublist = &code[..n_codes];
        let instance_end = min_instances.len();

        if sublist.last().unwrap().is_backwards() {
            if !is_backwards_min(&mut min_instances, instance_start, instance_end, &mut view, &min_graph, &rmp, sublist) {
                return false;
            }
        } else {
            if exists_backwards(&min_instances, instance_start, instance_end, &mut view, &min_graph, &rmp)
                || !is_forwards_min(&mut min_instances, instance_start, instance_end, &mut view, &min_graph, &rmp, sublist)
            {
                return false;
            }
            rmp = rightmost_path(sublist);
        }

        instance_start = instance_end;
    }

    true
}
