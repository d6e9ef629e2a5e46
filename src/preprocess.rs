//! Label-frequency preprocessing: turns raw parsed graphs into compact adjacency
//! graphs, pruning vertex labels and edge-label triples that cannot contribute to any
//! frequent pattern (anti-monotonicity guarantees this never hides a frequent
//! subgraph: every edge of a frequent pattern is itself a frequent 1-edge pattern).

use crate::graph::{CompactGraph, Edge, ParsedGraph, VertexLabel};
use hashbrown::{HashMap, HashSet};

type EdgeTriple = (VertexLabel, i64, VertexLabel);

fn normalize_triple(a: VertexLabel, edge_label: i64, b: VertexLabel) -> EdgeTriple {
    if a <= b {
        (a, edge_label, b)
    } else {
        (b, edge_label, a)
    }
}

fn frequent_vertex_labels(graphs: &[ParsedGraph], min_freq: usize) -> HashMap<VertexLabel, usize> {
    let mut counts: HashMap<VertexLabel, usize> = HashMap::new();
    for graph in graphs {
        let mut seen = HashSet::new();
        for vertex in &graph.vertices {
            if seen.insert(vertex.label) {
                *counts.entry(vertex.label).or_insert(0) += 1;
            }
        }
    }
    counts.retain(|_, count| *count >= min_freq);
    counts
}

fn frequent_edge_triples(
    graphs: &[ParsedGraph],
    frequent_vertex_labels: &HashMap<VertexLabel, usize>,
    min_freq: usize,
) -> HashSet<EdgeTriple> {
    let mut counts: HashMap<EdgeTriple, usize> = HashMap::new();
    for graph in graphs {
        let mut seen = HashSet::new();
        for edge in &graph.edges {
            let from_label = graph.vertices[edge.from as usize].label;
            let to_label = graph.vertices[edge.to as usize].label;
            if !frequent_vertex_labels.contains_key(&from_label)
                || !frequent_vertex_labels.contains_key(&to_label)
            {
                continue;
            }
            let triple = normalize_triple(from_label, edge.label, to_label);
            if seen.insert(triple) {
                *counts.entry(triple).or_insert(0) += 1;
            }
        }
    }
    counts.retain(|_, count| *count >= min_freq);
    counts.into_keys().collect()
}

/// Prunes infrequent vertex labels and edge-label triples, drops graphs left with no
/// edges, densely renumbers the surviving vertices of each remaining graph, and
/// builds a [`CompactGraph`] for each.
pub fn preprocess(graphs: Vec<ParsedGraph>, min_freq: usize) -> Vec<CompactGraph> {
    let vertex_labels = frequent_vertex_labels(&graphs, min_freq);
    let edge_triples = frequent_edge_triples(&graphs, &vertex_labels, min_freq);

    let n_input_graphs = graphs.len();
    let mut result = Vec::new();
    let mut n_dropped = 0usize;

    for graph in graphs {
        let mut dense_id: HashMap<u32, u32> = HashMap::new();
        let mut surviving_edges: Vec<(u32, u32, i64)> = Vec::new();

        for edge in &graph.edges {
            let from_label = graph.vertices[edge.from as usize].label;
            let to_label = graph.vertices[edge.to as usize].label;
            if !edge_triples.contains(&normalize_triple(from_label, edge.label, to_label)) {
                continue;
            }
            surviving_edges.push((edge.from, edge.to, edge.label));
        }

        if surviving_edges.is_empty() {
            n_dropped += 1;
            continue;
        }

        for &(from, to, _) in &surviving_edges {
            let next = dense_id.len() as u32;
            dense_id.entry(from).or_insert(next);
            let next = dense_id.len() as u32;
            dense_id.entry(to).or_insert(next);
        }

        let n_vertices = dense_id.len();
        let mut per_vertex: Vec<(VertexLabel, Vec<Edge>)> = vec![(0, Vec::new()); n_vertices];
        for (&old_id, &new_id) in &dense_id {
            per_vertex[new_id as usize].0 = graph.vertices[old_id as usize].label;
        }

        let n_edges = surviving_edges.len() as u32;
        for (edge_id, &(from, to, label)) in surviving_edges.iter().enumerate() {
            let new_from = dense_id[&from];
            let new_to = dense_id[&to];
            per_vertex[new_from as usize].1.push(Edge {
                from: new_from,
                to: new_to,
                label,
                id: edge_id as u32,
            });
            per_vertex[new_to as usize].1.push(Edge {
                from: new_to,
                to: new_from,
                label,
                id: edge_id as u32,
            });
        }

        result.push(CompactGraph::build(graph.id, n_edges, per_vertex));
    }

    log::info!(
        "preprocess: {} input graphs, {} vertex labels kept, {} edge triples kept, {} graphs dropped (no surviving edges)",
        n_input_graphs,
        vertex_labels.len(),
        edge_triples.len(),
        n_dropped
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ParsedEdge, ParsedVertex};

    fn pg(id: i64, vertices: &[(u32, i64)], edges: &[(u32, u32, i64)]) -> ParsedGraph {
        ParsedGraph {
            id,
            vertices: vertices.iter().map(|&(id, label)| ParsedVertex { id, label }).collect(),
            edges: edges
                .iter()
                .map(|&(from, to, label)| ParsedEdge { from, to, label })
                .collect(),
        }
    }

    #[test]
    fn drops_infrequent_edge_triples() {
        let a = pg(0, &[(0, 0), (1, 0)], &[(0, 1, 7)]);
        let b = pg(1, &[(0, 0), (1, 0)], &[(0, 1, 8)]);
        let compact = preprocess(vec![a, b], 2);
        assert!(compact.is_empty());
    }

    #[test]
    fn keeps_frequent_edges_and_renumbers_densely() {
        let a = pg(0, &[(0, 0), (1, 5), (2, 0)], &[(0, 2, 7)]);
        let b = pg(1, &[(0, 0), (1, 0)], &[(0, 1, 7)]);
        let compact = preprocess(vec![a, b], 2);
        assert_eq!(compact.len(), 2);
        // Graph 0's isolated vertex (label 5, zero-degree after drop) must be gone.
        assert_eq!(compact[0].vertices().len(), 2);
        for v in compact[0].vertices() {
            assert_eq!(v.label, 0);
        }
    }

    #[test]
    fn drops_graphs_left_with_no_edges() {
        let a = pg(0, &[(0, 0), (1, 0)], &[(0, 1, 7)]);
        let b = pg(1, &[(0, 0), (1, 0)], &[(0, 1, 9)]);
        let compact = preprocess(vec![a, b], 1);
        assert_eq!(compact.len(), 2);

        // Two graphs share the frequent triple (label 7); a third has only a rare
        // triple and must be dropped entirely once that triple fails min_freq=2.
        let shared_a = pg(0, &[(0, 0), (1, 0)], &[(0, 1, 7)]);
        let shared_b = pg(1, &[(0, 0), (1, 0)], &[(0, 1, 7)]);
        let only_rare = pg(2, &[(0, 0), (1, 0)], &[(0, 1, 42)]);
        let compact2 = preprocess(vec![shared_a, shared_b, only_rare], 2);
        assert_eq!(compact2.len(), 2);
    }
}
