//! The recursive mining driver: seeds one-edge patterns, checks minimality, reports,
//! extends, prunes by support, and recurses.

use crate::dfs_code::{rightmost_path, DfsEdge};
use crate::extend::{extend, support};
use crate::graph::GraphDatabase;
use crate::is_min::is_min;
use crate::projection::ProjectionLink;
use crate::timer::ScopeTimer;
use hashbrown::HashMap;
use std::rc::Rc;

/// One reported pattern: its DFS code, in discovery order, and the input graph ids
/// that contain it (in the order embeddings were observed).
pub struct Report {
    /// The pattern's (minimum) DFS code.
    pub code: Vec<DfsEdge>,
    /// Input graph ids containing the pattern, duplicates removed, discovery order.
    pub support_set: Vec<i64>,
}

/// Receives reports as the driver discovers frequent, canonical patterns. Mirrors the
/// fire-and-forget external sink of the design: mining never blocks on it.
pub trait ReportSink {
    /// Called once per frequent pattern whose DFS code is minimal.
    fn report(&mut self, report: Report);
}

impl<F: FnMut(Report)> ReportSink for F {
    fn report(&mut self, report: Report) {
        self(report)
    }
}

fn distinct_graph_ids(links: &[Rc<ProjectionLink>]) -> Vec<i64> {
    let mut ids = Vec::new();
    for link in links {
        if ids.last() != Some(&link.graph_id) {
            ids.push(link.graph_id);
        }
    }
    ids
}

/// Running counters for the final mining summary.
#[derive(Default)]
struct MiningStats {
    patterns_reported: usize,
    candidates_considered: usize,
}

fn mine_recurse(
    graphs: &GraphDatabase,
    min_freq: usize,
    code: &mut Vec<DfsEdge>,
    subinstances: Vec<Rc<ProjectionLink>>,
    sink: &mut impl ReportSink,
    stats: &mut MiningStats,
) {
    if !is_min(code) {
        return;
    }

    let support_set = distinct_graph_ids(&subinstances);
    log::debug!("pattern depth={} support={}", code.len(), support_set.len());
    stats.patterns_reported += 1;
    sink.report(Report { code: code.clone(), support_set });

    let rmp = rightmost_path(code);
    let ext = extend(graphs, code, &subinstances, &rmp);

    for (edge, links) in ext {
        stats.candidates_considered += 1;
        let s = support(&links);
        if s < min_freq {
            continue;
        }
        code.push(edge);
        mine_recurse(graphs, min_freq, code, links, sink, stats);
        code.pop();
    }
}

/// Mines every frequent, canonical, connected subgraph of `graphs` with support at
/// least `min_freq`, delivering each to `sink`.
pub fn mine(graphs: &GraphDatabase, min_freq: usize, sink: &mut impl ReportSink) {
    let _timer = ScopeTimer::new("mine");
    let mut stats = MiningStats::default();
    let mut seeds: HashMap<DfsEdge, Vec<Rc<ProjectionLink>>> = HashMap::new();

    for graph in graphs.graphs() {
        for vertex in graph.vertices() {
            for edge in graph.vertex_edges(vertex.id) {
                let to_vertex = graph.vertex(edge.to);
                if vertex.label > to_vertex.label {
                    // is_min's first-edge precondition requires from_label <= to_label; the
                    // opposite-direction half-edge of this same undirected edge is seeded
                    // instead (or, if labels tie, both directions pass and are seeded).
                    continue;
                }
                let key = DfsEdge {
                    from: 0,
                    to: 1,
                    from_label: vertex.label,
                    edge_label: edge.label,
                    to_label: to_vertex.label,
                };
                seeds.entry(key).or_default().push(Rc::new(ProjectionLink {
                    graph_id: graph.id,
                    edge: *edge,
                    prev: None,
                }));
            }
        }
    }

    let mut code = Vec::new();
    for (edge, links) in seeds {
        stats.candidates_considered += 1;
        let s = support(&links);
        if s < min_freq {
            continue;
        }
        code.push(edge);
        mine_recurse(graphs, min_freq, &mut code, links, sink, &mut stats);
        code.pop();
    }

    log::info!(
        "mine: {} patterns reported, {} candidate codes considered",
        stats.patterns_reported,
        stats.candidates_considered
    );
}
