//! Right-most-path extension: given a frequent pattern and its projections, enumerate
//! every one-edge child, grouped by the DFS edge it would add.

use crate::dfs_code::{DfsCode, DfsEdge};
use crate::graph::{CompactGraph, EdgeId, GraphDatabase, GraphId};
use crate::projection::{ProjectionLink, ProjectionView};
use hashbrown::HashMap;
use std::cmp::Ordering;
use std::rc::Rc;

/// Maps each candidate DFS edge to the list of embeddings (one per legal occurrence)
/// that support adding it.
pub type ExtensionMap = HashMap<DfsEdge, Vec<Rc<ProjectionLink>>>;

fn extend_backwards(
    subinstance: &Rc<ProjectionLink>,
    view: &ProjectionView,
    graph: &CompactGraph,
    code: &DfsCode,
    rightmost_path: &[EdgeId],
    map: &mut ExtensionMap,
) {
    let last_edge = view.get_edge(rightmost_path[0] as usize);
    let last_node = graph.vertex(last_edge.to);

    for candidate in graph.vertex_edges(last_edge.to) {
        if view.has_edge(candidate.id) {
            continue;
        }

        let rmp_match = rightmost_path[1..].iter().find_map(|&rmp_index| {
            let rmp_edge = view.get_edge(rmp_index as usize);
            (candidate.to == rmp_edge.from).then_some(rmp_index)
        });
        let Some(rmp_index) = rmp_match else {
            continue;
        };
        let rmp_edge = view.get_edge(rmp_index as usize);
        let rmp_to_node = graph.vertex(rmp_edge.to);

        let could_have_been_earlier = (rmp_edge.label, rmp_to_node.label)
            .cmp(&(candidate.label, last_node.label))
            != Ordering::Greater;
        if !could_have_been_earlier {
            continue;
        }

        let rmp_from_node = graph.vertex(rmp_edge.from);
        let new_code = DfsEdge {
            from: code[rightmost_path[0] as usize].to,
            to: code[rmp_index as usize].from,
            from_label: last_node.label,
            edge_label: candidate.label,
            to_label: rmp_from_node.label,
        };

        map.entry(new_code).or_default().push(Rc::new(ProjectionLink {
            graph_id: graph.id,
            edge: *candidate,
            prev: Some(Rc::clone(subinstance)),
        }));
    }
}

fn extend_forwards_from_rightmost_vertex(
    subinstance: &Rc<ProjectionLink>,
    view: &ProjectionView,
    graph: &CompactGraph,
    code: &DfsCode,
    rightmost_path: &[EdgeId],
    map: &mut ExtensionMap,
) {
    let last_edge = view.get_edge(rightmost_path[0] as usize);
    let last_node = graph.vertex(last_edge.to);
    let min_label = code[0].from_label;
    let to_id = code[rightmost_path[0] as usize].to;

    for candidate in graph.vertex_edges(last_edge.to) {
        let to_node = graph.vertex(candidate.to);
        if view.has_vertex(candidate.to) || to_node.label < min_label {
            continue;
        }

        let new_code = DfsEdge {
            from: to_id,
            to: to_id + 1,
            from_label: last_node.label,
            edge_label: candidate.label,
            to_label: to_node.label,
        };

        map.entry(new_code).or_default().push(Rc::new(ProjectionLink {
            graph_id: graph.id,
            edge: *candidate,
            prev: Some(Rc::clone(subinstance)),
        }));
    }
}

fn extend_forwards_from_rightmost_path(
    subinstance: &Rc<ProjectionLink>,
    view: &ProjectionView,
    graph: &CompactGraph,
    code: &DfsCode,
    rightmost_path: &[EdgeId],
    map: &mut ExtensionMap,
) {
    let min_label = code[0].from_label;
    let to_id = code[rightmost_path[0] as usize].to;

    for &rmp_index in rightmost_path {
        let rmp_edge = view.get_edge(rmp_index as usize);
        let rmp_edge_from = graph.vertex(rmp_edge.from);
        let rmp_edge_to = graph.vertex(rmp_edge.to);

        for candidate in graph.vertex_edges(rmp_edge.from) {
            let to_node = graph.vertex(candidate.to);
            if view.has_vertex(candidate.to) || to_node.label < min_label {
                continue;
            }

            let could_have_been_earlier = (rmp_edge.label, rmp_edge_to.label)
                .cmp(&(candidate.label, to_node.label))
                != Ordering::Greater;
            if !could_have_been_earlier {
                continue;
            }

            let from_id = code[rmp_index as usize].from;
            let new_code = DfsEdge {
                from: from_id,
                to: to_id + 1,
                from_label: rmp_edge_from.label,
                edge_label: candidate.label,
                to_label: to_node.label,
            };

            map.entry(new_code).or_default().push(Rc::new(ProjectionLink {
                graph_id: graph.id,
                edge: *candidate,
                prev: Some(Rc::clone(subinstance)),
            }));
        }
    }
}

/// Finds all one-edge extensions of `code` given its `subinstances` (one leaf
/// [`ProjectionLink`] per embedding) and `rightmost_path`.
pub fn extend(
    graphs: &GraphDatabase,
    code: &DfsCode,
    subinstances: &[Rc<ProjectionLink>],
    rightmost_path: &[EdgeId],
) -> ExtensionMap {
    let mut map = ExtensionMap::new();
    let mut view = ProjectionView::new();

    for subinstance in subinstances {
        let graph = graphs.by_id(subinstance.graph_id);
        view.build_view(subinstance, graph);

        extend_backwards(subinstance, &view, graph, code, rightmost_path, &mut map);
        extend_forwards_from_rightmost_vertex(subinstance, &view, graph, code, rightmost_path, &mut map);
        extend_forwards_from_rightmost_path(subinstance, &view, graph, code, rightmost_path, &mut map);
    }

    map
}

/// Counts the distinct graph ids among a list of embeddings. Projection links for a
/// given extension are appended in host-graph iteration order, so the same graph id
/// appears contiguously; support is transitions-between-distinct-ids plus one.
pub fn support(links: &[Rc<ProjectionLink>]) -> usize {
    let Some(first) = links.first() else {
        return 0;
    };
    let mut prev: GraphId = first.graph_id;
    let mut support = 1usize;
    for link in &links[1..] {
        if link.graph_id != prev {
            prev = link.graph_id;
            support += 1;
        }
    }
    support
}
