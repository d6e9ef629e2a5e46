//! DFS-edge tuples, DFS codes, and the three context-specific comparators used to
//! grow and canonicalize them.

use crate::graph::{EdgeId, EdgeLabel, VertexId, VertexLabel};
use std::cmp::Ordering;

/// One edge of a DFS code: `(from, to)` are indices into the pattern's own vertex
/// sequence, in discovery order; `from_label`/`edge_label`/`to_label` are the labels
/// realising it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct DfsEdge {
    /// Pattern-local index of the edge's tail, in discovery order.
    pub from: VertexId,
    /// Pattern-local index of the edge's head, in discovery order.
    pub to: VertexId,
    /// Label of the `from` vertex.
    pub from_label: VertexLabel,
    /// Label of the edge itself.
    pub edge_label: EdgeLabel,
    /// Label of the `to` vertex.
    pub to_label: VertexLabel,
}

impl DfsEdge {
    /// True if this edge discovers a new vertex (`to > from`).
    pub fn is_forwards(&self) -> bool {
        self.to > self.from
    }

    /// True if this edge closes a cycle back to an earlier vertex (`to < from`).
    pub fn is_backwards(&self) -> bool {
        self.to < self.from
    }
}

/// A DFS code is simply the ordered sequence of its edges; a pattern under construction.
pub type DfsCode = [DfsEdge];

/// Compares two candidate *first* edges of a DFS code (both implicitly `from=0, to=1`).
///
/// Ignores `from`/`to`, which are fixed; orders by `(from_label, edge_label, to_label)`.
pub fn cmp_first(a: &DfsEdge, b: &DfsEdge) -> Ordering {
    (a.from_label, a.edge_label, a.to_label).cmp(&(b.from_label, b.edge_label, b.to_label))
}

/// Compares two candidate forward extensions of the same pattern (both share `to`).
///
/// Orders by `from` *descending*, then `(edge_label, to_label)`. A forward edge leaving
/// a vertex further from the root is lexicographically smaller, since the canonical DFS
/// backtracks before jumping back up.
pub fn cmp_forward(a: &DfsEdge, b: &DfsEdge) -> Ordering {
    b.from
        .cmp(&a.from)
        .then_with(|| a.edge_label.cmp(&b.edge_label))
        .then_with(|| a.to_label.cmp(&b.to_label))
}

/// Compares two candidate backward extensions from the right-most vertex (both share
/// `from` = the right-most vertex).
///
/// Orders by `(to, edge_label)`; `to_label` is redundant once `to` differs, and
/// constant when it doesn't.
pub fn cmp_backward(a: &DfsEdge, b: &DfsEdge) -> Ordering {
    a.to.cmp(&b.to).then_with(|| a.edge_label.cmp(&b.edge_label))
}

/// Computes the right-most path of a DFS code: edge indices, in reverse discovery
/// order, from the right-most vertex back to the root, following only forward edges.
pub fn rightmost_path(code: &DfsCode) -> Vec<EdgeId> {
    let mut path = Vec::new();
    let mut expected_to: Option<VertexId> = None;
    for (index, edge) in code.iter().enumerate().rev() {
        if edge.is_forwards() && (path.is_empty() || expected_to == Some(edge.to)) {
            expected_to = Some(edge.from);
            path.push(index as EdgeId);
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(from: u32, to: u32, fl: i64, el: i64, tl: i64) -> DfsEdge {
        DfsEdge {
            from,
            to,
            from_label: fl,
            edge_label: el,
            to_label: tl,
        }
    }

    #[test]
    fn rmp_single_edge() {
        let code = [e(0, 1, 0, 0, 0)];
        assert_eq!(rightmost_path(&code), vec![0]);
    }

    #[test]
    fn rmp_path_graph() {
        // 0-1-2-3, all forward, a simple path.
        let code = [e(0, 1, 0, 0, 0), e(1, 2, 0, 0, 0), e(2, 3, 0, 0, 0)];
        assert_eq!(rightmost_path(&code), vec![2, 1, 0]);
    }

    #[test]
    fn rmp_with_backward_edge() {
        // Triangle: 0-1 forward, 1-2 forward, 2-0 backward.
        let code = [e(0, 1, 1, 7, 1), e(1, 2, 1, 7, 1), e(2, 0, 1, 7, 1)];
        // Backward edges are never on the RMP themselves; RMP follows forward edges only.
        assert_eq!(rightmost_path(&code), vec![1, 0]);
    }

    #[test]
    fn rmp_branching_pattern() {
        // A "Y": 0-1 forward, 1-2 forward, back to 1, 1-3 forward.
        let code = [
            e(0, 1, 1, 5, 2),
            e(1, 2, 2, 5, 3),
            e(1, 3, 2, 5, 3),
        ];
        assert_eq!(rightmost_path(&code), vec![2, 0]);
    }

    #[test]
    fn forward_cmp_orders_by_descending_from() {
        let a = e(2, 3, 0, 0, 0);
        let b = e(1, 3, 0, 0, 0);
        assert_eq!(cmp_forward(&a, &b), Ordering::Less);
    }
}
