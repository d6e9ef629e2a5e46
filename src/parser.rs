//! Text-format parsing for graph database input files and pattern output files.
//!
//! Input format: `t # <id>` starts a graph, `v <id> <label>` declares a vertex, `e
//! <from> <to> <label>` an undirected edge; `#` and blank lines are ignored. Output
//! format additionally carries `t # <id> * <support>` and a trailing `x: <ids...>`
//! support-set line per pattern block.

use crate::error::ParseError;
use crate::graph::{GraphId, ParsedEdge, ParsedGraph, ParsedVertex};
use std::collections::BTreeSet;
use std::io::BufRead;

/// Parses an input graph database from `reader`.
pub fn parse_input<R: BufRead>(reader: R) -> Result<Vec<ParsedGraph>, ParseError> {
    let mut graphs = Vec::new();
    let mut current: Option<ParsedGraph> = None;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(line_type) = tokens.next() else {
            continue;
        };

        match line_type {
            "t" => {
                if let Some(graph) = current.take() {
                    graphs.push(graph);
                }
                let pound = tokens.next();
                let id = tokens.next().and_then(|t| t.parse::<GraphId>().ok());
                let (Some("#"), Some(id)) = (pound, id) else {
                    return Err(ParseError::MalformedLine {
                        line: line_no,
                        expected: "t # <id>".to_string(),
                    });
                };
                current = Some(ParsedGraph { id, vertices: Vec::new(), edges: Vec::new() });
            }
            "v" => {
                let graph = current.as_mut().ok_or(ParseError::NoCurrentGraph { line: line_no, line_type: 'v' })?;
                let id = tokens.next().and_then(|t| t.parse::<u32>().ok());
                let label = tokens.next().and_then(|t| t.parse::<i64>().ok());
                let (Some(id), Some(label)) = (id, label) else {
                    return Err(ParseError::MalformedLine {
                        line: line_no,
                        expected: "v <id> <label>".to_string(),
                    });
                };
                let expected = graph.vertices.len() as u32;
                if id != expected {
                    return Err(ParseError::VertexIdOutOfSequence { line: line_no, got: id, expected });
                }
                graph.vertices.push(ParsedVertex { id, label });
            }
            "e" => {
                let graph = current.as_mut().ok_or(ParseError::NoCurrentGraph { line: line_no, line_type: 'e' })?;
                let from = tokens.next().and_then(|t| t.parse::<u32>().ok());
                let to = tokens.next().and_then(|t| t.parse::<u32>().ok());
                let label = tokens.next().and_then(|t| t.parse::<i64>().ok());
                let (Some(from), Some(to), Some(label)) = (from, to, label) else {
                    return Err(ParseError::MalformedLine {
                        line: line_no,
                        expected: "e <from_id> <to_id> <label>".to_string(),
                    });
                };
                let declared = graph.vertices.len();
                if from as usize >= declared {
                    return Err(ParseError::EdgeEndpointOutOfRange { line: line_no, vertex_id: from, declared });
                }
                if to as usize >= declared {
                    return Err(ParseError::EdgeEndpointOutOfRange { line: line_no, vertex_id: to, declared });
                }
                graph.edges.push(ParsedEdge { from, to, label });
            }
            other => {
                return Err(ParseError::UnknownLineType { line: line_no, token: other.to_string() });
            }
        }
    }

    if let Some(graph) = current.take() {
        graphs.push(graph);
    }

    Ok(graphs)
}

/// One reported pattern as re-parsed from an output file: vertices in discovery
/// order, edges in DFS-code order, and the support set of input graph ids. Ordering
/// and equality deliberately ignore `id`, so two runs that assign different pattern
/// ids to the same pattern still compare equal.
#[derive(Clone, Debug, Eq)]
pub struct ParsedOutputGraph {
    /// The pattern id assigned by the producing run; excluded from comparison.
    pub id: GraphId,
    /// Vertices, in discovery order.
    pub vertices: Vec<ParsedVertex>,
    /// Edges, in DFS-code order.
    pub edges: Vec<ParsedEdge>,
    /// Support set (input graph ids containing this pattern).
    pub support: Vec<GraphId>,
}

impl PartialEq for ParsedOutputGraph {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.edges == other.edges && self.support == other.support
    }
}

impl PartialOrd for ParsedOutputGraph {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ParsedOutputGraph {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (&self.vertices, &self.edges, &self.support).cmp(&(&other.vertices, &other.edges, &other.support))
    }
}

/// Parses an output file (the pattern-report text format) into a set of patterns,
/// suitable for set-equality comparison between two independent runs.
pub fn parse_output<R: BufRead>(reader: R) -> Result<BTreeSet<ParsedOutputGraph>, ParseError> {
    let mut graphs = BTreeSet::new();
    let mut current: Option<ParsedOutputGraph> = None;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(line_type) = tokens.next() else {
            continue;
        };

        match line_type {
            "t" => {
                if let Some(graph) = current.take() {
                    graphs.insert(graph);
                }
                let pound = tokens.next();
                let id = tokens.next().and_then(|t| t.parse::<GraphId>().ok());
                let star = tokens.next();
                let support_hint = tokens.next().and_then(|t| t.parse::<usize>().ok());
                let (Some("#"), Some(id), Some("*"), Some(_)) = (pound, id, star, support_hint) else {
                    return Err(ParseError::MalformedLine {
                        line: line_no,
                        expected: "t # <id> * <support>".to_string(),
                    });
                };
                current = Some(ParsedOutputGraph { id, vertices: Vec::new(), edges: Vec::new(), support: Vec::new() });
            }
            "v" => {
                let graph = current.as_mut().ok_or(ParseError::NoCurrentGraph { line: line_no, line_type: 'v' })?;
                let id = tokens.next().and_then(|t| t.parse::<u32>().ok());
                let label = tokens.next().and_then(|t| t.parse::<i64>().ok());
                let (Some(id), Some(label)) = (id, label) else {
                    return Err(ParseError::MalformedLine {
                        line: line_no,
                        expected: "v <id> <label>".to_string(),
                    });
                };
                graph.vertices.push(ParsedVertex { id, label });
            }
            "e" => {
                let graph = current.as_mut().ok_or(ParseError::NoCurrentGraph { line: line_no, line_type: 'e' })?;
                let from = tokens.next().and_then(|t| t.parse::<u32>().ok());
                let to = tokens.next().and_then(|t| t.parse::<u32>().ok());
                let label = tokens.next().and_then(|t| t.parse::<i64>().ok());
                let (Some(from), Some(to), Some(label)) = (from, to, label) else {
                    return Err(ParseError::MalformedLine {
                        line: line_no,
                        expected: "e <from_id> <to_id> <label>".to_string(),
                    });
                };
                graph.edges.push(ParsedEdge { from, to, label });
            }
            "x:" | "x" => {
                let graph = current.as_mut().ok_or(ParseError::NoCurrentGraph { line: line_no, line_type: 'x' })?;
                if line_type == "x" && tokens.next() != Some(":") {
                    return Err(ParseError::MalformedLine {
                        line: line_no,
                        expected: "x: <support list>".to_string(),
                    });
                }
                for token in tokens {
                    let id = token.parse::<GraphId>().map_err(|_| ParseError::MalformedLine {
                        line: line_no,
                        expected: "x: <support list>".to_string(),
                    })?;
                    graph.support.push(id);
                }
            }
            other => {
                return Err(ParseError::UnknownLineType { line: line_no, token: other.to_string() });
            }
        }
    }

    if let Some(graph) = current.take() {
        graphs.insert(graph);
    }

    Ok(graphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_single_edge_graph() {
        let input = "t # 0\nv 0 1\nv 1 2\ne 0 1 5\n";
        let graphs = parse_input(Cursor::new(input)).unwrap();
        assert_eq!(graphs.len(), 1);
        assert_eq!(graphs[0].id, 0);
        assert_eq!(graphs[0].vertices.len(), 2);
        assert_eq!(graphs[0].edges.len(), 1);
    }

    #[test]
    fn parses_multiple_graphs_and_skips_comments_and_blanks() {
        let input = "# header comment\nt # 0\nv 0 1\nv 1 1\ne 0 1 5\n\nt # 1\nv 0 2\n";
        let graphs = parse_input(Cursor::new(input)).unwrap();
        assert_eq!(graphs.len(), 2);
        assert_eq!(graphs[1].id, 1);
        assert!(graphs[1].edges.is_empty());
    }

    #[test]
    fn rejects_out_of_sequence_vertex_id() {
        let input = "t # 0\nv 0 1\nv 2 1\n";
        let err = parse_input(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, ParseError::VertexIdOutOfSequence { got: 2, expected: 1, .. }));
    }

    #[test]
    fn rejects_edge_endpoint_out_of_range() {
        let input = "t # 0\nv 0 1\ne 0 5 7\n";
        let err = parse_input(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, ParseError::EdgeEndpointOutOfRange { vertex_id: 5, .. }));
    }

    #[test]
    fn rejects_unknown_line_type() {
        let input = "t # 0\nz garbage\n";
        let err = parse_input(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, ParseError::UnknownLineType { .. }));
    }

    #[test]
    fn output_round_trip_and_set_equality_ignores_pattern_id() {
        let a = "t # 0 * 2\nv 0 1\nv 1 1\ne 0 1 5\nx: 3 7\n";
        let b = "t # 99 * 2\nv 0 1\nv 1 1\ne 0 1 5\nx: 3 7\n";
        let parsed_a = parse_output(Cursor::new(a)).unwrap();
        let parsed_b = parse_output(Cursor::new(b)).unwrap();
        assert_eq!(parsed_a.len(), 1);
        assert_eq!(parsed_a, parsed_b);
    }

    #[test]
    fn output_distinguishes_different_support_sets() {
        let a = "t # 0 * 1\nv 0 1\nv 1 1\ne 0 1 5\nx: 3\n";
        let b = "t # 0 * 1\nv 0 1\nv 1 1\ne 0 1 5\nx: 4\n";
        let parsed_a = parse_output(Cursor::new(a)).unwrap();
        let parsed_b = parse_output(Cursor::new(b)).unwrap();
        assert_ne!(parsed_a, parsed_b);
    }
}
