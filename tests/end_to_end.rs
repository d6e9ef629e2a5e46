//! End-to-end scenarios driving the library's public `mine` entry point, and one
//! driving the `mine`/`validate` binaries directly through a subprocess.

use gspan_miner::dfs_code::DfsEdge;
use gspan_miner::graph::GraphDatabase;
use gspan_miner::mine::{mine, Report};
use gspan_miner::parser::parse_input;
use gspan_miner::preprocess::preprocess;
use std::io::Cursor;

fn run(input: &str, min_freq: usize) -> Vec<Report> {
    let graphs = parse_input(Cursor::new(input)).expect("well-formed input");
    let compact = GraphDatabase::new(preprocess(graphs, min_freq));
    let mut reports = Vec::new();
    mine(&compact, min_freq, &mut |r: Report| reports.push(r));
    reports
}

#[test]
fn single_edge_database_reports_exactly_one_pattern() {
    let input = "t # 0\nv 0 0\nv 1 0\ne 0 1 5\n";
    let reports = run(input, 1);

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].support_set, vec![0]);
    assert_eq!(reports[0].code, vec![DfsEdge { from: 0, to: 1, from_label: 0, edge_label: 5, to_label: 0 }]);
}

#[test]
fn triangle_reports_its_canonical_three_edge_pattern() {
    let input = "t # 0\nv 0 1\nv 1 1\nv 2 1\ne 0 1 7\ne 1 2 7\ne 2 0 7\n";
    let reports = run(input, 1);

    let triangle = reports.iter().find(|r| r.code.len() == 3).expect("triangle pattern reported");
    assert_eq!(triangle.support_set, vec![0]);
    for r in &reports {
        assert!(gspan_miner::is_min::is_min(&r.code));
    }
}

#[test]
fn frequency_pruning_drops_patterns_below_min_freq() {
    let input = "t # 0\nv 0 0\nv 1 0\ne 0 1 7\nt # 1\nv 0 0\nv 1 0\ne 0 1 8\n";
    let reports = run(input, 2);
    assert!(reports.is_empty(), "neither edge label reaches support 2");
}

#[test]
fn canonicity_filter_never_reports_a_non_minimal_start() {
    // a(1)-b(2)-c(3), both edges labeled 5: starting the DFS code at c is not minimal.
    let input = "t # 0\nv 0 1\nv 1 2\nv 2 3\ne 0 1 5\ne 1 2 5\n";
    let reports = run(input, 1);

    let non_canonical_start_at_c = vec![
        DfsEdge { from: 0, to: 1, from_label: 3, edge_label: 5, to_label: 2 },
        DfsEdge { from: 1, to: 2, from_label: 2, edge_label: 5, to_label: 1 },
    ];
    assert!(reports.iter().all(|r| r.code != non_canonical_start_at_c));
    for r in &reports {
        assert!(gspan_miner::is_min::is_min(&r.code));
    }
}

#[test]
fn y_shape_across_two_graphs_reports_single_pattern_with_support_two() {
    let one_y = "v 0 1\nv 1 1\nv 2 1\nv 3 1\ne 0 1 5\ne 0 2 5\ne 0 3 5\n";
    let input = format!("t # 0\n{one_y}t # 1\n{one_y}");
    let reports = run(&input, 2);

    let y_shapes: Vec<_> = reports.iter().filter(|r| r.code.len() == 3).collect();
    assert_eq!(y_shapes.len(), 1, "exactly one canonical 3-edge Y pattern expected");
    assert_eq!(y_shapes[0].support_set, vec![0, 1]);
}

#[test]
fn validator_accepts_two_runs_of_the_mine_binary_as_set_equal() {
    use std::io::Write;
    use std::process::Command;
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let suffix = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir();
    let input_path = dir.join(format!("gspan_end_to_end_input_{suffix}.txt"));
    let out_a = dir.join(format!("gspan_end_to_end_out_a_{suffix}.txt"));
    let out_b = dir.join(format!("gspan_end_to_end_out_b_{suffix}.txt"));

    let mut file = std::fs::File::create(&input_path).expect("create temp input");
    write!(file, "t # 0\nv 0 1\nv 1 1\nv 2 1\ne 0 1 7\ne 1 2 7\ne 2 0 7\n").unwrap();
    drop(file);

    for out in [&out_a, &out_b] {
        let status = Command::new(env!("CARGO_BIN_EXE_mine"))
            .args([input_path.to_str().unwrap(), "1", "-o", out.to_str().unwrap()])
            .status()
            .expect("mine binary runs");
        assert!(status.success());
    }

    let status = Command::new(env!("CARGO_BIN_EXE_validate"))
        .args([out_a.to_str().unwrap(), out_b.to_str().unwrap()])
        .status()
        .expect("validate binary runs");
    assert!(status.success(), "two runs over the same input must validate as set-equal");

    let _ = std::fs::remove_file(&input_path);
    let _ = std::fs::remove_file(&out_a);
    let _ = std::fs::remove_file(&out_b);
}
