//! CLI entry point: mines frequent connected subgraphs from an input graph database.

use anyhow::{Context, Result};
use clap::Parser;
use gspan_miner::error::CliError;
use gspan_miner::graph::GraphDatabase;
use gspan_miner::mine::{mine, Report};
use gspan_miner::parser::parse_input;
use gspan_miner::preprocess::preprocess;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

/// Mines all frequent connected subgraphs from a labeled graph database.
#[derive(Parser, Debug)]
#[command(name = "mine", about = "gSpan frequent connected subgraph miner")]
struct Args {
    /// Path to the input graph database.
    input: PathBuf,

    /// Minimum number of distinct input graphs a pattern must appear in.
    min_freq: usize,

    /// Output file path; defaults to standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enables verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,
}

fn write_report(out: &mut impl Write, pattern_id: usize, report: &Report) -> std::io::Result<()> {
    writeln!(out, "t # {} * {}", pattern_id, report.support_set.len())?;

    let mut vertex_labels: Vec<Option<i64>> = Vec::new();
    for edge in &report.code {
        let from_idx = edge.from as usize;
        let to_idx = edge.to as usize;
        if from_idx >= vertex_labels.len() {
            vertex_labels.resize(from_idx + 1, None);
        }
        if to_idx >= vertex_labels.len() {
            vertex_labels.resize(to_idx + 1, None);
        }
        vertex_labels[from_idx].get_or_insert(edge.from_label);
        vertex_labels[to_idx].get_or_insert(edge.to_label);
    }
    for (id, label) in vertex_labels.iter().enumerate() {
        writeln!(out, "v {} {}", id, label.expect("every pattern vertex is touched by some edge"))?;
    }
    for edge in &report.code {
        writeln!(out, "e {} {} {}", edge.from, edge.to, edge.edge_label)?;
    }

    write!(out, "x:")?;
    for graph_id in &report.support_set {
        write!(out, " {}", graph_id)?;
    }
    writeln!(out)?;
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    if args.min_freq == 0 {
        return Err(CliError::InvalidMinFreq(args.min_freq.to_string()));
    }

    let file = File::open(&args.input).map_err(|source| CliError::Parse {
        path: args.input.display().to_string(),
        source: source.into(),
    })?;
    let graphs = parse_input(BufReader::new(file)).map_err(|source| CliError::Parse {
        path: args.input.display().to_string(),
        source,
    })?;

    let compact = preprocess(graphs, args.min_freq);
    log::info!("mining {} preprocessed graphs with min_freq={}", compact.len(), args.min_freq);
    let compact = GraphDatabase::new(compact);

    let mut pattern_id = 0usize;
    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::Write { path: path.display().to_string(), source })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(std::io::stdout())),
    };

    mine(&compact, args.min_freq, &mut |report: Report| {
        if let Err(err) = write_report(&mut writer, pattern_id, &report) {
            log::error!("failed to write pattern {}: {}", pattern_id, err);
            return;
        }
        pattern_id += 1;
    });

    if let Err(err) = writer.flush() {
        return Err(CliError::Write {
            path: args.output.map(|p| p.display().to_string()).unwrap_or_else(|| "<stdout>".to_string()),
            source: err,
        });
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    run(args).context("mining failed")?;
    Ok(())
}
