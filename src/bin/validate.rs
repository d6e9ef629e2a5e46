//! Validator: compares two output files (or directories of output files) for
//! set-equality of reported patterns, ignoring pattern ids.

use anyhow::{bail, Context, Result};
use clap::Parser;
use gspan_miner::parser::{parse_output, ParsedOutputGraph};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Compares two gSpan output files (or directories of them) for set-equality.
#[derive(Parser, Debug)]
#[command(name = "validate", about = "Compares two gSpan pattern output files")]
struct Args {
    /// First output file or directory.
    left: PathBuf,

    /// Second output file or directory.
    right: PathBuf,
}

fn read_patterns(path: &Path) -> Result<BTreeSet<ParsedOutputGraph>> {
    if path.is_dir() {
        let mut all = BTreeSet::new();
        let mut entries: Vec<_> = std::fs::read_dir(path)
            .with_context(|| format!("reading directory {}", path.display()))?
            .collect::<std::io::Result<_>>()?;
        entries.sort_by_key(|e| e.path());
        for entry in entries {
            let patterns = read_patterns(&entry.path())?;
            all.extend(patterns);
        }
        Ok(all)
    } else {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let patterns = parse_output(BufReader::new(file)).with_context(|| format!("parsing {}", path.display()))?;
        Ok(patterns)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let left = read_patterns(&args.left)?;
    let right = read_patterns(&args.right)?;

    let only_left: Vec<_> = left.difference(&right).collect();
    let only_right: Vec<_> = right.difference(&left).collect();

    if only_left.is_empty() && only_right.is_empty() {
        println!("OK: {} patterns match", left.len());
        return Ok(());
    }

    for pattern in &only_left {
        eprintln!("only in {}: pattern with {} vertices, {} edges", args.left.display(), pattern.vertices.len(), pattern.edges.len());
    }
    for pattern in &only_right {
        eprintln!("only in {}: pattern with {} vertices, {} edges", args.right.display(), pattern.vertices.len(), pattern.edges.len());
    }
    bail!("{} pattern(s) differ between {} and {}", only_left.len() + only_right.len(), args.left.display(), args.right.display());
}
