//! Main entry point for the wadinfo CLI application.
//!
//! Inspects every file named on the command line and prints a summary
//! line per archive, or a JSON array with `--json`.

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use wadinfo::{ArchiveInfo, Cli, InfoCache};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let infos = inspect_all(&cli).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        let records: Vec<&ArchiveInfo> = infos.iter().map(|info| info.as_ref()).collect();
        serde_json::to_writer_pretty(&mut out, &records)?;
        writeln!(out)?;
    } else {
        for info in &infos {
            print_info(&mut out, info, &cli)?;
        }
    }
    out.flush()?;

    if infos.iter().any(|info| !info.is_valid()) {
        std::process::exit(1);
    }
    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the flag-derived default.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Parse every file on the blocking pool, keeping argument order.
///
/// Each distinct path is parsed by exactly one task; repeats share its
/// result.
async fn inspect_all(cli: &Cli) -> Result<Vec<Arc<ArchiveInfo>>> {
    let cache = Arc::new(InfoCache::new());
    let (unique, slots) = dedup_slots(&cli.files);

    let handles: Vec<_> = unique
        .into_iter()
        .map(|path| {
            let cache = Arc::clone(&cache);
            let path = path.to_path_buf();
            tokio::task::spawn_blocking(move || cache.get_or_parse(path))
        })
        .collect();

    let mut parsed = Vec::with_capacity(handles.len());
    for handle in handles {
        parsed.push(handle.await.context("inspection task failed")?);
    }

    Ok(slots.into_iter().map(|slot| Arc::clone(&parsed[slot])).collect())
}

/// Distinct paths in first-seen order, and for every argument the index of
/// its path in that list.
fn dedup_slots(files: &[PathBuf]) -> (Vec<&Path>, Vec<usize>) {
    let mut index: HashMap<&Path, usize> = HashMap::new();
    let mut unique = Vec::new();
    let slots: Vec<usize> = files
        .iter()
        .map(|path| {
            *index.entry(path.as_path()).or_insert_with(|| {
                unique.push(path.as_path());
                unique.len() - 1
            })
        })
        .collect();
    (unique, slots)
}

/// Print one archive in the text format.
///
/// ```text
/// doom2.wad: IWAD | 14.0 MB | 32 maps
///   MAP01, MAP02, MAP03, MAP04, MAP05 (+27 more)
/// ```
fn print_info(out: &mut impl Write, info: &ArchiveInfo, cli: &Cli) -> Result<()> {
    if cli.quiet && info.is_valid() {
        return Ok(());
    }

    let name = info.path().display();
    writeln!(out, "{}: {}", name, info.summary())?;

    let maps = if cli.list {
        info.map_names().join(", ")
    } else {
        info.map_list_summary()
    };
    if !maps.is_empty() && !cli.quiet {
        writeln!(out, "  {maps}")?;
    }
    Ok(())
}
