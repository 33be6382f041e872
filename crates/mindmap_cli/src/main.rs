//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `mindmap_core` linkage.
//! - Import an outline file, lay it out, and print a deterministic summary.
//! - Bootstrap file logging when `MINDMAP_LOG_DIR` is set.

use std::process::ExitCode;

use mindmap_core::{default_log_level, init_logging, DocumentStore, LayoutMode, Orientation};

const LOG_DIR_ENV: &str = "MINDMAP_LOG_DIR";

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: mindmap_cli <outline-file> [radial|tree-row|tree-column|timeline]");
        return ExitCode::FAILURE;
    };
    let mode = match args.next().as_deref() {
        None | Some("radial") => LayoutMode::Radial,
        Some("tree-row") => LayoutMode::Tree(Orientation::Row),
        Some("tree-column") => LayoutMode::Tree(Orientation::Column),
        Some("timeline") => LayoutMode::Timeline,
        Some(other) => {
            eprintln!("unknown layout mode `{other}`");
            return ExitCode::FAILURE;
        }
    };

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("failed to read `{path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut document = DocumentStore::with_defaults();
    match document.import_outline(&text, Some(mode)) {
        Ok(summary) => {
            println!(
                "mindmap_core version={} nodes={} edges={}",
                mindmap_core::core_version(),
                summary.node_count,
                summary.edge_count
            );
            print!("{}", document.export_outline());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("import failed: {err}");
            ExitCode::FAILURE
        }
    }
}
