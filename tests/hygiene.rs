//! Source hygiene checks run as ordinary tests.
//!
//! Scans production files under `src/` (sibling `*_test.rs` files excluded)
//! for patterns that crash the page or swallow errors. Every budget is a
//! ceiling: lower it when a hit is removed, never raise it.

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

/// A panic in a frame callback takes the whole wasm instance down.
const PANICS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, why: "propagate with `?` or handle the None/Err arm" },
    Budget { pattern: ".expect(", max: 0, why: "propagate with `?` or handle the None/Err arm" },
    Budget { pattern: "panic!(", max: 0, why: "return an EffectError instead" },
    Budget { pattern: "unreachable!(", max: 0, why: "make the state unrepresentable" },
    Budget { pattern: "todo!(", max: 0, why: "finish the stub" },
    Budget { pattern: "unimplemented!(", max: 0, why: "finish the stub" },
];

/// Errors must be logged or returned, not dropped.
const DISCARDS: &[Budget] = &[
    Budget { pattern: "let _ =", max: 0, why: "log the error or match on it" },
    Budget { pattern: ".ok()", max: 0, why: "log the error or match on it" },
];

/// Output goes through `tracing`, and dead code is deleted rather than hidden.
const STYLE: &[Budget] = &[
    Budget { pattern: "println!(", max: 0, why: "use tracing" },
    Budget { pattern: "eprintln!(", max: 0, why: "use tracing" },
    Budget { pattern: "dbg!(", max: 0, why: "remove debugging output" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "delete the unused item" },
];

struct SourceFile {
    path: PathBuf,
    content: String,
}

fn production_sources() -> Vec<SourceFile> {
    let mut out = Vec::new();
    walk(Path::new("src"), &mut out);
    assert!(!out.is_empty(), "no sources found under src/; run from the crate root");
    out
}

fn walk(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|ext| ext == "rs");
        let is_test = path.file_name().is_some_and(|name| name.to_string_lossy().ends_with("_test.rs"));
        if !is_rs || is_test {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path, content });
        }
    }
}

/// Lines containing `pattern`, as `path:line` locations.
fn hits(files: &[SourceFile], pattern: &str) -> Vec<String> {
    files
        .iter()
        .flat_map(|file| {
            file.content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains(pattern))
                .map(|(n, _)| format!("{}:{}", file.path.display(), n + 1))
        })
        .collect()
}

fn check(budgets: &[Budget]) {
    let files = production_sources();
    let failures: Vec<String> = budgets
        .iter()
        .filter_map(|budget| {
            let found = hits(&files, budget.pattern);
            if found.len() <= budget.max {
                return None;
            }
            Some(format!(
                "`{}`: found {}, max {} ({})\n  {}",
                budget.pattern,
                found.len(),
                budget.max,
                budget.why,
                found.join("\n  ")
            ))
        })
        .collect();
    assert!(failures.is_empty(), "hygiene budget exceeded:\n{}", failures.join("\n"));
}

#[test]
fn no_panicking_calls() {
    check(PANICS);
}

#[test]
fn no_silently_discarded_results() {
    check(DISCARDS);
}

#[test]
fn no_stray_output_or_hidden_dead_code() {
    check(STYLE);
}

#[test]
fn every_sibling_test_file_is_wired() {
    let files = production_sources();
    let unwired: Vec<String> = files
        .iter()
        .filter_map(|file| {
            let stem = file.path.file_stem()?.to_string_lossy().into_owned();
            let sibling = file.path.with_file_name(format!("{stem}_test.rs"));
            let attr = format!("#[path = \"{stem}_test.rs\"]");
            (sibling.exists() && !file.content.contains(&attr)).then(|| file.path.display().to_string())
        })
        .collect();
    assert!(unwired.is_empty(), "test files present but not attached:\n  {}", unwired.join("\n  "));
}
