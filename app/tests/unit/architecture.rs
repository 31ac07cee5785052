//! Structural tests for layer boundary enforcement.
//!
//! These tests scan source files so a stray import across layers fails CI
//! rather than review.

use std::path::{Path, PathBuf};

fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Non-comment lines above the first `#[cfg(test)]`.
fn production_lines(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .take_while(|l| !l.contains("#[cfg(test)]"))
        .filter(|l| {
            let trimmed = l.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with("/*") && !trimmed.starts_with('*')
        })
        .map(String::from)
        .collect()
}

fn violations(layer: &str, forbidden: &[&str]) -> Vec<String> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut found = Vec::new();
    for file in collect_rs_files(&root.join(layer)) {
        let rel = file
            .strip_prefix(env!("CARGO_MANIFEST_DIR"))
            .unwrap_or(&file)
            .display()
            .to_string();
        for (i, line) in production_lines(&file).iter().enumerate() {
            for needle in forbidden {
                if line.contains(needle) {
                    found.push(format!("{rel}:{}: `{needle}`: {line}", i + 1));
                }
            }
        }
    }
    found
}

// ── Domain ───────────────────────────────────────────────────────────────────

#[test]
fn domain_has_no_io_or_outer_layer_imports() {
    let found = violations(
        "domain",
        &[
            "crate::infra",
            "crate::web",
            "crate::application",
            "tokio::",
            "reqwest::",
            "redis::",
            "std::fs",
            "std::net",
        ],
    );
    assert!(found.is_empty(), "domain boundary violations:\n{}", found.join("\n"));
}

// ── Application ──────────────────────────────────────────────────────────────

#[test]
fn application_depends_only_on_domain_and_ports() {
    let found = violations(
        "application",
        &["crate::infra", "crate::web", "reqwest::", "redis::", "axum::"],
    );
    assert!(
        found.is_empty(),
        "application boundary violations:\n{}",
        found.join("\n")
    );
}

// ── Infrastructure ───────────────────────────────────────────────────────────

#[test]
fn infra_never_reaches_into_web() {
    let found = violations("infra", &["crate::web", "axum::"]);
    assert!(found.is_empty(), "infra boundary violations:\n{}", found.join("\n"));
}
