//! Console output for humans: banners, discovery listings, and result tables.

use crate::core::merge::PackageRegistry;
use crate::core::types::{RunResult, Status, SuiteSummary};
use crate::exit_codes;
use crate::io::manifest::ManifestState;

pub fn banner() {
    println!("Package Tester");
    println!();
}

/// `--detailed` listing of the manifest state and every registry package.
pub fn discovered_packages(manifest: &ManifestState, registry: &PackageRegistry) {
    println!("Manifest: {}", manifest.label());
    if registry.is_empty() {
        eprintln!("No packages discovered. Check your package-tester JSON config.");
        println!();
        return;
    }
    println!("Discovered packages:");
    for package in registry.iter() {
        println!(" - {} ({})", package.name, package.version);
    }
    println!();
}

pub fn command_banner(command_line: &str) {
    println!();
    println!("{0} Running tests {0}", "=".repeat(12));
    println!("$ {command_line}");
    println!();
}

pub fn finish_banner(exit_code: i32) {
    let label = if exit_code == exit_codes::OK {
        "SUCCESS"
    } else {
        "FAILED"
    };
    println!();
    println!(
        "{0} tests finished: {label} (exit: {exit_code}) {0}",
        "-".repeat(10)
    );
}

pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Warning => "⚠",
        _ => "✗",
    }
}

/// Result table for a single-package run.
pub fn package_table(summary: &SuiteSummary) {
    let exit_code = summary.exit_code.to_string();
    let rows = [
        ["Component", "Status", "Exit Code"],
        ["Tests", status_icon(summary.status), exit_code.as_str()],
    ];
    for line in render_table(&rows) {
        println!("{line}");
    }
}

/// `--detailed` per-suite breakdown under the package table.
pub fn suite_results(results: &[RunResult]) {
    for line in suite_lines(results) {
        println!("{line}");
    }
}

fn suite_lines(results: &[RunResult]) -> Vec<String> {
    results
        .iter()
        .map(|result| {
            let path = result
                .resolved_path
                .as_deref()
                .map_or_else(|| "-".to_string(), |p| p.display().to_string());
            format!(
                " {} {path} ({}, exit: {})",
                status_icon(result.status),
                result.status.as_str(),
                result.exit_code
            )
        })
        .collect()
}

/// Render rows as a bordered table; the first row is the header.
pub fn render_table<const N: usize>(rows: &[[&str; N]]) -> Vec<String> {
    let mut widths = [0usize; N];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let border = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );
    let render_row = |row: &[&str; N]| {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| {
                let pad = width - cell.chars().count();
                format!(" {cell}{} ", " ".repeat(pad))
            })
            .collect();
        format!("|{}|", cells.join("|"))
    };

    let mut lines = vec![border.clone()];
    for (idx, row) in rows.iter().enumerate() {
        lines.push(render_row(row));
        if idx == 0 {
            lines.push(border.clone());
        }
    }
    lines.push(border);
    lines
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn table_pads_to_widest_cell() {
        let lines = render_table(&[["Component", "Exit Code"], ["Tests", "2"]]);
        assert_eq!(
            lines,
            vec![
                "+-----------+-----------+",
                "| Component | Exit Code |",
                "+-----------+-----------+",
                "| Tests     | 2         |",
                "+-----------+-----------+",
            ]
        );
    }

    #[test]
    fn suite_lines_show_resolved_paths_in_order() {
        let lines = suite_lines(&[
            RunResult {
                status: Status::Success,
                exit_code: 0,
                resolved_path: Some(PathBuf::from("/pkg/a/tests/Unit")),
            },
            RunResult {
                status: Status::Error,
                exit_code: 1,
                resolved_path: None,
            },
        ]);
        assert_eq!(
            lines,
            vec![
                " ✓ /pkg/a/tests/Unit (success, exit: 0)",
                " ✗ - (error, exit: 1)",
            ]
        );
    }

    #[test]
    fn icons_group_failing_statuses() {
        assert_eq!(status_icon(Status::Success), "✓");
        assert_eq!(status_icon(Status::Warning), "⚠");
        assert_eq!(status_icon(Status::TestFileNotFound), "✗");
        assert_eq!(status_icon(Status::NotInstalled), "✗");
    }
}
