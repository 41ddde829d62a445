//! CODEOWNERS rendering for codeowner
//!
//! Turns the mappings found by the `scanning` crate into the text of a GitHub
//! CODEOWNERS file.

use scanning::Mapping;
use std::cmp::Ordering;
use std::fmt::Write;

/// Where a path sorts relative to others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    /// Files directly under the root, and the root itself
    Root,
    /// Anything under a top-level directory starting with `.`
    Hidden,
    Other,
}

/// Formats mappings as a GitHub CODEOWNERS file.
///
/// The entry owning `CODEOWNERS` itself comes first. The rest are sorted:
/// root files, then hidden-directory files, then everything else. Within each
/// section entries are grouped by their top-two-level directory, with a blank
/// line between groups.
pub fn code_owners(mappings: &[Mapping]) -> String {
    let protect = mappings.iter().rev().find(|m| m.is_protect());
    let mut sorted: Vec<&Mapping> = mappings.iter().filter(|m| !m.is_protect()).collect();
    sorted.sort_by(|a, b| compare_paths(&a.path, &b.path));

    let mut out = String::new();
    if let Some(protect) = protect {
        write_line(&mut out, protect);
        if !sorted.is_empty() {
            out.push('\n');
        }
    }

    let mut prev_group = "";
    for (i, mapping) in sorted.iter().enumerate() {
        let group = group_key(&mapping.path);
        if i > 0 && group != prev_group {
            out.push('\n');
        }
        prev_group = group;
        write_line(&mut out, mapping);
    }
    out
}

fn write_line(out: &mut String, mapping: &Mapping) {
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{} {}", mapping.path, mapping.owners.join(" "));
}

fn compare_paths(a: &str, b: &str) -> Ordering {
    path_section(a)
        .cmp(&path_section(b))
        .then_with(|| group_key(a).cmp(group_key(b)))
        .then_with(|| a.cmp(b))
}

fn strip_root(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

fn path_section(path: &str) -> Section {
    match strip_root(path).split_once('/') {
        None => Section::Root,
        Some((first, _)) if first.starts_with('.') => Section::Hidden,
        Some(_) => Section::Other,
    }
}

/// `""` for root files, otherwise the directory truncated to its first two
/// segments.
fn group_key(path: &str) -> &str {
    let p = strip_root(path);
    let Some(idx) = p.rfind('/') else {
        return "";
    };
    let dir = &p[..idx];
    match dir.match_indices('/').nth(1) {
        Some((second_slash, _)) => &dir[..second_slash],
        None => dir,
    }
}
