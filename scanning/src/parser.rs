//! File and directory scanning.

use crate::config::ScanConfig;
use crate::error::{ScanError, ScanResult};
use crate::owner::{extract_owners, owner_tokens, Mapping, OwnerSet};
use ignore::{DirEntry, WalkBuilder};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, info};

/// Reads a file and returns every owner named by annotations matching
/// `prefix`, de-duplicated in first-seen order. Owners may sit on one line
/// (`CodeOwner: @a @b`) or be spread over several.
pub fn parse_file(path: impl AsRef<Path>, prefix: &str) -> ScanResult<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ScanError::io(path, e))?;
    scan_owners(file, path, prefix)
}

fn scan_owners(reader: impl Read, path: &Path, prefix: &str) -> ScanResult<Vec<String>> {
    let mut owners = OwnerSet::default();
    for_each_line(reader, path, |line| {
        for owner in extract_owners(line, prefix) {
            owners.insert(&owner);
        }
    })?;
    Ok(owners.into_vec())
}

/// Reads a directory owner file. Every whitespace-separated valid handle on
/// any line counts; other tokens are ignored.
pub fn parse_code_owner_file(path: impl AsRef<Path>) -> ScanResult<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ScanError::io(path, e))?;

    let mut owners = OwnerSet::default();
    for_each_line(file, path, |line| {
        for owner in owner_tokens(line) {
            owners.insert(owner);
        }
    })?;
    Ok(owners.into_vec())
}

/// Calls `f` with each `\n`-terminated line, `\r` trimmed. Bytes that are not
/// UTF-8 are replaced so that mostly-text files still scan.
fn for_each_line(reader: impl Read, path: &Path, mut f: impl FnMut(&str)) -> ScanResult<()> {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| ScanError::io(path, e))?;
        if n == 0 {
            return Ok(());
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
        f(&String::from_utf8_lossy(&buf));
    }
}

/// Walks `root` and returns one mapping per annotated file and per directory
/// owner file, in file-path order.
///
/// Symlinks are not followed and `.git` directories are pruned. Hidden files
/// are scanned and ignore files are not honoured.
pub fn parse_dir(root: impl AsRef<Path>, config: &ScanConfig) -> ScanResult<Vec<Mapping>> {
    let root = root.as_ref();
    let mut mappings = Vec::new();
    let mut scanned = 0usize;

    // A symlinked root is treated like any other symlink: not followed.
    if std::fs::symlink_metadata(root).is_ok_and(|m| m.file_type().is_symlink()) {
        debug!(root = %root.display(), "skipping symlinked root");
        return Ok(mappings);
    }

    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.follow_links(false);
    builder.filter_entry(|entry| !is_git_dir(entry));
    builder.sort_by_file_path(|a, b| a.cmp(b));

    for entry in builder.build() {
        let entry = entry?;
        let Some(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_file() {
            continue;
        }

        scanned += 1;
        if let Some(mapping) = parse_entry(root, &entry, config)? {
            debug!(path = %mapping.path, owners = ?mapping.owners, "found owners");
            mappings.push(mapping);
        }
    }

    info!(
        root = %root.display(),
        files = scanned,
        mappings = mappings.len(),
        "scan complete"
    );
    Ok(mappings)
}

fn is_git_dir(entry: &DirEntry) -> bool {
    entry.file_name() == ".git" && entry.file_type().is_some_and(|t| t.is_dir())
}

fn is_binary(buf: &[u8]) -> bool {
    buf.contains(&0)
}

/// Handles one regular file from the walk. The file is opened once and used
/// for both binary sniffing and annotation scanning.
fn parse_entry(root: &Path, entry: &DirEntry, config: &ScanConfig) -> ScanResult<Option<Mapping>> {
    let path = entry.path();
    if entry.file_name() == config.dir_owner_file.as_str() {
        return parse_dir_owner_entry(root, path);
    }

    let metadata = entry.metadata()?;
    if metadata.len() > config.max_file_size {
        debug!(path = %path.display(), size = metadata.len(), "skipping large file");
        return Ok(None);
    }

    let mut file = File::open(path).map_err(|e| ScanError::io(path, e))?;

    let mut head = Vec::with_capacity(config.binary_sniff_size);
    (&mut file)
        .take(config.binary_sniff_size as u64)
        .read_to_end(&mut head)
        .map_err(|e| ScanError::io(path, e))?;
    if is_binary(&head) {
        debug!(path = %path.display(), "skipping binary file");
        return Ok(None);
    }

    file.seek(SeekFrom::Start(0))
        .map_err(|e| ScanError::io(path, e))?;

    let owners = scan_owners(file, path, &config.prefix)?;
    if owners.is_empty() {
        return Ok(None);
    }
    Ok(Some(Mapping::new(
        format!("/{}", relative_slash_path(root, path)),
        owners,
    )))
}

/// Turns a directory owner file into a mapping for its directory: `/` for
/// the walk root, `/<rel>/` below it.
fn parse_dir_owner_entry(root: &Path, path: &Path) -> ScanResult<Option<Mapping>> {
    let owners = parse_code_owner_file(path)?;
    if owners.is_empty() {
        return Ok(None);
    }

    let dir = path.parent().unwrap_or(root);
    let rel = relative_slash_path(root, dir);
    let mapping_path = if rel.is_empty() {
        "/".to_string()
    } else {
        format!("/{rel}/")
    };
    Ok(Some(Mapping::new(mapping_path, owners)))
}

/// `path` relative to `root`, joined with `/` regardless of platform.
fn relative_slash_path(root: &Path, path: &Path) -> String {
    let rel = match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() && path.is_file() => {
            // The walk root is itself a file.
            return path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(rel) => rel,
        Err(_) => path,
    };

    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
