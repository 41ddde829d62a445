//! Owner handles and the annotation line grammar.

use crate::error::{ScanError, ScanResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Path used by the entry that owns the CODEOWNERS file itself.
pub const PROTECT_PATH: &str = "CODEOWNERS";

/// A CODEOWNERS path and the owners assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub path: String,
    pub owners: Vec<String>,
}

impl Mapping {
    pub fn new(path: impl Into<String>, owners: Vec<String>) -> Self {
        Self {
            path: path.into(),
            owners,
        }
    }

    pub fn is_protect(&self) -> bool {
        self.path == PROTECT_PATH
    }
}

/// Reports whether `handle` is a usable owner: at least two bytes made of
/// ASCII letters, digits, `@`, `-`, `_` and `/` (for `@org/team`).
pub fn is_valid_owner(handle: &str) -> bool {
    handle.len() >= 2
        && handle
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '-' | '_' | '/'))
}

fn is_owner_token(token: &str) -> bool {
    token.starts_with('@') && is_valid_owner(token)
}

/// Extracts the owners named after `prefix` on a single line.
///
/// Only the first occurrence of `prefix` is considered. It must open the line
/// or follow a space or tab, and must itself be followed by a space.
pub fn extract_owners(line: &str, prefix: &str) -> Vec<String> {
    let Some(idx) = line.find(prefix) else {
        return Vec::new();
    };

    if idx > 0 && !matches!(line.as_bytes()[idx - 1], b' ' | b'\t') {
        return Vec::new();
    }

    let rest = &line[idx + prefix.len()..];
    if !rest.starts_with(' ') {
        return Vec::new();
    }

    rest.split_whitespace()
        .filter(|token| is_owner_token(token))
        .map(str::to_string)
        .collect()
}

/// Owner tokens from a `.codeowner` line. Anything that is not a valid handle
/// is ignored.
pub(crate) fn owner_tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split_whitespace().filter(|token| is_owner_token(token))
}

/// Parses the value of `--protect` into the entry owning CODEOWNERS itself.
/// Unlike annotations, a bad token here is an error.
pub fn parse_protect(s: &str) -> ScanResult<Mapping> {
    let mut owners = Vec::new();
    for token in s.split_whitespace() {
        if !token.starts_with('@') {
            return Err(ScanError::InvalidOwner {
                owner: token.to_string(),
                reason: "must start with @".to_string(),
            });
        }
        if !is_valid_owner(token) {
            return Err(ScanError::InvalidOwner {
                owner: token.to_string(),
                reason: "contains invalid characters".to_string(),
            });
        }
        owners.push(token.to_string());
    }

    if owners.is_empty() {
        return Err(ScanError::EmptyOwners);
    }
    Ok(Mapping::new(PROTECT_PATH, owners))
}

/// Ordered owner list that drops repeats, keeping first-seen order.
#[derive(Debug, Default)]
pub(crate) struct OwnerSet {
    seen: HashSet<String>,
    owners: Vec<String>,
}

impl OwnerSet {
    pub(crate) fn insert(&mut self, owner: &str) {
        if self.seen.insert(owner.to_string()) {
            self.owners.push(owner.to_string());
        }
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.owners
    }
}
