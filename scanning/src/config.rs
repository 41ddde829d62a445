use crate::error::{ScanError, ScanResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default annotation prefix searched for in source files.
pub const DEFAULT_PREFIX: &str = "CodeOwner:";

/// Default name of the directory-level ownership file.
pub const CODE_OWNER_FILE: &str = ".codeowner";

/// Files larger than this (1 MiB) are skipped during a directory walk.
pub const MAX_FILE_SIZE: u64 = 1 << 20;

/// Number of leading bytes inspected for a NUL byte before scanning a file.
pub const BINARY_SNIFF_SIZE: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub prefix: String,
    pub dir_owner_file: String,
    pub max_file_size: u64,
    pub binary_sniff_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            dir_owner_file: CODE_OWNER_FILE.to_string(),
            max_file_size: MAX_FILE_SIZE,
            binary_sniff_size: BINARY_SNIFF_SIZE,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file. Keys missing from the file keep their
    /// defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ScanResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ScanError::io(path, e))?;
        toml::from_str(&raw).map_err(|source| ScanError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_dir_owner_file(mut self, name: impl Into<String>) -> Self {
        self.dir_owner_file = name.into();
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn with_binary_sniff_size(mut self, bytes: usize) -> Self {
        self.binary_sniff_size = bytes;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.prefix.is_empty() {
            return Err("Prefix cannot be empty".to_string());
        }

        if self.dir_owner_file.is_empty() {
            return Err("Directory owner file name cannot be empty".to_string());
        }

        if self.dir_owner_file.contains(&['/', '\\'][..]) {
            return Err("Directory owner file name must not contain a path separator".to_string());
        }

        if self.max_file_size == 0 {
            return Err("Max file size must be greater than 0".to_string());
        }

        if self.binary_sniff_size == 0 {
            return Err("Binary sniff size must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Like [`validate`](Self::validate), lifted into [`ScanError`].
    pub fn checked(self) -> ScanResult<Self> {
        self.validate()
            .map_err(|message| ScanError::InvalidConfig { message })?;
        Ok(self)
    }
}
