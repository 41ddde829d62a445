//! Discovery of code ownership declared inside a source tree.
//!
//! Owners come from two places:
//!
//! - inline annotations such as `// CodeOwner: @team-a @team-b` in any text
//!   file, and
//! - directory owner files (`.codeowner` by default) listing the handles that
//!   own the directory they sit in.
//!
//! ```no_run
//! use scanning::{parse_dir, ScanConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! for mapping in parse_dir(".", &ScanConfig::default())? {
//!     println!("{} {}", mapping.path, mapping.owners.join(" "));
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod owner;
pub mod parser;

pub use config::{ScanConfig, BINARY_SNIFF_SIZE, CODE_OWNER_FILE, DEFAULT_PREFIX, MAX_FILE_SIZE};
pub use error::{ScanError, ScanResult};
pub use owner::{extract_owners, is_valid_owner, parse_protect, Mapping, PROTECT_PATH};
pub use parser::{parse_code_owner_file, parse_dir, parse_file};
