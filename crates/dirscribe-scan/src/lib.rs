//! Tree walking and source concatenation engine for dirscribe.
//!
//! # Overview
//!
//! - [`TreeWalker`] lists a directory tree as an indented text listing or
//!   as a nested JSON mapping, optionally bounded by a maximum depth.
//! - [`Concatenator`] appends every recognized source file under a folder
//!   to one output file, each behind a `FILE: <path>` header.
//!
//! Both honor the same exclusion patterns. Directories that cannot be listed
//! are treated as empty and reported back as warnings.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirscribe_scan::{TreeWalker, WalkConfig};
//!
//! let mut config = WalkConfig::new("/path/to/project");
//! config.max_depth = Some(2);
//!
//! let walker = TreeWalker::new(config);
//! let mut out = std::io::stdout();
//! let walk = walker.walk_text(&mut out).unwrap();
//! eprintln!("{} entries", walk.lines_written);
//! ```

mod concat;
mod listing;
mod walker;

pub use concat::{ConcatEvent, ConcatSummary, Concatenator, DELIMITER_WIDTH};
pub use listing::{DirListing, list_dir};
pub use walker::{BRANCH, INDENT, JsonWalk, LAST_BRANCH, TextWalk, TreeWalker};

// Re-export core types for convenience
pub use dirscribe_core::{
    ConcatConfig, DirectoryEntry, ExclusionPatterns, StructureDocument, TreeNode, WalkConfig,
    WalkError, WalkWarning, WarningKind,
};
