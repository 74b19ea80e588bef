//! Core types for dirscribe.
//!
//! This crate provides the data structures shared by the walker and the
//! concatenator: exclusion patterns, directory entries, the JSON tree node,
//! configuration and error types.

mod config;
mod error;
mod node;
mod pattern;

pub use config::{
    CONCAT_OUTPUT_NAME, ConcatConfig, ConcatConfigBuilder, DEFAULT_SOURCE_EXTENSIONS,
    JSON_OUTPUT_NAME, TEXT_OUTPUT_NAME, WalkConfig, WalkConfigBuilder, parse_max_depth,
};
pub use error::{WalkError, WalkWarning, WarningKind, ensure_exists};
pub use node::{DirectoryEntry, FILE_MARKER, StructureDocument, TreeNode, is_hidden_name};
pub use pattern::{ExclusionPattern, ExclusionPatterns, relative_path};
