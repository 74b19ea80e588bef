//! Walk and concatenation configuration types.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::WalkError;
use crate::pattern::ExclusionPatterns;

/// Source and markup extensions picked up by concatenation.
pub const DEFAULT_SOURCE_EXTENSIONS: &[&str] = &[
    "py", "js", "jsx", "ts", "tsx", "java", "kt", "cpp", "c", "h", "hpp", "cs", "go", "rb",
    "php", "swift", "m", "mm", "dart", "rs", "sh", "pl", "lua", "r", "scala", "groovy", "f",
    "for", "f90", "html", "css", "scss", "less", "sass", "vue", "elm",
];

/// Default output file name for text trees.
pub const TEXT_OUTPUT_NAME: &str = "folder_structure.txt";
/// Default output file name for JSON trees.
pub const JSON_OUTPUT_NAME: &str = "folder_structure.json";
/// Default output file name for concatenation.
pub const CONCAT_OUTPUT_NAME: &str = "combined_code.txt";

/// Configuration for tree walks.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkConfig {
    /// Root directory of the walk.
    pub root: PathBuf,

    /// Maximum depth below the root (None = unlimited, 0 = direct children only).
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Exclusion patterns, matched against root-relative paths.
    #[builder(default)]
    #[serde(default)]
    pub exclude_patterns: ExclusionPatterns,
}

impl WalkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        validate_root(self.root.as_deref())
    }
}

impl WalkConfig {
    /// Create a new walk config builder.
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Create a simple config walking a path without limits or patterns.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: None,
            exclude_patterns: ExclusionPatterns::default(),
        }
    }

    /// Check whether a directory at `depth` may be listed.
    pub fn allows_depth(&self, depth: u32) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }

    /// Check whether `path` is excluded by the configured patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude_patterns.is_excluded(path, &self.root)
    }

    /// Human-readable depth for report headers.
    pub fn depth_label(&self) -> String {
        match self.max_depth {
            Some(depth) => depth.to_string(),
            None => "Unlimited".to_string(),
        }
    }
}

/// Configuration for source concatenation.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ConcatConfig {
    /// Folder to collect files from.
    pub root: PathBuf,

    /// File the concatenation is written to.
    #[builder(default = "PathBuf::from(CONCAT_OUTPUT_NAME)")]
    #[serde(default = "default_concat_output")]
    pub output: PathBuf,

    /// Exclusion patterns, matched against root-relative paths.
    #[builder(default)]
    #[serde(default)]
    pub exclude_patterns: ExclusionPatterns,

    /// Lowercase extensions (without the dot) that are concatenated.
    #[builder(default = "default_extensions()")]
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_concat_output() -> PathBuf {
    PathBuf::from(CONCAT_OUTPUT_NAME)
}

fn default_extensions() -> Vec<String> {
    DEFAULT_SOURCE_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

impl ConcatConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        validate_root(self.root.as_deref())
    }
}

impl ConcatConfig {
    /// Create a new concat config builder.
    pub fn builder() -> ConcatConfigBuilder {
        ConcatConfigBuilder::default()
    }

    /// Create a config with the default output name and extension list.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: default_concat_output(),
            exclude_patterns: ExclusionPatterns::default(),
            extensions: default_extensions(),
        }
    }

    /// Check a file's extension against the allow-list, ignoring case.
    pub fn is_source_file(&self, path: &Path) -> bool {
        let Some(ext) = path.extension() else {
            return false;
        };
        let ext = ext.to_string_lossy().to_lowercase();
        self.extensions.iter().any(|allowed| *allowed == ext)
    }
}

impl From<WalkConfigBuilderError> for WalkError {
    fn from(err: WalkConfigBuilderError) -> Self {
        Self::InvalidConfig {
            message: err.to_string(),
        }
    }
}

impl From<ConcatConfigBuilderError> for WalkError {
    fn from(err: ConcatConfigBuilderError) -> Self {
        Self::InvalidConfig {
            message: err.to_string(),
        }
    }
}

fn validate_root(root: Option<&Path>) -> Result<(), String> {
    match root {
        Some(root) if root.as_os_str().is_empty() => Err("Root path cannot be empty".to_string()),
        Some(_) => Ok(()),
        None => Err("Root path is required".to_string()),
    }
}

/// Parse a depth prompt. Empty input means unlimited.
pub fn parse_max_depth(input: &str) -> Result<Option<u32>, WalkError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse::<u32>()
        .map(Some)
        .map_err(|_| WalkError::InvalidDepth {
            input: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_config_builder() {
        let config = WalkConfig::builder()
            .root("/home/user/project")
            .max_depth(Some(2))
            .exclude_patterns(ExclusionPatterns::new(["target"]))
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user/project"));
        assert_eq!(config.max_depth, Some(2));
        assert!(config.is_excluded(Path::new("/home/user/project/target/debug")));
        assert!(!config.is_excluded(Path::new("/home/user/project/src")));
    }

    #[test]
    fn test_builder_rejects_empty_root() {
        assert!(WalkConfig::builder().root("").build().is_err());
        assert!(WalkConfig::builder().build().is_err());
        assert!(ConcatConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_builder_errors_become_invalid_config() {
        let err = WalkError::from(WalkConfig::builder().root("").build().unwrap_err());
        match err {
            WalkError::InvalidConfig { message } => {
                assert!(message.contains("Root path cannot be empty"));
            }
            other => panic!("expected InvalidConfig, got {other:?}"),
        }

        let err = WalkError::from(ConcatConfig::builder().build().unwrap_err());
        assert!(matches!(err, WalkError::InvalidConfig { .. }));
    }

    #[test]
    fn test_allows_depth() {
        let mut config = WalkConfig::new("/test");
        assert!(config.allows_depth(1000));
        assert_eq!(config.depth_label(), "Unlimited");

        config.max_depth = Some(0);
        assert!(config.allows_depth(0));
        assert!(!config.allows_depth(1));
        assert_eq!(config.depth_label(), "0");
    }

    #[test]
    fn test_source_extensions() {
        let config = ConcatConfig::new("/test");
        assert!(config.is_source_file(Path::new("main.py")));
        assert!(config.is_source_file(Path::new("Widget.TSX")));
        assert!(config.is_source_file(Path::new("model.R")));
        assert!(!config.is_source_file(Path::new("readme.md")));
        assert!(!config.is_source_file(Path::new("image.png")));
        assert!(!config.is_source_file(Path::new("Makefile")));
        assert!(!config.is_source_file(Path::new(".bashrc")));
    }

    #[test]
    fn test_concat_builder_defaults() {
        let config = ConcatConfig::builder().root("/src").build().unwrap();
        assert_eq!(config.output, PathBuf::from(CONCAT_OUTPUT_NAME));
        assert_eq!(config.extensions.len(), DEFAULT_SOURCE_EXTENSIONS.len());
    }

    #[test]
    fn test_parse_max_depth() {
        assert_eq!(parse_max_depth("").unwrap(), None);
        assert_eq!(parse_max_depth("  3 ").unwrap(), Some(3));
        assert_eq!(parse_max_depth("0").unwrap(), Some(0));
        assert!(matches!(
            parse_max_depth("deep"),
            Err(WalkError::InvalidDepth { .. })
        ));
        assert!(parse_max_depth("-1").is_err());
    }
}
