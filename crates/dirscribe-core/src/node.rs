//! Directory entry and JSON tree node types.

use std::path::PathBuf;

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// JSON value marking a plain file in a [`TreeNode`] structure.
pub const FILE_MARKER: &str = "file";

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Entry name (not full path).
    pub name: CompactString,
    /// Absolute or root-joined path.
    pub path: PathBuf,
    /// Whether the entry is a directory (symlinks are followed).
    pub is_dir: bool,
}

impl DirectoryEntry {
    /// Create a new directory entry.
    pub fn new(name: impl Into<CompactString>, path: impl Into<PathBuf>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir,
        }
    }
}

/// Check whether an entry name is hidden from listings.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.') && name != ".gitignore"
}

/// A node in the JSON structure: either a file or a directory mapping.
///
/// Files serialize as the string `"file"`. Directories serialize as an
/// object keyed by entry name, in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// Plain file.
    File,
    /// Directory with its surviving children.
    Directory(IndexMap<String, TreeNode>),
}

impl TreeNode {
    /// Create an empty directory node.
    pub fn empty_dir() -> Self {
        Self::Directory(IndexMap::new())
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Children of a directory; `None` for files.
    pub fn children(&self) -> Option<&IndexMap<String, TreeNode>> {
        match self {
            Self::Directory(children) => Some(children),
            Self::File => None,
        }
    }

    /// Look up a direct child by name.
    pub fn get(&self, name: &str) -> Option<&TreeNode> {
        self.children().and_then(|children| children.get(name))
    }

    /// Check if this is a directory with no children, or a file.
    pub fn is_empty(&self) -> bool {
        self.children().is_none_or(IndexMap::is_empty)
    }

    /// Nesting depth: files are 0, a directory is one more than its deepest child.
    pub fn depth(&self) -> usize {
        match self {
            Self::File => 0,
            Self::Directory(children) => {
                1 + children.values().map(TreeNode::depth).max().unwrap_or(0)
            }
        }
    }
}

impl Default for TreeNode {
    fn default() -> Self {
        Self::empty_dir()
    }
}

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::File => serializer.serialize_str(FILE_MARKER),
            Self::Directory(children) => children.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TreeNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Leaf(String),
            Directory(IndexMap<String, TreeNode>),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Leaf(marker) if marker == FILE_MARKER => Ok(Self::File),
            Raw::Leaf(other) => Err(de::Error::custom(format!(
                "expected file marker {FILE_MARKER:?}, found {other:?}"
            ))),
            Raw::Directory(children) => Ok(Self::Directory(children)),
        }
    }
}

/// The document written in JSON mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureDocument {
    /// The path as given by the user.
    pub path: String,
    /// Depth limit, `null` for unlimited.
    pub max_depth: Option<u32>,
    /// Root directory mapping.
    pub structure: TreeNode,
}

impl StructureDocument {
    /// Render with 4-space indentation.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only emits valid UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
