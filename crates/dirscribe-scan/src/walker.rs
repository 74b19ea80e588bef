//! Depth-bounded tree walker producing text listings or JSON structures.

use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;
use itertools::{Itertools, Position};

use dirscribe_core::{
    DirectoryEntry, StructureDocument, TreeNode, WalkConfig, WalkError, WalkWarning,
};

use crate::listing::{DirListing, list_dir};

/// Indentation per depth level in text listings.
pub const INDENT: &str = "    ";
/// Glyph for every entry but the last in a listing.
pub const BRANCH: &str = "├── ";
/// Glyph for the last entry in a listing.
pub const LAST_BRANCH: &str = "└── ";

const HEADER_RULE_WIDTH: usize = 50;

/// Result of a text walk.
#[derive(Debug, Default)]
pub struct TextWalk {
    /// Number of tree lines written.
    pub lines_written: usize,
    /// Directories that could not be listed.
    pub warnings: Vec<WalkWarning>,
}

/// Result of a JSON walk.
#[derive(Debug)]
pub struct JsonWalk {
    /// Mapping of the root's surviving entries.
    pub structure: TreeNode,
    /// Directories that could not be listed.
    pub warnings: Vec<WalkWarning>,
}

/// Walks a directory tree according to a [`WalkConfig`].
pub struct TreeWalker {
    config: WalkConfig,
}

impl TreeWalker {
    /// Create a walker.
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    /// Write the header block followed by the tree listing.
    pub fn write_text_report<W: Write>(&self, out: &mut W) -> Result<TextWalk, WalkError> {
        writeln!(out, "Folder Structure for: {}", self.config.root.display())?;
        writeln!(out, "Max Depth: {}", self.config.depth_label())?;
        writeln!(out, "{}", "=".repeat(HEADER_RULE_WIDTH))?;
        writeln!(out)?;
        self.walk_text(out)
    }

    /// Write the tree listing, one entry per line.
    pub fn walk_text<W: Write>(&self, out: &mut W) -> Result<TextWalk, WalkError> {
        let mut walk = TextWalk::default();
        self.write_level(&self.config.root, out, 0, &mut walk)?;
        Ok(walk)
    }

    fn write_level<W: Write>(
        &self,
        dir: &Path,
        out: &mut W,
        depth: u32,
        walk: &mut TextWalk,
    ) -> Result<(), WalkError> {
        if !self.config.allows_depth(depth) {
            return Ok(());
        }

        let indent = INDENT.repeat(depth as usize);
        let entries = self.visible_entries(dir, &mut walk.warnings);

        for (position, entry) in entries.into_iter().with_position() {
            let glyph = match position {
                Position::Last | Position::Only => LAST_BRANCH,
                Position::First | Position::Middle => BRANCH,
            };
            let suffix = if entry.is_dir { "/" } else { "" };
            writeln!(out, "{indent}{glyph}{}{suffix}", entry.name)?;
            walk.lines_written += 1;

            if entry.is_dir {
                self.write_level(&entry.path, out, depth + 1, walk)?;
            }
        }

        Ok(())
    }

    /// Build the nested mapping of the tree.
    ///
    /// Directories with no surviving children are left out entirely, unlike
    /// the text listing which still shows them.
    pub fn walk_json(&self) -> JsonWalk {
        let mut warnings = Vec::new();
        let structure = self.build_level(&self.config.root, 0, &mut warnings);
        JsonWalk {
            structure,
            warnings,
        }
    }

    /// Walk and wrap the structure in the output document.
    pub fn json_document(&self) -> (StructureDocument, Vec<WalkWarning>) {
        let JsonWalk {
            structure,
            warnings,
        } = self.walk_json();
        let document = StructureDocument {
            path: self.config.root.display().to_string(),
            max_depth: self.config.max_depth,
            structure,
        };
        (document, warnings)
    }

    fn build_level(&self, dir: &Path, depth: u32, warnings: &mut Vec<WalkWarning>) -> TreeNode {
        if !self.config.allows_depth(depth) {
            return TreeNode::empty_dir();
        }

        let mut children = IndexMap::new();
        for entry in self.visible_entries(dir, warnings) {
            if entry.is_dir {
                let child = self.build_level(&entry.path, depth + 1, warnings);
                if !child.is_empty() {
                    children.insert(entry.name.to_string(), child);
                }
            } else {
                children.insert(entry.name.to_string(), TreeNode::File);
            }
        }

        TreeNode::Directory(children)
    }

    /// List `dir` and drop entries matched by the exclusion patterns.
    fn visible_entries(&self, dir: &Path, warnings: &mut Vec<WalkWarning>) -> Vec<DirectoryEntry> {
        let entries = match list_dir(dir) {
            DirListing::Entries(entries) => entries,
            DirListing::Unreadable(warning) => {
                tracing::warn!(path = %warning.path.display(), "{}", warning.message);
                warnings.push(warning);
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .filter(|entry| {
                let excluded = self.config.is_excluded(&entry.path);
                if excluded {
                    tracing::debug!(path = %entry.path.display(), "excluded");
                }
                !excluded
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirscribe_core::ExclusionPatterns;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("a.py"), "print('a')").unwrap();
        fs::write(root.join(".git/config"), "[core]").unwrap();
        fs::write(root.join("sub/b.txt"), "b").unwrap();

        temp
    }

    fn text_of(walker: &TreeWalker) -> String {
        let mut out = Vec::new();
        walker.walk_text(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_listing() {
        let temp = create_test_tree();
        let walker = TreeWalker::new(WalkConfig::new(temp.path()));

        assert_eq!(text_of(&walker), "├── a.py\n└── sub/\n    └── b.txt\n");
    }

    #[test]
    fn test_json_structure() {
        let temp = create_test_tree();
        let walker = TreeWalker::new(WalkConfig::new(temp.path()));

        let walk = walker.walk_json();
        assert!(walk.warnings.is_empty());
        assert_eq!(
            serde_json::to_value(&walk.structure).unwrap(),
            serde_json::json!({"a.py": "file", "sub": {"b.txt": "file"}})
        );
    }

    #[test]
    fn test_last_glyph_goes_to_last_surviving_entry() {
        let temp = create_test_tree();
        fs::write(temp.path().join("zz.log"), "noise").unwrap();
        let config = WalkConfig::builder()
            .root(temp.path())
            .exclude_patterns(ExclusionPatterns::new(["*.log"]))
            .build()
            .unwrap();

        assert_eq!(
            text_of(&TreeWalker::new(config)),
            "├── a.py\n└── sub/\n    └── b.txt\n"
        );
    }

    #[test]
    fn test_depth_zero_lists_direct_children_only() {
        let temp = create_test_tree();
        let mut config = WalkConfig::new(temp.path());
        config.max_depth = Some(0);
        let walker = TreeWalker::new(config);

        assert_eq!(text_of(&walker), "├── a.py\n└── sub/\n");
        // In JSON the undescended directory has no children and is dropped.
        assert_eq!(
            serde_json::to_value(&walker.walk_json().structure).unwrap(),
            serde_json::json!({"a.py": "file"})
        );
    }

    #[test]
    fn test_empty_directory_shown_in_text_dropped_in_json() {
        let temp = create_test_tree();
        fs::create_dir(temp.path().join("empty")).unwrap();
        let walker = TreeWalker::new(WalkConfig::new(temp.path()));

        assert_eq!(
            text_of(&walker),
            "├── a.py\n├── empty/\n└── sub/\n    └── b.txt\n"
        );
        assert!(walker.walk_json().structure.get("empty").is_none());
    }

    #[test]
    fn test_report_header() {
        let temp = create_test_tree();
        let mut config = WalkConfig::new(temp.path());
        config.max_depth = Some(3);
        let walker = TreeWalker::new(config);

        let mut out = Vec::new();
        let walk = walker.write_text_report(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let expected_header = format!(
            "Folder Structure for: {}\nMax Depth: 3\n{}\n\n",
            temp.path().display(),
            "=".repeat(50)
        );
        assert!(text.starts_with(&expected_header));
        assert_eq!(walk.lines_written, 3);
    }

    #[test]
    fn test_unreadable_root_is_empty_with_warning() {
        let temp = TempDir::new().unwrap();
        let walker = TreeWalker::new(WalkConfig::new(temp.path().join("missing")));

        let mut out = Vec::new();
        let walk = walker.walk_text(&mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(walk.warnings.len(), 1);

        let json = walker.walk_json();
        assert!(json.structure.is_empty());
        assert_eq!(json.warnings.len(), 1);
    }

    #[test]
    fn test_json_document() {
        let temp = create_test_tree();
        let mut config = WalkConfig::new(temp.path());
        config.max_depth = Some(1);
        let (document, warnings) = TreeWalker::new(config).json_document();

        assert!(warnings.is_empty());
        assert_eq!(document.path, temp.path().display().to_string());
        assert_eq!(document.max_depth, Some(1));
        assert!(document.structure.get("sub").is_some());
    }
}
