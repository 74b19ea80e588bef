//! Single-directory listing with the hidden-entry filter applied.

use std::path::Path;

use compact_str::CompactString;

use dirscribe_core::{DirectoryEntry, WalkWarning};

/// Outcome of listing one directory.
#[derive(Debug)]
pub enum DirListing {
    /// Visible entries, sorted by name.
    Entries(Vec<DirectoryEntry>),
    /// The directory could not be listed; treat it as empty.
    Unreadable(WalkWarning),
}

impl DirListing {
    /// Entries of the listing; unreadable directories have none.
    pub fn into_entries(self) -> Vec<DirectoryEntry> {
        match self {
            Self::Entries(entries) => entries,
            Self::Unreadable(_) => Vec::new(),
        }
    }
}

/// List `dir`, sorted by name, without hidden entries (other than `.gitignore`).
pub fn list_dir(dir: &Path) -> DirListing {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(err) => return DirListing::Unreadable(WalkWarning::unreadable_directory(dir, &err)),
    };

    let mut named = Vec::new();
    for entry in read_dir {
        match entry {
            Ok(entry) => named.push((
                CompactString::new(entry.file_name().to_string_lossy()),
                entry.path(),
            )),
            Err(err) => {
                return DirListing::Unreadable(WalkWarning::unreadable_directory(dir, &err));
            }
        }
    }
    named.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

    let entries = named
        .into_iter()
        .filter(|(name, _)| !dirscribe_core::is_hidden_name(name))
        .map(|(name, path)| {
            // Follows symlinks; a dangling link is a file.
            let is_dir = path.is_dir();
            DirectoryEntry::new(name, path, is_dir)
        })
        .collect();

    DirListing::Entries(entries)
}
