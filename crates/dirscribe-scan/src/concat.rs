//! Concatenation of source files into a single delimited text file.

use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use jwalk::{DirEntry, Parallelism, WalkDir};

use dirscribe_core::{ConcatConfig, WalkError, WalkWarning, WarningKind, relative_path};

/// Width of the `=` rules around each file header.
pub const DELIMITER_WIDTH: usize = 80;

/// Counts reported after a concatenation run.
#[derive(Debug, Clone, Default)]
pub struct ConcatSummary {
    /// Files written to the output.
    pub processed: u64,
    /// Files excluded by pattern or extension.
    pub skipped: u64,
    /// Files that could not be read.
    pub errors: u64,
    /// Bytes written to the output.
    pub bytes_written: u64,
    /// Every read failure and unreadable directory, in walk order.
    pub warnings: Vec<WalkWarning>,
}

/// Per-file notifications emitted while concatenating.
#[derive(Debug)]
pub enum ConcatEvent<'a> {
    /// A file was appended to the output.
    Processed(&'a str),
    /// A file was excluded by an exclusion pattern.
    Excluded(&'a str),
    /// A file was skipped because of its extension.
    Unsupported(&'a str),
    /// A file could not be read.
    Failed(&'a WalkWarning),
}

/// Concatenates recognized source files under a folder.
pub struct Concatenator {
    config: ConcatConfig,
}

impl Concatenator {
    /// Create a concatenator.
    pub fn new(config: ConcatConfig) -> Self {
        Self { config }
    }

    /// Create the configured output file and write into it.
    pub fn run(&self, on_event: impl FnMut(ConcatEvent<'_>)) -> Result<ConcatSummary, WalkError> {
        let file =
            File::create(&self.config.output).map_err(|e| WalkError::io(&self.config.output, e))?;
        let mut out = BufWriter::new(file);
        let summary = self.write_to(&mut out, on_event)?;
        out.flush()?;
        Ok(summary)
    }

    /// Write every recognized file under the root to `out`.
    ///
    /// Each directory's files come first in name order, then its
    /// subdirectories in name order. A root that is not a directory
    /// yields no files and a single warning.
    pub fn write_to<W: Write>(
        &self,
        out: &mut W,
        mut on_event: impl FnMut(ConcatEvent<'_>),
    ) -> Result<ConcatSummary, WalkError> {
        let root = self.config.root.as_path();
        let mut summary = ConcatSummary::default();

        if !root.is_dir() {
            let warning = WalkWarning::new(
                root,
                format!("Not a directory: {}", root.display()),
                WarningKind::UnreadableDirectory,
            );
            tracing::warn!(path = %root.display(), "{}", warning.message);
            summary.warnings.push(warning);
            return Ok(summary);
        }

        let walker = WalkDir::new(root)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
            .process_read_dir(|_depth, _path, _state, children| {
                children.sort_by(|a, b| match (a, b) {
                    (Ok(a), Ok(b)) => walk_order(a, b),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => Ordering::Equal,
                });
            });

        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    let warning = WalkWarning::new(
                        path,
                        err.to_string(),
                        WarningKind::UnreadableDirectory,
                    );
                    tracing::warn!(path = %warning.path.display(), "{}", warning.message);
                    summary.warnings.push(warning);
                    continue;
                }
            };

            let path = entry.path();
            if !is_file_entry(&entry, &path) {
                continue;
            }

            let rel = relative_path(&path, root);

            if self.config.exclude_patterns.is_excluded(&path, root) {
                tracing::debug!(path = %rel, "excluded by pattern");
                summary.skipped += 1;
                on_event(ConcatEvent::Excluded(&rel));
                continue;
            }

            if !self.config.is_source_file(&path) {
                summary.skipped += 1;
                on_event(ConcatEvent::Unsupported(&rel));
                continue;
            }

            let bytes = match std::fs::read(&path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    let warning = WalkWarning::read_error(&*rel, &err);
                    tracing::warn!(path = %rel, "{}", warning.message);
                    summary.errors += 1;
                    on_event(ConcatEvent::Failed(&warning));
                    summary.warnings.push(warning);
                    continue;
                }
            };

            summary.bytes_written += write_block(out, &rel, &String::from_utf8_lossy(&bytes))?;
            summary.processed += 1;
            on_event(ConcatEvent::Processed(&rel));
        }

        tracing::debug!(
            processed = summary.processed,
            skipped = summary.skipped,
            errors = summary.errors,
            "concatenation finished"
        );
        Ok(summary)
    }
}

/// Files sort before directories; each group by name.
fn walk_order(a: &DirEntry<((), ())>, b: &DirEntry<((), ())>) -> Ordering {
    let a_dir = a.file_type.is_dir();
    let b_dir = b.file_type.is_dir();
    a_dir.cmp(&b_dir).then_with(|| a.file_name.cmp(&b.file_name))
}

/// Regular files and symlinks to anything but a directory.
fn is_file_entry(entry: &DirEntry<((), ())>, path: &Path) -> bool {
    let file_type = entry.file_type;
    if file_type.is_dir() {
        return false;
    }
    if file_type.is_symlink() {
        return !path.is_dir();
    }
    true
}

/// Write one delimited file block, returning the bytes written.
fn write_block<W: Write>(out: &mut W, rel: &str, content: &str) -> Result<u64, WalkError> {
    let rule = "=".repeat(DELIMITER_WIDTH);
    let block = format!("\n{rule}\nFILE: {rel}\n{rule}\n\n{content}\n");
    out.write_all(block.as_bytes())?;
    Ok(block.len() as u64)
}
