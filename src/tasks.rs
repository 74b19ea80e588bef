//! The two jobs the CLI runs: writing a tree and concatenating sources.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;
use color_eyre::eyre::Result;

use dirscribe_core::{
    ConcatConfig, ExclusionPatterns, JSON_OUTPUT_NAME, TEXT_OUTPUT_NAME, WalkConfig, WalkError,
};
use dirscribe_scan::{ConcatEvent, ConcatSummary, Concatenator, TreeWalker};

const SUMMARY_RULE_WIDTH: usize = 50;

/// Output format for folder structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TreeFormat {
    /// Indented tree with branch glyphs.
    #[default]
    Text,
    /// Nested JSON mapping.
    Json,
}

impl TreeFormat {
    /// File name written when no output path is given.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Text => TEXT_OUTPUT_NAME,
            Self::Json => JSON_OUTPUT_NAME,
        }
    }
}

/// Load `<root>/.gitignore` when asked to; otherwise no patterns.
pub fn load_patterns(root: &Path, use_gitignore: bool) -> Result<ExclusionPatterns> {
    if !use_gitignore {
        return Ok(ExclusionPatterns::default());
    }
    Ok(ExclusionPatterns::from_gitignore(root.join(".gitignore"))?)
}

/// Walk `root` and write the structure to `output`.
pub fn write_tree<W: Write>(
    out: &mut W,
    root: &Path,
    max_depth: Option<u32>,
    format: TreeFormat,
    patterns: ExclusionPatterns,
    output: &Path,
) -> Result<()> {
    let config = WalkConfig::builder()
        .root(root)
        .max_depth(max_depth)
        .exclude_patterns(patterns)
        .build()
        .map_err(WalkError::from)?;
    let walker = TreeWalker::new(config);

    let warnings = match format {
        TreeFormat::Text => {
            let file = File::create(output).map_err(|e| WalkError::io(output, e))?;
            let mut writer = BufWriter::new(file);
            let walk = walker.write_text_report(&mut writer)?;
            writer.flush()?;
            tracing::debug!(lines = walk.lines_written, "text tree written");
            writeln!(out, "\nSuccess! Folder structure saved to {}", output.display())?;
            walk.warnings
        }
        TreeFormat::Json => {
            let (document, warnings) = walker.json_document();
            let json = document.to_pretty_json().map_err(WalkError::from)?;
            std::fs::write(output, json).map_err(|e| WalkError::io(output, e))?;
            writeln!(out, "\nSuccess! JSON structure saved to {}", output.display())?;
            warnings
        }
    };

    if !warnings.is_empty() {
        writeln!(
            out,
            "{} unreadable director{} left empty",
            warnings.len(),
            if warnings.len() == 1 { "y" } else { "ies" }
        )?;
    }

    Ok(())
}

/// Concatenate source files under `root` into `output` and print a summary.
pub fn concatenate<W: Write>(
    out: &mut W,
    root: &Path,
    patterns: ExclusionPatterns,
    output: &Path,
) -> Result<ConcatSummary> {
    let config = ConcatConfig::builder()
        .root(root)
        .output(output)
        .exclude_patterns(patterns)
        .build()
        .map_err(WalkError::from)?;

    writeln!(out, "\nScanning folder: {}", root.display())?;

    // The first console failure is reported once the output file is complete.
    let mut console_error = None;
    let summary = Concatenator::new(config).run(|event| {
        let written = match event {
            ConcatEvent::Processed(rel) => writeln!(out, "Processed: {rel}"),
            ConcatEvent::Excluded(rel) => writeln!(out, "Skipping excluded: {rel}"),
            ConcatEvent::Failed(warning) => writeln!(out, "{}", warning.message),
            ConcatEvent::Unsupported(_) => Ok(()),
        };
        if let Err(err) = written {
            console_error.get_or_insert(err);
        }
    })?;
    if let Some(err) = console_error {
        return Err(WalkError::from(err).into());
    }

    let saved_to = std::path::absolute(output).unwrap_or_else(|_| output.to_path_buf());
    let rule = "=".repeat(SUMMARY_RULE_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "Processing Summary:")?;
    writeln!(out, "Files processed successfully: {}", summary.processed)?;
    writeln!(out, "Files skipped (non-code): {}", summary.skipped)?;
    writeln!(out, "Files with errors: {}", summary.errors)?;
    writeln!(
        out,
        "Output size: {}",
        humansize::format_size(summary.bytes_written, humansize::BINARY)
    )?;
    writeln!(out, "Output saved to: {}", saved_to.display())?;
    writeln!(out, "{rule}")?;

    Ok(summary)
}
