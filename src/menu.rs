//! Interactive menu driven by line input.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use color_eyre::eyre::Result;

use dirscribe_core::{CONCAT_OUTPUT_NAME, WalkError, ensure_exists, parse_max_depth};

use crate::tasks::{self, TreeFormat};

const RULE_WIDTH: usize = 50;

/// What the main loop should do after a step.
enum Flow {
    /// Pause, then show the menu again.
    Pause,
    /// Show the menu again without pausing.
    Continue,
    /// Leave the menu.
    Exit,
}

/// Prompts on `output` and reads answers from `input`.
///
/// End of input behaves like choosing "Exit".
pub struct Menu<R, W> {
    input: R,
    output: W,
    output_dir: PathBuf,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Create a menu writing result files into `output_dir`.
    pub fn new(input: R, output: W, output_dir: PathBuf) -> Self {
        Self {
            input,
            output,
            output_dir,
        }
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.banner("DIRSCRIBE")?;
            writeln!(self.output, "1. Generate Folder Structure")?;
            writeln!(self.output, "2. Concatenate Code Files from Folder")?;
            writeln!(self.output, "3. Exit")?;
            let Some(choice) = self.prompt("Select option (1-3): ")? else {
                return Ok(());
            };

            let flow = match choice.as_str() {
                "1" => self.structure_menu()?,
                "2" => self.concatenate()?,
                "3" => {
                    writeln!(self.output, "Exiting program...")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Invalid option. Please try again.")?;
                    Flow::Pause
                }
            };

            match flow {
                Flow::Pause => {
                    if !self.pause()? {
                        return Ok(());
                    }
                }
                Flow::Continue => {}
                Flow::Exit => return Ok(()),
            }
        }
    }

    fn structure_menu(&mut self) -> Result<Flow> {
        loop {
            self.banner("FOLDER STRUCTURE GENERATOR")?;
            writeln!(self.output, "1. Text Format (Tree)")?;
            writeln!(self.output, "2. JSON Format")?;
            writeln!(self.output, "3. Back to Main Menu")?;
            let Some(choice) = self.prompt("Select output format (1-3): ")? else {
                return Ok(Flow::Exit);
            };

            let format = match choice.as_str() {
                "1" => TreeFormat::Text,
                "2" => TreeFormat::Json,
                "3" => return Ok(Flow::Pause),
                _ => {
                    writeln!(self.output, "Invalid option. Please try again.")?;
                    if !self.pause()? {
                        return Ok(Flow::Exit);
                    }
                    continue;
                }
            };

            match self.generate_structure(format)? {
                Flow::Pause => {
                    if !self.pause()? {
                        return Ok(Flow::Exit);
                    }
                }
                Flow::Continue => {}
                Flow::Exit => return Ok(Flow::Exit),
            }
        }
    }

    fn generate_structure(&mut self, format: TreeFormat) -> Result<Flow> {
        writeln!(self.output, "\nFolder Structure Generator")?;
        writeln!(self.output, "{}", "-".repeat(RULE_WIDTH))?;

        let Some(path) =
            self.prompt("Enter project path (leave empty for current directory): ")?
        else {
            return Ok(Flow::Exit);
        };
        let Some(path) = self.resolve_path(&path)? else {
            return Ok(Flow::Continue);
        };

        let Some(depth) = self.prompt("Enter max depth (leave empty for unlimited): ")? else {
            return Ok(Flow::Exit);
        };
        let max_depth = match parse_max_depth(&depth) {
            Ok(max_depth) => max_depth,
            Err(err) => {
                tracing::debug!("{err}");
                writeln!(self.output, "Invalid depth value. Using unlimited depth.")?;
                None
            }
        };

        let Some(use_gitignore) = self.confirm_gitignore()? else {
            return Ok(Flow::Exit);
        };

        let output = self.output_dir.join(format.default_file_name());
        let result = tasks::load_patterns(&path, use_gitignore).and_then(|patterns| {
            tasks::write_tree(&mut self.output, &path, max_depth, format, patterns, &output)
        });
        if let Err(err) = result {
            writeln!(self.output, "Error occurred: {err}")?;
        }

        Ok(Flow::Pause)
    }

    fn concatenate(&mut self) -> Result<Flow> {
        writeln!(self.output, "\nCode File Concatenator")?;
        writeln!(self.output, "{}", "-".repeat(RULE_WIDTH))?;

        let Some(path) = self.prompt("Enter folder path to scan for code files: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(path) = self.resolve_path(&path)? else {
            return Ok(Flow::Continue);
        };

        let Some(use_gitignore) = self.confirm_gitignore()? else {
            return Ok(Flow::Exit);
        };

        let output = self.output_dir.join(CONCAT_OUTPUT_NAME);
        let result = tasks::load_patterns(&path, use_gitignore)
            .and_then(|patterns| tasks::concatenate(&mut self.output, &path, patterns, &output));
        if let Err(err) = result {
            writeln!(self.output, "\nError writing output: {err}")?;
        }

        Ok(Flow::Pause)
    }

    /// Empty input means the current directory; missing paths are reported.
    fn resolve_path(&mut self, input: &str) -> Result<Option<PathBuf>> {
        let path = if input.is_empty() {
            std::env::current_dir()?
        } else {
            Path::new(input).to_path_buf()
        };
        match ensure_exists(path) {
            Ok(path) => Ok(Some(path)),
            Err(WalkError::NotFound { .. }) => {
                writeln!(self.output, "Error: Path does not exist!")?;
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn confirm_gitignore(&mut self) -> Result<Option<bool>> {
        let answer = self.prompt("Exclude files/folders based on .gitignore? (y/n): ")?;
        Ok(answer.map(|answer| answer.eq_ignore_ascii_case("y")))
    }

    fn banner(&mut self, title: &str) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.output, "\n{rule}\n{title}\n{rule}")?;
        Ok(())
    }

    /// Returns false when input has ended.
    fn pause(&mut self) -> Result<bool> {
        Ok(self.prompt("\nPress Enter to continue...")?.is_some())
    }

    /// Print `text` and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
