//! Option resolution: defaults, validation, output path derivation and the
//! overwrite guard.
//!
//! `resolve` turns a parsed `Cli` into `ConversionOptions` or fails fast.
//! The overwrite prompt goes through the `Confirm` trait so callers (and
//! tests) decide where the answer comes from.

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::theme::Theme;

/// File extensions accepted as markdown input (compared case-insensitively).
pub const MARKDOWN_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Extension of the produced document.
pub const OUTPUT_EXTENSION: &str = "pdf";

/// Language used when none is given.
pub const DEFAULT_LANG: &str = "en";

/// Where the body font comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontChoice {
    Theme(Theme),
    Custom(String),
}

impl FontChoice {
    /// Human-readable description for the pre-run summary.
    pub fn describe(&self) -> String {
        match self {
            FontChoice::Theme(theme) => theme.describe(),
            FontChoice::Custom(font) => format!("{font} (custom)"),
        }
    }
}

/// A validated conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub lang: String,
    pub font: FontChoice,
    /// Skip the overwrite confirmation.
    pub assume_yes: bool,
}

/// Returns true if `path` ends in a recognised markdown extension.
pub fn is_markdown_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|md| ext.eq_ignore_ascii_case(md))
        })
}

/// Derives the PDF path for `input`.
///
/// A recognised markdown extension is replaced; any other path keeps its
/// full name and gets `.pdf` appended (`notes.txt` → `notes.txt.pdf`).
pub fn derive_output_path(input: &Path) -> PathBuf {
    if is_markdown_path(input) {
        input.with_extension(OUTPUT_EXTENSION)
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".");
        name.push(OUTPUT_EXTENSION);
        PathBuf::from(name)
    }
}

/// Validates parsed arguments and applies defaults.
pub fn resolve(cli: Cli) -> Result<ConversionOptions> {
    let input = PathBuf::from(cli.input.ok_or(Error::NoInput)?);
    if !input.is_file() {
        return Err(Error::InputNotFound(input));
    }
    if let Err(source) = File::open(&input) {
        return Err(Error::InputUnreadable {
            path: input,
            source,
        });
    }

    let custom = cli.font.filter(|font| !font.trim().is_empty());
    let font = match (cli.theme, custom) {
        (Theme::Modern, Some(font)) => FontChoice::Custom(font),
        (theme, Some(font)) => {
            return Err(Error::ThemeFontConflict {
                theme: theme.name().to_string(),
                font,
            });
        }
        (theme, None) => FontChoice::Theme(theme),
    };

    let output = cli
        .output
        .filter(|output| !output.is_empty())
        .map_or_else(|| derive_output_path(&input), PathBuf::from);

    let lang = match cli.lang.trim() {
        "" => DEFAULT_LANG.to_string(),
        lang => lang.to_string(),
    };

    Ok(ConversionOptions {
        input,
        output,
        lang,
        font,
        assume_yes: cli.yes,
    })
}

/// Source of yes/no answers for the overwrite prompt.
pub trait Confirm {
    /// Asks `prompt` and returns true only for an explicit yes.
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

/// Reads the answer from standard input, blocking until a line arrives.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{prompt} [y/N] ")?;
        stdout.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(is_affirmative(&answer))
    }
}

/// `y` or `yes` in any case; everything else (including EOF) is no.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Asks before clobbering an existing output file.
///
/// Passes when the output does not exist, when `assume_yes` is set, or when
/// the operator agrees; otherwise returns `Error::Cancelled`.
pub fn guard_overwrite(options: &ConversionOptions, confirm: &mut dyn Confirm) -> Result<()> {
    if options.assume_yes || !options.output.is_file() {
        return Ok(());
    }
    let prompt = format!(
        "Output file '{}' already exists. Overwrite?",
        options.output.display()
    );
    if confirm.confirm(&prompt)? {
        Ok(())
    } else {
        Err(Error::Cancelled(options.output.clone()))
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
