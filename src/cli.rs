//! CLI argument definition for mdpdf.
//!
//! `Cli` is never parsed straight from `std::env::args()`: the lenient
//! scanner in `args.rs` classifies tokens first and hands clap a
//! canonical argument list.

use clap::Parser;

use crate::theme::Theme;

/// Markdown to PDF via pandoc and XeLaTeX.
#[derive(Parser, Debug)]
#[command(
    name = "mdpdf",
    version,
    about = "Convert markdown to PDF with pandoc and XeLaTeX",
    disable_version_flag = true,
    after_help = "Local files: style.tex (LaTeX header) and filter.lua (Lua filter) \
                  in the working directory are included automatically."
)]
pub struct Cli {
    /// Markdown file to convert (.md or .markdown).
    pub input: Option<String>,

    /// Font theme.
    #[arg(short, long, value_enum, default_value_t = Theme::Modern)]
    pub theme: Theme,

    /// Document and hyphenation language.
    #[arg(short, long, value_name = "LANG", default_value = "en")]
    pub lang: String,

    /// Custom font family (cannot be combined with a non-default --theme).
    #[arg(short, long, value_name = "FONT")]
    pub font: Option<String>,

    /// Output PDF path (default: input with a .pdf extension).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Overwrite an existing output file without asking.
    #[arg(short, long)]
    pub yes: bool,

    // The flags below are acted on by `args.rs` before clap parses; they are
    // declared here so the scanner's flag table and `--help` know them.
    /// Check required programs and theme fonts, then exit.
    #[allow(dead_code)]
    #[arg(long)]
    pub diagnostics: bool,

    /// List font families known to fontconfig, then exit.
    #[allow(dead_code)]
    #[arg(long)]
    pub list_fonts: bool,

    /// Treat unknown arguments as errors instead of warnings.
    #[allow(dead_code)]
    #[arg(long)]
    pub strict: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[allow(dead_code)]
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print version, then exit.
    #[allow(dead_code)]
    #[arg(short = 'V', long)]
    pub version: bool,
}
