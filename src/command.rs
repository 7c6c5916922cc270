//! Maps validated options to the pandoc invocation.
//!
//! `build` is deterministic apart from probing the working directory for
//! the two optional local collaborators (`style.tex`, `filter.lua`).
//! Flag/value pairs are always pushed together.

use std::path::Path;

use crate::options::{ConversionOptions, FontChoice};

/// The document converter binary.
pub const CONVERTER: &str = "pandoc";
/// The typesetting engine pandoc is told to use.
pub const PDF_ENGINE: &str = "xelatex";

const HIGHLIGHT_STYLE: &str = "tango";
const FONT_SIZE: &str = "fontsize=11pt";
const GEOMETRY: &str = "geometry:margin=2.5cm";
const NO_DEFAULT_FONT: &str = "nolmodern=true";
const URL_COLOR: &str = "urlcolor=blue";

/// Always included: lets long URLs break at any character.
const URL_WRAP_PACKAGE: &str = r"\usepackage{xurl}";

/// Locales that indent the first paragraph and drop paragraph spacing.
const INDENT_LANGS: [&str; 4] = ["pt", "es", "fr", "it"];
const INDENT_DIRECTIVES: [&str; 3] = [
    r"\usepackage{indentfirst}",
    r"\setlength{\parindent}{1.5em}",
    r"\setlength{\parskip}{0pt}",
];

/// LaTeX header picked up from the working directory when present.
pub const LOCAL_STYLE: &str = "style.tex";
/// Lua filter picked up from the working directory when present.
pub const LOCAL_FILTER: &str = "filter.lua";

/// A local file that was found and wired into the invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalInclude {
    Style,
    Filter,
}

impl LocalInclude {
    pub fn file_name(self) -> &'static str {
        match self {
            LocalInclude::Style => LOCAL_STYLE,
            LocalInclude::Filter => LOCAL_FILTER,
        }
    }

    fn flag(self) -> &'static str {
        match self {
            LocalInclude::Style => "--include-in-header",
            LocalInclude::Filter => "--lua-filter",
        }
    }
}

/// A fully built converter command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: &'static str,
    pub args: Vec<String>,
    /// Local files that were detected and included.
    pub includes: Vec<LocalInclude>,
}

/// Returns true for languages whose primary subtag prefers indented
/// first paragraphs (`pt`, `pt-BR`, `es_MX`, ...).
pub fn prefers_indent(lang: &str) -> bool {
    let primary = lang.split(['-', '_']).next().unwrap_or_default();
    INDENT_LANGS
        .iter()
        .any(|candidate| primary.eq_ignore_ascii_case(candidate))
}

/// Builds the `header-includes` value for `lang`.
pub fn header_includes(lang: &str) -> String {
    let mut header = String::from(URL_WRAP_PACKAGE);
    if prefers_indent(lang) {
        for directive in INDENT_DIRECTIVES {
            header.push('\n');
            header.push_str(directive);
        }
    }
    header
}

/// The `mainfont` variable for `font`, or `None` for the engine default.
pub fn font_variable(font: &FontChoice) -> Option<String> {
    let family = match font {
        FontChoice::Custom(name) => name.as_str(),
        FontChoice::Theme(theme) => theme.font_family()?,
    };
    Some(format!("mainfont={family}"))
}

/// The input path as pandoc should see it.
///
/// A name like `-odd.md` would be read as an option, so it gets a `./`
/// prefix.
pub fn input_arg(input: &Path) -> String {
    if input.as_os_str().as_encoded_bytes().starts_with(b"-") {
        Path::new(".").join(input).display().to_string()
    } else {
        input.display().to_string()
    }
}

/// Builds the pandoc invocation, probing `workdir` for local includes.
pub fn build(options: &ConversionOptions, workdir: &Path) -> Invocation {
    let mut args = vec![input_arg(&options.input), "--standalone".to_string()];
    let mut push_pair = |flag: &str, value: String| {
        args.push(flag.to_string());
        args.push(value);
    };

    push_pair("--pdf-engine", PDF_ENGINE.to_string());
    push_pair("--highlight-style", HIGHLIGHT_STYLE.to_string());
    push_pair("-V", FONT_SIZE.to_string());
    push_pair("-V", GEOMETRY.to_string());
    push_pair("-V", format!("lang={}", options.lang));
    push_pair("-V", NO_DEFAULT_FONT.to_string());
    push_pair("-V", URL_COLOR.to_string());
    push_pair("-V", format!("header-includes={}", header_includes(&options.lang)));
    if let Some(font) = font_variable(&options.font) {
        push_pair("-V", font);
    }

    let includes: Vec<LocalInclude> = [LocalInclude::Style, LocalInclude::Filter]
        .into_iter()
        .filter(|include| workdir.join(include.file_name()).is_file())
        .collect();
    for include in &includes {
        push_pair(include.flag(), include.file_name().to_string());
    }

    push_pair("-o", options.output.display().to_string());

    Invocation {
        program: CONVERTER,
        args,
        includes,
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
