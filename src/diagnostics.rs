//! Dependency diagnostics and font listing.
//!
//! Both reports are advisory: they never touch conversion state and the
//! process exits 0 whatever they find. Collection (`run_diagnostics`) is
//! separate from presentation (`DiagnosticReport::render`).

use std::collections::BTreeSet;
use std::fmt::Write as _;

use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::command::{CONVERTER, PDF_ENGINE};
use crate::probe::{EnvProber, FONT_CATALOG_TOOL, contains_family};
use crate::theme::themed_families;

/// Programs the conversion path needs.
pub const REQUIRED_PROGRAMS: [&str; 3] = [CONVERTER, PDF_ENGINE, FONT_CATALOG_TOOL];

/// Suggestion width for wrapped hints.
const WRAP_WIDTH: usize = 72;

const PROGRAM_HINT: &str = "Install pandoc, a TeX distribution that ships XeLaTeX \
    (for example TeX Live with texlive-xetex) and fontconfig (fc-list), then re-run \
    mdpdf --diagnostics.";
const FONT_HINT: &str = "Install the TeX Gyre font collection (for example the \
    fonts-texgyre or tex-gyre package) and refresh the font cache with fc-cache -f. \
    The modern theme and --font keep working without them.";

/// Outcome of one dependency check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    /// What was looked for (program or theme name).
    pub name: String,
    /// Extra context, e.g. the font family behind a theme.
    pub detail: Option<String>,
    pub found: bool,
}

/// Full diagnostics result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticReport {
    pub programs: Vec<Check>,
    pub fonts: Vec<Check>,
}

impl DiagnosticReport {
    /// True when every required program was found.
    pub fn programs_ok(&self) -> bool {
        self.programs.iter().all(|c| c.found)
    }

    /// True when every theme font was found.
    pub fn fonts_ok(&self) -> bool {
        self.fonts.iter().all(|c| c.found)
    }

    /// Formats the report for the terminal.
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("Required programs:\n");
        render_checks(&mut out, &self.programs);
        if !self.programs_ok() {
            render_hint(&mut out, PROGRAM_HINT);
        }

        out.push_str("\nTheme fonts:\n");
        render_checks(&mut out, &self.fonts);
        if !self.fonts_ok() {
            render_hint(&mut out, FONT_HINT);
        }

        out.push('\n');
        if self.programs_ok() && self.fonts_ok() {
            out.push_str("All dependencies found.\n");
        } else {
            out.push_str("Some dependencies are missing.\n");
        }
        out
    }
}

fn render_checks(out: &mut String, checks: &[Check]) {
    let name_width = checks
        .iter()
        .map(|c| UnicodeWidthStr::width(c.name.as_str()))
        .max()
        .unwrap_or(0);
    for check in checks {
        let mark = if check.found { "[ok]     " } else { "[missing]" };
        let pad = name_width.saturating_sub(UnicodeWidthStr::width(check.name.as_str()));
        let _ = write!(out, "  {mark} {}", check.name);
        if let Some(detail) = &check.detail {
            let _ = write!(out, "{:pad$}  {detail}", "");
        }
        out.push('\n');
    }
}

fn render_hint(out: &mut String, hint: &str) {
    let options = textwrap::Options::new(WRAP_WIDTH)
        .initial_indent("  Suggestion: ")
        .subsequent_indent("              ");
    for line in textwrap::wrap(hint, options) {
        out.push_str(&line);
        out.push('\n');
    }
}

/// Checks required programs and the font family of every named theme.
pub fn run_diagnostics(prober: &dyn EnvProber) -> DiagnosticReport {
    let programs = REQUIRED_PROGRAMS
        .iter()
        .map(|program| Check {
            name: (*program).to_string(),
            detail: None,
            found: prober.has_program(program),
        })
        .collect();

    // One catalog query for all themes; an unreadable catalog finds nothing.
    let catalog = prober.font_families().unwrap_or_else(|e| {
        debug!(error = %e, "font catalog unavailable");
        Vec::new()
    });
    let fonts = themed_families()
        .map(|(theme, family)| Check {
            name: theme.name().to_string(),
            detail: Some(family.to_string()),
            found: contains_family(&catalog, family),
        })
        .collect();

    DiagnosticReport { programs, fonts }
}

/// Renders the installed font families, one per line, sorted and
/// deduplicated.
///
/// Returns the missing-tool message instead when `fc-list` is unavailable.
pub fn list_fonts(prober: &dyn EnvProber) -> String {
    if !prober.has_program(FONT_CATALOG_TOOL) {
        return format!(
            "Cannot list fonts: {FONT_CATALOG_TOOL} not found (install fontconfig).\n"
        );
    }
    match prober.font_families() {
        Ok(families) => {
            let mut out = String::new();
            for family in families.into_iter().collect::<BTreeSet<_>>() {
                out.push_str(&family);
                out.push('\n');
            }
            out
        }
        Err(e) => format!("Cannot list fonts: {FONT_CATALOG_TOOL} failed: {e}\n"),
    }
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;
