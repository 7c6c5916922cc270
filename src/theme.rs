//! Font themes: named presets mapped to the body-text font family.
//!
//! This is a **leaf module**. The registry is a fixed table; nothing
//! mutates it after startup. `Modern` deliberately maps to no family so
//! the typesetting engine keeps its built-in default.

use std::fmt;

use clap::ValueEnum;

/// A named font preset selectable with `-t/--theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    /// Engine default font (no font variable is passed).
    #[default]
    Modern,
    /// TeX Gyre Heros, a Helvetica-like sans serif.
    Heros,
    /// TeX Gyre Termes, a Times-like serif.
    Termes,
    /// TeX Gyre Pagella, a Palatino-like serif.
    Pagella,
}

/// Theme → font family, in display order.
static REGISTRY: [(Theme, Option<&str>); 4] = [
    (Theme::Modern, None),
    (Theme::Heros, Some("TeX Gyre Heros")),
    (Theme::Termes, Some("TeX Gyre Termes")),
    (Theme::Pagella, Some("TeX Gyre Pagella")),
];

impl Theme {
    /// Every theme, in registry order.
    pub fn all() -> impl Iterator<Item = Theme> {
        REGISTRY.iter().map(|(theme, _)| *theme)
    }

    /// The lowercase identifier accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Modern => "modern",
            Theme::Heros => "heros",
            Theme::Termes => "termes",
            Theme::Pagella => "pagella",
        }
    }

    /// Returns the font family this theme selects, or `None` for the
    /// engine default.
    pub fn font_family(self) -> Option<&'static str> {
        REGISTRY
            .iter()
            .find(|(theme, _)| *theme == self)
            .and_then(|(_, family)| *family)
    }

    /// Human-readable font description for the pre-run summary.
    pub fn describe(self) -> String {
        match self.font_family() {
            Some(family) => format!("{family} (theme: {})", self.name()),
            None => format!("engine default (theme: {})", self.name()),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Registry entries that name a real font family (everything but `Modern`).
pub fn themed_families() -> impl Iterator<Item = (Theme, &'static str)> {
    Theme::all().filter_map(|theme| theme.font_family().map(|family| (theme, family)))
}

#[cfg(test)]
#[path = "theme_tests.rs"]
mod tests;
