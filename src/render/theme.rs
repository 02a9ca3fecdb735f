//! Card color palettes

use crate::params::ThemeName;

/// Complete color palette for a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: &'static str,
    pub title_color: &'static str,

    // Table colors
    pub header_bg: &'static str,
    pub header_color: &'static str,
    pub border_color: &'static str,
    pub text_color: &'static str,
    pub row_even_bg: &'static str,
    pub row_odd_bg: &'static str,

    // Stats panel colors
    pub stats_bg: &'static str,
    pub stats_color: &'static str,
    pub merged_stats_color: &'static str,
}

static DARK: Theme = Theme {
    background: "#0d1117",
    title_color: "#f0f6fc",
    header_bg: "#21262d",
    header_color: "#f0f6fc",
    border_color: "#30363d",
    text_color: "#e6edf3",
    row_even_bg: "#0d1117",
    row_odd_bg: "#161b22",
    stats_bg: "#21262d",
    stats_color: "#f0f6fc",
    merged_stats_color: "rgba(180, 120, 255, 1)",
};

static LIGHT: Theme = Theme {
    background: "#ffffff",
    title_color: "#24292f",
    header_bg: "#f6f8fa",
    header_color: "#24292f",
    border_color: "#d0d7de",
    text_color: "#24292f",
    row_even_bg: "#ffffff",
    row_odd_bg: "#f6f8fa",
    stats_bg: "#f6f8fa",
    stats_color: "#24292f",
    merged_stats_color: "rgba(130, 80, 223, 1)",
};

impl Theme {
    pub fn dark() -> &'static Theme {
        &DARK
    }

    pub fn light() -> &'static Theme {
        &LIGHT
    }

    pub fn for_name(name: ThemeName) -> &'static Theme {
        match name {
            ThemeName::Dark => Theme::dark(),
            ThemeName::Light => Theme::light(),
        }
    }

    /// Background for a body row, alternating by parity
    pub fn row_bg(&self, index: usize) -> &'static str {
        if index % 2 == 0 {
            self.row_even_bg
        } else {
            self.row_odd_bg
        }
    }
}
