use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const ACCENT: &str = "#11f7b1";
pub const ACCENT_SOFT: &str = "#11f7b180";
pub const RENT: &str = "#60a5fa";
pub const NEGATIVE: &str = "#ef4444";
pub const BADGE: &str = "#eab308";

/// Presentation mode chosen by the page. Components receive it by value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Dark => "theme-dark",
            Self::Light => "theme-light",
        }
    }

    pub const fn palette(self) -> &'static Palette {
        match self {
            Self::Dark => &DARK,
            Self::Light => &LIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub page_bg: &'static str,
    pub card_bg: &'static str,
    pub panel_bg: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub subtext: &'static str,
    pub axis: &'static str,
    pub tooltip_bg: &'static str,
    pub tooltip_border: &'static str,
}

pub const DARK: Palette = Palette {
    page_bg: "#0a0a0a",
    card_bg: "#121212",
    panel_bg: "#1a1a1a",
    border: "#1f2937",
    text: "#ffffff",
    subtext: "#9ca3af",
    axis: "#666666",
    tooltip_bg: "#1a1a1a",
    tooltip_border: "#333333",
};

pub const LIGHT: Palette = Palette {
    page_bg: "#f3f4f6",
    card_bg: "#ffffff",
    panel_bg: "#f9fafb",
    border: "#e5e7eb",
    text: "#111827",
    subtext: "#6b7280",
    axis: "#888888",
    tooltip_bg: "#ffffff",
    tooltip_border: "#e5e7eb",
};

impl Palette {
    /// CSS custom properties for this palette, scoped to `selector`.
    pub fn css_block(&self, selector: &str) -> String {
        let vars = [
            ("--page-bg", self.page_bg),
            ("--card-bg", self.card_bg),
            ("--panel-bg", self.panel_bg),
            ("--border", self.border),
            ("--text", self.text),
            ("--subtext", self.subtext),
            ("--axis", self.axis),
            ("--tooltip-bg", self.tooltip_bg),
            ("--tooltip-border", self.tooltip_border),
            ("--accent", ACCENT),
            ("--accent-soft", ACCENT_SOFT),
            ("--rent", RENT),
            ("--negative", NEGATIVE),
            ("--badge", BADGE),
        ];
        let mut css = format!("{selector} {{\n");
        for (name, value) in vars {
            let _ = writeln!(css, "  {name}: {value};");
        }
        css.push_str("}\n");
        css
    }
}
