use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three dashboard looks; all render the same snapshot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Classic,
    Midnight,
    Terminal,
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub grid: &'static str,
    pub font_family: &'static str,
    pub radius_px: u32,
    pub max_width_px: u32,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Classic, Theme::Midnight, Theme::Terminal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::Midnight => "midnight",
            Theme::Terminal => "terminal",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Midnight => "Midnight",
            Theme::Terminal => "Terminal",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Classic => Palette {
                background: "#ffffff",
                surface: "#f9fafb",
                text: "#111827",
                muted: "#6b7280",
                accent: "#1f77b4",
                grid: "#d1d5db",
                font_family: "\"Source Sans Pro\", -apple-system, sans-serif",
                radius_px: 8,
                max_width_px: 736,
            },
            Theme::Midnight => Palette {
                background: "#0e1117",
                surface: "#161b22",
                text: "#e6edf3",
                muted: "#8b949e",
                accent: "#58a6ff",
                grid: "#30363d",
                font_family: "Inter, -apple-system, sans-serif",
                radius_px: 14,
                max_width_px: 960,
            },
            Theme::Terminal => Palette {
                background: "#000000",
                surface: "#0a0f0a",
                text: "#33ff66",
                muted: "#1f9e45",
                accent: "#33ff66",
                grid: "#144d26",
                font_family: "\"JetBrains Mono\", Menlo, monospace",
                radius_px: 0,
                max_width_px: 820,
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown theme '{}' (expected one of: classic, midnight, terminal)",
            self.0
        )
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "classic" | "light" => Ok(Theme::Classic),
            "midnight" | "dark" => Ok(Theme::Midnight),
            "terminal" | "mono" => Ok(Theme::Terminal),
            _ => Err(UnknownTheme(s.to_string())),
        }
    }
}
