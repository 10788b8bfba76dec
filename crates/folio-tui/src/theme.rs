use ratatui::style::Color;

/// Runtime theme colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Palette colors
    pub yellow: Color,
    pub green: Color,
    pub blue: Color,
    pub purple: Color,

    // Semantic colors
    pub accent: Color,
    /// Progress bar fill
    pub progress: Color,
}

impl Default for Theme {
    fn default() -> Self {
        gruvbox_dark()
    }
}

fn gruvbox_dark() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x28, 0x28),
        bg1: Color::Rgb(0x32, 0x30, 0x2f),
        bg2: Color::Rgb(0x45, 0x40, 0x3d),
        fg0: Color::Rgb(0xd4, 0xbe, 0x98),
        fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
        grey0: Color::Rgb(0x7c, 0x6f, 0x64),
        grey1: Color::Rgb(0x92, 0x83, 0x74),
        yellow: Color::Rgb(0xd8, 0xa6, 0x57),
        green: Color::Rgb(0xa9, 0xb6, 0x65),
        blue: Color::Rgb(0x7d, 0xae, 0xa3),
        purple: Color::Rgb(0xd3, 0x86, 0x9b),
        accent: Color::Rgb(0x89, 0xb4, 0x82),
        progress: Color::Rgb(0xe7, 0x8a, 0x4e),
    }
}

fn nord() -> Theme {
    Theme {
        bg0: Color::Rgb(0x2e, 0x34, 0x40),
        bg1: Color::Rgb(0x3b, 0x42, 0x52),
        bg2: Color::Rgb(0x43, 0x4c, 0x5e),
        fg0: Color::Rgb(0xd8, 0xde, 0xe9),
        fg1: Color::Rgb(0xe5, 0xe9, 0xf0),
        grey0: Color::Rgb(0x4c, 0x56, 0x6a),
        grey1: Color::Rgb(0x61, 0x6e, 0x88),
        yellow: Color::Rgb(0xeb, 0xcb, 0x8b),
        green: Color::Rgb(0xa3, 0xbe, 0x8c),
        blue: Color::Rgb(0x81, 0xa1, 0xc1),
        purple: Color::Rgb(0xb4, 0x8e, 0xad),
        accent: Color::Rgb(0x88, 0xc0, 0xd0),
        progress: Color::Rgb(0x88, 0xc0, 0xd0),
    }
}

fn dracula() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2a, 0x36),
        bg1: Color::Rgb(0x34, 0x37, 0x46),
        bg2: Color::Rgb(0x44, 0x47, 0x5a),
        fg0: Color::Rgb(0xf8, 0xf8, 0xf2),
        fg1: Color::Rgb(0xff, 0xff, 0xff),
        grey0: Color::Rgb(0x62, 0x72, 0xa4),
        grey1: Color::Rgb(0x7a, 0x86, 0xb6),
        yellow: Color::Rgb(0xf1, 0xfa, 0x8c),
        green: Color::Rgb(0x50, 0xfa, 0x7b),
        blue: Color::Rgb(0x8b, 0xe9, 0xfd),
        purple: Color::Rgb(0xbd, 0x93, 0xf9),
        accent: Color::Rgb(0xff, 0x79, 0xc6),
        progress: Color::Rgb(0xbd, 0x93, 0xf9),
    }
}

/// Load a theme by name, falling back to gruvbox-dark
pub fn load_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "gruvbox-dark" | "gruvbox" => gruvbox_dark(),
        "nord" => nord(),
        "dracula" => dracula(),
        other => {
            tracing::warn!("Unknown theme '{}', using gruvbox-dark", other);
            gruvbox_dark()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_theme_fallback() {
        assert_eq!(load_theme("NORD").bg0, nord().bg0);
        assert_eq!(load_theme("no-such-theme").bg0, gruvbox_dark().bg0);
    }
}
