use crossterm::style::{Color, ContentStyle, Stylize};

use crate::config::Colors;
use crate::error::StartupError;

/// Colors of one row state: text, description, and the background behind both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shade {
    pub bg: Color,
    pub fg: Color,
    pub desc: Color,
}

impl Shade {
    pub fn text(&self) -> ContentStyle {
        ContentStyle::new().with(self.fg).on(self.bg)
    }

    pub fn description(&self) -> ContentStyle {
        ContentStyle::new().with(self.desc).on(self.bg)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub normal: Shade,
    pub hover: Shade,
    pub selected: Shade,
    pub separator: Color,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            normal: Shade {
                bg: rgb(0x00, 0x00, 0x00),
                fg: rgb(0xff, 0xff, 0xff),
                desc: rgb(0x55, 0x57, 0x53),
            },
            hover: Shade {
                bg: rgb(0x12, 0x12, 0x12),
                fg: rgb(0xff, 0xff, 0xff),
                desc: rgb(0x55, 0x57, 0x53),
            },
            selected: Shade {
                bg: rgb(0x34, 0x65, 0xa4),
                fg: rgb(0xff, 0xff, 0xff),
                desc: rgb(0xc5, 0xc8, 0xc6),
            },
            separator: rgb(0x55, 0x57, 0x53),
        }
    }
}

impl Palette {
    pub fn from_colors(c: &Colors) -> Result<Self, StartupError> {
        Ok(Palette {
            normal: Shade {
                bg: parse_color("background", &c.background)?,
                fg: parse_color("foreground", &c.foreground)?,
                desc: parse_color("description", &c.description)?,
            },
            hover: Shade {
                bg: parse_color("hover_background", &c.hover_background)?,
                fg: parse_color("hover_foreground", &c.hover_foreground)?,
                desc: parse_color("hover_description", &c.hover_description)?,
            },
            selected: Shade {
                bg: parse_color("sel_background", &c.sel_background)?,
                fg: parse_color("sel_foreground", &c.sel_foreground)?,
                desc: parse_color("sel_description", &c.sel_description)?,
            },
            separator: parse_color("separator", &c.separator)?,
        })
    }

    pub fn separator(&self) -> ContentStyle {
        ContentStyle::new().with(self.separator).on(self.normal.bg)
    }
}

/// Parse `#RRGGBB`.
pub fn parse_color(name: &'static str, value: &str) -> Result<Color, StartupError> {
    let bad = || StartupError::Color {
        name,
        value: value.to_string(),
    };
    let hex = value.strip_prefix('#').ok_or_else(bad)?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(bad());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
    Ok(rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_color("x", "#3465A4").unwrap(), rgb(0x34, 0x65, 0xa4));
        assert_eq!(parse_color("x", "#00ff7f").unwrap(), rgb(0, 255, 127));
        for bad in ["3465A4", "#3465A", "#3465A4FF", "#GG0000", "", "#ééé"] {
            assert!(parse_color("x", bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn default_colors_match_default_palette() {
        assert_eq!(Palette::from_colors(&Colors::default()).unwrap(), Palette::default());
    }

    #[test]
    fn bad_color_names_the_setting() {
        let colors = Colors {
            sel_foreground: "white".into(),
            ..Colors::default()
        };
        match Palette::from_colors(&colors).unwrap_err() {
            StartupError::Color { name, value } => {
                assert_eq!(name, "sel_foreground");
                assert_eq!(value, "white");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
