use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

// Light/dark palettes. Colors are declared as RGB and mapped down to the
// xterm-256 cube unless the terminal advertises truecolor.

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Glyph shown by the tray toggle: the mode you'd switch to.
    pub fn toggle_glyph(self) -> &'static str {
        match self {
            ThemeMode::Light => "☾",
            ThemeMode::Dark => "☀",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Light => Palette {
                desktop_bg: rgb(0xdb, 0xe4, 0xee),
                desktop_fg: rgb(0x1f, 0x29, 0x37),
                window_bg: rgb(0xff, 0xff, 0xff),
                window_fg: rgb(0x11, 0x18, 0x27),
                header_bg: rgb(0x3b, 0x82, 0xf6),
                header_fg: rgb(0xff, 0xff, 0xff),
                header_inactive_bg: rgb(0xd1, 0xd5, 0xdb),
                header_inactive_fg: rgb(0x37, 0x41, 0x51),
                border: rgb(0x9c, 0xa3, 0xaf),
                menu_bg: rgb(0xf3, 0xf4, 0xf6),
                menu_fg: rgb(0x11, 0x18, 0x27),
                selected_bg: rgb(0xbf, 0xdb, 0xfe),
                selected_fg: rgb(0x11, 0x18, 0x27),
                taskbar_bg: rgb(0xe5, 0xe7, 0xeb),
                taskbar_fg: rgb(0x11, 0x18, 0x27),
                accent: rgb(0xc8, 0x64, 0x00),
                muted: rgb(0x6b, 0x72, 0x80),
            },
            ThemeMode::Dark => Palette {
                desktop_bg: rgb(0x0f, 0x17, 0x2a),
                desktop_fg: rgb(0xe5, 0xe7, 0xeb),
                window_bg: rgb(0x1f, 0x29, 0x37),
                window_fg: rgb(0xf9, 0xfa, 0xfb),
                header_bg: rgb(0x25, 0x63, 0xeb),
                header_fg: rgb(0xff, 0xff, 0xff),
                header_inactive_bg: rgb(0x37, 0x41, 0x51),
                header_inactive_fg: rgb(0xd1, 0xd5, 0xdb),
                border: rgb(0x4b, 0x55, 0x63),
                menu_bg: rgb(0x11, 0x18, 0x27),
                menu_fg: rgb(0xe5, 0xe7, 0xeb),
                selected_bg: rgb(0x1e, 0x40, 0xaf),
                selected_fg: rgb(0xff, 0xff, 0xff),
                taskbar_bg: rgb(0x11, 0x18, 0x27),
                taskbar_fg: rgb(0xe5, 0xe7, 0xeb),
                accent: rgb(0xff, 0xa5, 0x00),
                muted: rgb(0x9c, 0xa3, 0xaf),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub desktop_bg: Color,
    pub desktop_fg: Color,
    pub window_bg: Color,
    pub window_fg: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub header_inactive_bg: Color,
    pub header_inactive_fg: Color,
    pub border: Color,
    pub menu_bg: Color,
    pub menu_fg: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub taskbar_bg: Color,
    pub taskbar_fg: Color,
    pub accent: Color,
    pub muted: Color,
}

impl Palette {
    pub fn desktop(&self) -> Style {
        Style::default().bg(self.desktop_bg).fg(self.desktop_fg)
    }

    pub fn window(&self) -> Style {
        Style::default().bg(self.window_bg).fg(self.window_fg)
    }

    pub fn header(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .bg(self.header_bg)
                .fg(self.header_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(self.header_inactive_bg)
                .fg(self.header_inactive_fg)
        }
    }

    pub fn border(&self) -> Style {
        Style::default().bg(self.window_bg).fg(self.border)
    }

    pub fn menu(&self) -> Style {
        Style::default().bg(self.menu_bg).fg(self.menu_fg)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.selected_bg)
            .fg(self.selected_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn taskbar(&self) -> Style {
        Style::default().bg(self.taskbar_bg).fg(self.taskbar_fg)
    }

    pub fn accent(&self) -> Style {
        Style::default().bg(self.window_bg).fg(self.accent)
    }

    pub fn muted(&self) -> Style {
        Style::default().bg(self.window_bg).fg(self.muted)
    }
}

fn truecolor() -> bool {
    std::env::var("COLORTERM")
        .map(|v| {
            let v = v.to_lowercase();
            v.contains("truecolor") || v.contains("24bit")
        })
        .unwrap_or(false)
}

pub fn rgb(r: u8, g: u8, b: u8) -> Color {
    if truecolor() {
        Color::Rgb(r, g, b)
    } else {
        Color::Indexed(cube_index(r, g, b))
    }
}

/// Nearest entry of the xterm 6x6x6 color cube (indices 16..=231).
fn cube_index(r: u8, g: u8, b: u8) -> u8 {
    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
    let nearest = |v: u8| {
        LEVELS
            .iter()
            .enumerate()
            .min_by_key(|(_, level)| (**level as i16 - v as i16).abs())
            .map(|(idx, _)| idx as u8)
            .unwrap_or(0)
    };
    16 + 36 * nearest(r) + 6 * nearest(g) + nearest(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_mode() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
    }

    #[test]
    fn cube_index_corners() {
        assert_eq!(cube_index(0, 0, 0), 16);
        assert_eq!(cube_index(255, 255, 255), 231);
        assert_eq!(cube_index(255, 0, 0), 196);
    }

    #[test]
    fn palettes_differ_between_modes() {
        assert_ne!(
            ThemeMode::Light.palette().desktop_bg,
            ThemeMode::Dark.palette().desktop_bg
        );
    }

    #[test]
    fn rgb_returns_a_color_variant() {
        match rgb(200, 100, 0) {
            Color::Rgb(_, _, _) | Color::Indexed(_) => {}
            other => panic!("unexpected color variant {other:?}"),
        }
    }
}
