use ratatui::style::{Color, Modifier, Style};

use crate::chat::Sender;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub user: Color,
    pub assistant: Color,
    pub system: Color,
    pub connected: Color,
    pub disconnected: Color,
}

impl Theme {
    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Theme {
                dark,
                background: Color::Rgb(0x12, 0x12, 0x12),
                foreground: Color::Rgb(0xe0, 0xe0, 0xe0),
                muted: Color::DarkGray,
                accent: Color::Rgb(0x8a, 0xb4, 0xf8),
                border: Color::Rgb(0x44, 0x44, 0x44),
                user: Color::Cyan,
                assistant: Color::Magenta,
                system: Color::Yellow,
                connected: Color::Green,
                disconnected: Color::Red,
            }
        } else {
            Theme {
                dark,
                background: Color::Rgb(0xf8, 0xf9, 0xfa),
                foreground: Color::Rgb(0x21, 0x25, 0x29),
                muted: Color::Gray,
                accent: Color::Rgb(0x4a, 0x6f, 0xa5),
                border: Color::Rgb(0xce, 0xd4, 0xda),
                user: Color::Blue,
                assistant: Color::Rgb(0x6f, 0x42, 0xc1),
                system: Color::Rgb(0xb8, 0x86, 0x0b),
                connected: Color::Rgb(0x28, 0xa7, 0x45),
                disconnected: Color::Rgb(0xdc, 0x35, 0x45),
            }
        }
    }

    /// Label of the theme toggle: offers the mode you would switch to.
    pub fn toggle_glyph(&self) -> &'static str {
        if self.dark {
            "☀"
        } else {
            "🌙"
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        let fg = if focused { self.accent } else { self.border };
        Style::default().fg(fg).bg(self.background)
    }

    pub fn sender_style(&self, sender: Sender) -> Style {
        let fg = match sender {
            Sender::User => self.user,
            Sender::Assistant => self.assistant,
            Sender::System => self.system,
        };
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }

    pub fn disabled(&self) -> Style {
        Style::default().fg(self.muted).add_modifier(Modifier::DIM)
    }
}
