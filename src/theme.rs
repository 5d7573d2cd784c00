use ratatui::style::{Color, Modifier, Style};

// Centralized theme colors. Content panels and the shell pull from here
// so a palette change stays a one-file edit.

pub fn accent() -> Color {
    Color::Cyan
}

// Window chrome
pub fn header_focused_bg() -> Color {
    Color::Blue
}
pub fn header_focused_fg() -> Color {
    Color::White
}
pub fn header_bg() -> Color {
    Color::DarkGray
}
pub fn header_fg() -> Color {
    Color::Gray
}
pub fn window_border() -> Color {
    Color::DarkGray
}
pub fn window_bg() -> Color {
    Color::Black
}
pub fn close_button_fg() -> Color {
    Color::LightRed
}

// Taskbar
pub fn taskbar_bg() -> Color {
    Color::DarkGray
}
pub fn taskbar_fg() -> Color {
    Color::White
}
pub fn taskbar_focused_bg() -> Color {
    Color::Gray
}
pub fn taskbar_focused_fg() -> Color {
    Color::Black
}

// Menus (start + context)
pub fn menu_bg() -> Color {
    Color::Black
}
pub fn menu_fg() -> Color {
    Color::White
}
pub fn menu_selected_bg() -> Color {
    Color::Blue
}
pub fn menu_selected_fg() -> Color {
    Color::White
}

pub fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

/// A built-in desktop backdrop: a fill glyph plus colors, the terminal
/// stand-in for a wallpaper image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wallpaper {
    pub name: &'static str,
    pub glyph: &'static str,
    pub fg: Color,
    pub bg: Color,
}

pub const WALLPAPERS: &[Wallpaper] = &[
    Wallpaper {
        name: "bloom",
        glyph: "░",
        fg: Color::LightBlue,
        bg: Color::Blue,
    },
    Wallpaper {
        name: "dunes",
        glyph: "▒",
        fg: Color::Yellow,
        bg: Color::Black,
    },
    Wallpaper {
        name: "matrix",
        glyph: "·",
        fg: Color::Green,
        bg: Color::Black,
    },
    Wallpaper {
        name: "slate",
        glyph: " ",
        fg: Color::Gray,
        bg: Color::DarkGray,
    },
];

pub fn default_wallpaper() -> Wallpaper {
    WALLPAPERS[0]
}

pub fn wallpaper_by_name(name: &str) -> Wallpaper {
    WALLPAPERS
        .iter()
        .copied()
        .find(|w| w.name == name)
        .unwrap_or_else(default_wallpaper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_wallpaper_falls_back_to_default() {
        assert_eq!(wallpaper_by_name("nope"), default_wallpaper());
        assert_eq!(wallpaper_by_name("dunes").name, "dunes");
    }
}
