use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    banner::*, block_display::*, board_display::*, key_binding_display::*, preview_display::*,
    stats_display::*,
};

mod banner;
mod block_display;
mod board_display;
mod key_binding_display;
mod preview_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const LIGHT_BLUE: Color = Color::Rgb(0, 200, 255);
    pub const PINK: Color = Color::Rgb(255, 105, 180);
    pub const DARK_BLUE: Color = Color::Rgb(0, 0, 190);
    pub const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(70, 70, 70);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use crate::view::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const DIM: Style = fg_bg(color::GRAY, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::DARK_GRAY, color::BLACK);
    pub const GHOST: Style = fg_bg(color::GRAY, color::BLACK);
    pub const GAME_OVER: Style = fg_bg(color::RED, color::BLACK).add_modifier(Modifier::BOLD);

    pub const YELLOW_BLOCK: Style = bg_only(color::YELLOW);
    pub const BLUE_BLOCK: Style = bg_only(color::LIGHT_BLUE);
    pub const PINK_BLOCK: Style = bg_only(color::PINK);
    pub const DARK_BLUE_BLOCK: Style = bg_only(color::DARK_BLUE);
    pub const ORANGE_BLOCK: Style = bg_only(color::ORANGE);
    pub const GREEN_BLOCK: Style = bg_only(color::GREEN);
    pub const RED_BLOCK: Style = bg_only(color::RED);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
