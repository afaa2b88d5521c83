use blockfall_engine::Color;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::view::widgets::style;

/// What a single board cell shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Ghost,
    Filled(Color),
}

#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub fn width() -> u16 {
        2
    }

    pub fn height() -> u16 {
        1
    }

    pub fn from_cell(cell: Cell, show_dots: bool) -> Self {
        match cell {
            Cell::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            Cell::Empty => Self::new(style::EMPTY, ""),
            Cell::Ghost => Self::new(style::GHOST, "[]"),
            Cell::Filled(color) => Self::new(color_style(color), ""),
        }
    }
}

fn color_style(color: Color) -> Style {
    match color {
        Color::Yellow => style::YELLOW_BLOCK,
        Color::Blue => style::BLUE_BLOCK,
        Color::Pink => style::PINK_BLOCK,
        Color::DarkBlue => style::DARK_BLUE_BLOCK,
        Color::Orange => style::ORANGE_BLOCK,
        Color::Green => style::GREEN_BLOCK,
        Color::Red => style::RED_BLOCK,
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // Paragraph fills the whole area, not just the cells under the symbol
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
