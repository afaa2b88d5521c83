use blockfall_engine::{PIECE_SIZE, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::{BlockDisplay, Cell};

const PREVIEW_COLUMNS: usize = PIECE_SIZE;
const PREVIEW_ROWS: usize = 2;

/// Places `piece` in a 4x2 grid anchored at its top-left corner.
pub fn preview_cells(piece: &Piece) -> [[Cell; PREVIEW_COLUMNS]; PREVIEW_ROWS] {
    let mut grid = [[Cell::Empty; PREVIEW_COLUMNS]; PREVIEW_ROWS];
    let min_x = piece.iter().map(|b| b.position.x).min().unwrap_or(0);
    let min_y = piece.iter().map(|b| b.position.y).min().unwrap_or(0);
    for block in piece {
        let col = usize::try_from(block.position.x - min_x).ok();
        let row = usize::try_from(block.position.y - min_y).ok();
        if let (Some(col), Some(row)) = (col, row)
            && let Some(slot) = grid.get_mut(row).and_then(|r| r.get_mut(col))
        {
            *slot = Cell::Filled(block.color);
        }
    }
    grid
}

/// The upcoming piece.
#[derive(Debug)]
pub struct PreviewDisplay<'a> {
    piece: &'a Piece,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PreviewDisplay<'a> {
    pub fn new(piece: &'a Piece) -> Self {
        Self { piece, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        PREVIEW_COLUMNS as u16 * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        PREVIEW_ROWS as u16 * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PreviewDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PreviewDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let horizontal = Layout::horizontal(
            (0..PREVIEW_COLUMNS).map(|_| Constraint::Length(BlockDisplay::width())),
        )
        .flex(Flex::Center);
        let vertical = Layout::vertical(
            (0..PREVIEW_ROWS).map(|_| Constraint::Length(BlockDisplay::height())),
        )
        .flex(Flex::Center);

        let rows = area.layout::<PREVIEW_ROWS>(&vertical);
        for (row_area, row) in rows.into_iter().zip(preview_cells(self.piece)) {
            let cell_areas = row_area.layout::<PREVIEW_COLUMNS>(&horizontal);
            for (cell_area, cell) in cell_areas.into_iter().zip(row) {
                BlockDisplay::from_cell(cell, false).render(cell_area, buf);
            }
        }
    }
}
