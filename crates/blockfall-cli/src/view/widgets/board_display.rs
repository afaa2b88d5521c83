use std::iter;

use blockfall_engine::{
    Block, GameState,
    config::{GRID_HEIGHT, GRID_WIDTH},
};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::widgets::{BlockDisplay, Cell};

#[allow(clippy::cast_sign_loss)]
const COLUMNS: usize = GRID_WIDTH as usize;
#[allow(clippy::cast_sign_loss)]
const ROWS: usize = GRID_HEIGHT as usize;

pub type CellGrid = [[Cell; COLUMNS]; ROWS];

/// Resolves what each playable cell shows.
///
/// Layers, bottom to top: settled blocks, the landing preview, the active piece.
/// The preview is skipped once the active piece has landed. Blocks outside the
/// playable area are dropped.
pub fn board_cells(state: &GameState) -> CellGrid {
    let mut grid = [[Cell::Empty; COLUMNS]; ROWS];
    let mut paint = |block: &Block, cell: Cell| {
        let col = usize::try_from(block.position.x - 1).ok();
        let row = usize::try_from(block.position.y - 1).ok();
        if let (Some(col), Some(row)) = (col, row)
            && let Some(slot) = grid.get_mut(row).and_then(|r| r.get_mut(col))
        {
            *slot = cell;
        }
    };

    for block in &state.settled_blocks {
        paint(block, Cell::Filled(block.color));
    }
    if !state.is_grounded() {
        for block in &state.hard_drop_preview {
            paint(block, Cell::Ghost);
        }
    }
    for block in &state.active_piece {
        paint(block, Cell::Filled(block.color));
    }
    grid
}

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    state: &'a GameState,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self { state, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        COLUMNS as u16 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS as u16 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..COLUMNS).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..ROWS).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<ROWS>(&vertical)
            .into_iter()
            .map(|row| row.layout::<COLUMNS>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, board_cells(self.state)) {
            for (grid_cell, cell) in iter::zip(grid_row, row) {
                BlockDisplay::from_cell(cell, true).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Action, Color, reduce};

    use super::*;

    fn filled(grid: &CellGrid) -> Vec<(usize, usize)> {
        let mut cells = vec![];
        for (y, row) in grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if matches!(cell, Cell::Filled(_)) {
                    cells.push((x + 1, y + 1));
                }
            }
        }
        cells
    }

    #[test]
    fn test_initial_board_shows_active_piece_only() {
        let grid = board_cells(&GameState::initial());
        assert_eq!(filled(&grid), vec![(4, 1), (5, 1), (4, 2), (5, 2)]);
        assert_eq!(grid[0][3], Cell::Filled(Color::Yellow));
    }

    #[test]
    fn test_ghost_drawn_under_active_piece() {
        let state = reduce(GameState::initial(), Action::Tick);
        let grid = board_cells(&state);
        assert_eq!(grid[18][3], Cell::Ghost);
        assert_eq!(grid[19][4], Cell::Ghost);
        assert_eq!(grid[1][3], Cell::Filled(Color::Yellow));
    }

    #[test]
    fn test_ghost_hidden_once_landed() {
        let mut state = reduce(GameState::initial(), Action::Tick);
        state = reduce(state, Action::HardDrop);
        assert!(state.is_grounded());
        let grid = board_cells(&state);
        assert!(grid.iter().flatten().all(|cell| *cell != Cell::Ghost));
        assert_eq!(filled(&grid), vec![(4, 19), (5, 19), (4, 20), (5, 20)]);
    }

    #[test]
    fn test_out_of_area_blocks_ignored() {
        let mut state = GameState::initial();
        let mut block = state.active_piece[0];
        block.position.x = 0;
        state.settled_blocks.push(block);
        block.position.x = GRID_WIDTH + 1;
        state.settled_blocks.push(block);
        assert_eq!(filled(&board_cells(&state)).len(), 4);
    }

    #[test]
    fn test_render_fits_declared_size() {
        let state = GameState::initial();
        let display = BoardDisplay::new(&state).block(BlockWidget::bordered());
        assert_eq!(display.width(), 22);
        assert_eq!(display.height(), 22);
        let area = Rect::new(0, 0, display.width(), display.height());
        let mut buf = Buffer::empty(area);
        (&display).render(area, &mut buf);
        // Third row is empty, so every cell shows its dot.
        let dots = (1..21).filter(|&x| buf[(x, 3)].symbol() == ".").count();
        assert_eq!(dots, 10);
    }
}
