use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Text},
    widgets::{Block as BlockWidget, Clear, Paragraph, Widget},
};

use crate::view::widgets::style;

/// A bordered message box drawn over the middle of its area.
#[derive(Debug)]
pub struct Banner<'a> {
    title: &'a str,
    lines: Vec<Line<'a>>,
}

impl<'a> Banner<'a> {
    pub fn game_over(score: u32, highscore: u32) -> Self {
        Self {
            title: "GAME OVER",
            lines: vec![
                Line::from(format!("SCORE {score}")),
                Line::from(format!("HIGH  {}", score.max(highscore))),
                Line::from(""),
                Line::styled("hold r to restart", style::DIM),
            ],
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    fn size(&self) -> (u16, u16) {
        let text_width = self
            .lines
            .iter()
            .map(Line::width)
            .chain([self.title.len()])
            .max()
            .unwrap_or(0);
        (text_width as u16 + 4, self.lines.len() as u16 + 2)
    }
}

impl Widget for Banner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = self.size();
        let area = area.centered(Constraint::Length(width), Constraint::Length(height));
        Clear.render(area, buf);
        let block = BlockWidget::bordered()
            .title(Line::styled(self.title, style::GAME_OVER).centered())
            .style(style::DEFAULT);
        Paragraph::new(Text::from(self.lines))
            .centered()
            .block(block)
            .render(area, buf);
    }
}
