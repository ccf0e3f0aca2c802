use blockfall_engine::{Grid, PieceKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// Renders the board grid, two terminal cells per board cell.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    block: Option<Block<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid, block: None }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }
}

fn cell_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::Cyan,
        PieceKind::L => Color::LightRed,
        PieceKind::J => Color::Blue,
        PieceKind::T => Color::Magenta,
        PieceKind::Z => Color::Red,
        PieceKind::S => Color::Green,
        PieceKind::O => Color::Yellow,
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self
            .grid
            .rows()
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|cell| match cell {
                            Some(kind) => {
                                Span::styled("██", Style::default().fg(cell_color(*kind)))
                            }
                            None => Span::styled(" .", Style::default().fg(Color::DarkGray)),
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let mut paragraph = Paragraph::new(lines);
        if let Some(block) = &self.block {
            paragraph = paragraph.block(block.clone());
        }
        paragraph.render(area, buf);
    }
}
