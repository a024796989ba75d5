use crate::grid::{CellStyle, Fill, Grid};
use crate::render::Dashboard;
use crate::theme::{
    BASE_STYLE,
    preview::{EMPTY_CELL_STYLE, HEADER_CELL_STYLE, LABEL_CELL_STYLE, TITLE_STYLE},
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};

/// Number of columns given to a table's label column
const LABEL_WIDTH: usize = 10;

/// Number of columns given to each day of the month
const DAY_WIDTH: usize = 3;

/// Marks a cell left blank for filling in by hand
const BLANK_CELL: &str = "·";

/// A text-mode rendition of a generated dashboard: the title followed by both
/// tables, one terminal line per table row.  Text extending past the right or
/// bottom edge of the area is cut off.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Preview<'a>(pub(crate) &'a Dashboard);

impl Widget for Preview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![
            Line::styled(self.0.title().to_owned(), TITLE_STYLE),
            Line::default(),
        ];
        lines.extend(grid_lines(self.0.habit()));
        lines.push(Line::default());
        lines.extend(grid_lines(self.0.sleep()));
        Paragraph::new(Text::from(lines))
            .style(BASE_STYLE)
            .render(area, buf);
    }
}

fn grid_lines(grid: &Grid) -> Vec<Line<'static>> {
    (0..grid.row_count())
        .map(|row| {
            Line::from_iter((0..grid.column_count()).map(|column| {
                let text = grid.cell(row, column).unwrap_or_default();
                let style = cell_style(grid.cell_style(row, column), text.is_empty());
                let content = if column == 0 {
                    format!("{text:<LABEL_WIDTH$}")
                } else if text.is_empty() {
                    format!("{BLANK_CELL:>DAY_WIDTH$}")
                } else {
                    format!("{text:>DAY_WIDTH$}")
                };
                Span::styled(content, style)
            }))
        })
        .collect()
}

fn cell_style(style: CellStyle, empty: bool) -> Style {
    match style {
        CellStyle { fill: Fill::Shaded, .. } => HEADER_CELL_STYLE,
        CellStyle { bold: true, .. } => LABEL_CELL_STYLE,
        _ if empty => EMPTY_CELL_STYLE,
        _ => BASE_STYLE,
    }
}
