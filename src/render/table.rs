use super::canvas::Scaled;
use crate::grid::{Fill, Grid, LABEL_COLUMN_PERCENT};
use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_7X13, FONT_7X13_BOLD},
    },
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

/// Height in pixels of a table's header row
pub(crate) const HEADER_HEIGHT: i32 = 110;

/// Height in pixels of every other row
pub(crate) const ROW_HEIGHT: i32 = 88;

/// Magnification applied to the cell fonts
const CELL_TEXT_SCALE: u16 = 3;

const BORDER_WIDTH: u32 = 3;

pub(crate) const HEADER_FILL: Rgb888 = Rgb888::new(0xF0, 0xF0, 0xF0);

/// Horizontal extent of a table on the page
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Span {
    pub(crate) left: i32,
    pub(crate) right: i32,
}

/// Draws `grid` with its top edge at `top`.  The drawn table is
/// [`grid_height`] pixels tall.
pub(crate) fn draw_grid<D>(
    grid: &Grid,
    span: Span,
    top: i32,
    target: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let edges = column_edges(grid.day_count(), span);
    debug_assert_eq!(edges.len(), grid.widths().len() + 1);
    let mut y = top;
    for row in 0..grid.row_count() {
        let height = if row == 0 { HEADER_HEIGHT } else { ROW_HEIGHT };
        for (column, (&x0, &x1)) in edges.iter().zip(edges.iter().skip(1)).enumerate() {
            let cell = Rectangle::with_corners(Point::new(x0, y), Point::new(x1, y + height));
            let style = grid.cell_style(row, column);
            cell.into_styled(cell_style(style.fill)).draw(target)?;
            if let Some(text) = grid.cell(row, column).filter(|s| !s.is_empty()) {
                let font = if style.bold {
                    &FONT_7X13_BOLD
                } else {
                    &FONT_7X13
                };
                draw_centered_text(text, cell.center(), font, CELL_TEXT_SCALE, target)?;
            }
        }
        y += height;
    }
    Ok(())
}

/// Total height in pixels of `grid` when drawn
pub(crate) fn grid_height(grid: &Grid) -> i32 {
    let body_rows = i32::try_from(grid.row_count().saturating_sub(1)).unwrap_or(i32::MAX);
    HEADER_HEIGHT.saturating_add(ROW_HEIGHT.saturating_mul(body_rows))
}

/// Draws `text` in black, magnified by `scale`, centred horizontally and
/// vertically on `center`
pub(crate) fn draw_centered_text<D>(
    text: &str,
    center: Point,
    font: &'static MonoFont<'static>,
    scale: u16,
    target: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let character_style = MonoTextStyle::new(font, Rgb888::BLACK);
    let text_style = TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build();
    let mut scaled = Scaled::new(target, center, scale);
    Text::with_text_style(text, Point::zero(), character_style, text_style).draw(&mut scaled)?;
    Ok(())
}

fn cell_style(fill: Fill) -> PrimitiveStyle<Rgb888> {
    let fill_color = match fill {
        Fill::Plain => Rgb888::WHITE,
        Fill::Shaded => HEADER_FILL,
    };
    PrimitiveStyleBuilder::new()
        .fill_color(fill_color)
        .stroke_color(Rgb888::BLACK)
        .stroke_width(BORDER_WIDTH)
        .build()
}

/// Returns the x coordinates of the column boundaries of a table with
/// `day_count` day columns.  The label column takes [`LABEL_COLUMN_PERCENT`]
/// of the span and the day columns split the rest, differing by at most a
/// pixel.  Neighbouring cells share a boundary, so the result has two more
/// elements than `day_count`.
pub(crate) fn column_edges(day_count: u8, span: Span) -> Vec<i32> {
    let label_right =
        span.left + (span.right - span.left) * i32::from(LABEL_COLUMN_PERCENT) / 100;
    let rest = span.right - label_right;
    let days = i32::from(day_count.max(1));
    std::iter::once(span.left)
        .chain((0..=days).map(|i| label_right + rest * i / days))
        .collect()
}
