mod canvas;
mod table;
use self::canvas::Canvas;
use self::table::{Span, draw_centered_text, draw_grid, grid_height};
use crate::grid::Grid;
use crate::period::Period;
use embedded_graphics::{mono_font::ascii::FONT_9X18_BOLD, pixelcolor::Rgb888, prelude::*};
use image::RgbImage;

/// Print resolution of the page
pub(crate) const DPI: u32 = 300;

/// An A4 landscape page (11.69 × 8.27 inches) at [`DPI`]
pub(crate) const PAGE_SIZE: Size = Size::new(3507, 2481);

/// Blank columns on either side of the tables
const SIDE_MARGIN: i32 = 70;

const PAGE_CENTER_X: i32 = 1753;

const TITLE_CENTER_Y: i32 = 150;

const TITLE_SCALE: u16 = 4;

/// Top edge of the habit table
const HABIT_TOP: i32 = 260;

/// Vertical space between the bottom of the habit table and the top of the
/// sleep table
const GRID_GAP: i32 = 170;

const TABLE_SPAN: Span = Span {
    left: SIDE_MARGIN,
    right: 3507 - SIDE_MARGIN,
};

/// A rendered tracker page together with the tables it was drawn from
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Dashboard {
    period: Period,
    title: String,
    habit: Grid,
    sleep: Grid,
    image: RgbImage,
}

impl Dashboard {
    pub(crate) fn period(&self) -> Period {
        self.period
    }

    pub(crate) fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn habit(&self) -> &Grid {
        &self.habit
    }

    pub(crate) fn sleep(&self) -> &Grid {
        &self.sleep
    }

    pub(crate) fn image(&self) -> &RgbImage {
        &self.image
    }
}

pub(crate) fn title(period: Period) -> String {
    format!(
        "Getting 1% Better Each Day - {} {} Dashboard",
        period.month_name(),
        period.year()
    )
}

/// Lays out the title, the habit table, and the sleep table for `period` on a
/// blank page.  The result depends on nothing but `period`.
pub(crate) fn render(period: Period) -> Dashboard {
    tracing::info!(%period, "rendering dashboard");
    let title = title(period);
    let habit = Grid::habit(period);
    let sleep = Grid::sleep(period);
    let mut canvas = Canvas::new(PAGE_SIZE, Rgb888::WHITE);
    let Ok(()) = draw_page(&title, &habit, &sleep, &mut canvas);
    let image = canvas.into_image();
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        "dashboard rendered"
    );
    Dashboard {
        period,
        title,
        habit,
        sleep,
        image,
    }
}

fn draw_page<D>(title: &str, habit: &Grid, sleep: &Grid, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    draw_centered_text(
        title,
        Point::new(PAGE_CENTER_X, TITLE_CENTER_Y),
        &FONT_9X18_BOLD,
        TITLE_SCALE,
        target,
    )?;
    draw_grid(habit, TABLE_SPAN, HABIT_TOP, target)?;
    draw_grid(sleep, TABLE_SPAN, sleep_top(habit), target)?;
    Ok(())
}

fn sleep_top(habit: &Grid) -> i32 {
    HABIT_TOP + grid_height(habit) + GRID_GAP
}
