use crate::period::Period;

/// Share of a table's width taken by the leftmost (label) column, in percent
pub(crate) const LABEL_COLUMN_PERCENT: u8 = 18;

/// [`LABEL_COLUMN_PERCENT`] as a fraction
pub(crate) const LABEL_COLUMN_WIDTH: f64 = LABEL_COLUMN_PERCENT as f64 / 100.0;

pub(crate) const HABIT_ROWS: usize = 12;

pub(crate) const SLEEP_BANDS: [&str; 5] = ["8hrs", "7hrs", "6hrs", "5hrs", "4hrs"];

/// A blank tracker table: one label column followed by one column per day of
/// a [`Period`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Grid {
    day_count: u8,
    headers: Vec<String>,
    widths: Vec<f64>,
    // Body rows only; the headers form row 0 for styling purposes
    rows: Vec<Vec<String>>,
    bold_labels: bool,
}

impl Grid {
    /// The habit table: twelve unlabelled rows, all cells empty
    pub(crate) fn habit(period: Period) -> Grid {
        let columns = usize::from(period.day_count()) + 1;
        Grid {
            day_count: period.day_count(),
            headers: headers("Protocols", period),
            widths: column_widths(period.day_count()),
            rows: vec![vec![String::new(); columns]; HABIT_ROWS],
            bold_labels: false,
        }
    }

    /// The sleep table: a row of weekday initials followed by one row per
    /// hour band
    pub(crate) fn sleep(period: Period) -> Grid {
        let mut rows = Vec::with_capacity(SLEEP_BANDS.len() + 1);
        rows.push(
            std::iter::once(String::from("Day"))
                .chain(period.weekday_initials().map(String::from))
                .collect(),
        );
        for band in SLEEP_BANDS {
            let mut row = vec![String::new(); usize::from(period.day_count()) + 1];
            row[0] = String::from(band);
            rows.push(row);
        }
        Grid {
            day_count: period.day_count(),
            headers: headers("Sleep", period),
            widths: column_widths(period.day_count()),
            rows,
            bold_labels: true,
        }
    }

    pub(crate) fn day_count(&self) -> u8 {
        self.day_count
    }

    pub(crate) fn headers(&self) -> &[String] {
        &self.headers
    }

    pub(crate) fn widths(&self) -> &[f64] {
        &self.widths
    }

    pub(crate) fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub(crate) fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of rows including the header row
    pub(crate) fn row_count(&self) -> usize {
        self.rows.len() + 1
    }

    /// Text of the cell at (`row`, `column`), where row 0 is the header row
    pub(crate) fn cell(&self, row: usize, column: usize) -> Option<&str> {
        if row == 0 {
            self.headers.get(column).map(String::as_str)
        } else {
            self.rows
                .get(row - 1)
                .and_then(|r| r.get(column))
                .map(String::as_str)
        }
    }

    pub(crate) fn cell_style(&self, row: usize, column: usize) -> CellStyle {
        if row == 0 {
            CellStyle {
                bold: true,
                fill: Fill::Shaded,
            }
        } else {
            CellStyle {
                bold: self.bold_labels && column == 0,
                fill: Fill::Plain,
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct CellStyle {
    pub(crate) bold: bool,
    pub(crate) fill: Fill,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Fill {
    Plain,
    Shaded,
}

fn headers(label: &str, period: Period) -> Vec<String> {
    std::iter::once(String::from(label))
        .chain(period.day_labels())
        .collect()
}

/// The label column gets a fixed share of the width; the day columns split
/// the rest evenly.
pub(crate) fn column_widths(day_count: u8) -> Vec<f64> {
    let day_width = (1.0 - LABEL_COLUMN_WIDTH) / f64::from(day_count);
    std::iter::once(LABEL_COLUMN_WIDTH)
        .chain(std::iter::repeat(day_width).take(usize::from(day_count)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sums_to_one(widths: &[f64]) {
        let total = widths.iter().sum::<f64>();
        assert!((total - 1.0).abs() < 1e-9, "widths sum to {total}");
    }

    #[test]
    fn test_column_counts_and_widths() {
        for year in 2024..=2030 {
            for month in 1..=12 {
                let period = Period::new(year, month).unwrap();
                let expected = usize::from(period.day_count()) + 1;
                for grid in [Grid::habit(period), Grid::sleep(period)] {
                    assert_eq!(grid.headers().len(), expected);
                    assert_eq!(grid.widths().len(), expected);
                    assert!(grid.rows().iter().all(|r| r.len() == expected));
                    assert_sums_to_one(grid.widths());
                }
            }
        }
    }

    #[test]
    fn test_habit_december_2024() {
        let period = Period::new(2024, 12).unwrap();
        let grid = Grid::habit(period);
        let mut expected = vec![String::from("Protocols")];
        expected.extend((1..=31).map(|d| d.to_string()));
        assert_eq!(grid.headers(), expected);
        assert_eq!(grid.row_count(), HABIT_ROWS + 1);
        assert_eq!(grid.day_count(), 31);
        assert!(grid.rows().iter().flatten().all(String::is_empty));
    }

    #[test]
    fn test_sleep_rows() {
        let period = Period::new(2025, 1).unwrap();
        let grid = Grid::sleep(period);
        assert_eq!(grid.cell(0, 0), Some("Sleep"));
        assert_eq!(grid.cell(0, 31), Some("31"));
        assert_eq!(grid.cell(1, 0), Some("Day"));
        assert_eq!(grid.cell(1, 1), Some("W"));
        assert_eq!(grid.cell(1, 2), Some("Th"));
        let labels = grid
            .rows()
            .iter()
            .skip(1)
            .map(|r| r[0].as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, SLEEP_BANDS);
        assert!(grid
            .rows()
            .iter()
            .skip(1)
            .flat_map(|r| &r[1..])
            .all(String::is_empty));
        assert_eq!(grid.cell(7, 0), None);
        assert_eq!(grid.cell(1, 32), None);
    }

    #[test]
    fn test_widths_align() {
        let period = Period::new(2024, 2).unwrap();
        assert_eq!(Grid::habit(period).widths(), Grid::sleep(period).widths());
        let widths = column_widths(29);
        assert!((widths[0] - LABEL_COLUMN_WIDTH).abs() < 1e-12);
        assert!((LABEL_COLUMN_WIDTH - 0.18).abs() < 1e-12);
        assert!((widths[1] * 29.0 - 0.82).abs() < 1e-12);
    }

    #[test]
    fn test_styles() {
        let period = Period::new(2025, 6).unwrap();
        let shaded_bold = CellStyle {
            bold: true,
            fill: Fill::Shaded,
        };
        let plain = CellStyle {
            bold: false,
            fill: Fill::Plain,
        };
        let habit = Grid::habit(period);
        assert_eq!(habit.cell_style(0, 0), shaded_bold);
        assert_eq!(habit.cell_style(0, 5), shaded_bold);
        assert_eq!(habit.cell_style(3, 0), plain);
        assert_eq!(habit.cell_style(3, 5), plain);
        let sleep = Grid::sleep(period);
        assert_eq!(sleep.cell_style(0, 0), shaded_bold);
        assert_eq!(
            sleep.cell_style(4, 0),
            CellStyle {
                bold: true,
                fill: Fill::Plain
            }
        );
        assert_eq!(sleep.cell_style(4, 5), plain);
    }

    #[test]
    fn test_idempotent() {
        let period = Period::new(2026, 3).unwrap();
        assert_eq!(Grid::habit(period), Grid::habit(period));
        assert_eq!(Grid::sleep(period), Grid::sleep(period));
    }
}
