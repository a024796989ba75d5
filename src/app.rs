use crate::export::{Export, export};
use crate::help::Help;
use crate::period::{InvalidPeriod, Period};
use crate::picker::{Picker, PickerInput, PickerState};
use crate::preview::Preview;
use crate::render::{Dashboard, render};
use crate::theme::{BASE_STYLE, FAILED_STYLE, HEADING_STYLE, HINT_STYLE, SAVED_STYLE};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, read};
use ratatui::{
    Terminal,
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{StatefulWidget, Widget},
};
use std::io::{self, Write};
use std::path::PathBuf;
use time::Month;

static HEADING: &str = "Monthly Habit Dashboard Generator";

static INSTRUCTIONS: &str = "Select the month & year to instantly generate a print-ready tracker.";

static HINT: &str = "Press ENTER to generate the dashboard, ? for help, q to quit.";

const FIRST_YEAR: i32 = 2024;

const LAST_YEAR: i32 = 2030;

/// Index into the year options of the year selected at startup
const DEFAULT_YEAR_INDEX: usize = 1;

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct App {
    year: PickerState<i32>,
    month: PickerState<Month>,
    focus: Field,
    outdir: PathBuf,
    state: AppState,
    dashboard: Option<Dashboard>,
    status: Option<Status>,
}

impl App {
    /// Generated dashboards will be saved in `outdir`
    pub(crate) fn new(outdir: PathBuf) -> App {
        App {
            year: PickerState::new((FIRST_YEAR..=LAST_YEAR).collect(), DEFAULT_YEAR_INDEX),
            month: PickerState::new(MONTHS.to_vec(), 0),
            focus: Field::Year,
            outdir,
            state: AppState::Form,
            dashboard: None,
            status: None,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Form => match key {
                KeyCode::Tab | KeyCode::Down => {
                    self.focus = self.focus.next();
                    true
                }
                KeyCode::BackTab | KeyCode::Up => {
                    self.focus = self.focus.previous();
                    true
                }
                KeyCode::Char('h') | KeyCode::Left => self.adjust(PickerInput::Previous),
                KeyCode::Char('l') | KeyCode::Right => self.adjust(PickerInput::Next),
                KeyCode::Char('g') | KeyCode::Enter => self.generate(),
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Form;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn adjust(&mut self, input: PickerInput) -> bool {
        match self.focus {
            Field::Year => self.year.handle_input(input),
            Field::Month => self.month.handle_input(input),
        }
    }

    fn selected_period(&self) -> Result<Period, InvalidPeriod> {
        Period::new(*self.year.selected(), u8::from(*self.month.selected()))
    }

    /// Renders the selected month and saves it to the output directory.  A
    /// failed save is reported in the status line; the preview is still
    /// shown.
    fn generate(&mut self) -> bool {
        let period = match self.selected_period() {
            Ok(period) => period,
            Err(e) => {
                self.status = Some(Status::Failed(e.to_string()));
                return false;
            }
        };
        let dashboard = render(period);
        self.status = Some(match export(&dashboard, &self.outdir) {
            Ok(exported) => Status::Saved(exported),
            Err(e) => Status::Failed(format!("{:#}", anyhow::Error::new(e))),
        });
        self.dashboard = Some(dashboard);
        true
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [heading, instructions, _, year, month, _, hint, status, _, preview] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .areas(area);
        Line::styled(HEADING, HEADING_STYLE).render(heading, buf);
        Line::styled(INSTRUCTIONS, BASE_STYLE).render(instructions, buf);
        Picker::<i32>::new("Year", self.focus == Field::Year).render(year, buf, &mut self.year);
        Picker::<Month>::new("Month", self.focus == Field::Month).render(
            month,
            buf,
            &mut self.month,
        );
        Line::styled(HINT, HINT_STYLE).render(hint, buf);
        if let Some(ref s) = self.status {
            s.to_line().render(status, buf);
        }
        if let Some(ref dashboard) = self.dashboard {
            Preview(dashboard).render(preview, buf);
        }
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Form,
    Helping,
    Quitting,
}

/// The selector that left/right keys act on
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Field {
    Year,
    Month,
}

impl Field {
    fn next(self) -> Field {
        match self {
            Field::Year => Field::Month,
            Field::Month => Field::Year,
        }
    }

    fn previous(self) -> Field {
        // There are only two fields
        self.next()
    }
}

/// Result of the most recent Generate
#[derive(Clone, Debug, Eq, PartialEq)]
enum Status {
    Saved(Export),
    Failed(String),
}

impl Status {
    fn to_line(&self) -> Line<'static> {
        match self {
            Status::Saved(exported) => Line::styled(
                format!(
                    "Saved {} ({} KiB)",
                    exported.path().display(),
                    exported.bytes().len().div_ceil(1024)
                ),
                SAVED_STYLE,
            ),
            Status::Failed(msg) => Line::styled(format!("Error: {msg}"), FAILED_STYLE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for &k in keys {
            assert!(app.handle_key(k), "{k:?} was rejected");
        }
    }

    #[test]
    fn test_defaults() {
        let app = App::new(PathBuf::from("."));
        assert_eq!(app.selected_period(), Period::new(2025, 1));
        assert_eq!(app.focus, Field::Year);
        assert_eq!(app.state, AppState::Form);
        assert_eq!(app.dashboard, None);
    }

    #[test]
    fn test_selection() {
        let mut app = App::new(PathBuf::from("."));
        press(&mut app, &[KeyCode::Right, KeyCode::Char('l')]);
        assert_eq!(app.selected_period(), Period::new(2027, 1));
        press(&mut app, &[KeyCode::Right, KeyCode::Right, KeyCode::Right]);
        assert!(!app.handle_key(KeyCode::Right));
        assert_eq!(app.selected_period(), Period::new(2030, 1));
        press(&mut app, &[KeyCode::Tab]);
        assert_eq!(app.focus, Field::Month);
        assert!(!app.handle_key(KeyCode::Left));
        press(&mut app, &[KeyCode::Right, KeyCode::Right, KeyCode::Char('h')]);
        assert_eq!(app.selected_period(), Period::new(2030, 2));
        press(&mut app, &[KeyCode::Up, KeyCode::Left]);
        assert_eq!(app.focus, Field::Year);
        assert_eq!(app.selected_period(), Period::new(2029, 2));
        assert!(!app.handle_key(KeyCode::Char('x')));
    }

    #[test]
    fn test_generate() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(dir.path().to_path_buf());
        press(
            &mut app,
            &[KeyCode::Right, KeyCode::Down, KeyCode::Right, KeyCode::Right],
        );
        press(&mut app, &[KeyCode::Enter]);
        let expected_path = dir.path().join("habit_tracker_3_2026.png");
        let Some(Status::Saved(ref exported)) = app.status else {
            panic!("unexpected status: {:?}", app.status);
        };
        assert_eq!(exported.path(), expected_path);
        assert!(expected_path.exists());
        assert_eq!(
            app.dashboard.as_ref().map(Dashboard::period),
            Period::new(2026, 3).ok()
        );
    }

    #[test]
    fn test_generate_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let mut app = App::new(missing.clone());
        press(&mut app, &[KeyCode::Char('g')]);
        let Some(Status::Failed(ref msg)) = app.status else {
            panic!("unexpected status: {:?}", app.status);
        };
        assert!(msg.starts_with("failed to write"), "{msg}");
        assert!(app.dashboard.is_some());
        assert!(!missing.exists());
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = App::new(PathBuf::from("."));
        press(&mut app, &[KeyCode::Char('?')]);
        assert_eq!(app.state, AppState::Helping);
        press(&mut app, &[KeyCode::Char('x')]);
        assert_eq!(app.state, AppState::Form);
        assert!(!app.quitting());
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(app.quitting());
        assert!(!app.handle_key(KeyCode::Enter));
    }

    #[test]
    fn test_render() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(dir.path().to_path_buf());
        press(&mut app, &[KeyCode::Enter]);
        let area = Rect::new(0, 0, 110, 34);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        assert_eq!(row_text(&buffer, 0).trim_end(), HEADING);
        assert_eq!(row_text(&buffer, 1).trim_end(), INSTRUCTIONS);
        assert_eq!(row_text(&buffer, 3).trim_end(), "Year    ◀   2025    ▶");
        assert_eq!(row_text(&buffer, 4).trim_end(), "Month   ◀  January  ▶");
        assert_eq!(row_text(&buffer, 6).trim_end(), HINT);
        let saved = dir.path().join("habit_tracker_1_2025.png");
        assert!(row_text(&buffer, 7).starts_with(&format!("Saved {} (", saved.display())));
        assert_eq!(
            row_text(&buffer, 9).trim_end(),
            "Getting 1% Better Each Day - January 2025 Dashboard"
        );
        assert!(row_text(&buffer, 11).starts_with("Protocols   1  2  3"));
    }

    #[test]
    fn test_render_help() {
        let mut app = App::new(PathBuf::from("."));
        press(&mut app, &[KeyCode::Char('?')]);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        assert!((0..24).any(|y| row_text(&buffer, y).contains(" Commands ")));
    }
}
