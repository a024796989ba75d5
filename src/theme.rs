use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const HEADING_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const HINT_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const SAVED_STYLE: Style = BASE_STYLE.fg(Color::LightGreen);

pub(crate) const FAILED_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .bg(Color::Black)
    .add_modifier(Modifier::BOLD);

pub(crate) mod picker {
    use super::*;

    pub(crate) const LABEL_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const FOCUSED_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

    pub(crate) const DISABLED_ARROW_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
}

pub(crate) mod preview {
    use super::*;

    pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const HEADER_CELL_STYLE: Style = Style::new()
        .fg(Color::White)
        .bg(Color::DarkGray)
        .add_modifier(Modifier::BOLD);

    pub(crate) const LABEL_CELL_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

    pub(crate) const EMPTY_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
}
