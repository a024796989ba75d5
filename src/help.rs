use ratatui::{
    buffer::Buffer,
    layout::{Flex, HorizontalAlignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Key bindings and their descriptions, in display order
static BINDINGS: &[(&str, &str)] = &[
    ("TAB, DOWN", "Move to the next selector"),
    ("S-TAB, UP", "Move to the previous selector"),
    ("h, LEFT", "Choose the previous value"),
    ("l, RIGHT", "Choose the next value"),
    ("g, ENTER", "Generate and save the dashboard"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

const KEY_COLUMN_WIDTH: usize = 16;

static FOOTER: &str = "Press the Any Key to dismiss.";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn text() -> Text<'static> {
        let mut lines = BINDINGS
            .iter()
            .map(|&(keys, desc)| Line::raw(format!("{keys:<KEY_COLUMN_WIDTH$}{desc}")))
            .collect::<Vec<_>>();
        lines.push(Line::raw(""));
        lines.push(Line::raw(FOOTER));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        // Clear one extra column on each side so that the box doesn't abut
        // whatever is underneath
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        }
        .intersection(area);
        Clear.render(outer_area, buf);
        Block::new().style(self.0).render(outer_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(HorizontalAlignment::Center),
            )
            .style(self.0)
            .render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::BASE_STYLE;

    fn rows(buffer: &Buffer) -> Vec<String> {
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_render() {
        let area = Rect::new(0, 0, 60, 14);
        let mut buffer = Buffer::empty(area);
        Help(BASE_STYLE).render(area, &mut buffer);
        let rows = rows(&buffer);
        assert!(rows.iter().any(|r| r.contains('┌') && r.contains(" Commands ")));
        for (keys, desc) in BINDINGS {
            let entry = format!("│{keys:<KEY_COLUMN_WIDTH$}{desc}");
            assert!(
                rows.iter().any(|r| r.contains(&entry)),
                "missing {entry:?}"
            );
        }
        assert!(rows.iter().any(|r| r.contains(FOOTER)));
        assert!(rows.iter().any(|r| r.contains('└')));
    }

    #[test]
    fn test_render_cramped() {
        let area = Rect::new(0, 0, 12, 4);
        let mut buffer = Buffer::empty(area);
        Help(BASE_STYLE).render(area, &mut buffer);
        assert!(rows(&buffer).iter().any(|r| r.contains('┌')));
    }
}
