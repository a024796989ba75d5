use crate::theme::{
    BASE_STYLE,
    picker::{DISABLED_ARROW_STYLE, FOCUSED_STYLE, LABEL_STYLE},
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};
use std::fmt::Display;
use std::marker::PhantomData;

/// Columns reserved for the picker's label, including the trailing gap
const LABEL_WIDTH: usize = 8;

/// Columns reserved for the selected value between the arrows; wide enough
/// for "September"
const VALUE_WIDTH: usize = 11;

/*
 * Renders a single line:
 *
 * Year    ◀    2025    ▶
 */
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Picker<T> {
    label: &'static str,
    focused: bool,
    _data: PhantomData<T>,
}

impl<T> Picker<T> {
    pub(crate) fn new(label: &'static str, focused: bool) -> Picker<T> {
        Picker {
            label,
            focused,
            _data: PhantomData,
        }
    }
}

impl<T: Display> StatefulWidget for Picker<T> {
    type State = PickerState<T>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let arrow_style = |enabled: bool| {
            if enabled {
                BASE_STYLE
            } else {
                DISABLED_ARROW_STYLE
            }
        };
        let value = format!("{:^VALUE_WIDTH$}", state.selected().to_string());
        let line = Line::from_iter([
            Span::styled(format!("{:<LABEL_WIDTH$}", self.label), LABEL_STYLE),
            Span::styled("◀", arrow_style(state.has_previous())),
            Span::styled(
                value,
                if self.focused {
                    FOCUSED_STYLE
                } else {
                    BASE_STYLE
                },
            ),
            Span::styled("▶", arrow_style(state.has_next())),
        ]);
        line.render(area, buf);
    }
}

/// A choice among a fixed, ordered, non-empty list of options
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PickerState<T> {
    options: Vec<T>,
    index: usize,
}

impl<T> PickerState<T> {
    /// Selects `options[index]`, or the last option if `index` is out of
    /// range.
    ///
    /// # Panics
    ///
    /// Panics if `options` is empty.
    pub(crate) fn new(options: Vec<T>, index: usize) -> PickerState<T> {
        assert!(!options.is_empty(), "picker requires at least one option");
        let index = index.min(options.len() - 1);
        PickerState { options, index }
    }

    pub(crate) fn selected(&self) -> &T {
        &self.options[self.index]
    }

    fn has_previous(&self) -> bool {
        self.index > 0
    }

    fn has_next(&self) -> bool {
        self.index + 1 < self.options.len()
    }

    // Returns `false` if the selection could not move
    pub(crate) fn handle_input(&mut self, input: PickerInput) -> bool {
        match input {
            PickerInput::Previous if self.has_previous() => {
                self.index -= 1;
                true
            }
            PickerInput::Next if self.has_next() => {
                self.index += 1;
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PickerInput {
    Previous,
    Next,
}
