//! Jump-to-date overlay for picking a date outside the pill strip.

use chrono::{Months, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 18;
const OUTER_HEIGHT: u16 = 7;
const ENTER_POS: usize = 8;

const UNFILLED_STYLE: Style = Style::new().add_modifier(Modifier::DIM);
const READY_ENTER_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Digit-by-digit `YYYY-MM-DD` entry, bounded to `[today, today + 3 months]`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PickerState {
    min: NaiveDate,
    max: NaiveDate,
    year: [Option<u8>; 4],
    month: [Option<u8>; 2],
    day: [Option<u8>; 2],
    pos: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PickerInput {
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PickerOutput {
    Ok,
    Invalid,
    Pick(NaiveDate),
}

impl PickerState {
    pub fn new(today: NaiveDate) -> PickerState {
        PickerState {
            min: today,
            max: today
                .checked_add_months(Months::new(3))
                .unwrap_or(NaiveDate::MAX),
            year: [None; 4],
            month: [None; 2],
            day: [None; 2],
            pos: 0,
        }
    }

    pub fn handle_input(&mut self, input: PickerInput) -> PickerOutput {
        match (input, self.pos) {
            (PickerInput::Digit(d), 0..ENTER_POS) => {
                match self.pos {
                    0..4 => self.year[self.pos] = Some(d),
                    4..6 => self.month[self.pos - 4] = Some(d),
                    6..8 => self.day[self.pos - 6] = Some(d),
                    _ => unreachable!(),
                }
                self.pos += 1;
                PickerOutput::Ok
            }
            (PickerInput::Backspace, 1..) => {
                self.pos -= 1;
                match self.pos {
                    0..4 => self.year[self.pos] = None,
                    4..6 => self.month[self.pos - 4] = None,
                    6..8 => self.day[self.pos - 6] = None,
                    _ => unreachable!(),
                }
                PickerOutput::Ok
            }
            (PickerInput::Enter, ENTER_POS) => match self.date() {
                Some(date) if date >= self.min && date <= self.max => PickerOutput::Pick(date),
                _ => PickerOutput::Invalid,
            },
            _ => PickerOutput::Invalid,
        }
    }

    // All digit cells are filled once pos == ENTER_POS.
    fn date(&self) -> Option<NaiveDate> {
        let year = self
            .year
            .iter()
            .flatten()
            .fold(0i32, |acc, d| acc * 10 + i32::from(*d));
        let month = self
            .month
            .iter()
            .flatten()
            .fold(0u32, |acc, d| acc * 10 + u32::from(*d));
        let day = self
            .day
            .iter()
            .flatten()
            .fold(0u32, |acc, d| acc * 10 + u32::from(*d));
        NaiveDate::from_ymd_opt(year, month, day)
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            self.to_line(),
            Line::raw(""),
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == ENTER_POS {
                    READY_ENTER_STYLE
                } else {
                    Style::new()
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let mut spans = Vec::new();
        let mut first = true;
        for (fallback, digits) in [
            ("Y", self.year.as_slice()),
            ("M", self.month.as_slice()),
            ("D", self.day.as_slice()),
        ] {
            if !std::mem::replace(&mut first, false) {
                spans.push(Span::raw("-"));
            }
            for dg in digits {
                spans.push(match dg {
                    Some(d) => Span::raw(format!("{d}")),
                    None => Span::styled(fallback, UNFILLED_STYLE),
                });
            }
        }
        Line::from_iter(spans)
    }
}

/// Centered overlay rendering a [`PickerState`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Picker;

impl StatefulWidget for Picker {
    type State = PickerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::bordered()
            .title(" Pick a date ")
            .title_alignment(Alignment::Center)
            .render(outer_area, buf);
        let text_area = outer_area.inner(Margin::new(2, 1));
        state.to_text().render(text_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_date(state: &mut PickerState, digits: &[u8]) -> PickerOutput {
        for &d in digits {
            assert_eq!(state.handle_input(PickerInput::Digit(d)), PickerOutput::Ok);
        }
        state.handle_input(PickerInput::Enter)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_pick_date_in_range() {
        let mut state = PickerState::new(today());
        let output = type_date(&mut state, &[2, 0, 2, 5, 0, 7, 1, 5]);
        assert_eq!(
            output,
            PickerOutput::Pick(NaiveDate::from_ymd_opt(2025, 7, 15).unwrap())
        );
    }

    #[test]
    fn test_rejects_date_in_the_past() {
        let mut state = PickerState::new(today());
        assert_eq!(
            type_date(&mut state, &[2, 0, 2, 5, 0, 5, 3, 1]),
            PickerOutput::Invalid
        );
    }

    #[test]
    fn test_rejects_date_beyond_three_months() {
        let mut state = PickerState::new(today());
        assert_eq!(
            type_date(&mut state, &[2, 0, 2, 5, 1, 0, 0, 2]),
            PickerOutput::Invalid
        );
    }

    #[test]
    fn test_rejects_impossible_date() {
        let mut state = PickerState::new(today());
        assert_eq!(
            type_date(&mut state, &[2, 0, 2, 5, 0, 6, 3, 1]),
            PickerOutput::Invalid
        );
    }

    #[test]
    fn test_enter_requires_all_digits() {
        let mut state = PickerState::new(today());
        state.handle_input(PickerInput::Digit(2));
        assert_eq!(state.handle_input(PickerInput::Enter), PickerOutput::Invalid);
    }

    #[test]
    fn test_backspace_reopens_cell() {
        let mut state = PickerState::new(today());
        let _ = type_date(&mut state, &[2, 0, 2, 5, 0, 6, 3, 1]); // invalid day 31
        assert_eq!(
            state.handle_input(PickerInput::Backspace),
            PickerOutput::Ok
        );
        assert_eq!(state.handle_input(PickerInput::Digit(0)), PickerOutput::Ok);
        assert_eq!(
            state.handle_input(PickerInput::Enter),
            PickerOutput::Pick(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
        );
    }
}
