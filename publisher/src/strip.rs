//! Date-pill strip: a fortnight of dates centered on today.

use chrono::{Datelike, Duration, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Days shown on either side of today.
pub const STRIP_REACH: i64 = 7;

/// The 15 dates of the strip, oldest first.
pub fn strip_dates(today: NaiveDate) -> Vec<NaiveDate> {
    (-STRIP_REACH..=STRIP_REACH)
        .map(|offset| today + Duration::days(offset))
        .collect()
}

/// Clamp a date to the strip window around today.
pub fn clamp_to_strip(date: NaiveDate, today: NaiveDate) -> NaiveDate {
    let min = today - Duration::days(STRIP_REACH);
    let max = today + Duration::days(STRIP_REACH);
    date.clamp(min, max)
}

/// One row of date pills; today underlined, the selected date highlighted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateStrip {
    pub today: NaiveDate,
    pub selected: NaiveDate,
}

impl Widget for DateStrip {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for date in strip_dates(self.today) {
            let mut style = Style::new();
            if date == self.today {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            if date == self.selected {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            spans.push(Span::styled(
                format!(" {} {:02} ", date.format("%a"), date.day()),
                style,
            ));
            spans.push(Span::raw(" "));
        }
        Line::from_iter(spans).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_spans_fifteen_days() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let dates = strip_dates(today);
        assert_eq!(dates.len(), 15);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2025, 6, 3).unwrap());
        assert_eq!(dates[7], today);
        assert_eq!(dates[14], NaiveDate::from_ymd_opt(2025, 6, 17).unwrap());
    }

    #[test]
    fn test_strip_crosses_month_boundary() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 2).unwrap();
        let dates = strip_dates(today);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2025, 6, 25).unwrap());
        assert_eq!(dates[14], NaiveDate::from_ymd_opt(2025, 7, 9).unwrap());
    }

    #[test]
    fn test_clamp_to_strip() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let far = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        assert_eq!(
            clamp_to_strip(far, today),
            NaiveDate::from_ymd_opt(2025, 6, 17).unwrap()
        );
        assert_eq!(clamp_to_strip(today, today), today);
    }
}
