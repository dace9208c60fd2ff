//! Controller for the publisher UI.
//!
//! All UI state lives in [`App`]; rendering is a pure function of that state
//! and input handlers mutate it before the next draw.

use crate::api::ApiClient;
use crate::picker::{Picker, PickerInput, PickerOutput, PickerState};
use crate::strip::{clamp_to_strip, DateStrip};
use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph, StatefulWidget, Widget},
    DefaultTerminal,
};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mode {
    Editing,
    Picking(PickerState),
    Quitting,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum StatusKind {
    Success,
    Error,
}

#[derive(Clone, Debug)]
struct Status {
    text: String,
    kind: StatusKind,
    since: Instant,
}

pub struct App {
    api: ApiClient,
    today: NaiveDate,
    selected: NaiveDate,
    editor: String,
    status: Option<Status>,
    publishing: bool,
    mode: Mode,
}

impl App {
    pub fn new(api: ApiClient, today: NaiveDate) -> App {
        App {
            api,
            today,
            selected: today,
            editor: String::new(),
            status: None,
            publishing: false,
            mode: Mode::Editing,
        }
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> anyhow::Result<()> {
        while self.mode != Mode::Quitting {
            self.tick_status();
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            if self.publishing {
                // Drawn once with the publishing indicator before the
                // blocking request; no further input until it finishes.
                self.publish();
                continue;
            }
            self.handle_input()?;
        }
        Ok(())
    }

    /// Switch the selection and load that date's assignment into the editor.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected = date;
        match self.api.get_assignment(&self.date_key()) {
            Ok(Some(record)) => self.editor = record.content,
            Ok(None) => self.editor.clear(),
            Err(e) => {
                self.editor.clear();
                self.set_status(StatusKind::Error, format!("Failed to load assignment: {e}"));
            }
        }
    }

    fn date_key(&self) -> String {
        self.selected.format("%Y-%m-%d").to_string()
    }

    fn handle_input(&mut self) -> anyhow::Result<()> {
        if !event::poll(POLL_INTERVAL)? {
            return Ok(());
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key);
            }
        }
        // Redraw on resize and anything else
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.mode = Mode::Quitting;
            return;
        }
        match self.mode {
            Mode::Editing => match key.code {
                KeyCode::Esc => self.mode = Mode::Quitting,
                KeyCode::Enter => self.request_publish(),
                KeyCode::Left => self.step_date(-1),
                KeyCode::Right => self.step_date(1),
                KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.mode = Mode::Picking(PickerState::new(self.today));
                }
                KeyCode::Backspace => {
                    self.editor.pop();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.editor.push(c);
                }
                _ => {}
            },
            Mode::Picking(mut picker) => {
                if key.code == KeyCode::Esc {
                    self.mode = Mode::Editing;
                    return;
                }
                let output = match key.code {
                    KeyCode::Char(c @ '0'..='9') => {
                        picker.handle_input(PickerInput::Digit(c as u8 - b'0'))
                    }
                    KeyCode::Backspace | KeyCode::Delete => {
                        picker.handle_input(PickerInput::Backspace)
                    }
                    KeyCode::Enter => picker.handle_input(PickerInput::Enter),
                    _ => PickerOutput::Invalid,
                };
                if let PickerOutput::Pick(date) = output {
                    self.mode = Mode::Editing;
                    self.select_date(date);
                } else {
                    self.mode = Mode::Picking(picker);
                }
            }
            Mode::Quitting => {}
        }
    }

    fn step_date(&mut self, days: i64) {
        let next = clamp_to_strip(self.selected + chrono::Duration::days(days), self.today);
        if next != self.selected {
            self.select_date(next);
        }
    }

    fn request_publish(&mut self) {
        if self.publishing {
            return;
        }
        if self.editor.trim().is_empty() {
            self.set_status(StatusKind::Error, "Nothing to publish");
            return;
        }
        self.publishing = true;
    }

    fn publish(&mut self) {
        let date = self.date_key();
        let content = self.editor.trim().to_string();
        match self.api.put_assignment(&date, &content) {
            Ok((record, message)) => {
                self.editor = record.content;
                self.set_status(StatusKind::Success, message);
            }
            // Keep the unsaved editor buffer on failure
            Err(e) => self.set_status(StatusKind::Error, format!("Publish failed: {e}")),
        }
        self.publishing = false;
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            kind,
            since: Instant::now(),
        });
    }

    fn tick_status(&mut self) {
        if let Some(status) = &self.status {
            if status.since.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [title_area, strip_area, _, editor_area, status_area, _, help_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .areas(area);

        let heading = if self.selected == self.today {
            "Today's assignment"
        } else {
            "Assignment"
        };
        Line::from(format!("{} ({})", heading, self.selected.format("%A %Y-%m-%d")))
            .bold()
            .render(title_area, buf);

        DateStrip {
            today: self.today,
            selected: self.selected,
        }
        .render(strip_area, buf);

        let editor_title = if self.publishing {
            " Publishing... "
        } else {
            " Content "
        };
        Paragraph::new(self.editor.as_str())
            .block(Block::bordered().title(editor_title))
            .render(editor_area, buf);

        if let Some(status) = &self.status {
            let style = match status.kind {
                StatusKind::Success => Style::new().fg(Color::Green),
                StatusKind::Error => Style::new().fg(Color::Red),
            };
            Line::styled(status.text.as_str(), style).render(status_area, buf);
        }

        Line::styled(
            "Left/Right date | Ctrl-G pick date | Enter publish | Esc quit",
            Style::new().add_modifier(Modifier::DIM),
        )
        .render(help_area, buf);

        if let Mode::Picking(state) = self.mode {
            let mut state = state;
            Picker.render(area, buf, &mut state);
        }
    }
}
