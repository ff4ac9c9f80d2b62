use crate::help::Help;
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use datepick::{DatePicker, Options, PickerInput, PickerOutput, PickerState};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::Stylize,
    text::Line,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::Date;

/// Left margin of the picker and status lines
const MARGIN: u16 = 2;

const PICKER_WIDTH: u16 = 40;

#[derive(Debug)]
pub(crate) struct App {
    options: Options,
    picker: PickerState,
    state: AppState,
}

impl App {
    pub(crate) fn new(options: Options, today: Date) -> App {
        let picker = PickerState::new(today, &options);
        App {
            options,
            picker,
            state: AppState::Picking,
        }
    }

    /// Runs until the user quits and returns the date selected at that point
    pub(crate) fn run<B: Backend>(
        mut self,
        terminal: &mut Terminal<B>,
    ) -> io::Result<Option<Date>> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(self.picker.selected())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    self.state = AppState::Quitting;
                } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                    self.beep()?;
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(_),
                column,
                row,
                ..
            }) => {
                if self.state == AppState::Helping {
                    self.state = AppState::Picking;
                } else {
                    let pos = Position::new(column, row);
                    self.send(PickerInput::PointerDown(pos));
                }
            }
            // Redraw on resize, and we might as well redraw on other stuff
            // too
            _ => (),
        }
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Picking if self.picker.is_open() => {
                let input = match key {
                    KeyCode::Char('h') | KeyCode::Left => PickerInput::Left,
                    KeyCode::Char('l') | KeyCode::Right => PickerInput::Right,
                    KeyCode::Char('k') | KeyCode::Up => PickerInput::Up,
                    KeyCode::Char('j') | KeyCode::Down => PickerInput::Down,
                    KeyCode::Char('<') | KeyCode::PageUp => PickerInput::PrevMonth,
                    KeyCode::Char('>') | KeyCode::PageDown => PickerInput::NextMonth,
                    KeyCode::Char(' ') | KeyCode::Enter => PickerInput::Confirm,
                    KeyCode::Char('t') => PickerInput::Today,
                    KeyCode::Backspace | KeyCode::Delete => PickerInput::Clear,
                    KeyCode::Char('q') | KeyCode::Esc => PickerInput::Close,
                    KeyCode::Char('?') => {
                        self.state = AppState::Helping;
                        return true;
                    }
                    _ => return false,
                };
                self.send(input)
            }
            AppState::Picking => match key {
                KeyCode::Tab | KeyCode::Char(' ') | KeyCode::Enter => {
                    self.send(PickerInput::Focus)
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Quitting => false,
        }
    }

    // Returns `false` if the picker rejected the input
    fn send(&mut self, input: PickerInput) -> bool {
        match self.picker.handle_input(input, &self.options) {
            PickerOutput::Ok => true,
            PickerOutput::Invalid => false,
            PickerOutput::Changed(date) => {
                log::info!("{}: selected {date}", self.options.input_id());
                true
            }
            PickerOutput::Cleared => {
                log::info!("{}: cleared selection", self.options.input_id());
                true
            }
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn status_line(&self) -> Line<'static> {
        match self.picker.selected() {
            Some(date) => Line::from(format!(
                "{} = {}",
                self.options.input_name,
                self.options.format_date(date)
            )),
            None => Line::from(format!("{} is not set", self.options.input_name)),
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, self.options.theme.background);
        let [title_area, _, picker_area, status_area, _, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);
        let indent = |r: Rect| Rect {
            x: r.x.saturating_add(MARGIN),
            width: r.width.saturating_sub(MARGIN),
            ..r
        };
        Line::from("Pick a date").bold().render(indent(title_area), buf);
        Line::from("Press ? for help, q to quit").render(indent(hint_area), buf);
        // The status line goes first so that the popup can cover it
        self.status_line().render(indent(status_area), buf);
        let picker_area = Rect {
            width: PICKER_WIDTH.min(picker_area.width.saturating_sub(MARGIN)),
            ..indent(picker_area)
        };
        DatePicker::new(&self.options).render(picker_area, buf, &mut self.picker);
        if self.state == AppState::Helping {
            Help(self.options.theme.background).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use time::macros::date;

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    fn render(app: &mut App) -> Buffer {
        let area = Rect::new(0, 0, 50, 20);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
    }

    #[test]
    fn test_initial_screen() {
        let mut app = App::new(Options::default(), date!(2025 - 01 - 22));
        let buffer = render(&mut app);
        assert_eq!(row(&buffer, 0).trim_end(), "  Pick a date");
        assert_eq!(row(&buffer, 2).trim_end(), "   ▦ Select Date");
        assert_eq!(row(&buffer, 3).trim_end(), "  date is not set");
        assert_eq!(row(&buffer, 19).trim_end(), "  Press ? for help, q to quit");
    }

    #[test]
    fn test_pick_with_keyboard() {
        let mut app = App::new(Options::default(), date!(2025 - 01 - 22));
        render(&mut app);
        assert!(app.handle_key(KeyCode::Tab));
        assert!(app.picker.is_open());
        let buffer = render(&mut app);
        assert_eq!(row(&buffer, 4).trim_end(), "  │ <      January 2025      > │");
        assert!(app.handle_key(KeyCode::Right));
        assert!(app.handle_key(KeyCode::Enter));
        assert!(!app.picker.is_open());
        assert_eq!(app.picker.selected(), Some(date!(2025 - 01 - 23)));
        let buffer = render(&mut app);
        assert_eq!(row(&buffer, 3).trim_end(), "  date = January 23, 2025");
    }

    #[test]
    fn test_escape_closes_then_quits() {
        let mut app = App::new(Options::default(), date!(2025 - 01 - 22));
        assert!(app.handle_key(KeyCode::Enter));
        assert!(app.handle_key(KeyCode::Esc));
        assert!(!app.picker.is_open());
        assert!(!app.quitting());
        assert!(app.handle_key(KeyCode::Esc));
        assert!(app.quitting());
    }

    #[test]
    fn test_invalid_keys() {
        let mut app = App::new(Options::default(), date!(2025 - 01 - 22));
        assert!(!app.handle_key(KeyCode::Left));
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Char(' ')));
        assert!(!app.handle_key(KeyCode::Char('x')));
    }

    #[test]
    fn test_help() {
        let mut app = App::new(Options::default(), date!(2025 - 01 - 22));
        assert!(app.handle_key(KeyCode::Char('?')));
        let buffer = render(&mut app);
        assert!((0..20).any(|y| row(&buffer, y).contains(" Commands ")));
        assert!(app.handle_key(KeyCode::Char('z')));
        assert_eq!(app.state, AppState::Picking);
    }
}
