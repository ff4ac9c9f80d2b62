mod input;
mod popup;
use self::input::Input;
use self::popup::{place_popup, Popup, POPUP_WIDTH};
pub(crate) use self::popup::PopupLayout;
use crate::options::Options;
use crate::state::PickerState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{StatefulWidget, Widget},
};
use time::Date;

/// A date input that opens a calendar popup.
///
/// The trigger is drawn on the first line of the area the picker is rendered
/// in.  While the [`PickerState`] is open, the popup is drawn below (or above)
/// the trigger, over whatever else is in the buffer.
#[derive(Clone, Debug)]
pub struct DatePicker<'a> {
    options: &'a Options,
    value: Option<Date>,
    trigger: Option<Line<'a>>,
}

impl<'a> DatePicker<'a> {
    pub fn new(options: &'a Options) -> DatePicker<'a> {
        DatePicker {
            options,
            value: None,
            trigger: None,
        }
    }

    /// Show `value` in the input instead of the current selection
    pub fn value(mut self, value: Option<Date>) -> DatePicker<'a> {
        self.value = value;
        self
    }

    /// Draw `trigger` in place of the default input
    pub fn trigger<L: Into<Line<'a>>>(mut self, trigger: L) -> DatePicker<'a> {
        self.trigger = Some(trigger.into());
        self
    }
}

impl StatefulWidget for DatePicker<'_> {
    type State = PickerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let trigger_area = Rect {
            height: area.height.min(1),
            ..area
        };
        state.trigger_area = trigger_area;
        match self.trigger {
            Some(line) => line.render(trigger_area, buf),
            None => Input::new(self.options, self.value.or(state.selected()))
                .render(trigger_area, buf),
        }
        if state.is_open() {
            let popup_area = place_popup(
                trigger_area,
                *buf.area(),
                POPUP_WIDTH,
                PopupLayout::height(self.options),
            );
            Popup::new(self.options).render(popup_area, buf, state);
        } else {
            state.popup = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PickerInput, PickerOutput};
    use crate::theme::{
        BASE_STYLE, CLEAR_BTN_STYLE, CURSOR_STYLE, DISABLED_TEXT_STYLE, INPUT_ICON_STYLE,
        INPUT_STYLE, NAVIGATION_STYLE, PLACEHOLDER_STYLE, SELECTED_STYLE, TEXT_STYLE,
        TODAY_BTN_STYLE, WEEKDAY_STYLE,
    };
    use pretty_assertions::assert_eq;
    use ratatui::layout::Position;
    use time::{macros::date, Weekday};

    const TODAY: Date = date!(2025 - 01 - 22);

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_closed() {
        let options = Options::default();
        let mut state = PickerState::new(TODAY, &options);
        let area = Rect::new(0, 0, 30, 1);
        let mut buffer = Buffer::empty(area);
        DatePicker::new(&options).render(area, &mut buffer, &mut state);
        let mut expected = Buffer::with_lines([" ▦ Select Date                "]);
        expected.set_style(Rect::new(0, 0, 30, 1), INPUT_STYLE);
        expected.set_style(Rect::new(0, 0, 3, 1), INPUT_ICON_STYLE);
        expected.set_style(Rect::new(3, 0, 11, 1), PLACEHOLDER_STYLE);
        assert_eq!(buffer, expected);
        assert_eq!(state.trigger_area, area);
        assert_eq!(state.popup, None);
    }

    #[test]
    fn test_open() {
        let options = Options::default()
            .with_availability(|d| !matches!(d.weekday(), Weekday::Saturday | Weekday::Sunday));
        let mut state = PickerState::new(TODAY, &options);
        state.set_selected(Some(date!(2025 - 01 - 15)));
        state.handle_input(PickerInput::Focus, &options);
        let mut buffer = Buffer::empty(Rect::new(0, 0, 30, 12));
        DatePicker::new(&options).render(Rect::new(0, 0, 30, 1), &mut buffer, &mut state);
        let mut expected = Buffer::with_lines([
            " ▦ January 15, 2025           ",
            "┌────────────────────────────┐",
            "│ <      January 2025      > │",
            "│ Mo  Tu  We  Th  Fr  Sa  Su │",
            "│ 30  31   1   2   3   4   5 │",
            "│  6   7   8   9  10  11  12 │",
            "│ 13  14  15  16  17  18  19 │",
            "│ 20  21 [22] 23  24  25  26 │",
            "│ 27  28  29  30  31   1   2 │",
            "│  3   4   5   6   7   8   9 │",
            "│    Today         Clear     │",
            "└────────────────────────────┘",
        ]);
        expected.set_style(Rect::new(0, 0, 30, 1), INPUT_STYLE);
        expected.set_style(Rect::new(0, 0, 3, 1), INPUT_ICON_STYLE);
        expected.set_style(Rect::new(0, 1, 30, 11), BASE_STYLE);
        expected.set_style(Rect::new(2, 2, 1, 1), NAVIGATION_STYLE);
        expected.set_style(Rect::new(9, 2, 12, 1), NAVIGATION_STYLE);
        expected.set_style(Rect::new(27, 2, 1, 1), NAVIGATION_STYLE);
        expected.set_style(Rect::new(1, 3, 28, 1), WEEKDAY_STYLE);
        expected.set_style(Rect::new(1, 4, 28, 6), TEXT_STYLE);
        expected.set_style(Rect::new(21, 4, 8, 6), DISABLED_TEXT_STYLE);
        expected.set_style(Rect::new(9, 6, 4, 1), SELECTED_STYLE);
        expected.set_style(Rect::new(9, 6, 4, 1), CURSOR_STYLE);
        expected.set_style(Rect::new(1, 10, 14, 1), TODAY_BTN_STYLE);
        expected.set_style(Rect::new(15, 10, 14, 1), CLEAR_BTN_STYLE);
        assert_eq!(buffer, expected);
        assert_eq!(
            state.popup.map(|lo| lo.area),
            Some(Rect::new(0, 1, 30, 11))
        );
    }

    #[test]
    fn test_rerender_is_identical() {
        let options = Options::default();
        let mut state = PickerState::new(TODAY, &options);
        state.handle_input(PickerInput::Focus, &options);
        let area = Rect::new(0, 0, 40, 14);
        let mut first = Buffer::empty(area);
        DatePicker::new(&options).render(area, &mut first, &mut state);
        let mut second = Buffer::empty(area);
        DatePicker::new(&options).render(area, &mut second, &mut state);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sunday_week_start() {
        let options = Options {
            week_start: Weekday::Sunday,
            today_btn: false,
            clear_btn: false,
            ..Options::default()
        };
        let mut state = PickerState::new(TODAY, &options);
        state.handle_input(PickerInput::Focus, &options);
        let mut buffer = Buffer::empty(Rect::new(0, 0, 30, 11));
        DatePicker::new(&options).render(Rect::new(0, 0, 30, 1), &mut buffer, &mut state);
        assert_eq!(row(&buffer, 3), "│ Su  Mo  Tu  We  Th  Fr  Sa │");
        assert_eq!(row(&buffer, 4), "│ 29  30  31   1   2   3   4 │");
        assert_eq!(row(&buffer, 10), "└────────────────────────────┘");
    }

    #[test]
    fn test_value_overrides_selection() {
        let options = Options::default();
        let mut state = PickerState::new(TODAY, &options);
        state.set_selected(Some(date!(2025 - 01 - 15)));
        let area = Rect::new(0, 0, 30, 1);
        let mut buffer = Buffer::empty(area);
        DatePicker::new(&options)
            .value(Some(date!(2024 - 02 - 29)))
            .render(area, &mut buffer, &mut state);
        assert_eq!(row(&buffer, 0), " ▦ February 29, 2024          ");
    }

    #[test]
    fn test_custom_trigger() {
        let options = Options::default();
        let mut state = PickerState::new(TODAY, &options);
        let area = Rect::new(0, 0, 30, 12);
        let mut buffer = Buffer::empty(area);
        let trigger = Rect::new(0, 0, 15, 1);
        DatePicker::new(&options)
            .trigger("[ pick a date ]")
            .render(trigger, &mut buffer, &mut state);
        assert_eq!(row(&buffer, 0), "[ pick a date ]               ");
        let out = state.handle_input(PickerInput::PointerDown(Position::new(3, 0)), &options);
        assert_eq!(out, PickerOutput::Ok);
        assert!(state.is_open());
        DatePicker::new(&options)
            .trigger("[ pick a date ]")
            .render(trigger, &mut buffer, &mut state);
        assert_eq!(row(&buffer, 2), "│ <      January 2025      > │");
    }

    #[test]
    fn test_title() {
        let options = Options {
            title: Some(String::from("Departure")),
            ..Options::default()
        };
        let mut state = PickerState::new(TODAY, &options);
        state.handle_input(PickerInput::Focus, &options);
        let mut buffer = Buffer::empty(Rect::new(0, 0, 30, 12));
        DatePicker::new(&options).render(Rect::new(0, 0, 30, 1), &mut buffer, &mut state);
        assert!(row(&buffer, 1).contains(" Departure "));
    }

    #[test]
    fn test_popup_above_trigger() {
        let options = Options::default();
        let mut state = PickerState::new(TODAY, &options);
        state.handle_input(PickerInput::Focus, &options);
        let mut buffer = Buffer::empty(Rect::new(0, 0, 30, 12));
        DatePicker::new(&options).render(Rect::new(0, 11, 30, 1), &mut buffer, &mut state);
        assert_eq!(
            state.popup.map(|lo| lo.area),
            Some(Rect::new(0, 0, 30, 11))
        );
        assert_eq!(row(&buffer, 0), "┌────────────────────────────┐");
        assert_eq!(row(&buffer, 11), " ▦ Select Date                ");
    }

    #[test]
    fn test_closing_forgets_popup() {
        let options = Options::default();
        let mut state = PickerState::new(TODAY, &options);
        state.handle_input(PickerInput::Focus, &options);
        let mut buffer = Buffer::empty(Rect::new(0, 0, 30, 12));
        DatePicker::new(&options).render(Rect::new(0, 0, 30, 1), &mut buffer, &mut state);
        assert!(state.popup.is_some());
        let out = state.handle_input(PickerInput::PointerDown(Position::new(29, 11)), &options);
        assert_eq!(out, PickerOutput::Ok);
        assert!(state.is_open());
        let out = state.handle_input(PickerInput::PointerDown(Position::new(5, 14)), &options);
        assert_eq!(out, PickerOutput::Ok);
        assert!(!state.is_open());
        DatePicker::new(&options).render(Rect::new(0, 0, 30, 1), &mut buffer, &mut state);
        assert_eq!(state.popup, None);
    }
}
