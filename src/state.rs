use crate::calendar::{
    add_days, first_of_month, next_month, previous_month, same_day_in_month, CellKind, MonthGrid,
    OutOfTimeError,
};
use crate::options::Options;
use crate::widget::PopupLayout;
use ratatui::layout::{Position, Rect};
use time::Date;

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Visibility {
    #[default]
    Closed,
    Open,
}

/// Input events understood by [`PickerState::handle_input()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PickerInput {
    /// The trigger gained focus
    Focus,
    /// A mouse button was pressed at the given screen position
    PointerDown(Position),
    Close,
    Left,
    Right,
    Up,
    Down,
    PrevMonth,
    NextMonth,
    /// Activate the day under the cursor, or open the popup if it is closed
    Confirm,
    Today,
    Clear,
}

/// What the owner of a picker needs to know after an input
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PickerOutput {
    Ok,
    /// The input did not apply in the current state
    Invalid,
    Changed(Date),
    Cleared,
}

/// Selection and visibility state shared by the trigger and the popup.
///
/// The state also remembers where the last render placed the trigger and the
/// popup so that pointer events can be routed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PickerState {
    today: Date,
    selected: Option<Date>,
    visibility: Visibility,
    // First day of the month shown in the popup
    view: Date,
    cursor: Date,
    pub(crate) trigger_area: Rect,
    pub(crate) popup: Option<PopupLayout>,
}

impl PickerState {
    pub fn new(today: Date, options: &Options) -> PickerState {
        let selected = options.default_date;
        let cursor = selected.unwrap_or(today);
        PickerState {
            today,
            selected,
            visibility: Visibility::Closed,
            view: first_of_month(cursor),
            cursor,
            trigger_area: Rect::default(),
            popup: None,
        }
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn selected(&self) -> Option<Date> {
        self.selected
    }

    /// Replaces the selection without checking availability or reporting a
    /// change, as when the owner controls the value
    pub fn set_selected(&mut self, date: Option<Date>) {
        self.selected = date;
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility == Visibility::Open
    }

    /// First day of the month shown in the popup
    pub fn view_month(&self) -> Date {
        self.view
    }

    pub fn cursor(&self) -> Date {
        self.cursor
    }

    pub fn open(&mut self) {
        if !self.is_open() {
            self.cursor = self.selected.unwrap_or(self.today);
            self.view = first_of_month(self.cursor);
            self.visibility = Visibility::Open;
            log::debug!("Opened date picker at {}", self.view);
        }
    }

    pub fn close(&mut self) {
        if self.is_open() {
            self.visibility = Visibility::Closed;
            self.popup = None;
            log::debug!("Closed date picker");
        }
    }

    /// The selection-change entry point used by the grid, the today button,
    /// and keyboard confirmation
    pub fn change_selected_date(&mut self, date: Date, options: &Options) -> PickerOutput {
        match CellKind::classify(date, self.selected, options) {
            CellKind::Disabled => {
                log::debug!("Ignoring unavailable date {date}");
                PickerOutput::Invalid
            }
            CellKind::Selected => PickerOutput::Ok,
            CellKind::Selectable => {
                self.selected = Some(date);
                self.cursor = date;
                self.view = first_of_month(date);
                log::debug!("Selected {date}");
                if options.auto_hide {
                    self.close();
                }
                PickerOutput::Changed(date)
            }
        }
    }

    pub fn handle_input(&mut self, input: PickerInput, options: &Options) -> PickerOutput {
        match (input, self.visibility) {
            (PickerInput::Focus, _) => {
                self.open();
                PickerOutput::Ok
            }
            (PickerInput::PointerDown(pos), _) => self.pointer_down(pos, options),
            (PickerInput::Confirm, Visibility::Closed) => {
                self.open();
                PickerOutput::Ok
            }
            (_, Visibility::Closed) => PickerOutput::Invalid,
            (PickerInput::Close, Visibility::Open) => {
                self.close();
                PickerOutput::Ok
            }
            (PickerInput::Left, Visibility::Open) => self.move_cursor(-1),
            (PickerInput::Right, Visibility::Open) => self.move_cursor(1),
            (PickerInput::Up, Visibility::Open) => self.move_cursor(-7),
            (PickerInput::Down, Visibility::Open) => self.move_cursor(7),
            (PickerInput::PrevMonth, Visibility::Open) => {
                self.show_month(previous_month(self.view))
            }
            (PickerInput::NextMonth, Visibility::Open) => self.show_month(next_month(self.view)),
            (PickerInput::Confirm, Visibility::Open) => {
                self.change_selected_date(self.cursor, options)
            }
            (PickerInput::Today, Visibility::Open) => self.pick_today(options),
            (PickerInput::Clear, Visibility::Open) => self.clear(options),
        }
    }

    fn pointer_down(&mut self, pos: Position, options: &Options) -> PickerOutput {
        if !self.is_open() {
            if self.trigger_area.contains(pos) {
                self.open();
            }
            return PickerOutput::Ok;
        }
        if let Some(layout) = self.popup.filter(|lo| lo.area.contains(pos)) {
            return self.click_popup(&layout, pos, options);
        }
        if !self.trigger_area.contains(pos) {
            self.close();
        }
        PickerOutput::Ok
    }

    fn click_popup(
        &mut self,
        layout: &PopupLayout,
        pos: Position,
        options: &Options,
    ) -> PickerOutput {
        if layout.prev.contains(pos) {
            self.show_month(previous_month(self.view))
        } else if layout.next.contains(pos) {
            self.show_month(next_month(self.view))
        } else if layout.today.is_some_and(|r| r.contains(pos)) {
            self.pick_today(options)
        } else if layout.clear.is_some_and(|r| r.contains(pos)) {
            self.clear(options)
        } else if let Some(index) = layout.cell_at(pos) {
            match MonthGrid::for_month(self.view, options.week_start)
                .ok()
                .and_then(|grid| grid.get(index))
            {
                Some(date) => self.change_selected_date(date, options),
                None => PickerOutput::Invalid,
            }
        } else {
            PickerOutput::Ok
        }
    }

    fn move_cursor(&mut self, days: i64) -> PickerOutput {
        match add_days(self.cursor, days) {
            Ok(date) => {
                self.cursor = date;
                self.view = first_of_month(date);
                PickerOutput::Ok
            }
            Err(OutOfTimeError) => PickerOutput::Invalid,
        }
    }

    fn show_month(&mut self, month: Result<Date, OutOfTimeError>) -> PickerOutput {
        match month {
            Ok(first) => {
                self.view = first;
                self.cursor = same_day_in_month(first, self.cursor.day());
                PickerOutput::Ok
            }
            Err(OutOfTimeError) => PickerOutput::Invalid,
        }
    }

    fn pick_today(&mut self, options: &Options) -> PickerOutput {
        if !options.today_btn || !options.is_available(self.today) {
            return PickerOutput::Invalid;
        }
        self.view = first_of_month(self.today);
        self.cursor = self.today;
        self.change_selected_date(self.today, options)
    }

    fn clear(&mut self, options: &Options) -> PickerOutput {
        if !options.clear_btn {
            return PickerOutput::Invalid;
        }
        let Some(date) = self.selected.take() else {
            return PickerOutput::Ok;
        };
        log::debug!("Cleared selection of {date}");
        if options.auto_hide {
            self.close();
        }
        PickerOutput::Cleared
    }
}
