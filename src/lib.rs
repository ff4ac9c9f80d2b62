//! A themeable date picker for [`ratatui`] terminal interfaces.
//!
//! A [`DatePicker`] draws a read-only date input.  Focusing the input (by
//! clicking it or sending [`PickerInput::Focus`]) opens a popup showing a
//! six-week calendar; picking a day there updates the selection held in the
//! [`PickerState`] and reports it as [`PickerOutput::Changed`].  Clicking
//! anywhere outside the input and the popup closes the popup again.
//!
//! ```no_run
//! use datepick::{DatePicker, Options, PickerInput, PickerOutput, PickerState};
//! use ratatui::{buffer::Buffer, layout::Rect, widgets::StatefulWidget};
//! use time::macros::date;
//!
//! let options = Options::default().with_availability(|d| d.weekday() != time::Weekday::Sunday);
//! let mut state = PickerState::new(date!(2025 - 01 - 22), &options);
//! let mut buf = Buffer::empty(Rect::new(0, 0, 40, 12));
//! DatePicker::new(&options).render(Rect::new(0, 0, 40, 1), &mut buf, &mut state);
//! if let PickerOutput::Changed(date) = state.handle_input(PickerInput::Focus, &options) {
//!     println!("picked {date}");
//! }
//! ```
mod calendar;
mod config;
mod options;
mod state;
mod theme;
mod widget;
pub use crate::calendar::{
    add_days, grid_start, parse_ymd, CellKind, DayCell, MonthGrid, OutOfTimeError, GRID_DAYS,
};
pub use crate::config::{ConfigError, OptionsFile};
pub use crate::options::{Availability, DateFormat, Icons, Options};
pub use crate::state::{PickerInput, PickerOutput, PickerState, Visibility};
pub use crate::theme::{Theme, ThemeOverrides};
pub use crate::widget::DatePicker;
