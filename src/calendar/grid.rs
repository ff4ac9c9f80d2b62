use super::util::{first_of_month, grid_start, OutOfTimeError, WeekdayExt, DAYS_IN_WEEK};
use crate::options::Options;
use std::iter::successors;
use time::{Date, Weekday};

/// Number of days shown in a month view: six full weeks
pub const GRID_DAYS: usize = 42;

/// The 42 consecutive days of a month view, starting at the grid start
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MonthGrid {
    days: [Date; GRID_DAYS],
}

impl MonthGrid {
    /// Returns the six weeks of days beginning at `start`.
    ///
    /// Fails if the calendar runs out before 42 days have been produced.
    pub fn new(start: Date) -> Result<MonthGrid, OutOfTimeError> {
        let days = successors(Some(start), |&d| d.next_day())
            .take(GRID_DAYS)
            .collect::<Vec<_>>();
        let days = <[Date; GRID_DAYS]>::try_from(days).map_err(|_| OutOfTimeError)?;
        Ok(MonthGrid { days })
    }

    /// Returns the grid for the month containing `date`, with each row
    /// beginning on `week_start`
    pub fn for_month(date: Date, week_start: Weekday) -> Result<MonthGrid, OutOfTimeError> {
        MonthGrid::new(grid_start(first_of_month(date), week_start)?)
    }

    pub fn start(&self) -> Date {
        self.days[0]
    }

    pub fn end(&self) -> Date {
        self.days[GRID_DAYS - 1]
    }

    pub fn days(&self) -> &[Date; GRID_DAYS] {
        &self.days
    }

    pub fn get(&self, index: usize) -> Option<Date> {
        self.days.get(index).copied()
    }

    pub fn contains(&self, date: Date) -> bool {
        (self.start()..=self.end()).contains(&date)
    }

    /// Rotates Monday-first weekday labels so that the label for the grid
    /// start's weekday comes first
    pub fn headers<'a>(&self, labels: &'a [String; DAYS_IN_WEEK]) -> [&'a str; DAYS_IN_WEEK] {
        let offset = (usize::from(self.start().weekday().index0()) + 6) % DAYS_IN_WEEK;
        std::array::from_fn(|i| labels[(i + offset) % DAYS_IN_WEEK].as_str())
    }

    /// Classifies every day of the grid against the current selection and
    /// the availability rules in `options`
    pub fn cells(&self, selected: Option<Date>, options: &Options) -> [DayCell; GRID_DAYS] {
        self.days.map(|date| DayCell::new(date, selected, options))
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CellKind {
    /// The availability rules reject the date; activating it does nothing.
    Disabled,
    /// The date is the current selection; activating it does nothing.
    Selected,
    Selectable,
}

impl CellKind {
    // Availability is checked first, so a disabled date is never shown as
    // selected.
    pub fn classify(date: Date, selected: Option<Date>, options: &Options) -> CellKind {
        if !options.is_available(date) {
            CellKind::Disabled
        } else if selected == Some(date) {
            CellKind::Selected
        } else {
            CellKind::Selectable
        }
    }

    pub fn is_interactive(self) -> bool {
        self == CellKind::Selectable
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DayCell {
    pub date: Date,
    pub kind: CellKind,
}

impl DayCell {
    pub fn new(date: Date, selected: Option<Date>, options: &Options) -> DayCell {
        DayCell {
            date,
            kind: CellKind::classify(date, selected, options),
        }
    }
}
