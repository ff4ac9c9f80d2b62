mod grid;
mod util;
pub use self::grid::{CellKind, DayCell, MonthGrid, GRID_DAYS};
pub(crate) use self::util::{
    first_of_month, next_month, previous_month, same_day_in_month, DAYS_IN_WEEK,
};
pub use self::util::{add_days, grid_start, parse_ymd, OutOfTimeError};
