use thiserror::Error;
use time::{
    format_description::BorrowedFormatItem, macros::format_description, Date, Duration, Month,
    Weekday,
};

pub(crate) const DAYS_IN_WEEK: usize = 7;

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;

/// Returns the date `days` days after `date`, or before it if `days` is
/// negative.
pub fn add_days(date: Date, days: i64) -> Result<Date, OutOfTimeError> {
    date.checked_add(Duration::days(days)).ok_or(OutOfTimeError)
}

/// Returns the latest date on or before `date` that falls on `week_start`.
pub fn grid_start(date: Date, week_start: Weekday) -> Result<Date, OutOfTimeError> {
    let back = (date.weekday().number_days_from_monday() + 7
        - week_start.number_days_from_monday())
        % 7;
    add_days(date, -i64::from(back))
}

/// Parses a date in `YYYY-MM-DD` form
pub fn parse_ymd(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, &YMD_FMT)
}

pub(crate) fn first_of_month(date: Date) -> Date {
    // Every month has a first day, so this cannot fail.
    date.replace_day(1).unwrap_or(date)
}

pub(crate) fn next_month(date: Date) -> Result<Date, OutOfTimeError> {
    let (year, month) = match date.month() {
        Month::December => (date.year().checked_add(1).ok_or(OutOfTimeError)?, Month::January),
        m => (date.year(), m.next()),
    };
    Date::from_calendar_date(year, month, 1).map_err(|_| OutOfTimeError)
}

pub(crate) fn previous_month(date: Date) -> Result<Date, OutOfTimeError> {
    first_of_month(date)
        .previous_day()
        .map(first_of_month)
        .ok_or(OutOfTimeError)
}

/// Returns the date with day-of-month `day` in the month starting at
/// `first`, clamped to the last day of that month
pub(crate) fn same_day_in_month(first: Date, day: u8) -> Date {
    (1..=day)
        .rev()
        .find_map(|d| first.replace_day(d).ok())
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::macros::date;
    use time::Weekday::*;

    #[test]
    fn test_add_days() {
        assert_eq!(add_days(date!(2024 - 02 - 27), 3), Ok(date!(2024 - 03 - 01)));
        assert_eq!(add_days(date!(2025 - 01 - 01), -1), Ok(date!(2024 - 12 - 31)));
        assert_eq!(add_days(date!(2025 - 01 - 01), 0), Ok(date!(2025 - 01 - 01)));
    }

    #[test]
    fn test_add_days_end_of_time() {
        assert_eq!(add_days(Date::MAX, 1), Err(OutOfTimeError));
        assert_eq!(add_days(Date::MIN, -1), Err(OutOfTimeError));
    }

    #[rstest]
    #[case(date!(2025 - 01 - 01), Monday, date!(2024 - 12 - 30))]
    #[case(date!(2025 - 01 - 01), Sunday, date!(2024 - 12 - 29))]
    #[case(date!(2025 - 01 - 01), Wednesday, date!(2025 - 01 - 01))]
    #[case(date!(2025 - 01 - 01), Thursday, date!(2024 - 12 - 26))]
    #[case(date!(2024 - 09 - 01), Monday, date!(2024 - 08 - 26))]
    #[case(date!(2024 - 09 - 01), Sunday, date!(2024 - 09 - 01))]
    fn test_grid_start(#[case] date: Date, #[case] week_start: Weekday, #[case] expected: Date) {
        let start = grid_start(date, week_start).unwrap();
        assert_eq!(start, expected);
        assert_eq!(start.weekday(), week_start);
    }

    #[test]
    fn test_parse_ymd() {
        assert_eq!(parse_ymd("2025-01-22").unwrap(), date!(2025 - 01 - 22));
        assert!(parse_ymd("2025-02-30").is_err());
        assert!(parse_ymd("January 22").is_err());
    }

    #[test]
    fn test_month_navigation() {
        assert_eq!(next_month(date!(2024 - 12 - 01)), Ok(date!(2025 - 01 - 01)));
        assert_eq!(next_month(date!(2025 - 01 - 31)), Ok(date!(2025 - 02 - 01)));
        assert_eq!(previous_month(date!(2025 - 01 - 01)), Ok(date!(2024 - 12 - 01)));
        assert_eq!(previous_month(date!(2025 - 03 - 31)), Ok(date!(2025 - 02 - 01)));
        assert_eq!(next_month(Date::MAX), Err(OutOfTimeError));
        assert_eq!(previous_month(Date::MIN), Err(OutOfTimeError));
    }

    #[test]
    fn test_same_day_in_month() {
        assert_eq!(same_day_in_month(date!(2025 - 02 - 01), 31), date!(2025 - 02 - 28));
        assert_eq!(same_day_in_month(date!(2024 - 02 - 01), 30), date!(2024 - 02 - 29));
        assert_eq!(same_day_in_month(date!(2025 - 03 - 01), 15), date!(2025 - 03 - 15));
    }

    #[test]
    fn test_index0() {
        assert_eq!(Sunday.index0(), 0);
        assert_eq!(Wednesday.index0(), 3);
        assert_eq!(Saturday.index0(), 6);
    }
}
