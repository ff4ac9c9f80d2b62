use crate::calendar::DAYS_IN_WEEK;
use crate::theme::Theme;
use std::fmt;
use std::rc::Rc;
use time::{
    error::InvalidFormatDescription,
    format_description::{self, BorrowedFormatItem, OwnedFormatItem},
    macros::format_description,
    Date, Weekday,
};

static LONG_FMT: &[BorrowedFormatItem<'_>] =
    format_description!("[month repr:long] [day padding:none], [year]");

/// Caller-supplied predicate deciding whether a date may be selected
#[derive(Clone)]
pub struct Availability(Rc<dyn Fn(Date) -> bool>);

impl Availability {
    pub fn new<F>(func: F) -> Availability
    where
        F: Fn(Date) -> bool + 'static,
    {
        Availability(Rc::new(func))
    }

    pub fn check(&self, date: Date) -> bool {
        (self.0)(date)
    }
}

impl fmt::Debug for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Availability(..)")
    }
}

/// How dates are written in the trigger
#[derive(Clone, Debug, Default)]
pub enum DateFormat {
    /// "January 5, 2025"
    #[default]
    Long,
    /// "2025-01-05"
    Iso,
    Custom(OwnedFormatItem),
}

impl DateFormat {
    /// Parses a `time` format description such as `"[day]/[month]/[year]"`
    pub fn parse(s: &str) -> Result<DateFormat, InvalidFormatDescription> {
        format_description::parse_owned::<2>(s).map(DateFormat::Custom)
    }

    /// Formats `date`.  If the format requires components a date does not
    /// have (e.g., an hour), the date is written in ISO form instead.
    pub fn format(&self, date: Date) -> String {
        let r = match self {
            DateFormat::Long => date.format(LONG_FMT),
            DateFormat::Iso => return date.to_string(),
            DateFormat::Custom(items) => date.format(items),
        };
        r.unwrap_or_else(|e| {
            log::warn!("Could not format {date} with configured date format: {e}");
            date.to_string()
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Icons {
    pub prev: String,
    pub next: String,
    pub input: String,
}

impl Default for Icons {
    fn default() -> Icons {
        Icons {
            prev: String::from("<"),
            next: String::from(">"),
            input: String::from("▦"),
        }
    }
}

/// Configuration for a [`DatePicker`][crate::DatePicker].
///
/// Start from [`Options::default()`] and override what you need, either with
/// struct update syntax or by merging in an
/// [`OptionsFile`][crate::OptionsFile].
#[derive(Clone, Debug)]
pub struct Options {
    /// Title drawn in the popup's top border
    pub title: Option<String>,
    /// Close the popup once a date is picked
    pub auto_hide: bool,
    pub today_btn: bool,
    pub clear_btn: bool,
    pub today_btn_text: String,
    pub clear_btn_text: String,
    /// Dates before this are disabled
    pub min_date: Option<Date>,
    /// Dates after this are disabled
    pub max_date: Option<Date>,
    pub disabled_dates: Vec<Date>,
    /// Date selected when the picker is first created
    pub default_date: Option<Date>,
    /// Weekday labels, Monday first
    pub week_days: [String; DAYS_IN_WEEK],
    /// Weekday that begins each row of the calendar
    pub week_start: Weekday,
    pub input_name: String,
    /// Identifier for the input; defaults to `input_name`
    pub input_id: Option<String>,
    pub input_placeholder: String,
    pub input_date_format: DateFormat,
    pub theme: Theme,
    pub icons: Icons,
    /// If unset, every date within the bounds above is available.
    pub availability: Option<Availability>,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            title: None,
            auto_hide: true,
            today_btn: true,
            clear_btn: true,
            today_btn_text: String::from("Today"),
            clear_btn_text: String::from("Clear"),
            min_date: None,
            max_date: None,
            disabled_dates: Vec::new(),
            default_date: None,
            week_days: ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"].map(String::from),
            week_start: Weekday::Monday,
            input_name: String::from("date"),
            input_id: None,
            input_placeholder: String::from("Select Date"),
            input_date_format: DateFormat::default(),
            theme: Theme::default(),
            icons: Icons::default(),
            availability: None,
        }
    }
}

impl Options {
    /// Sets the availability predicate
    pub fn with_availability<F>(mut self, func: F) -> Options
    where
        F: Fn(Date) -> bool + 'static,
    {
        self.availability = Some(Availability::new(func));
        self
    }

    pub fn is_available(&self, date: Date) -> bool {
        self.min_date.is_none_or(|min| min <= date)
            && self.max_date.is_none_or(|max| date <= max)
            && !self.disabled_dates.contains(&date)
            && self.availability.as_ref().is_none_or(|a| a.check(date))
    }

    pub fn input_id(&self) -> &str {
        self.input_id.as_deref().unwrap_or(&self.input_name)
    }

    pub fn format_date(&self, date: Date) -> String {
        self.input_date_format.format(date)
    }
}
