use crate::calendar::{parse_ymd, DAYS_IN_WEEK};
use crate::options::{DateFormat, Options};
use crate::theme::ThemeOverrides;
use ratatui::style::{Color, Modifier, Style};
use ron::extensions::Extensions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::{Date, Weekday};

/// Option overrides read from a RON file.
///
/// Every field is optional.  Values that cannot be interpreted (a bad date,
/// an unknown weekday, a format description that does not parse) are logged
/// and skipped so that the corresponding default stays in effect.
///
/// ```ron
/// (
///     title: "Departure",
///     week_start: "sunday",
///     min_date: "2025-01-01",
///     input_date_format: "[day]/[month]/[year]",
///     theme: (selected: (bg: "green", bold: true)),
/// )
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct OptionsFile {
    title: Option<String>,
    auto_hide: Option<bool>,
    today_btn: Option<bool>,
    clear_btn: Option<bool>,
    today_btn_text: Option<String>,
    clear_btn_text: Option<String>,
    min_date: Option<String>,
    max_date: Option<String>,
    disabled_dates: Vec<String>,
    default_date: Option<String>,
    week_days: Option<Vec<String>>,
    week_start: Option<String>,
    input_name: Option<String>,
    input_id: Option<String>,
    input_placeholder: Option<String>,
    input_date_format: Option<String>,
    theme: ThemeFile,
    icons: IconsFile,
}

impl OptionsFile {
    pub fn load(path: &Path) -> Result<OptionsFile, ConfigError> {
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let file = OptionsFile::parse(&src)?;
        log::info!("Loaded picker options from {}", path.display());
        Ok(file)
    }

    pub fn parse(src: &str) -> Result<OptionsFile, ConfigError> {
        ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(src)
            .map_err(ConfigError::from)
    }

    /// Overrides the fields of `options` that this file sets
    pub fn apply(self, mut options: Options) -> Options {
        if let Some(title) = self.title {
            options.title = Some(title);
        }
        if let Some(b) = self.auto_hide {
            options.auto_hide = b;
        }
        if let Some(b) = self.today_btn {
            options.today_btn = b;
        }
        if let Some(b) = self.clear_btn {
            options.clear_btn = b;
        }
        if let Some(s) = self.today_btn_text {
            options.today_btn_text = s;
        }
        if let Some(s) = self.clear_btn_text {
            options.clear_btn_text = s;
        }
        if let Some(d) = self.min_date.as_deref().and_then(|s| date_field("min_date", s)) {
            options.min_date = Some(d);
        }
        if let Some(d) = self.max_date.as_deref().and_then(|s| date_field("max_date", s)) {
            options.max_date = Some(d);
        }
        options.disabled_dates.extend(
            self.disabled_dates
                .iter()
                .filter_map(|s| date_field("disabled_dates", s)),
        );
        if let Some(d) = self
            .default_date
            .as_deref()
            .and_then(|s| date_field("default_date", s))
        {
            options.default_date = Some(d);
        }
        if let Some(labels) = self.week_days {
            match <[String; DAYS_IN_WEEK]>::try_from(labels) {
                Ok(labels) => options.week_days = labels,
                Err(labels) => log::warn!(
                    "Ignoring week_days: expected {DAYS_IN_WEEK} labels, got {}",
                    labels.len()
                ),
            }
        }
        if let Some(s) = self.week_start {
            match parse_weekday(&s) {
                Some(wd) => options.week_start = wd,
                None => log::warn!("Ignoring week_start: {s:?} is not a weekday"),
            }
        }
        if let Some(s) = self.input_name {
            options.input_name = s;
        }
        if let Some(s) = self.input_id {
            options.input_id = Some(s);
        }
        if let Some(s) = self.input_placeholder {
            options.input_placeholder = s;
        }
        if let Some(s) = self.input_date_format {
            match DateFormat::parse(&s) {
                Ok(fmt) => options.input_date_format = fmt,
                Err(e) => log::warn!("Ignoring input_date_format {s:?}: {e}"),
            }
        }
        options.theme = options.theme.merge(self.theme.into_overrides());
        if let Some(s) = self.icons.prev {
            options.icons.prev = s;
        }
        if let Some(s) = self.icons.next {
            options.icons.next = s;
        }
        if let Some(s) = self.icons.input {
            options.icons.input = s;
        }
        options
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
struct ThemeFile {
    background: Option<StyleSpec>,
    text: Option<StyleSpec>,
    disabled_text: Option<StyleSpec>,
    selected: Option<StyleSpec>,
    cursor: Option<StyleSpec>,
    weekdays: Option<StyleSpec>,
    navigation: Option<StyleSpec>,
    input: Option<StyleSpec>,
    placeholder: Option<StyleSpec>,
    input_icon: Option<StyleSpec>,
    today_btn: Option<StyleSpec>,
    clear_btn: Option<StyleSpec>,
}

impl ThemeFile {
    fn into_overrides(self) -> ThemeOverrides {
        let conv = |spec: Option<StyleSpec>| spec.map(Style::from);
        ThemeOverrides {
            background: conv(self.background),
            text: conv(self.text),
            disabled_text: conv(self.disabled_text),
            selected: conv(self.selected),
            cursor: conv(self.cursor),
            weekdays: conv(self.weekdays),
            navigation: conv(self.navigation),
            input: conv(self.input),
            placeholder: conv(self.placeholder),
            input_icon: conv(self.input_icon),
            today_btn: conv(self.today_btn),
            clear_btn: conv(self.clear_btn),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
struct StyleSpec {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
    dim: bool,
    italic: bool,
    underlined: bool,
    reversed: bool,
}

impl From<StyleSpec> for Style {
    fn from(spec: StyleSpec) -> Style {
        let mut style = Style::new();
        if let Some(fg) = spec.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = spec.bg {
            style = style.bg(bg);
        }
        for (on, modifier) in [
            (spec.bold, Modifier::BOLD),
            (spec.dim, Modifier::DIM),
            (spec.italic, Modifier::ITALIC),
            (spec.underlined, Modifier::UNDERLINED),
            (spec.reversed, Modifier::REVERSED),
        ] {
            if on {
                style = style.add_modifier(modifier);
            }
        }
        style
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
struct IconsFile {
    prev: Option<String>,
    next: Option<String>,
    input: Option<String>,
}

fn date_field(field: &str, s: &str) -> Option<Date> {
    match parse_ymd(s) {
        Ok(d) => Some(d),
        Err(e) => {
            log::warn!("Ignoring {field} value {s:?}: {e}");
            None
        }
    }
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.to_ascii_lowercase().as_str() {
        "monday" | "mon" | "mo" => Some(Weekday::Monday),
        "tuesday" | "tue" | "tu" => Some(Weekday::Tuesday),
        "wednesday" | "wed" | "we" => Some(Weekday::Wednesday),
        "thursday" | "thu" | "th" => Some(Weekday::Thursday),
        "friday" | "fri" | "fr" => Some(Weekday::Friday),
        "saturday" | "sat" | "sa" => Some(Weekday::Saturday),
        "sunday" | "sun" | "su" => Some(Weekday::Sunday),
        _ => None,
    }
}
