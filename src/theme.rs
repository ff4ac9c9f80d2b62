use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TEXT_STYLE: Style = Style::new().fg(Color::White);

pub(crate) const DISABLED_TEXT_STYLE: Style = Style::new().fg(Color::DarkGray);

pub(crate) const SELECTED_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::LightBlue)
    .add_modifier(Modifier::BOLD);

pub(crate) const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.fg(Color::Gray).add_modifier(Modifier::BOLD);

pub(crate) const NAVIGATION_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const INPUT_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

pub(crate) const PLACEHOLDER_STYLE: Style = Style::new().fg(Color::Gray);

pub(crate) const INPUT_ICON_STYLE: Style = Style::new().fg(Color::LightBlue);

pub(crate) const TODAY_BTN_STYLE: Style = Style::new()
    .fg(Color::White)
    .bg(Color::Blue)
    .add_modifier(Modifier::BOLD);

pub(crate) const CLEAR_BTN_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Gray);

/// Styles for each part of the picker
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Theme {
    /// Popup frame and fill
    pub background: Style,
    /// Selectable days
    pub text: Style,
    pub disabled_text: Style,
    pub selected: Style,
    /// Patched over a day's style when the keyboard cursor is on it
    pub cursor: Style,
    pub weekdays: Style,
    /// Month label and previous/next arrows
    pub navigation: Style,
    pub input: Style,
    pub placeholder: Style,
    pub input_icon: Style,
    pub today_btn: Style,
    pub clear_btn: Style,
}

impl Default for Theme {
    fn default() -> Theme {
        Theme {
            background: BASE_STYLE,
            text: TEXT_STYLE,
            disabled_text: DISABLED_TEXT_STYLE,
            selected: SELECTED_STYLE,
            cursor: CURSOR_STYLE,
            weekdays: WEEKDAY_STYLE,
            navigation: NAVIGATION_STYLE,
            input: INPUT_STYLE,
            placeholder: PLACEHOLDER_STYLE,
            input_icon: INPUT_ICON_STYLE,
            today_btn: TODAY_BTN_STYLE,
            clear_btn: CLEAR_BTN_STYLE,
        }
    }
}

impl Theme {
    /// Patches each override onto the corresponding style.  Attributes an
    /// override leaves unset keep their current values.
    pub fn merge(self, overrides: ThemeOverrides) -> Theme {
        fn patch(base: Style, over: Option<Style>) -> Style {
            over.map_or(base, |s| base.patch(s))
        }
        Theme {
            background: patch(self.background, overrides.background),
            text: patch(self.text, overrides.text),
            disabled_text: patch(self.disabled_text, overrides.disabled_text),
            selected: patch(self.selected, overrides.selected),
            cursor: patch(self.cursor, overrides.cursor),
            weekdays: patch(self.weekdays, overrides.weekdays),
            navigation: patch(self.navigation, overrides.navigation),
            input: patch(self.input, overrides.input),
            placeholder: patch(self.placeholder, overrides.placeholder),
            input_icon: patch(self.input_icon, overrides.input_icon),
            today_btn: patch(self.today_btn, overrides.today_btn),
            clear_btn: patch(self.clear_btn, overrides.clear_btn),
        }
    }
}

/// Per-part style overrides for [`Theme::merge`]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ThemeOverrides {
    pub background: Option<Style>,
    pub text: Option<Style>,
    pub disabled_text: Option<Style>,
    pub selected: Option<Style>,
    pub cursor: Option<Style>,
    pub weekdays: Option<Style>,
    pub navigation: Option<Style>,
    pub input: Option<Style>,
    pub placeholder: Option<Style>,
    pub input_icon: Option<Style>,
    pub today_btn: Option<Style>,
    pub clear_btn: Option<Style>,
}
