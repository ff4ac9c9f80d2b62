use crate::options::Options;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use time::Date;

/// The default trigger: a read-only text field showing the date, or the
/// placeholder when there is none
#[derive(Clone, Copy, Debug)]
pub(crate) struct Input<'a> {
    options: &'a Options,
    date: Option<Date>,
}

impl<'a> Input<'a> {
    pub(crate) fn new(options: &'a Options, date: Option<Date>) -> Input<'a> {
        Input { options, date }
    }
}

impl Widget for Input<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.options.theme;
        buf.set_style(area, theme.input);
        let icon = Span::styled(format!(" {} ", self.options.icons.input), theme.input_icon);
        let text = match self.date {
            Some(date) => Span::raw(self.options.format_date(date)),
            None => Span::styled(self.options.input_placeholder.as_str(), theme.placeholder),
        };
        Line::from(vec![icon, text]).render(area, buf);
    }
}
