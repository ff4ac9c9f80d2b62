use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

/// Width of the key column
const KEYS_WIDTH: usize = 16;

static BINDINGS: &[(&str, &str)] = &[
    ("TAB, ENTER", "Open the calendar"),
    ("h, LEFT", "Previous day"),
    ("l, RIGHT", "Next day"),
    ("k, UP", "Same day last week"),
    ("j, DOWN", "Same day next week"),
    ("<, PAGE UP", "Previous month"),
    (">, PAGE DOWN", "Next month"),
    ("ENTER, SPACE", "Pick the highlighted day"),
    ("t", "Pick today"),
    ("BACKSPACE", "Clear the date"),
    ("q, ESC", "Close the calendar, or quit"),
    ("?", "Show this help"),
];

static FOOTER: &[&str] = &["Mouse clicks work too.", "Press the Any Key to dismiss."];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn text() -> Text<'static> {
        let mut lines = BINDINGS
            .iter()
            .map(|&(keys, what)| {
                Line::from(vec![
                    Span::styled(format!("{keys:KEYS_WIDTH$}"), Modifier::BOLD),
                    Span::raw(what),
                ])
            })
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.extend(FOOTER.iter().map(|&s| Line::raw(s)));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        // Content plus borders plus one column of padding on each side
        let fit = |n: usize, max: u16, extra: u16| {
            u16::try_from(n)
                .unwrap_or(u16::MAX)
                .saturating_add(extra)
                .min(max)
        };
        let width = fit(text.width(), area.width, 4);
        let height = fit(text.height(), area.height, 2);
        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [help_area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(column);
        Clear.render(help_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center)
                    .padding(Padding::horizontal(1)),
            )
            .style(self.0)
            .render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_small_area() {
        let area = Rect::new(0, 0, 20, 6);
        let mut buffer = Buffer::empty(area);
        Help(Style::new()).render(area, &mut buffer);
        let top = (0..20).map(|x| buffer[(x, 0)].symbol()).collect::<String>();
        assert!(top.starts_with('┌'));
        assert!(top.ends_with('┐'));
        assert!(top.contains(" Commands "));
    }
}
