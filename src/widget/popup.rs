use crate::calendar::{CellKind, DayCell, MonthGrid, DAYS_IN_WEEK};
use crate::options::{Icons, Options};
use crate::state::PickerState;
use ratatui::{prelude::*, widgets::*};
use std::iter::zip;
use time::Date;

/// Number of columns per day
const CELL_WIDTH: u16 = 4;

const WEEK_LEN: u16 = 7;

/// Rows of days in the grid
const GRID_ROWS: u16 = 6;

/// Lines taken up by the navigation row and the weekday header
const HEADER_LINES: u16 = 2;

/// Width of the popup, borders included
pub(crate) const POPUP_WIDTH: u16 = CELL_WIDTH * WEEK_LEN + 2;

/// Columns given to each of the previous/next month buttons
const NAV_BUTTON_WIDTH: u16 = 3;

/// Where each interactive part of the popup was drawn
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PopupLayout {
    pub(crate) area: Rect,
    pub(crate) inner: Rect,
    pub(crate) nav: Rect,
    pub(crate) prev: Rect,
    pub(crate) next: Rect,
    pub(crate) header: Rect,
    pub(crate) grid: Rect,
    pub(crate) today: Option<Rect>,
    pub(crate) clear: Option<Rect>,
}

impl PopupLayout {
    pub(crate) fn new(area: Rect, options: &Options) -> PopupLayout {
        let inner = area.inner(Margin::new(1, 1));
        let row = |dy: u16, height: u16| {
            Rect::new(inner.x, inner.y.saturating_add(dy), inner.width, height).intersection(inner)
        };
        let nav = row(0, 1);
        let prev = Rect {
            width: NAV_BUTTON_WIDTH.min(nav.width),
            ..nav
        };
        let next = Rect {
            x: nav.right().saturating_sub(NAV_BUTTON_WIDTH).max(nav.x),
            width: NAV_BUTTON_WIDTH.min(nav.width),
            ..nav
        };
        let header = row(1, 1);
        let grid = Rect {
            width: (CELL_WIDTH * WEEK_LEN).min(inner.width),
            ..row(HEADER_LINES, GRID_ROWS)
        };
        let footer = row(HEADER_LINES + GRID_ROWS, 1);
        let (today, clear) = match (options.today_btn, options.clear_btn) {
            (true, true) => {
                let half = footer.width / 2;
                let left = Rect {
                    width: half,
                    ..footer
                };
                let right = Rect {
                    x: footer.x + half,
                    width: footer.width - half,
                    ..footer
                };
                (Some(left), Some(right))
            }
            (true, false) => (Some(footer), None),
            (false, true) => (None, Some(footer)),
            (false, false) => (None, None),
        };
        PopupLayout {
            area,
            inner,
            nav,
            prev,
            next,
            header,
            grid,
            today,
            clear,
        }
    }

    /// Height of the popup, borders included
    pub(crate) fn height(options: &Options) -> u16 {
        let footer = u16::from(options.today_btn || options.clear_btn);
        HEADER_LINES + GRID_ROWS + footer + 2
    }

    /// Returns the grid index of the day drawn at `pos`
    pub(crate) fn cell_at(&self, pos: Position) -> Option<usize> {
        if !self.grid.contains(pos) {
            return None;
        }
        let col = (pos.x - self.grid.x) / CELL_WIDTH;
        let row = pos.y - self.grid.y;
        (col < WEEK_LEN).then_some(usize::from(row) * DAYS_IN_WEEK + usize::from(col))
    }

    fn cell_area(&self, row: u16, col: u16) -> Rect {
        Rect::new(
            self.grid.x.saturating_add(col * CELL_WIDTH),
            self.grid.y.saturating_add(row),
            CELL_WIDTH,
            1,
        )
        .intersection(self.grid)
    }
}

/// Places a popup of the given size directly below `trigger`, or above it if
/// there is only room there, keeping it inside `bounds` where possible
pub(crate) fn place_popup(trigger: Rect, bounds: Rect, width: u16, height: u16) -> Rect {
    let x = trigger
        .x
        .min(bounds.right().saturating_sub(width))
        .max(bounds.x);
    let below = trigger.bottom();
    let fits_below = below.saturating_add(height) <= bounds.bottom();
    let fits_above = trigger.y >= bounds.y.saturating_add(height);
    let y = if !fits_below && fits_above {
        trigger.y.saturating_sub(height)
    } else {
        below
    };
    Rect::new(x, y, width, height).intersection(bounds)
}

/// The calendar popup: month navigation, weekday header, the 42-day grid, and
/// the today/clear buttons
#[derive(Clone, Copy, Debug)]
pub(crate) struct Popup<'a> {
    options: &'a Options,
}

impl<'a> Popup<'a> {
    pub(crate) fn new(options: &'a Options) -> Popup<'a> {
        Popup { options }
    }
}

impl StatefulWidget for Popup<'_> {
    type State = PickerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let options = self.options;
        let theme = &options.theme;
        let layout = PopupLayout::new(area, options);
        Clear.render(area, buf);
        let mut block = Block::bordered().style(theme.background);
        if let Some(title) = &options.title {
            block = block
                .title(format!(" {title} "))
                .title_alignment(Alignment::Center);
        }
        block.render(area, buf);
        let view = state.view_month();
        let mut canvas = BufferCanvas::new(layout.inner, buf);
        canvas.draw_navigation(&layout, view, &options.icons, theme.navigation);
        match MonthGrid::for_month(view, options.week_start) {
            Ok(grid) => {
                canvas.draw_weekdays(&layout, grid.headers(&options.week_days), theme.weekdays);
                let cells = grid.cells(state.selected(), options);
                for (i, cell) in zip(0u16.., cells) {
                    let mut style = match cell.kind {
                        CellKind::Disabled => theme.disabled_text,
                        CellKind::Selected => theme.selected,
                        CellKind::Selectable => theme.text,
                    };
                    if cell.date == state.cursor() {
                        style = style.patch(theme.cursor);
                    }
                    let label = day_label(cell, state.today());
                    canvas.draw_day(&layout, i / WEEK_LEN, i % WEEK_LEN, &label, style);
                }
            }
            Err(e) => log::warn!("Cannot draw calendar for month of {view}: {e}"),
        }
        if let Some(today) = layout.today {
            canvas.draw_button(today, &options.today_btn_text, theme.today_btn);
        }
        if let Some(clear) = layout.clear {
            canvas.draw_button(clear, &options.clear_btn_text, theme.clear_btn);
        }
        state.popup = Some(layout);
    }
}

fn day_label(cell: DayCell, today: Date) -> String {
    if cell.date == today {
        format!("[{:2}]", cell.date.day())
    } else {
        format!(" {:2} ", cell.date.day())
    }
}

#[derive(Debug)]
struct BufferCanvas<'a> {
    bounds: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(bounds: Rect, buf: &'a mut Buffer) -> Self {
        Self { bounds, buf }
    }

    fn draw_navigation(&mut self, layout: &PopupLayout, view: Date, icons: &Icons, style: Style) {
        let nav = layout.nav;
        self.print(nav, nav.x.saturating_add(1), &icons.prev, style);
        let next_x = nav
            .right()
            .saturating_sub(1)
            .saturating_sub(text_width(&icons.next));
        self.print(nav, next_x, &icons.next, style);
        let label = format!("{} {}", view.month(), view.year());
        self.print_centered(nav, &label, style);
    }

    fn draw_weekdays(&mut self, layout: &PopupLayout, labels: [&str; DAYS_IN_WEEK], style: Style) {
        for (col, label) in zip(0u16.., labels) {
            let x = layout.header.x.saturating_add(col * CELL_WIDTH);
            self.print(layout.header, x, &format!("{label:^4.4}"), style);
        }
    }

    fn draw_day(&mut self, layout: &PopupLayout, row: u16, col: u16, label: &str, style: Style) {
        let area = layout.cell_area(row, col);
        self.print(area, area.x, label, style);
    }

    fn draw_button(&mut self, area: Rect, text: &str, style: Style) {
        self.buf.set_style(area.intersection(self.bounds), style);
        self.print_centered(area, text, style);
    }

    fn print_centered(&mut self, area: Rect, s: &str, style: Style) {
        let x = area
            .x
            .saturating_add(area.width.saturating_sub(text_width(s)) / 2);
        self.print(area, x, s, style);
    }

    // Text that would extend beyond `area` (or the popup's inner area) is
    // truncated.
    fn print(&mut self, area: Rect, x: u16, s: &str, style: Style) {
        let area = area.intersection(self.bounds);
        if area.is_empty() || x < area.x || x >= area.right() {
            return;
        }
        self.buf
            .set_stringn(x, area.y, s, usize::from(area.right() - x), style);
    }
}

fn text_width(s: &str) -> u16 {
    u16::try_from(Span::raw(s).width()).unwrap_or(u16::MAX)
}
