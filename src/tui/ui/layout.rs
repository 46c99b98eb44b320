use ratatui::layout::Constraint;
use ratatui::prelude::{Direction, Layout, Rect};
use std::rc::Rc;

/// Area inside a one-cell border. Degenerate areas collapse to zero size.
pub(super) fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

pub(super) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let rows = split_even(
        r,
        Direction::Vertical,
        [
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ],
    );
    split_even(
        rows[1],
        Direction::Horizontal,
        [
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ],
    )[1]
}

/// `n` equal columns across `area`.
pub(super) fn columns(area: Rect, n: u16) -> Rc<[Rect]> {
    let width = area.width / n.max(1);
    split_even(area, Direction::Horizontal, (0..n).map(|_| Constraint::Length(width)))
}

fn split_even(
    area: Rect,
    direction: Direction,
    constraints: impl IntoIterator<Item = Constraint>,
) -> Rc<[Rect]> {
    Layout::default().direction(direction).constraints(constraints).split(area)
}
