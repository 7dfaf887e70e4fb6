//! Frame layout for the desk.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The fixed regions of a desk frame.
pub struct DeskLayout {
    pub header: Rect,
    pub editor_a: Rect,
    pub output_a: Rect,
    pub editor_b: Rect,
    pub output_b: Rect,
    pub log: Rect,
    pub footer: Rect,
}

/// Split the frame into header, two performer columns (editor + output
/// line each), log panel and help footer.
pub fn desk_layout(area: Rect) -> DeskLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // status header
            Constraint::Min(8),    // performer panes
            Constraint::Length(6), // log
            Constraint::Length(1), // help footer
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let column_a = split_pane(columns[0]);
    let column_b = split_pane(columns[1]);

    DeskLayout {
        header: rows[0],
        editor_a: column_a.0,
        output_a: column_a.1,
        editor_b: column_b.0,
        output_b: column_b.1,
        log: rows[2],
        footer: rows[3],
    }
}

fn split_pane(area: Rect) -> (Rect, Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);
    (parts[0], parts[1])
}

/// Overlay rect for the error banner, centered near the top.
pub fn banner_rect(area: Rect) -> Rect {
    let width = area.width.saturating_sub(8).clamp(20, 70).min(area.width);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    Rect {
        x,
        y: area.y + 1,
        width,
        height: 3,
    }
}
