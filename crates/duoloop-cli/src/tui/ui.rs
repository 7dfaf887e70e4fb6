//! UI rendering for the desk.

use duoloop_core::{presenter, DisplayClass, LiveSession, PatternEngine, Slot};
use log::Level;
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use super::app::DeskApp;
use super::layout::{banner_rect, desk_layout};

/// Render one desk frame.
pub fn render_ui<E: PatternEngine>(frame: &mut Frame, app: &DeskApp, session: &LiveSession<E>) {
    let layout = desk_layout(frame.area());

    render_status(frame, layout.header, session);
    render_pane(frame, layout.editor_a, layout.output_a, app, session, Slot::A);
    render_pane(frame, layout.editor_b, layout.output_b, app, session, Slot::B);
    render_log(frame, layout.log, app);
    render_footer(frame, layout.footer);

    if let Some(message) = app.banner() {
        render_banner(frame, banner_rect(frame.area()), message);
    }
}

fn class_color(class: DisplayClass) -> Color {
    match class {
        DisplayClass::Neutral => Color::DarkGray,
        DisplayClass::Ready => Color::Yellow,
        DisplayClass::Running => Color::Green,
        DisplayClass::Success => Color::Green,
        DisplayClass::Error => Color::Red,
    }
}

fn render_status<E: PatternEngine>(frame: &mut Frame, area: Rect, session: &LiveSession<E>) {
    let status =
        presenter::global_status(session.phase(), session.playing_count(), session.bpm());
    let paragraph = Paragraph::new(Line::from(Span::styled(
        status.text,
        Style::default()
            .fg(class_color(status.class))
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(" duoloop "));
    frame.render_widget(paragraph, area);
}

fn render_pane<E: PatternEngine>(
    frame: &mut Frame,
    editor_area: Rect,
    output_area: Rect,
    app: &DeskApp,
    session: &LiveSession<E>,
    slot: Slot,
) {
    let focused = app.focused == slot;
    let editor = app.editor(slot);

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let playing_mark = if session.is_playing(slot) { "▶ " } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {playing_mark}performer {slot} "));

    let inner = block.inner(editor_area);
    let (cursor_row, cursor_col) = editor.cursor();

    // Keep the cursor line visible in short panes.
    let scroll = (cursor_row as u16).saturating_sub(inner.height.saturating_sub(1));

    let text: Vec<Line> = editor
        .lines()
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();
    let paragraph = Paragraph::new(text).block(block).scroll((scroll, 0));
    frame.render_widget(paragraph, editor_area);

    if focused {
        let x = inner.x + (cursor_col as u16).min(inner.width.saturating_sub(1));
        let y = inner.y + (cursor_row as u16).saturating_sub(scroll);
        frame.set_cursor_position(Position::new(x, y));
    }

    let output = presenter::slot_output(session.performer(slot));
    let output_paragraph = Paragraph::new(Line::from(Span::styled(
        output.text,
        Style::default().fg(class_color(output.class)),
    )))
    .block(Block::default().borders(Borders::ALL).title(" output "));
    frame.render_widget(output_paragraph, output_area);
}

fn render_log(frame: &mut Frame, area: Rect, app: &DeskApp) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .log_buffer
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|entry| {
            let color = match entry.level {
                Level::Error => Color::Red,
                Level::Warn => Color::Yellow,
                Level::Info => Color::White,
                Level::Debug | Level::Trace => Color::DarkGray,
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(entry.message.clone(), Style::default().fg(color)),
            ]))
        })
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" log "));
    frame.render_widget(list, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(
        "Tab focus · Ctrl-A start audio · Ctrl-E eval · Ctrl-S stop all · Ctrl-↑/↓ bpm · Ctrl-Q quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(help, area);
}

fn render_banner(frame: &mut Frame, area: Rect, message: &str) {
    frame.render_widget(Clear, area);
    let banner = Paragraph::new(Line::from(Span::styled(
        message,
        Style::default().fg(Color::White).bg(Color::Red),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" error "),
    );
    frame.render_widget(banner, area);
}
