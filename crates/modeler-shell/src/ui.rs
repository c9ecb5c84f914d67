use modeler_bridge::EventKind;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::status_manager::MessageType;

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(3), // Save trigger
            Constraint::Min(0),    // Diagram source and event log
            Constraint::Length(2), // Status bar
        ])
        .split(f.size());

    draw_title_bar(f, app, chunks[0]);
    draw_save_trigger(f, app, chunks[1]);

    if app.ui_state.is_help_shown() {
        draw_help(f, chunks[2]);
    } else {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(chunks[2]);
        draw_document(f, app, panes[0]);
        draw_event_log(f, app, panes[1]);
    }

    draw_status_bar(f, app, chunks[3]);
}

fn draw_title_bar(f: &mut Frame, app: &App, area: Rect) {
    let editor = match app.editor_name() {
        Some(name) => format!("editor: {}", name),
        None => String::from("no editor"),
    };
    let title = format!(
        "  Modeler Shell -- {} [rev {}] ({})",
        app.summary().label(),
        app.document().revision,
        editor
    );

    let title_bar = Paragraph::new(title)
        .style(Style::default().bg(Color::Blue).fg(Color::White))
        .alignment(Alignment::Left);

    f.render_widget(title_bar, area);
}

fn draw_save_trigger(f: &mut Frame, app: &App, area: Rect) {
    let (label, style) = if app.ui_state.save_in_flight {
        (
            " Saving... ",
            Style::default().fg(Color::White).bg(Color::DarkGray),
        )
    } else {
        (
            " Save Diagram ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    };

    let width = (label.len() as u16 + 2).min(area.width.saturating_sub(1));
    let button_area = Rect {
        x: area.x + 1,
        y: area.y,
        width,
        height: area.height,
    };

    let button = Paragraph::new(Line::from(Span::styled(label, style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(button, button_area);

    if let Some(saved) = app.last_saved().filter(|_| area.height >= 3) {
        let detail_area = Rect {
            x: button_area.x + button_area.width + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(button_area.width + 2),
            height: 1,
        };
        let detail = Paragraph::new(format!(
            "last save: {} bytes{}",
            saved.xml.len(),
            if saved.svg.is_some() { " + preview" } else { "" }
        ))
        .style(Style::default().fg(Color::DarkGray));
        f.render_widget(detail, detail_area);
    }
}

fn draw_document(f: &mut Frame, app: &mut App, area: Rect) {
    app.sync_view();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" diagram.bpmn ({} lines) ", app.view.line_count()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    app.view.set_viewport_height(inner.height as usize);

    let gutter = if app.config.ui.line_numbers { 6 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(gutter), // Line numbers
            Constraint::Min(0),         // Source
        ])
        .split(inner);

    let lines = app.view.visible_lines();
    if app.config.ui.line_numbers {
        let start = app.view.viewport_offset();
        let numbers: Vec<Line> = (0..lines.len())
            .map(|i| Line::from(format!("{:>4} ", start + i + 1)))
            .collect();
        let line_numbers =
            Paragraph::new(numbers).style(Style::default().fg(Color::DarkGray));
        f.render_widget(line_numbers, chunks[0]);
    }

    let source: Vec<Line> = lines.into_iter().map(Line::from).collect();
    let content = Paragraph::new(source).style(Style::default().fg(Color::White));
    f.render_widget(content, chunks[1]);
}

fn kind_style(kind: EventKind) -> Style {
    let color = match kind {
        EventKind::ContentSaved => Color::Green,
        EventKind::Notification => Color::Yellow,
        EventKind::UiUpdateRequired => Color::Cyan,
        EventKind::PanelResized => Color::Magenta,
        EventKind::InnerEvent => Color::DarkGray,
        EventKind::Unknown => Color::Red,
    };
    Style::default().fg(color)
}

fn draw_event_log(f: &mut Frame, app: &App, area: Rect) {
    let mut title = format!(" Events ({} bpmn.io) ", app.ui_state.inner_event_count());
    if let Some(width) = app.ui_state.panel_width {
        title = format!("{}[panel {}] ", title, width);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title);
    let inner = block.inner(area);

    // Newest entries at the bottom
    let mut lines: Vec<Line> = app
        .ui_state
        .event_log()
        .rev()
        .take(inner.height as usize)
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", entry.at.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(format!("{} ", entry.kind), kind_style(entry.kind)),
                Span::raw(entry.summary.clone()),
            ])
        })
        .collect();
    lines.reverse();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Shortcuts
            Constraint::Length(1), // Status message
        ])
        .split(area);

    let key = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let shortcuts = vec![
        Span::styled("Enter/s", key),
        Span::raw(" Save  "),
        Span::styled("jk", key),
        Span::raw(" Scroll  "),
        Span::styled("r", key),
        Span::raw(" Reload config  "),
        Span::styled("?", key),
        Span::raw(" Help  "),
        Span::styled("q", key),
        Span::raw(" Quit"),
    ];
    let shortcut_bar =
        Paragraph::new(Line::from(shortcuts)).style(Style::default().bg(Color::DarkGray));
    f.render_widget(shortcut_bar, chunks[0]);

    if let Some(message) = app.ui_state.status_manager.current() {
        let color = match message.message_type {
            MessageType::Info => Color::White,
            MessageType::Success => Color::Green,
            MessageType::Warning => Color::Yellow,
            MessageType::Error => Color::Red,
        };
        let status = Paragraph::new(message.content.clone()).style(Style::default().fg(color));
        f.render_widget(status, chunks[1]);
    }
}

fn draw_help(f: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            " HELP -- Modeler Shell",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(" Diagram:"),
        Line::from("  Enter, s, Ctrl+S   Save Diagram   - Ask the editor for its current XML"),
        Line::from("  r                  Reload config  - Re-read config.json"),
        Line::from(""),
        Line::from(" Source view:"),
        Line::from("  j k, Arrow keys    Scroll one line"),
        Line::from("  PageUp PageDown    Scroll one page"),
        Line::from("  g G, Home End      Jump to top or bottom"),
        Line::from(""),
        Line::from(" General:"),
        Line::from("  q, Esc, Ctrl+C     Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Press ? to exit help",
            Style::default().add_modifier(Modifier::ITALIC),
        )]),
    ];

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(Color::Blue)),
        )
        .alignment(Alignment::Left);

    f.render_widget(help, area);
}
