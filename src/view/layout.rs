//! Layout rendering (header and footer)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::model::{DeviceStatus, SessionView, SortMode};

pub fn render_header(frame: &mut Frame, area: Rect, session: &SessionView) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Source
            Constraint::Percentage(40), // Destination
            Constraint::Percentage(20), // Sort mode
        ])
        .split(area);

    let source = Paragraph::new(session.source_label.as_str())
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Source (s) ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(source, chunks[0]);

    let (destination_text, destination_style) = match &session.destination_label {
        Some(name) => (name.as_str(), Style::default().fg(Color::Green)),
        None => ("None selected", Style::default().fg(Color::DarkGray)),
    };
    let destination = Paragraph::new(destination_text)
        .style(destination_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Destination (d) ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(destination, chunks[1]);

    let sort_style = match session.sort_mode {
        SortMode::NewestFirst => Style::default().fg(Color::Cyan),
        SortMode::OldestFirst => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    };
    let sort = Paragraph::new(session.sort_mode.label())
        .style(sort_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Order (o) ")
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(sort, chunks[2]);
}

pub fn render_footer(frame: &mut Frame, area: Rect, session: &SessionView, device: &DeviceStatus) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Controls
            Constraint::Length(30), // Device
        ])
        .split(area);

    let key = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    let mut spans = vec![
        Span::styled("←", key),
        Span::raw(" remove  "),
        Span::styled("→", key),
        Span::raw(" keep  "),
        Span::styled("↑", key),
        Span::raw(" add to playlist  "),
    ];
    if session.undo_available > 0 {
        spans.push(Span::styled("u", key));
        spans.push(Span::raw(format!(" undo ({})  ", session.undo_available)));
    }
    spans.push(Span::styled("?", key));
    spans.push(Span::raw(" help"));

    let controls = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Controls ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(controls, chunks[0]);

    let (device_text, device_style) = match device {
        DeviceStatus::Connecting => ("Connecting...".to_string(), Style::default().fg(Color::Yellow)),
        DeviceStatus::Ready { name, .. } => (format!("🎵 {}", name), Style::default().fg(Color::Cyan)),
        DeviceStatus::Unavailable => ("No player".to_string(), Style::default().fg(Color::Red)),
    };
    let device = Paragraph::new(device_text)
        .style(device_style)
        .block(Block::default().borders(Borders::ALL).title(" Device "));
    frame.render_widget(device, chunks[1]);
}
