//! Overlay rendering (sign-in, start gate, pickers, prompts, help)

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::model::{
    AuthState, DeviceStatus, LIBRARY_LABEL, Picker, PickerKind, SessionView, UiState,
};
use super::utils::{centered_rect, truncate_string};

pub fn render_sign_in(frame: &mut Frame, auth_state: &AuthState) {
    let lines = match auth_state {
        AuthState::Loading => vec![
            Line::from(Span::styled(
                "Signing in...",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Finish the sign-in in your browser if it opened."),
        ],
        _ => vec![
            Line::from(Span::styled(
                "Spotify Triage",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Swipe through your library and clean it up."),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::raw(" sign in with Spotify   "),
                Span::styled("q", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::raw(" quit"),
            ]),
        ],
    };

    let popup_area = centered_rect(frame.area(), 56, lines.len() as u16 + 4);
    frame.render_widget(Clear, popup_area);

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .padding(ratatui::widgets::Padding::vertical(1)),
        );
    frame.render_widget(widget, popup_area);
}

/// What the start gate can offer right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateStatus {
    Loading,
    Empty,
    Connecting,
    Ready,
}

fn gate_status(session: &SessionView, device: &DeviceStatus) -> GateStatus {
    if session.loading {
        GateStatus::Loading
    } else if session.remaining == 0 {
        GateStatus::Empty
    } else if *device == DeviceStatus::Connecting {
        GateStatus::Connecting
    } else {
        GateStatus::Ready
    }
}

/// Playback only begins after an explicit start.
pub fn render_start_gate(frame: &mut Frame, session: &SessionView, device: &DeviceStatus) {
    let key = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    let status = match gate_status(session, device) {
        GateStatus::Loading => Line::from(Span::styled(
            "Loading tracks...",
            Style::default().fg(Color::Yellow),
        )),
        GateStatus::Empty => Line::from(vec![
            Span::styled("No playable tracks here. ", Style::default().fg(Color::Red)),
            Span::styled("s", key),
            Span::raw(" to pick another"),
        ]),
        GateStatus::Connecting => Line::from(Span::styled(
            "Connecting to player...",
            Style::default().fg(Color::Yellow),
        )),
        GateStatus::Ready => Line::from(vec![
            Span::raw("Press "),
            Span::styled("Enter", key),
            Span::raw(" to start"),
        ]),
    };

    let lines = vec![
        Line::from(Span::styled(
            truncate_string(&session.source_label, 44),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            session.sort_mode.label(),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        status,
    ];

    let popup_area = centered_rect(frame.area(), 50, 8);
    frame.render_widget(Clear, popup_area);

    let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Ready? ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(widget, popup_area);
}

pub fn render_picker(frame: &mut Frame, ui_state: &UiState, picker: &Picker) {
    let (title, names): (&str, Vec<&str>) = match picker.kind {
        PickerKind::Source => (
            " Source (↑↓ Enter Esc) ",
            std::iter::once(LIBRARY_LABEL)
                .chain(ui_state.playlists.iter().map(|p| p.name.as_str()))
                .collect(),
        ),
        PickerKind::Destination => (
            " Destination (↑↓ Enter Esc) ",
            ui_state.playlists.iter().map(|p| p.name.as_str()).collect(),
        ),
    };

    let max_name_len = names.iter().map(|n| n.chars().count()).max().unwrap_or(30);
    let popup_width = (max_name_len as u16 + 6).clamp(35, 60);
    let popup_height = (names.len() as u16 + 2).max(6);
    let popup_area = centered_rect(frame.area(), popup_width, popup_height);
    let name_width = popup_area.width.saturating_sub(4) as usize;

    frame.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let style = if i == picker.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(truncate_string(name, name_width)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title)
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );

    let mut list_state = ListState::default();
    list_state.select(Some(picker.selected));

    frame.render_stateful_widget(list, popup_area, &mut list_state);
}

pub fn render_prompt(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref prompt) = ui_state.prompt {
        render_message_popup(frame, prompt, " Heads up (Enter to dismiss) ", Color::Yellow);
    }
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref error_msg) = ui_state.error_message {
        render_message_popup(frame, error_msg, " Error (Esc to dismiss) ", Color::Red);
    }
}

fn render_message_popup(frame: &mut Frame, message: &str, title: &str, color: Color) {
    let area = frame.area();

    let popup_width = 52.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4).max(1) as usize;

    let line_count = message.chars().count().div_ceil(inner_width).max(1) as u16;
    let popup_area = centered_rect(area, popup_width, line_count + 2);

    frame.render_widget(Clear, popup_area);

    let widget = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title)
                .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(widget, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let keybindings = [
        ("", "── Triage ──"),
        ("← / h", "Remove from collection"),
        ("→ / l", "Keep"),
        ("↑ / k", "Add to destination playlist"),
        ("u / z", "Undo last removal"),
        ("", ""),
        ("", "── Session ──"),
        ("Enter", "Start / confirm"),
        ("s", "Choose source"),
        ("d", "Choose destination"),
        ("o", "Toggle newest / oldest first"),
        ("", ""),
        ("", "── General ──"),
        ("L", "Sign out"),
        ("?", "Toggle this help"),
        ("Esc", "Close popup"),
        ("q", "Quit"),
    ];

    let popup_area = centered_rect(frame.area(), 56, keybindings.len() as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^50}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>12}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help (? or Esc to close) ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(help_text, popup_area);
}
