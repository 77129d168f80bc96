//! Track card rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::SessionView;
use super::utils::{centered_rect, truncate_string};

const CARD_WIDTH: u16 = 64;
const CARD_HEIGHT: u16 = 12;

pub fn render_card_area(frame: &mut Frame, area: Rect, session: &SessionView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Card
            Constraint::Length(1), // Stack counter
        ])
        .split(area);

    if session.loading {
        render_message(frame, chunks[0], "Loading tracks...", Color::Yellow);
    } else if session.exhausted {
        render_message(frame, chunks[0], "No more tracks in this collection.", Color::DarkGray);
    } else if let Some(card) = &session.top {
        let card_area = centered_rect(chunks[0], CARD_WIDTH, CARD_HEIGHT);
        let text_width = card_area.width.saturating_sub(6) as usize;

        let label = Style::default().fg(Color::DarkGray);
        let mut lines = vec![
            Line::from(Span::styled(
                truncate_string(&card.title, text_width),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                truncate_string(&card.artists, text_width),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Album  ", label),
                Span::raw(truncate_string(&card.album, text_width.saturating_sub(7))),
            ]),
        ];
        if let Some(added) = &card.added {
            lines.push(Line::from(vec![Span::styled("Added  ", label), Span::raw(added.clone())]));
        }
        if let Some(url) = &card.artwork_url {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                truncate_string(url, text_width),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }

        let widget = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green))
                    .padding(Padding::uniform(1)),
            );
        frame.render_widget(widget, card_area);
    } else {
        render_message(frame, chunks[0], "No playable tracks in this collection.", Color::DarkGray);
    }

    let counter = Paragraph::new(format!(
        "{} left · {} undoable",
        session.remaining, session.undo_available
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(counter, chunks[1]);
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let message_area = centered_rect(area, 50, 3);
    let widget = Paragraph::new(message)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, message_area);
}
