//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (truncation, popup placement)
//! - `layout`: Header with selectors and footer with controls
//! - `card`: The current track card
//! - `overlays`: Modal overlays (sign-in, start gate, pickers, prompts, help)

mod utils;
mod layout;
mod card;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{AuthState, DeviceStatus, SessionView, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        auth_state: &AuthState,
        ui_state: &UiState,
        session: &SessionView,
        device: &DeviceStatus,
    ) {
        // Nothing but the sign-in screen until the gate opens
        if !matches!(auth_state, AuthState::Authenticated { .. }) {
            overlays::render_sign_in(frame, auth_state);
            if ui_state.error_message.is_some() {
                overlays::render_error_notification(frame, ui_state);
            }
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Source / destination / sort
                Constraint::Min(0),    // Card
                Constraint::Length(3), // Controls + device
            ])
            .split(frame.area());

        layout::render_header(frame, chunks[0], session);
        card::render_card_area(frame, chunks[1], session);
        layout::render_footer(frame, chunks[2], session, device);

        if !session.started {
            overlays::render_start_gate(frame, session, device);
        }

        if let Some(picker) = &ui_state.picker {
            overlays::render_picker(frame, ui_state, picker);
        }

        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }

        if ui_state.prompt.is_some() {
            overlays::render_prompt(frame, ui_state);
        }

        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }
    }
}
