//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{AuthState, PickerKind, SwipeAction};
use super::AppController;

fn swipe_action(code: KeyCode) -> Option<SwipeAction> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(SwipeAction::Reject),
        KeyCode::Right | KeyCode::Char('l') => Some(SwipeAction::Keep),
        KeyCode::Up | KeyCode::Char('k') => Some(SwipeAction::File),
        KeyCode::Char('u') | KeyCode::Char('z') | KeyCode::Backspace => Some(SwipeAction::Undo),
        _ => None,
    }
}

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true).await;
            return Ok(());
        }

        // Session gate: nothing but sign-in and quit until authenticated
        match model.get_auth_state().await {
            AuthState::Authenticated { .. } => {}
            AuthState::Unauthenticated => {
                match key.code {
                    KeyCode::Enter => {
                        drop(model);
                        let controller = self.clone();
                        tokio::spawn(async move {
                            controller.sign_in().await;
                        });
                    }
                    KeyCode::Char('q') | KeyCode::Esc => model.set_should_quit(true).await,
                    KeyCode::Char(_) if model.has_error().await => model.clear_error().await,
                    _ => {}
                }
                return Ok(());
            }
            AuthState::Loading => {
                if key.code == KeyCode::Char('q') {
                    model.set_should_quit(true).await;
                }
                return Ok(());
            }
        }

        // Precondition prompt blocks everything until dismissed
        if model.has_prompt().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_prompt().await;
            }
            return Ok(());
        }

        if model.has_error().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.clear_error().await;
            }
            return Ok(());
        }

        if model.is_help_popup_open().await {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                model.hide_help_popup().await;
            }
            return Ok(());
        }

        if model.is_picker_open().await {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => model.picker_move_up().await,
                KeyCode::Down | KeyCode::Char('j') => model.picker_move_down().await,
                KeyCode::Enter => {
                    drop(model);
                    self.apply_picker_choice().await;
                }
                KeyCode::Esc => model.close_picker().await,
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') => model.set_should_quit(true).await,
            KeyCode::Char('?') => model.show_help_popup().await,
            KeyCode::Char('s') => model.open_picker(PickerKind::Source).await,
            KeyCode::Char('d') => model.open_picker(PickerKind::Destination).await,
            KeyCode::Char('L') => {
                drop(model);
                self.sign_out().await;
            }
            KeyCode::Char('o') => {
                drop(model);
                self.toggle_sort_mode().await;
            }
            KeyCode::Enter => {
                drop(model);
                self.start_session().await;
            }
            code => {
                if let Some(action) = swipe_action(code) {
                    drop(model);
                    self.swipe(action).await;
                }
            }
        }

        Ok(())
    }
}
