//! Authentication gate.
//!
//! Nothing talks to the Web API unless the gate is `Authenticated`.

use crate::error::SessionError;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Loading,
    Unauthenticated,
    Authenticated { access_token: String },
}

#[derive(Clone, Debug, Default)]
pub struct SessionGate {
    state: AuthState,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn access_token(&self) -> Result<&str, SessionError> {
        match &self.state {
            AuthState::Authenticated { access_token } => Ok(access_token),
            _ => Err(SessionError::NotAuthenticated),
        }
    }

    /// Enter `Loading` for a browser sign-in. Only valid from `Unauthenticated`.
    pub fn begin_sign_in(&mut self) -> bool {
        if self.state == AuthState::Unauthenticated {
            self.state = AuthState::Loading;
            true
        } else {
            false
        }
    }

    pub fn authenticate(&mut self, access_token: String) {
        self.state = AuthState::Authenticated { access_token };
    }

    pub fn reject(&mut self) {
        self.state = AuthState::Unauthenticated;
    }
}
