//! Swipe session: the stack of undecided tracks, the undo history and the
//! transitions between them.
//!
//! Transitions mutate local state immediately and hand back the remote calls
//! they imply. The caller dispatches those detached; nothing here waits for or
//! reacts to their outcome, so a failed delete is never rolled back.

use crate::error::SessionError;

use super::api::RemoteCall;
use super::cards::{CardFace, CardRegistry};
use super::loader::LoadTicket;
use super::stack::{TrackStack, UndoHistory};
use super::types::{Selectors, SortMode, Source, TrackEntry};

/// A directional gesture or its equivalent control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeAction {
    /// Left: delete from the source
    Reject,
    /// Right: keep, no remote call
    Keep,
    /// Up: add to the destination playlist
    File,
    Undo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Rejected,
    Kept,
    Filed,
    Restored,
}

/// Result of applying a `SwipeAction`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    pub decision: Option<Decision>,
    pub entry: Option<TrackEntry>,
    pub effects: Vec<RemoteCall>,
}

impl Transition {
    pub fn idle() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_idle(&self) -> bool {
        self.decision.is_none()
    }

    /// Uri the playback echo targets, if this transition emitted one.
    #[cfg(test)]
    pub fn echo_uri(&self) -> Option<&str> {
        self.effects.iter().find_map(|call| match call {
            RemoteCall::Echo { uri } => Some(uri.as_str()),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct SwipeSession {
    selectors: Selectors,
    stack: TrackStack,
    history: UndoHistory,
    cards: CardRegistry,
    generation: u64,
    loading: bool,
    populated: bool,
    started: bool,
}

impl SwipeSession {
    pub fn new(selectors: Selectors) -> Self {
        Self {
            selectors,
            ..Self::default()
        }
    }

    pub fn selectors(&self) -> &Selectors {
        &self.selectors
    }

    #[cfg(test)]
    pub fn top(&self) -> Option<&TrackEntry> {
        self.stack.peek_top()
    }

    pub fn top_card(&self) -> Option<&CardFace> {
        self.stack
            .peek_top()
            .and_then(|e| self.cards.get(&e.track.id))
    }

    #[cfg(test)]
    pub fn stack(&self) -> &TrackStack {
        &self.stack
    }

    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// The stack ran dry after having held at least one entry.
    pub fn is_exhausted(&self) -> bool {
        self.populated && !self.loading && self.stack.is_empty()
    }

    // ========================================================================
    // Selectors & loading
    // ========================================================================

    /// Invalidate the current stack and history and hand out a ticket for the
    /// load that will replace them.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.stack.clear();
        self.history.clear();
        self.cards.clear();
        self.loading = true;
        self.populated = false;
        LoadTicket {
            generation: self.generation,
            source: self.selectors.source.clone(),
            sort_mode: self.selectors.sort_mode,
        }
    }

    /// Switching the source also closes the start gate.
    pub fn set_source(&mut self, source: Source) -> LoadTicket {
        self.selectors.source = source;
        self.close_start_gate();
        self.begin_load()
    }

    /// Require a fresh start before the next swipe.
    pub fn close_start_gate(&mut self) {
        self.started = false;
    }

    pub fn set_sort_mode(&mut self, sort_mode: SortMode) -> LoadTicket {
        self.selectors.sort_mode = sort_mode;
        self.begin_load()
    }

    pub fn toggle_sort_mode(&mut self) -> LoadTicket {
        let next = self.selectors.sort_mode.toggle();
        self.set_sort_mode(next)
    }

    /// Does not touch the stack.
    pub fn set_destination(&mut self, destination: Option<String>) {
        self.selectors.destination = destination;
    }

    /// Replace the stack with a loaded window (presentation order).
    ///
    /// Returns false and leaves everything untouched when the ticket was
    /// superseded by a later selector change.
    pub fn install(&mut self, ticket: &LoadTicket, entries: Vec<TrackEntry>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.stack = TrackStack::from_presentation_order(entries);
        self.cards.rebuild(&self.stack);
        self.history.clear();
        self.loading = false;
        self.populated = !self.stack.is_empty();
        true
    }

    pub fn fail_load(&mut self, ticket: &LoadTicket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.loading = false;
        true
    }

    /// Open the start gate; returns the echo for the current top entry.
    pub fn start(&mut self) -> Option<RemoteCall> {
        let top = self.stack.peek_top()?;
        self.started = true;
        Some(RemoteCall::Echo {
            uri: top.uri().to_string(),
        })
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    pub fn apply(&mut self, action: SwipeAction) -> Result<Transition, SessionError> {
        match action {
            SwipeAction::Reject => Ok(self.reject()),
            SwipeAction::Keep => Ok(self.keep()),
            SwipeAction::File => self.file(),
            SwipeAction::Undo => Ok(self.undo()),
        }
    }

    fn reject(&mut self) -> Transition {
        let Some(entry) = self.pop_top() else {
            return Transition::idle();
        };
        let source = self.selectors.source.clone();
        self.history.push(entry.clone(), source.clone());

        let mut effects = vec![RemoteCall::Remove {
            source,
            entry: entry.clone(),
        }];
        effects.extend(self.echo_top());

        Transition {
            decision: Some(Decision::Rejected),
            entry: Some(entry),
            effects,
        }
    }

    fn keep(&mut self) -> Transition {
        let Some(entry) = self.pop_top() else {
            return Transition::idle();
        };
        Transition {
            decision: Some(Decision::Kept),
            entry: Some(entry),
            effects: self.echo_top().into_iter().collect(),
        }
    }

    fn file(&mut self) -> Result<Transition, SessionError> {
        if self.stack.is_empty() {
            return Ok(Transition::idle());
        }
        let playlist_id = self
            .selectors
            .destination
            .clone()
            .ok_or(SessionError::MissingDestination)?;
        let Some(entry) = self.pop_top() else {
            return Ok(Transition::idle());
        };

        let mut effects = vec![RemoteCall::AddToPlaylist {
            playlist_id,
            entry: entry.clone(),
        }];
        effects.extend(self.echo_top());

        Ok(Transition {
            decision: Some(Decision::Filed),
            entry: Some(entry),
            effects,
        })
    }

    fn undo(&mut self) -> Transition {
        let Some(record) = self.history.pop() else {
            return Transition::idle();
        };
        let entry = record.entry;
        self.cards.insert(&entry);
        self.stack.push_back(entry.clone());

        Transition {
            decision: Some(Decision::Restored),
            entry: Some(entry.clone()),
            effects: vec![
                RemoteCall::Restore {
                    source: record.source,
                    entry: entry.clone(),
                },
                RemoteCall::Echo {
                    uri: entry.uri().to_string(),
                },
            ],
        }
    }

    fn pop_top(&mut self) -> Option<TrackEntry> {
        let entry = self.stack.pop()?;
        self.cards.remove(&entry.track.id);
        Some(entry)
    }

    /// Echo for whatever is on top after a pop; nothing when the stack is empty.
    fn echo_top(&self) -> Option<RemoteCall> {
        self.stack.peek_top().map(|e| RemoteCall::Echo {
            uri: e.uri().to_string(),
        })
    }

    #[cfg(test)]
    pub(crate) fn history_contains(&self, track_id: &str) -> bool {
        self.history.contains(track_id)
    }

    #[cfg(test)]
    pub(crate) fn card_count(&self) -> usize {
        self.cards.len()
    }
}
