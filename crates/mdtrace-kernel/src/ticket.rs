//! Ticket lifecycle: `New -> InProgress -> Used`.
//!
//! A ticket brackets a region of interest. While any ticket is in progress
//! the gate is forced open, regardless of mute or condition state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle state of one ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketState {
    New,
    InProgress,
    Used,
}

impl TicketState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Used => "used",
        }
    }
}

impl std::fmt::Display for TicketState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All tickets registered with one engine, keyed by caller-chosen id.
///
/// Tickets are never removed. Transitions only move forward; the single
/// way back is [`TicketBook::add`], which resets a ticket to `New`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketBook {
    tickets: BTreeMap<String, TicketState>,
}

impl TicketBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` as `New`, resetting any previous state.
    ///
    /// Returns true when the stored state changed.
    pub fn add(&mut self, id: impl Into<String>) -> bool {
        self.transition(id.into(), |_| Some(TicketState::New))
    }

    /// Move `id` to `InProgress`.
    ///
    /// Unknown ids are registered directly as `InProgress`. A `Used`
    /// ticket stays `Used`.
    pub fn start(&mut self, id: impl Into<String>) -> bool {
        self.transition(id.into(), |current| match current {
            None | Some(TicketState::New) => Some(TicketState::InProgress),
            Some(TicketState::InProgress) | Some(TicketState::Used) => None,
        })
    }

    /// Move `id` to `Used`. Unknown ids are registered as `Used`.
    pub fn finish(&mut self, id: impl Into<String>) -> bool {
        self.transition(id.into(), |_| Some(TicketState::Used))
    }

    pub fn state(&self, id: &str) -> Option<TicketState> {
        self.tickets.get(id).copied()
    }

    /// First ticket (in id order) currently in progress.
    pub fn first_in_progress(&self) -> Option<&str> {
        self.tickets
            .iter()
            .find(|(_, state)| **state == TicketState::InProgress)
            .map(|(id, _)| id.as_str())
    }

    pub fn any_in_progress(&self) -> bool {
        self.first_in_progress().is_some()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TicketState)> {
        self.tickets.iter().map(|(id, state)| (id.as_str(), *state))
    }

    fn transition(
        &mut self,
        id: String,
        next: impl FnOnce(Option<TicketState>) -> Option<TicketState>,
    ) -> bool {
        let current = self.tickets.get(&id).copied();
        match next(current) {
            Some(state) if current != Some(state) => {
                self.tickets.insert(id, state);
                true
            }
            _ => false,
        }
    }
}
