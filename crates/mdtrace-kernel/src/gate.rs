//! The emission gate.
//!
//! Every report write and console trace asks [`GatingEngine::should_emit`]
//! first. The answer combines three independent pieces of state:
//!
//! - tickets: any ticket `InProgress` forces the gate open;
//! - the condition record: `conditions` vs `values`, compared per key;
//! - the mute flag.
//!
//! ```text
//! any ticket InProgress ──yes──▶ emit
//!         │ no
//! every key in `values` matches `conditions` (absent side = match)
//!         │ yes                          │ no ──▶ suppress
//! muted? ──yes──▶ suppress
//!         │ no
//!         ▼
//!       emit
//! ```
//!
//! Keys that only appear in `conditions` never restrict anything: a
//! condition becomes active once a value with the same key is set. This
//! lets callers declare a condition once and scope it by setting the
//! value inside the loop they want to narrate.
//!
//! The engine is plain owned state mutated through `&mut self`. Hosts that
//! share it across threads must wrap it in a single lock: the decision
//! reads tickets, both stores and the mute flag, and is only coherent under
//! exclusive access.

use crate::store::KeyedStore;
use crate::ticket::{TicketBook, TicketState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Why the gate is open or closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
    /// A ticket is in progress; mute and conditions are ignored.
    TicketOverride { ticket: String },
    /// Conditions hold and output is not muted.
    Open,
    /// `values[key]` differs from `conditions[key]`.
    ConditionMismatch {
        key: String,
        expected: String,
        actual: String,
    },
    /// Conditions hold but output is muted.
    Muted,
}

impl GateDecision {
    /// Whether this decision lets the emission through.
    pub fn emits(&self) -> bool {
        matches!(self, Self::TicketOverride { .. } | Self::Open)
    }
}

/// Serializable dump of all gating state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSnapshot {
    pub values: BTreeMap<String, String>,
    pub conditions: BTreeMap<String, String>,
    pub tickets: BTreeMap<String, TicketState>,
    pub muted: bool,
}

/// Owner of the mute flag, the condition record and the ticket book.
#[derive(Debug, Clone, Default)]
pub struct GatingEngine {
    muted: bool,
    values: KeyedStore,
    conditions: KeyedStore,
    tickets: TicketBook,
}

impl GatingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Values ──

    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.set(key, value);
    }

    pub fn set_values<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.values.set_many(values);
    }

    pub fn clear_value(&mut self, key: &str) {
        self.values.clear_one(key);
    }

    pub fn clear_values(&mut self) {
        self.values.clear_all();
    }

    // ── Conditions ──

    pub fn set_condition(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.conditions.set(key, value);
    }

    pub fn set_conditions<I, K, V>(&mut self, conditions: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.conditions.set_many(conditions);
    }

    pub fn clear_condition(&mut self, key: &str) {
        self.conditions.clear_one(key);
    }

    pub fn clear_conditions(&mut self) {
        self.conditions.clear_all();
    }

    /// Read access to the `values` side of the condition record.
    pub fn values(&self) -> &KeyedStore {
        &self.values
    }

    /// Direct access to the `values` store.
    pub fn values_mut(&mut self) -> &mut KeyedStore {
        &mut self.values
    }

    /// Read access to the `conditions` side of the condition record.
    pub fn conditions(&self) -> &KeyedStore {
        &self.conditions
    }

    /// Direct access to the `conditions` store.
    pub fn conditions_mut(&mut self) -> &mut KeyedStore {
        &mut self.conditions
    }

    // ── Tickets ──

    /// Register `id` as `New` (resetting a previously used ticket).
    pub fn add_ticket(&mut self, id: impl Into<String>) -> bool {
        self.tickets.add(id)
    }

    /// Mark `id` as `InProgress`; forces the gate open until finished.
    pub fn use_ticket(&mut self, id: impl Into<String>) -> bool {
        self.tickets.start(id)
    }

    /// Mark `id` as `Used`.
    pub fn finish_ticket(&mut self, id: impl Into<String>) -> bool {
        self.tickets.finish(id)
    }

    pub fn ticket_state(&self, id: &str) -> Option<TicketState> {
        self.tickets.state(id)
    }

    pub fn tickets(&self) -> &TicketBook {
        &self.tickets
    }

    pub fn any_ticket_in_progress(&self) -> bool {
        self.tickets.any_in_progress()
    }

    // ── Mute ──

    pub fn mute(&mut self) {
        self.muted = true;
    }

    pub fn unmute(&mut self) {
        self.muted = false;
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    // ── Decision ──

    /// Per-key match rule.
    ///
    /// A key matches when either side is absent or empty, or both sides are
    /// equal (exact, case-sensitive).
    pub fn match_key(&self, key: &str) -> bool {
        match (non_empty(self.conditions.get(key)), non_empty(self.values.get(key))) {
            (Some(expected), Some(actual)) => expected == actual,
            _ => true,
        }
    }

    /// Whether every key present in `values` matches its condition.
    pub fn values_match(&self) -> bool {
        self.first_mismatch().is_none()
    }

    /// Full decision with its reason.
    pub fn decide(&self) -> GateDecision {
        if let Some(ticket) = self.tickets.first_in_progress() {
            return GateDecision::TicketOverride {
                ticket: ticket.to_string(),
            };
        }
        if let Some((key, expected, actual)) = self.first_mismatch() {
            return GateDecision::ConditionMismatch {
                key: key.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            };
        }
        if self.muted {
            return GateDecision::Muted;
        }
        GateDecision::Open
    }

    /// The predicate consulted before every emission.
    pub fn should_emit(&self) -> bool {
        self.any_ticket_in_progress() || (self.values_match() && !self.muted)
    }

    pub fn snapshot(&self) -> GateSnapshot {
        GateSnapshot {
            values: self.values.get_all(),
            conditions: self.conditions.get_all(),
            tickets: self
                .tickets
                .iter()
                .map(|(id, state)| (id.to_string(), state))
                .collect(),
            muted: self.muted,
        }
    }

    fn first_mismatch(&self) -> Option<(&str, &str, &str)> {
        self.values
            .iter()
            .filter(|(_, actual)| !actual.is_empty())
            .find_map(|(key, actual)| {
                non_empty(self.conditions.get(key))
                    .filter(|expected| *expected != actual)
                    .map(|expected| (key, expected, actual))
            })
    }
}

/// An empty string counts as unset on either side of the record.
fn non_empty(entry: Option<&str>) -> Option<&str> {
    entry.filter(|s| !s.is_empty())
}
