//! # mdtrace kernel
//!
//! The gating engine behind mdtrace reports: it decides, for every single
//! emission, whether anything is written.
//!
//! This crate performs no I/O. Formatting, sinks and the console live in
//! `mdtrace-report`, which consults [`GatingEngine::should_emit`] immediately
//! before each write.
//!
//! ## Architecture
//!
//! ```text
//! KeyedStore ×2        ← `values` and `conditions` (the condition record)
//!     │
//! TicketBook           ← New → InProgress → Used
//!     │
//! GatingEngine         ← mute flag + record + tickets
//!     │
//! should_emit / decide ← the emit/suppress predicate
//! ```

pub mod gate;
pub mod store;
pub mod ticket;

pub use gate::{GateDecision, GateSnapshot, GatingEngine};
pub use store::KeyedStore;
pub use ticket::{TicketBook, TicketState};
