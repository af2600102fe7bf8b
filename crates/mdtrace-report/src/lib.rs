//! # mdtrace-report
//!
//! Report layer over the mdtrace gating kernel.
//!
//! This crate provides:
//! - `Reporter`: gated markdown emission (headers, text, code, JSON)
//! - `Sink` implementations: `FileSink` (truncate-on-create markdown file)
//!   and `MemorySink`
//! - `Console` implementations for mirrored traces
//! - `ReportConfig`: TOML configuration for file-backed reporters
//!
//! ## Data flow
//!
//! ```text
//! caller ──▶ Reporter::text / json / h2 …
//!                │ GatingEngine::should_emit()
//!                ▼ (open)
//!           markdown render ──▶ Sink::append_raw
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod markdown;
pub mod reporter;
pub mod sink;

pub use config::ReportConfig;
pub use console::{BufferConsole, Console, NullConsole, StdoutConsole};
pub use error::ReportError;
pub use markdown::HeaderLevel;
pub use reporter::{FileReporter, Reporter};
pub use sink::{FileSink, MemorySink, Sink};

pub use mdtrace_kernel::{GateDecision, GateSnapshot, GatingEngine, KeyedStore, TicketState};
