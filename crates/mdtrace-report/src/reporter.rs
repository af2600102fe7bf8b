//! The reporter: gated markdown emission.
//!
//! A `Reporter` owns one [`GatingEngine`], one [`Sink`] and one
//! [`Console`]. Calling code holds it by `&mut` and narrates through the
//! segment methods; each of them asks the gate first and neither formats
//! nor writes anything when the gate is closed.

use crate::config::ReportConfig;
use crate::console::{Console, NullConsole, StdoutConsole};
use crate::error::ReportError;
use crate::markdown::{self, HeaderLevel};
use crate::sink::{FileSink, Sink};
use mdtrace_kernel::GatingEngine;
use serde::Serialize;
use std::fmt::Display;

/// Reporter built from a [`ReportConfig`].
pub type FileReporter = Reporter<FileSink, Box<dyn Console>>;

/// Gated markdown narrator over a sink and a console.
#[derive(Debug)]
pub struct Reporter<S, C> {
    gate: GatingEngine,
    sink: S,
    console: C,
    default_level: HeaderLevel,
}

impl<S: Sink, C: Console> Reporter<S, C> {
    /// Wrap `sink` and `console` with a fresh, open gate.
    pub fn new(sink: S, console: C) -> Self {
        Self {
            gate: GatingEngine::new(),
            sink,
            console,
            default_level: HeaderLevel::default(),
        }
    }

    /// Set the level used by [`Reporter::header`] when none is given.
    pub fn with_default_level(mut self, level: HeaderLevel) -> Self {
        self.default_level = level;
        self
    }

    pub fn gate(&self) -> &GatingEngine {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut GatingEngine {
        &mut self.gate
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Truncate the sink. Gating state is left untouched.
    pub fn reset(&mut self) -> Result<(), ReportError> {
        tracing::debug!("report reset");
        self.sink.truncate()
    }

    // ── Headers ──

    /// Header at `level`, or at the default level when `None`.
    pub fn header(&mut self, text: &str, level: Option<HeaderLevel>) -> Result<(), ReportError> {
        let level = level.unwrap_or(self.default_level);
        self.emit("header", || Ok(markdown::header(text, level)))
    }

    pub fn h1<I, T>(&mut self, parts: I) -> Result<(), ReportError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.joined_header(parts, HeaderLevel::H1)
    }

    pub fn h2<I, T>(&mut self, parts: I) -> Result<(), ReportError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.joined_header(parts, HeaderLevel::H2)
    }

    pub fn h3<I, T>(&mut self, parts: I) -> Result<(), ReportError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.joined_header(parts, HeaderLevel::H3)
    }

    pub fn h4<I, T>(&mut self, parts: I) -> Result<(), ReportError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.joined_header(parts, HeaderLevel::H4)
    }

    pub fn h5<I, T>(&mut self, parts: I) -> Result<(), ReportError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.joined_header(parts, HeaderLevel::H5)
    }

    // ── Body ──

    /// Paragraph from space-joined `parts`; `::` renders as a backtick.
    pub fn text<I, T>(&mut self, parts: I) -> Result<(), ReportError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.emit("text", || Ok(markdown::paragraph(parts)))
    }

    /// Fenced code block.
    pub fn code(
        &mut self,
        code: &str,
        lang: Option<&str>,
        comment: Option<&str>,
    ) -> Result<(), ReportError> {
        self.emit("code", || Ok(markdown::code_block(code, lang, comment)))
    }

    pub fn js(&mut self, code: &str, comment: Option<&str>) -> Result<(), ReportError> {
        self.code(code, Some("javascript"), comment)
    }

    pub fn ts(&mut self, code: &str, comment: Option<&str>) -> Result<(), ReportError> {
        self.code(code, Some("typescript"), comment)
    }

    /// Pretty-printed JSON snapshot of `value`.
    pub fn json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), ReportError> {
        self.emit("json", || Ok(markdown::json_block(value)?))
    }

    /// A one-line label followed by a JSON snapshot.
    pub fn labeled_json<T: Serialize + ?Sized>(
        &mut self,
        label: &str,
        value: &T,
    ) -> Result<(), ReportError> {
        self.text([label])?;
        self.json(value)
    }

    // ── Console ──

    /// Mirror `message` to the console when the gate is open.
    pub fn log(&mut self, message: impl Display) {
        if self.gate.should_emit() {
            self.console.write_line(&message.to_string());
        } else {
            tracing::trace!(decision = ?self.gate.decide(), "log suppressed");
        }
    }

    /// Print the full gating state to the console, regardless of the gate.
    pub fn log_state(&mut self) -> Result<(), ReportError> {
        let state = serde_json::to_string_pretty(&self.gate.snapshot())?;
        self.console.write_line(&state);
        Ok(())
    }

    fn joined_header<I, T>(&mut self, parts: I, level: HeaderLevel) -> Result<(), ReportError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.emit("header", || {
            Ok(markdown::header(&markdown::join_parts(parts), level))
        })
    }

    fn emit(
        &mut self,
        segment: &'static str,
        render: impl FnOnce() -> Result<String, ReportError>,
    ) -> Result<(), ReportError> {
        if !self.gate.should_emit() {
            tracing::trace!(segment, decision = ?self.gate.decide(), "segment suppressed");
            return Ok(());
        }
        let rendered = render()?;
        self.sink.append_raw(&format!("\n{rendered}"))
    }
}

impl FileReporter {
    /// File-backed reporter: truncates the output file and seeds the gate
    /// from the config.
    pub fn from_config(config: &ReportConfig) -> Result<Self, ReportError> {
        config.validate()?;
        let sink = match config.base_dir {
            Some(_) => FileSink::create_in(config.resolve_base()?, &config.output)?,
            None => FileSink::create(&config.output)?,
        };
        let console: Box<dyn Console> = if config.console {
            Box::new(StdoutConsole)
        } else {
            Box::new(NullConsole)
        };

        let mut reporter = Reporter::new(sink, console).with_default_level(config.header_level);
        reporter.gate.set_conditions(
            config
                .conditions
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );
        reporter.gate.set_muted(config.muted);
        Ok(reporter)
    }
}
