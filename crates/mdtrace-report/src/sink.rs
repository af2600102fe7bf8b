//! Append-only report sinks.
//!
//! The reporter only needs two primitives from its output target: append a
//! chunk of text, and reset to empty. Durability and locking are left to the
//! operating system; every append is a plain `O_APPEND` write.

use crate::error::ReportError;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Persistent, append-only output target.
pub trait Sink {
    /// Append `text` verbatim.
    fn append_raw(&mut self, text: &str) -> Result<(), ReportError>;

    /// Reset the target to empty.
    fn truncate(&mut self) -> Result<(), ReportError>;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn append_raw(&mut self, text: &str) -> Result<(), ReportError> {
        (**self).append_raw(text)
    }

    fn truncate(&mut self) -> Result<(), ReportError> {
        (**self).truncate()
    }
}

/// Markdown file on disk.
///
/// Construction truncates the file: each run starts from an empty report.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Resolve `file_name` against the current working directory and
    /// truncate it.
    pub fn create(file_name: impl AsRef<Path>) -> Result<Self, ReportError> {
        let cwd = std::env::current_dir().map_err(ReportError::CurrentDir)?;
        Self::create_in(cwd, file_name)
    }

    /// Resolve `file_name` against `base` and truncate it.
    ///
    /// Missing parent directories are created.
    pub fn create_in(
        base: impl AsRef<Path>,
        file_name: impl AsRef<Path>,
    ) -> Result<Self, ReportError> {
        let path = base.as_ref().join(file_name);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
        }

        let mut sink = Self { path };
        sink.truncate()?;
        tracing::debug!(path = %sink.path.display(), "report file created");
        Ok(sink)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn append_raw(&mut self, text: &str) -> Result<(), ReportError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ReportError::io(&self.path, e))?;
        file.write_all(text.as_bytes())
            .map_err(|e| ReportError::io(&self.path, e))
    }

    fn truncate(&mut self) -> Result<(), ReportError> {
        File::create(&self.path).map_err(|e| ReportError::io(&self.path, e))?;
        Ok(())
    }
}

/// In-memory sink, for tests and for hosts that post-process the report.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buffer: String,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> &str {
        &self.buffer
    }

    pub fn into_contents(self) -> String {
        self.buffer
    }
}

impl Sink for MemorySink {
    fn append_raw(&mut self, text: &str) -> Result<(), ReportError> {
        self.buffer.push_str(text);
        Ok(())
    }

    fn truncate(&mut self) -> Result<(), ReportError> {
        self.buffer.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "mdtrace-sink-{prefix}-{}-{unique}",
            std::process::id()
        ))
    }

    #[test]
    fn create_in_truncates_existing_file() {
        let dir = temp_dir("truncate");
        fs::create_dir_all(&dir).expect("temp dir should be created");
        let path = dir.join("report.md");
        fs::write(&path, "stale content").expect("fixture should write");

        let sink = FileSink::create_in(&dir, "report.md").expect("sink should create");
        assert_eq!(sink.path(), path.as_path());
        assert_eq!(fs::read_to_string(&path).expect("report should exist"), "");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn create_in_makes_parent_directories() {
        let dir = temp_dir("nested");
        let mut sink =
            FileSink::create_in(&dir, "docs/walkthrough/report.md").expect("sink should create");
        sink.append_raw("hello").expect("append should succeed");

        let written = fs::read_to_string(dir.join("docs/walkthrough/report.md"))
            .expect("report should exist");
        assert_eq!(written, "hello");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn append_accumulates_and_truncate_resets() {
        let dir = temp_dir("append");
        let mut sink = FileSink::create_in(&dir, "report.md").expect("sink should create");

        sink.append_raw("a").expect("append should succeed");
        sink.append_raw("b").expect("append should succeed");
        assert_eq!(
            fs::read_to_string(sink.path()).expect("report should exist"),
            "ab"
        );

        sink.truncate().expect("truncate should succeed");
        assert_eq!(
            fs::read_to_string(sink.path()).expect("report should exist"),
            ""
        );

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn create_in_reports_unwritable_target() {
        let dir = temp_dir("blocked");
        fs::create_dir_all(&dir).expect("temp dir should be created");
        fs::write(dir.join("file"), "x").expect("fixture should write");

        let err = FileSink::create_in(&dir, "file/report.md").expect_err("parent is a file");
        assert!(matches!(err, ReportError::Io { .. }));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn memory_sink_round_trip() {
        let mut sink = MemorySink::new();
        sink.append_raw("one").expect("append should succeed");
        sink.append_raw(" two").expect("append should succeed");
        assert_eq!(sink.contents(), "one two");

        sink.truncate().expect("truncate should succeed");
        assert!(sink.contents().is_empty());
    }

    #[test]
    fn memory_sink_hands_over_its_buffer() {
        let mut sink = MemorySink::new();
        sink.append_raw("\n# Title\n").expect("append should succeed");
        assert_eq!(sink.into_contents(), "\n# Title\n");
    }
}
