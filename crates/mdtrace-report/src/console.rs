//! Console mirroring for short traces.

/// Line-oriented console target used by `Reporter::log`.
pub trait Console {
    fn write_line(&mut self, line: &str);
}

impl<C: Console + ?Sized> Console for Box<C> {
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line);
    }
}

/// Process stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Discards every line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullConsole;

impl Console for NullConsole {
    fn write_line(&mut self, _line: &str) {}
}

/// Captures lines in memory.
#[derive(Debug, Clone, Default)]
pub struct BufferConsole {
    lines: Vec<String>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Console for BufferConsole {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}
