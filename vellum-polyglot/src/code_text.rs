//! Minimal indentation-aware code writer.

/// Line-oriented code writer, two-space indentation by default.
#[derive(Debug, Clone)]
pub struct CodeText {
    indent: &'static str,
    level: usize,
    buffer: String,
}

impl CodeText {
    pub fn new() -> Self {
        Self::with_indent("  ")
    }

    pub fn with_indent(indent: &'static str) -> Self {
        Self {
            indent,
            level: 0,
            buffer: String::new(),
        }
    }

    /// Add a line at the current indentation.
    pub fn line(&mut self, text: &str) -> &mut Self {
        for _ in 0..self.level {
            self.buffer.push_str(self.indent);
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// Header line followed by an indented body.
    pub fn open(&mut self, header: &str) -> &mut Self {
        self.line(header).indent()
    }

    /// Dedent and close with a footer line.
    pub fn close(&mut self, footer: &str) -> &mut Self {
        self.dedent().line(footer)
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_text(self) -> String {
        self.buffer
    }
}

impl Default for CodeText {
    fn default() -> Self {
        Self::new()
    }
}
