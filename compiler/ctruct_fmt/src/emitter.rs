//! Output emitter.
//!
//! The printer writes through an [`Emitter`] so the destination can change
//! without touching the rendering code.

use crate::context::INDENT_WIDTH;

/// Sink for formatted output.
pub trait Emitter {
    /// Emit a text fragment.
    fn emit(&mut self, text: &str);

    /// Emit a newline (Unix-style `\n`).
    fn emit_newline(&mut self);

    /// Emit indentation for `level` nesting levels.
    fn emit_indent(&mut self, level: usize);
}

/// In-memory emitter.
#[derive(Default)]
pub struct StringEmitter {
    buffer: String,
}

impl StringEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Get the formatted output.
    pub fn output(self) -> String {
        self.buffer
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Trim trailing whitespace; non-empty output ends with one newline.
    pub fn finish_lines(&mut self) {
        let len = self.buffer.trim_end().len();
        self.buffer.truncate(len);
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
    }
}

impl Emitter for StringEmitter {
    fn emit(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn emit_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn emit_indent(&mut self, level: usize) {
        for _ in 0..level * INDENT_WIDTH {
            self.buffer.push(' ');
        }
    }
}
