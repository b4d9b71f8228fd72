//! Formatting context.
//!
//! Tracks the indentation level and whether the next fragment starts a
//! line, so callers emit text without managing leading whitespace.

use crate::emitter::{Emitter, StringEmitter};

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

pub struct FormatContext<E: Emitter = StringEmitter> {
    emitter: E,
    indent_level: usize,
    at_line_start: bool,
}

impl FormatContext<StringEmitter> {
    pub fn new() -> Self {
        Self::with_emitter(StringEmitter::new())
    }

    /// Finish formatting and return the output with one trailing newline.
    pub fn finalize(self) -> String {
        let mut emitter = self.emitter;
        emitter.finish_lines();
        emitter.output()
    }
}

impl Default for FormatContext<StringEmitter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Emitter> FormatContext<E> {
    pub fn with_emitter(emitter: E) -> Self {
        FormatContext {
            emitter,
            indent_level: 0,
            at_line_start: true,
        }
    }

    /// Emit a fragment, indenting first if it opens a line.
    pub fn emit(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            self.emitter.emit_indent(self.indent_level);
            self.at_line_start = false;
        }
        self.emitter.emit(text);
    }

    pub fn emit_newline(&mut self) {
        self.emitter.emit_newline();
        self.at_line_start = true;
    }

    /// Emit a whole line at the current indentation.
    pub fn emit_line(&mut self, text: &str) {
        self.emit(text);
        self.emit_newline();
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }
}
