//! Parser snapshots for speculative parsing.
//!
//! A snapshot captures the cursor, the context flags and the arena
//! lengths. Restoring it rewinds all three, so a discarded attempt leaves
//! no nodes behind.
//!
//! Prefer plain `peek` checks when one or two tokens decide; use
//! `look_ahead` for longer token scans and `try_parse` when only a full
//! attempt can tell.

use ctruct_ir::ArenaMark;

use crate::context::ParseContext;
use crate::cursor::CursorMark;
use crate::{ParseError, Parser};

#[derive(Clone, Copy, Debug)]
pub(crate) struct ParserSnapshot {
    cursor: CursorMark,
    arena: ArenaMark,
    context: ParseContext,
}

impl Parser<'_> {
    pub(crate) fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            cursor: self.cursor.mark(),
            arena: self.arena.mark(),
            context: self.context,
        }
    }

    pub(crate) fn restore(&mut self, snapshot: ParserSnapshot) {
        self.cursor.reset(snapshot.cursor);
        self.arena.truncate(snapshot.arena);
        self.context = snapshot.context;
    }

    /// Run `f` and rewind unconditionally.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.snapshot();
        let result = f(self);
        self.restore(snapshot);
        result
    }

    /// Run `f`; keep its effects on success, rewind on failure.
    pub(crate) fn try_parse<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Option<T> {
        let snapshot = self.snapshot();
        match f(self) {
            Ok(value) => Some(value),
            Err(_) => {
                self.restore(snapshot);
                None
            }
        }
    }
}
