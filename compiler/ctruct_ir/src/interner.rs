//! String interner for identifiers and literal text.
//!
//! One interner belongs to one `TokenList`; independent parses never share
//! one, so no locking is involved.

use super::Name;
use rustc_hash::FxHashMap;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    /// More strings than a `u32` index can address.
    #[error("interner exceeded capacity: {count} strings, max is {}", u32::MAX)]
    Overflow { count: usize },
}

/// Owns interned strings and maps them to compact [`Name`]s.
#[derive(Clone, PartialEq, Eq)]
pub struct StringInterner {
    map: FxHashMap<Box<str>, Name>,
    strings: Vec<Box<str>>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned.
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        map.insert(Box::from(""), Name::EMPTY);
        StringInterner {
            map,
            strings: vec![Box::from("")],
        }
    }

    /// Try to intern a string, returning its `Name` or an error on overflow.
    pub fn try_intern(&mut self, s: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.map.get(s) {
            return Ok(name);
        }
        let raw = u32::try_from(self.strings.len()).map_err(|_| InternError::Overflow {
            count: self.strings.len(),
        })?;
        let name = Name::from_raw(raw);
        self.strings.push(Box::from(s));
        self.map.insert(Box::from(s), name);
        Ok(name)
    }

    /// Intern a string, returning its `Name`.
    ///
    /// # Panics
    /// Panics if the interner exceeds `u32::MAX` strings.
    /// Use `try_intern` for fallible interning.
    #[inline]
    pub fn intern(&mut self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Look up the text of an interned name.
    ///
    /// Returns `""` for a name this interner did not produce.
    pub fn lookup(&self, name: Name) -> &str {
        self.strings.get(name.index()).map_or("", |s| s)
    }

    /// Look up a string without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.map.get(s).copied()
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.strings.len())
            .finish()
    }
}
