//! Parse context flags for context-sensitive rules.

use bitflags::bitflags;

bitflags! {
    /// Flags that change how individual tokens are read.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ParseContext: u8 {
        /// Inside a template argument or parameter list: a bare `>` or `>>`
        /// closes the list instead of acting as an operator.
        const NO_GREATER = 1 << 0;
        /// Inside a function body, where namespace, template and linkage
        /// declarations may not appear.
        const IN_FUNCTION_BODY = 1 << 1;
    }
}

impl ParseContext {
    /// Whether `>` may be read as a comparison operator.
    #[inline]
    pub fn allows_greater(self) -> bool {
        !self.contains(Self::NO_GREATER)
    }
}

#[cfg(test)]
mod tests;
