//! Parse configuration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag asking a running parse to stop.
///
/// Checked before each top-level declaration; a declaration already in
/// progress always completes.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Options for one parse.
#[derive(Clone, Debug, Default)]
pub struct ParseOptions {
    /// Stop once this many errors were recorded. `None` is unlimited.
    pub max_errors: Option<usize>,
    pub cancellation: Option<CancellationToken>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = Some(max_errors);
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    pub(crate) fn error_limit_reached(&self, errors: usize) -> bool {
        self.max_errors.is_some_and(|max| errors >= max)
    }
}

#[cfg(test)]
mod tests;
