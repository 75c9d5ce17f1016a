//! Diagnostic side channel for recovered storage failures.
//!
//! `load_data` and `save_data` never fail the caller. Whatever went wrong is
//! handed to a [`DiagnosticSink`] instead.

use std::sync::Mutex;

use tracing::warn;

use crate::error::StoreError;

pub trait DiagnosticSink: Send + Sync {
    fn report(&self, error: &StoreError);
}

/// Emits a `warn!` event per failure. The default sink.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, error: &StoreError) {
        warn!(error = %error, "storage failure recovered");
    }
}

/// Keeps rendered failure messages in memory. Logs nothing.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages reported so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, error: &StoreError) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(error.to_string());
        }
    }
}
