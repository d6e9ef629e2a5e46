//! RAII wall-clock timer, logging elapsed time at `info` level when dropped.
//!
//! Mirrors the teacher's `timer` idiom (a `Drop` impl that prints elapsed time) ported
//! onto the `log` crate instead of raw `iostream`.

use std::time::Instant;

/// Logs `"{label} finished in {elapsed}"` at `info` level once dropped.
pub struct ScopeTimer {
    label: &'static str,
    start: Instant,
}

impl ScopeTimer {
    /// Starts timing a scope labeled `label`.
    pub fn new(label: &'static str) -> Self {
        ScopeTimer { label, start: Instant::now() }
    }
}

impl Drop for ScopeTimer {
    fn drop(&mut self) {
        log::info!("{} finished in {:?}", self.label, self.start.elapsed());
    }
}
