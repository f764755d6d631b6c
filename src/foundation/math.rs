use std::sync::atomic::{AtomicU64, Ordering};

/// Global modification-time ticker.
///
/// Pipeline objects stamp themselves with `next_mtime()` when their state
/// changes; staleness checks compare stamps across objects, so the counter
/// must be globally monotonic.
static MTIME: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_mtime() -> u64 {
    MTIME.fetch_add(1, Ordering::Relaxed) + 1
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
