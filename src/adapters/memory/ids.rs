//! Record ID generation for the in-memory stores.
//!
//! IDs are 24 lowercase hex characters: 8 for the unix timestamp in
//! seconds followed by 16 for a process-wide counter. Within one process
//! lexical order therefore follows creation order, which the post cursor
//! relies on.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Upper bound cursor: sorts after every generated ID.
pub const MAX_ID: &str = "ffffffffffffffffffffffff";

static COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn next_id() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{:08x}{:016x}", secs as u32, seq)
}
