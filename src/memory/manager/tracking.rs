/*!
 * Process Ledger
 * Usage history per pid, reset on initialize
 */

use crate::core::types::{Pid, Size};
use crate::memory::types::ProcessMemoryStats;
use ahash::RandomState;
use std::collections::HashMap;

/// Usage history keyed by pid. Entries survive release so peak and
/// allocation counts stay queryable until the next initialize.
#[derive(Debug, Clone, Default)]
pub(super) struct ProcessLedger {
    entries: HashMap<Pid, ProcessMemoryStats, RandomState>,
}

impl ProcessLedger {
    pub(super) fn record_allocation(&mut self, pid: Pid, size: Size) {
        let entry = self.entries.entry(pid).or_insert(ProcessMemoryStats {
            pid,
            allocated: 0,
            peak: 0,
            allocation_count: 0,
        });
        entry.allocated += size;
        entry.allocation_count += 1;
        entry.peak = entry.peak.max(entry.allocated);
    }

    /// A release frees every partition the pid owns, so current usage drops to zero
    pub(super) fn record_release(&mut self, pid: Pid, released: Size) {
        if let Some(entry) = self.entries.get_mut(&pid) {
            debug_assert_eq!(entry.allocated, released);
            entry.allocated = 0;
        }
    }

    pub(super) fn stats(&self, pid: Pid) -> Option<ProcessMemoryStats> {
        self.entries.get(&pid).cloned()
    }

    pub(super) fn clear(&mut self) {
        self.entries.clear();
    }
}
