//! Process-wide cache hint consumed by the dispatch policy.
//!
//! The values are a heuristic, not a correctness input: any `available`
//! in the range 64 KiB..4 MiB produces correct output, performance may
//! vary. Platform probing (cpuid and friends) is the caller's business;
//! the engine only reads this record.

use once_cell::sync::OnceCell;

/// Bytes of cache the engine may assume a single sort call has to itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheInfo {
    /// Cache line size in bytes.
    pub line_size: usize,
    /// Cache bytes available to one sort call.
    pub available: usize,
}

impl Default for CacheInfo {
    fn default() -> Self {
        Self {
            line_size: 64,
            available: 256 * 1024,
        }
    }
}

static CACHE_INFO: OnceCell<CacheInfo> = OnceCell::new();

/// Installs the cache hint. One-shot: the first caller wins and later
/// calls return `false`. Must happen before the first sort that should
/// observe it; sorts that run earlier see the defaults.
pub fn configure(info: CacheInfo) -> bool {
    CACHE_INFO.set(info).is_ok()
}

/// The active hint, defaults if `configure` was never called.
pub fn info() -> CacheInfo {
    *CACHE_INFO.get_or_init(CacheInfo::default)
}
