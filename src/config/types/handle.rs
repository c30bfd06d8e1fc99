//! Global config handle.
//!
//! Uses `arc-swap` for lock-free reads from server worker threads.

use crate::config::KolamConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<KolamConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(KolamConfig::default()));

#[inline]
pub fn cfg() -> Arc<KolamConfig> {
    CONFIG.load_full()
}

#[inline]
pub fn init_config(config: KolamConfig) -> Arc<KolamConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}
