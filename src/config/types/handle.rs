//! Global config handle.
//!
//! Uses `arc-swap` for lock-free reads. The config is built once at
//! startup from file + CLI flags; readers grab a cheap snapshot
//! through [`cfg`] instead of threading references around.

use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::config::ClientConfig;

/// Global config storage.
static CONFIG: LazyLock<ArcSwap<ClientConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(ClientConfig::default()));

#[inline]
pub fn cfg() -> Arc<ClientConfig> {
    CONFIG.load_full()
}

#[inline]
pub fn init_config(config: ClientConfig) -> Arc<ClientConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}
