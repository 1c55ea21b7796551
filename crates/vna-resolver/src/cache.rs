//! Process-wide manifest cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use vna_manifest::Manifest;

/// Scenario-id keyed manifest cache.
///
/// Owned explicitly by the composing application and shared across resolver
/// instances via `Arc` — never module-level state — so tests can construct
/// isolated caches and assert fetch counts deterministically.
#[derive(Debug, Default)]
pub struct ManifestCache {
    inner: Mutex<HashMap<String, Arc<Manifest>>>,
}

impl ManifestCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, scenario_id: &str) -> Option<Arc<Manifest>> {
        self.lock().get(scenario_id).cloned()
    }

    pub fn insert(&self, scenario_id: &str, manifest: Arc<Manifest>) {
        self.lock().insert(scenario_id.to_string(), manifest);
    }

    pub fn remove(&self, scenario_id: &str) -> Option<Arc<Manifest>> {
        self.lock().remove(scenario_id)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<Manifest>>> {
        self.inner.lock().expect("manifest cache lock poisoned")
    }
}
