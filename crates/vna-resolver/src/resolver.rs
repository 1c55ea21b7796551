//! Scenario-scoped asset resolution.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use vna_manifest::{MANIFEST_FILE, Manifest};

use crate::cache::ManifestCache;
use crate::transport::{DynTransport, HttpTransport};
use crate::{ResolveError, ResolveResult};

/// Category shorthand. `Video` is the logical name for the on-disk `vid`
/// directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Bgm,
    Se,
    Img,
    Video,
}

impl Category {
    /// On-disk directory token for this category.
    pub fn token(self) -> &'static str {
        match self {
            Self::Bgm => "bgm",
            Self::Se => "se",
            Self::Img => "img",
            Self::Video => "vid",
        }
    }
}

/// Shared construction context: one cache and one transport per process,
/// threaded into every scenario resolver built from it.
#[derive(Clone)]
pub struct ResolverConfig {
    scenarios_root: String,
    cache: Arc<ManifestCache>,
    transport: DynTransport,
}

impl ResolverConfig {
    /// Config with the default HTTP transport and a fresh cache.
    pub fn new(scenarios_root: impl Into<String>) -> Self {
        Self::with_transport(scenarios_root, Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(scenarios_root: impl Into<String>, transport: DynTransport) -> Self {
        let mut scenarios_root = scenarios_root.into();
        while scenarios_root.ends_with('/') {
            scenarios_root.pop();
        }
        Self {
            scenarios_root,
            cache: Arc::new(ManifestCache::new()),
            transport,
        }
    }

    /// A resolver for one scenario, sharing this config's cache and
    /// transport.
    pub fn resolver(&self, scenario_id: impl Into<String>) -> ScenarioResolver {
        ScenarioResolver {
            scenarios_root: self.scenarios_root.clone(),
            scenario_id: scenario_id.into(),
            cache: self.cache.clone(),
            transport: self.transport.clone(),
        }
    }

    pub fn cache(&self) -> &Arc<ManifestCache> {
        &self.cache
    }
}

/// Resolves identifiers and aliases for one scenario.
pub struct ScenarioResolver {
    scenarios_root: String,
    scenario_id: String,
    cache: Arc<ManifestCache>,
    transport: DynTransport,
}

impl ScenarioResolver {
    pub fn scenario_id(&self) -> &str {
        &self.scenario_id
    }

    fn assets_base(&self) -> String {
        format!("{}/{}/assets", self.scenarios_root, self.scenario_id)
    }

    /// Fetch (or return the cached) manifest for this scenario.
    ///
    /// A failed fetch is returned as an error and never cached; the next
    /// call retries. Two concurrent calls on a cold cache may both fetch
    /// and both insert — the last write wins, wasting a request but
    /// nothing else.
    pub async fn load_manifest(&self) -> ResolveResult<Arc<Manifest>> {
        if let Some(cached) = self.cache.get(&self.scenario_id) {
            return Ok(cached);
        }
        let url = format!("{}/{MANIFEST_FILE}", self.assets_base());
        let bytes =
            self.transport
                .get(&url)
                .await
                .map_err(|source| ResolveError::Manifest {
                    scenario_id: self.scenario_id.clone(),
                    source,
                })?;
        let manifest: Manifest = serde_json::from_slice(&bytes)
            .map_err(|source| ResolveError::Decode { url, source })?;
        let manifest = Arc::new(manifest);
        self.cache.insert(&self.scenario_id, manifest.clone());
        Ok(manifest)
    }

    /// Resolve an identifier or alias to a fully qualified asset path.
    ///
    /// A missing asset is an expected condition: it is logged as a warning
    /// and returned as `None`, never as an error. `Err` is reserved for
    /// manifest load failures.
    pub async fn resolve_id(&self, id_or_alias: &str) -> ResolveResult<Option<String>> {
        let manifest = self.load_manifest().await?;
        let id = manifest
            .alias_map
            .get(id_or_alias)
            .map(String::as_str)
            .unwrap_or(id_or_alias);
        match manifest.assets.get(id) {
            Some(entry) => Ok(Some(format!("{}/{}", self.assets_base(), entry.path))),
            None => {
                tracing::warn!(
                    "no asset '{id_or_alias}' in scenario '{}'",
                    self.scenario_id
                );
                Ok(None)
            }
        }
    }

    /// Resolve with category shorthand: a bare name is prefixed with the
    /// category token; a name containing `/` is already a full identifier.
    pub async fn resolve_with_category(
        &self,
        category: Category,
        name: &str,
    ) -> ResolveResult<Option<String>> {
        if name.contains('/') {
            self.resolve_id(name).await
        } else {
            self.resolve_id(&format!("{}/{name}", category.token())).await
        }
    }

    pub async fn bgm(&self, name: &str) -> ResolveResult<Option<String>> {
        self.resolve_with_category(Category::Bgm, name).await
    }

    pub async fn se(&self, name: &str) -> ResolveResult<Option<String>> {
        self.resolve_with_category(Category::Se, name).await
    }

    pub async fn img(&self, name: &str) -> ResolveResult<Option<String>> {
        self.resolve_with_category(Category::Img, name).await
    }

    pub async fn video(&self, name: &str) -> ResolveResult<Option<String>> {
        self.resolve_with_category(Category::Video, name).await
    }

    /// Path to an unmanaged character sprite. `.png` is appended only when
    /// the path carries no extension.
    pub fn character(&self, path: &str) -> String {
        self.unmanaged("characters", path)
    }

    /// Path to an unmanaged background image. `.png` is appended only when
    /// the path carries no extension.
    pub fn background(&self, path: &str) -> String {
        self.unmanaged("backgrounds", path)
    }

    fn unmanaged(&self, subdir: &str, path: &str) -> String {
        let has_ext = path
            .rsplit('/')
            .next()
            .is_some_and(|name| name.contains('.'));
        let suffix = if has_ext { "" } else { ".png" };
        format!("{}/{subdir}/{path}{suffix}", self.assets_base())
    }

    /// Fetch and parse this scenario's `scenario.json`.
    pub async fn load_scenario(&self) -> ResolveResult<JsonValue> {
        let url = format!("{}/{}/scenario.json", self.scenarios_root, self.scenario_id);
        self.fetch_json(&url).await
    }

    /// Fetch and parse the scene document at `scenes/{scene_id}/scene.json`.
    pub async fn load_scene(&self, scene_id: &str) -> ResolveResult<JsonValue> {
        let url = format!(
            "{}/{}/scenes/{scene_id}/scene.json",
            self.scenarios_root, self.scenario_id
        );
        self.fetch_json(&url).await
    }

    async fn fetch_json(&self, url: &str) -> ResolveResult<JsonValue> {
        let bytes = self
            .transport
            .get(url)
            .await
            .map_err(|source| ResolveError::Fetch {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|source| ResolveError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Evict this scenario's cached manifest; the next `load_manifest`
    /// re-fetches.
    pub fn clear_cache(&self) {
        self.cache.remove(&self.scenario_id);
    }
}
