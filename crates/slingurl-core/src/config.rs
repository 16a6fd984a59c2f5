use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::context::{RequestContext, VirtualHostResolver, VirtualHostRule};
use crate::mapping::MapperKind;

/// Global configuration loaded from `~/.config/slingurl/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Context prefix of the hosting application, e.g. "/ctx". Must start with '/'.
    #[serde(default)]
    pub context_path: Option<String>,
    /// Link mapper for internal paths: "none", "identity", "context" or "resolver" (default).
    #[serde(default)]
    pub link_mapper: Option<MapperKind>,
    /// Whether parsing decodes percent escapes.
    #[serde(default = "default_decode")]
    pub decode: bool,
    /// Resource paths the built-in resolver reports as existing.
    #[serde(default)]
    pub known_paths: Vec<String>,
    /// Virtual host rules applied by the resolver mapper.
    #[serde(default)]
    pub virtual_hosts: Vec<VirtualHostRule>,
}

fn default_decode() -> bool {
    true
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            context_path: None,
            link_mapper: None,
            decode: true,
            known_paths: Vec::new(),
            virtual_hosts: Vec::new(),
        }
    }
}

impl UrlConfig {
    pub fn mapper_kind(&self) -> MapperKind {
        self.link_mapper.unwrap_or_default()
    }

    /// Request context with the configured resolver, context path and mapper.
    pub fn request_context(&self) -> Result<RequestContext> {
        let resolver =
            VirtualHostResolver::new(self.known_paths.clone(), self.virtual_hosts.clone());
        let ctx = RequestContext::new(Arc::new(resolver))
            .with_context_path(self.context_path.as_deref().unwrap_or_default())?
            .with_link_mapper(self.mapper_kind().mapper());
        Ok(ctx)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("slingurl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UrlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UrlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<UrlConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: UrlConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}
