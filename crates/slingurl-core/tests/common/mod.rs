//! Shared fixtures: a resolver that serves one virtual host below `/x`.

use std::collections::HashSet;
use std::sync::Arc;

use slingurl_core::{PathResolver, RequestContext, ResourceHandle};

pub const CONTEXT_PATH: &str = "/ctx";
pub const VIRTUAL_HOST: &str = "http://host.xxx";

/// Maps `/x` and everything below it to [`VIRTUAL_HOST`]; other paths get the
/// context prefix. Only the paths it was built with resolve.
#[derive(Debug, Default)]
pub struct SiteResolver {
    resources: HashSet<String>,
}

impl SiteResolver {
    pub fn with_resources(paths: &[&str]) -> Self {
        Self {
            resources: paths.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl PathResolver for SiteResolver {
    fn resolve(&self, path: &str) -> Option<ResourceHandle> {
        self.resources.get(path).map(|p| ResourceHandle::new(p.as_str()))
    }

    fn map(&self, ctx: &RequestContext, path: &str) -> String {
        match path.strip_prefix("/x") {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => {
                format!("{VIRTUAL_HOST}{rest}")
            }
            _ => format!("{}{}", ctx.context_path().unwrap_or_default(), path),
        }
    }
}

pub fn site_context(resources: &[&str]) -> Arc<RequestContext> {
    let ctx = RequestContext::new(Arc::new(SiteResolver::with_resources(resources)))
        .with_context_path(CONTEXT_PATH)
        .expect("valid context path");
    Arc::new(ctx)
}
