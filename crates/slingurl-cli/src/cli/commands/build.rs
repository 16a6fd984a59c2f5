//! `slingurl build` – assemble an internal URL from a resource path.

use anyhow::{Context, Result};
use slingurl_core::{RequestContext, SlingUrl};
use std::sync::Arc;

/// Optional fields of `slingurl build`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub selectors: Option<String>,
    pub extension: Option<String>,
    pub suffix: Option<String>,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

pub fn build_url(
    ctx: Arc<RequestContext>,
    resource_path: &str,
    options: &BuildOptions,
) -> Result<SlingUrl> {
    let mut url = SlingUrl::from_resource(ctx, resource_path)
        .with_context(|| format!("building url for {resource_path}"))?;
    if let Some(selectors) = &options.selectors {
        url.set_selectors(selectors);
    }
    url.set_extension(options.extension.as_deref())
        .set_suffix(options.suffix.as_deref())
        .set_fragment(options.fragment.as_deref());
    if let Some(query) = &options.query {
        url.set_parameters(query, true);
    }
    Ok(url)
}

pub fn run_build(ctx: Arc<RequestContext>, resource_path: &str, options: &BuildOptions) -> Result<()> {
    let url = build_url(ctx, resource_path, options)?;
    println!("{}", url);
    Ok(())
}
