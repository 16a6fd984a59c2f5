//! `slingurl render` – print a URL re-serialized.

use anyhow::Result;
use slingurl_core::{RequestContext, SlingUrl};
use std::sync::Arc;

pub fn run_render(ctx: Arc<RequestContext>, input: &str, decode: bool) -> Result<()> {
    let mut url = SlingUrl::new(ctx);
    url.parse_url(input, decode);
    tracing::debug!(input, url_type = %url.url_type(), "rendering");
    println!("{}", url);
    Ok(())
}
