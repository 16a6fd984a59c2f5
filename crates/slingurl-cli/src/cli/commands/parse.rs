//! `slingurl parse` – print the decomposition of a URL.

use anyhow::Result;
use slingurl_core::{RequestContext, SlingUrl, UrlParts};
use std::fmt::Write;
use std::sync::Arc;

pub fn run_parse(ctx: Arc<RequestContext>, input: &str, decode: bool, json: bool) -> Result<()> {
    let mut url = SlingUrl::new(ctx);
    url.parse_url(input, decode);
    let parts = url.parts();
    if json {
        println!("{}", serde_json::to_string_pretty(&parts)?);
    } else {
        print!("{}", format_parts(&parts));
    }
    Ok(())
}

/// One `label value` line per field that is set.
pub fn format_parts(parts: &UrlParts) -> String {
    let mut lines: Vec<(&str, String)> = vec![
        ("url", parts.url.clone()),
        ("type", parts.url_type.to_string()),
    ];
    let optional = [
        ("scheme", &parts.scheme),
        ("username", &parts.username),
        ("password", &parts.password),
        ("host", &parts.host),
        ("context-path", &parts.context_path),
        ("path", &parts.path),
    ];
    lines.extend(
        optional
            .into_iter()
            .filter_map(|(label, value)| value.clone().map(|v| (label, v))),
    );
    if let Some(port) = parts.port {
        lines.push(("port", port.to_string()));
    }
    lines.push(("name", parts.name.clone()));
    if !parts.selectors.is_empty() {
        lines.push(("selectors", parts.selectors.join(", ")));
    }
    for (label, value) in [
        ("extension", &parts.extension),
        ("suffix", &parts.suffix),
        ("fragment", &parts.fragment),
    ] {
        if let Some(value) = value {
            lines.push((label, value.clone()));
        }
    }
    for (name, values) in parts.parameters.iter() {
        lines.push(("parameter", format!("{name} = {}", values.join(", "))));
    }
    lines.push(("external", parts.external.to_string()));
    if let Some(resource_path) = &parts.resource_path {
        lines.push(("resource-path", resource_path.clone()));
    }

    let mut out = String::new();
    for (label, value) in lines {
        let _ = writeln!(out, "{:<14} {}", label, value);
    }
    out
}
