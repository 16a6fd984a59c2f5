//! Tests for the text output of `slingurl parse`.

use crate::cli::commands::format_parts;
use slingurl_core::{NoopResolver, RequestContext, SlingUrl};
use std::sync::Arc;

fn parts_of(input: &str) -> String {
    let ctx = Arc::new(RequestContext::new(Arc::new(NoopResolver)));
    format_parts(&SlingUrl::parse(ctx, input).parts())
}

#[test]
fn format_parts_lists_set_fields_only() {
    let out = parts_of("/a/b.s1.s2.html/suf?x=1&x=2#top");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], format!("{:<14} {}", "url", "/a/b.s1.s2.html/suf?x=1&x=2#top"));
    assert_eq!(lines[1], format!("{:<14} {}", "type", "structured"));
    assert!(out.contains(&format!("{:<14} {}", "selectors", "s1, s2")));
    assert!(out.contains(&format!("{:<14} {}", "parameter", "x = 1, 2")));
    assert!(out.contains(&format!("{:<14} {}", "external", "false")));
    assert!(!out.contains("scheme"));
    assert!(!out.contains("host"));
}

#[test]
fn format_parts_for_external_url() {
    let out = parts_of("https://me@host.example:8443/x.html");
    assert!(out.contains(&format!("{:<14} {}", "scheme", "https")));
    assert!(out.contains(&format!("{:<14} {}", "username", "me")));
    assert!(out.contains(&format!("{:<14} {}", "port", "8443")));
    assert!(out.contains(&format!("{:<14} {}", "external", "true")));
    assert!(!out.contains("resource-path"));
}

#[test]
fn format_parts_for_opaque_url() {
    let out = parts_of("mailto:a@b.c");
    assert!(out.contains(&format!("{:<14} {}", "type", "opaque")));
    assert!(out.contains(&format!("{:<14} {}", "name", "a@b.c")));
    assert!(!out.contains("path"));
}
