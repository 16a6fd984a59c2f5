//! Serialization of the model back into a URL string.

use super::kind::{PathParts, Structured, UrlKind};
use crate::codec;
use crate::context::RequestContext;
use crate::mapping::{adjust_mapped_url, LinkMapper};

/// Renders `kind` under `scheme`. Pure: the same input always gives the same string.
pub(crate) fn render(
    scheme: Option<&str>,
    kind: &UrlKind,
    mapper: Option<&dyn LinkMapper>,
    ctx: &RequestContext,
) -> String {
    let mut out = String::new();
    if let Some(scheme) = scheme {
        out.push_str(scheme);
        out.push(':');
    }
    match kind {
        UrlKind::Opaque(payload) | UrlKind::Unparseable(payload) => {
            out.push_str(&codec::encode(payload));
        }
        UrlKind::Relative(parts) => {
            out.push_str(&encoded_path_and_name("", parts));
            push_tail(&mut out, parts);
        }
        UrlKind::Structured(s) => {
            let mut authority = String::new();
            if scheme.is_some() || s.host.is_some() || s.username.is_some() {
                authority.push_str("//");
                push_authority(&mut authority, s);
            }
            let context = s.context_path.as_deref().unwrap_or_default();
            let mut path_and_name = encoded_path_and_name(context, &s.parts);
            if !authority.is_empty()
                && !path_and_name.starts_with('/')
                && (!path_and_name.is_empty() || has_name_tail(&s.parts))
            {
                path_and_name.insert(0, '/');
            }
            if let (None, Some(mapper)) = (scheme, mapper) {
                let mapped = mapper.map_path(ctx, &path_and_name);
                tracing::debug!(path = %path_and_name, mapped = %mapped, "mapped internal path");
                path_and_name = adjust_mapped_url(&mapped);
                // An absolute mapping result brings its own authority.
                if !authority.is_empty() && has_scheme(&path_and_name) {
                    authority.clear();
                }
            }
            out.push_str(&authority);
            out.push_str(&path_and_name);
            push_tail(&mut out, &s.parts);
        }
    }
    out
}

/// The directory keeps its separators; the name is escaped as one component.
fn encoded_path_and_name(context: &str, parts: &PathParts) -> String {
    let mut path = codec::encode_path(context);
    path.push_str(&codec::encode_path(&parts.path));
    path.push_str(&codec::encode(&parts.name));
    path
}

/// Selectors or an extension follow the name even when it is empty. A suffix
/// already starts with `/`.
fn has_name_tail(parts: &PathParts) -> bool {
    !parts.selectors.is_empty() || parts.extension.is_some()
}

/// `scheme://` at the start of mapped text.
fn has_scheme(text: &str) -> bool {
    text.split_once("://").is_some_and(|(scheme, _)| {
        !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
    })
}

/// Userinfo is written even without a host, so `user@/path` survives; a
/// port needs a host.
fn push_authority(out: &mut String, s: &Structured) {
    if let Some(username) = &s.username {
        out.push_str(&codec::encode(username));
        if let Some(password) = &s.password {
            out.push(':');
            out.push_str(&codec::encode(password));
        }
        out.push('@');
    }
    let Some(host) = &s.host else {
        return;
    };
    out.push_str(&codec::encode(host));
    if let Some(port) = s.port {
        out.push(':');
        out.push_str(&port.to_string());
    }
}

fn push_tail(out: &mut String, parts: &PathParts) {
    for selector in &parts.selectors {
        out.push('.');
        out.push_str(&codec::encode(selector));
    }
    if let Some(extension) = &parts.extension {
        out.push('.');
        out.push_str(&codec::encode(extension));
    }
    if let Some(suffix) = &parts.suffix {
        out.push_str(&codec::encode_path(suffix));
    }
    if !parts.parameters.is_empty() {
        out.push('?');
        out.push_str(&parts.parameters.render());
    }
    if let Some(fragment) = &parts.fragment {
        out.push('#');
        out.push_str(&codec::encode(fragment));
    }
}
