//! Builds model fields from raw classifier groups.

use super::kind::{PathParts, Structured, UrlKind};
use crate::classify::{Classification, RawGroups, UrlType};
use crate::codec;
use crate::context::RequestContext;

/// Scheme and typed fields for one classified input.
pub(crate) struct Assembled {
    pub(crate) scheme: Option<String>,
    pub(crate) kind: UrlKind,
}

pub(crate) fn assemble(
    classification: Classification<'_>,
    decode: bool,
    ctx: &RequestContext,
) -> Assembled {
    let Classification { url_type, groups } = classification;
    let text = |raw: &str| text(raw, decode);
    let scheme = groups.scheme.map(str::to_string);
    let payload = groups.payload.unwrap_or_default();
    let kind = match url_type {
        UrlType::Opaque => UrlKind::Opaque(text(payload)),
        // Schemeless input that matches nothing is kept exactly as given.
        UrlType::Unparseable => UrlKind::Unparseable(match scheme {
            Some(_) => text(payload),
            None => payload.to_string(),
        }),
        UrlType::Relative => UrlKind::Relative(path_parts(&groups, decode)),
        UrlType::Structured => {
            let mut parts = path_parts(&groups, decode);
            let context_path = strip_context(&mut parts, ctx);
            UrlKind::Structured(Structured {
                username: groups.username.map(text),
                password: groups.password.map(text),
                host: groups.host.map(text),
                port: groups.port,
                context_path,
                parts,
            })
        }
    };
    Assembled { scheme, kind }
}

fn text(raw: &str, decode: bool) -> String {
    if decode {
        codec::decode(raw)
    } else {
        raw.to_string()
    }
}

fn path_parts(groups: &RawGroups<'_>, decode: bool) -> PathParts {
    let text = |raw: &str| text(raw, decode);
    let mut parts = PathParts {
        path: groups.path.map(text).unwrap_or_default(),
        name: groups.name.map(text).unwrap_or_default(),
        suffix: groups.suffix.map(text),
        fragment: groups.fragment.map(text),
        ..PathParts::default()
    };
    if let Some(extensions) = groups.extensions {
        let mut tokens: Vec<String> = extensions
            .split('.')
            .filter(|token| !token.is_empty())
            .map(text)
            .collect();
        parts.extension = tokens.pop();
        parts.selectors = tokens;
    }
    if let Some(query) = groups.query {
        parts.parameters.add_query(query, decode);
    }
    parts
}

/// Moves a leading `<context>/` out of the path.
fn strip_context(parts: &mut PathParts, ctx: &RequestContext) -> Option<String> {
    let rest = ctx.strip_context(&parts.path)?.to_string();
    parts.path = rest;
    ctx.context_path().map(str::to_string)
}
