//! Link mapping applied to internal paths while rendering.
//!
//! A mapper receives the encoded internal path exactly as it would be
//! rendered without mapping (context prefix included, if one was detected)
//! and returns path-structured text that is used as is. Mappers only ever
//! see internal, non-relative URLs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::classify::MAPPED_PORT;
use crate::context::RequestContext;

/// Capability consulted by the serializer for internal paths.
pub trait LinkMapper: Send + Sync {
    fn map_path(&self, ctx: &RequestContext, path: &str) -> String;
}

/// Leaves paths untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMapper;

impl LinkMapper for IdentityMapper {
    fn map_path(&self, _ctx: &RequestContext, path: &str) -> String {
        path.to_string()
    }
}

/// Prefixes the request's context path unless the path already carries it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextMapper;

impl LinkMapper for ContextMapper {
    fn map_path(&self, ctx: &RequestContext, path: &str) -> String {
        match ctx.context_path() {
            Some(context) if ctx.strip_context(path).is_none() => format!("{context}{path}"),
            _ => path.to_string(),
        }
    }
}

/// Delegates to the request's [`crate::context::PathResolver`], which may
/// rewrite to a virtual host. The resolver sees the path without the context
/// prefix and is responsible for adding it back.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolverMapper;

impl LinkMapper for ResolverMapper {
    fn map_path(&self, ctx: &RequestContext, path: &str) -> String {
        let resource_path = ctx.strip_context(path).unwrap_or(path);
        ctx.resolver().map(ctx, resource_path)
    }
}

/// Removes a default port (`:80` for http, `:443` for https) a mapping may
/// have introduced into an absolute URL.
pub fn adjust_mapped_url(mapped: &str) -> String {
    let Some(caps) = MAPPED_PORT.captures(mapped) else {
        return mapped.to_string();
    };
    let scheme = caps["scheme"].to_ascii_lowercase();
    let default_port = match scheme.as_str() {
        "http" => "80",
        _ => "443",
    };
    if &caps["port"] != default_port {
        return mapped.to_string();
    }
    let rest = caps.name("rest").map_or("", |m| m.as_str());
    format!("{}{}", &caps["origin"], rest)
}

/// Named built-in mappers, as used in configuration and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapperKind {
    /// No mapping at all.
    None,
    Identity,
    Context,
    #[default]
    Resolver,
}

impl MapperKind {
    pub fn mapper(self) -> Option<Arc<dyn LinkMapper>> {
        match self {
            MapperKind::None => None,
            MapperKind::Identity => Some(Arc::new(IdentityMapper)),
            MapperKind::Context => Some(Arc::new(ContextMapper)),
            MapperKind::Resolver => Some(Arc::new(ResolverMapper)),
        }
    }
}

impl fmt::Display for MapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MapperKind::None => "none",
            MapperKind::Identity => "identity",
            MapperKind::Context => "context",
            MapperKind::Resolver => "resolver",
        };
        f.write_str(s)
    }
}

impl FromStr for MapperKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(MapperKind::None),
            "identity" => Ok(MapperKind::Identity),
            "context" => Ok(MapperKind::Context),
            "resolver" => Ok(MapperKind::Resolver),
            other => Err(format!(
                "unknown link mapper '{other}' (expected none, identity, context or resolver)"
            )),
        }
    }
}
