//! Request context: the context prefix and the path resolver capability.
//!
//! The core only asks two things of the hosting environment: whether a path
//! names an existing resource, and how an internal path is mapped for the
//! outside world (virtual hosts, context prefix). Both go through
//! [`PathResolver`]; everything else about the environment stays outside.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::error::UrlError;
use crate::mapping::{LinkMapper, ResolverMapper};

/// Handle to an existing resource, as reported by a [`PathResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    path: String,
}

impl ResourceHandle {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Capability implemented by the hosting environment.
pub trait PathResolver: Send + Sync {
    /// Looks up the resource at `path`, if any.
    fn resolve(&self, path: &str) -> Option<ResourceHandle>;

    /// Maps an internal, already encoded path for rendering. The default
    /// prefixes the context path.
    fn map(&self, ctx: &RequestContext, path: &str) -> String {
        format!("{}{}", ctx.context_path().unwrap_or_default(), path)
    }
}

/// Resolves nothing and maps with the default rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl PathResolver for NoopResolver {
    fn resolve(&self, _path: &str) -> Option<ResourceHandle> {
        None
    }
}

/// Rewrites paths below `prefix` to `target` (e.g. `/site` -> `https://site.example`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualHostRule {
    pub prefix: String,
    pub target: String,
}

impl VirtualHostRule {
    /// The mapped form of `path` if this rule covers it.
    fn apply(&self, path: &str) -> Option<String> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() {
            Some(format!("{}/", self.target))
        } else if rest.starts_with('/') {
            Some(format!("{}{}", self.target, rest))
        } else {
            None
        }
    }
}

/// Resolver backed by a fixed set of resource paths and virtual host rules.
#[derive(Debug, Clone, Default)]
pub struct VirtualHostResolver {
    known_paths: BTreeSet<String>,
    rules: Vec<VirtualHostRule>,
}

impl VirtualHostResolver {
    pub fn new(
        known_paths: impl IntoIterator<Item = String>,
        rules: impl IntoIterator<Item = VirtualHostRule>,
    ) -> Self {
        Self {
            known_paths: known_paths.into_iter().collect(),
            rules: rules.into_iter().collect(),
        }
    }
}

impl PathResolver for VirtualHostResolver {
    fn resolve(&self, path: &str) -> Option<ResourceHandle> {
        self.known_paths.get(path).map(ResourceHandle::new)
    }

    fn map(&self, ctx: &RequestContext, path: &str) -> String {
        match self.rules.iter().find_map(|rule| rule.apply(path)) {
            Some(mapped) => {
                tracing::debug!(path, mapped = %mapped, "virtual host mapping");
                mapped
            }
            None => format!("{}{}", ctx.context_path().unwrap_or_default(), path),
        }
    }
}

/// Everything a URL needs to know about the request it is rendered for.
#[derive(Clone)]
pub struct RequestContext {
    context_path: Option<String>,
    resolver: Arc<dyn PathResolver>,
    link_mapper: Option<Arc<dyn LinkMapper>>,
}

impl RequestContext {
    /// Context without prefix whose URLs map through the resolver.
    pub fn new(resolver: Arc<dyn PathResolver>) -> Self {
        Self {
            context_path: None,
            resolver,
            link_mapper: Some(Arc::new(ResolverMapper)),
        }
    }

    /// Sets the context prefix. An empty string means no prefix.
    pub fn with_context_path(mut self, context_path: &str) -> Result<Self, UrlError> {
        if context_path.is_empty() {
            self.context_path = None;
            return Ok(self);
        }
        if !context_path.starts_with('/') || context_path.ends_with('/') {
            return Err(UrlError::InvalidContextPath(context_path.to_string()));
        }
        self.context_path = Some(context_path.to_string());
        Ok(self)
    }

    /// Replaces the link mapper used by URLs that do not bring their own;
    /// `None` leaves internal paths unmapped.
    pub fn with_link_mapper(mut self, mapper: Option<Arc<dyn LinkMapper>>) -> Self {
        self.link_mapper = mapper;
        self
    }

    pub fn context_path(&self) -> Option<&str> {
        self.context_path.as_deref()
    }

    pub fn resolver(&self) -> &dyn PathResolver {
        self.resolver.as_ref()
    }

    /// Mapper for URLs created without an explicit one.
    pub fn default_link_mapper(&self) -> Option<Arc<dyn LinkMapper>> {
        self.link_mapper.clone()
    }

    /// `path` without the context prefix, if it starts with `<context>/`.
    pub fn strip_context<'a>(&self, path: &'a str) -> Option<&'a str> {
        let context = self.context_path.as_deref()?;
        path.strip_prefix(context).filter(|rest| rest.starts_with('/'))
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(Arc::new(NoopResolver))
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("context_path", &self.context_path)
            .field("link_mapper", &self.link_mapper.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vhost() -> VirtualHostResolver {
        VirtualHostResolver::new(
            ["/a/bb/ccc".to_string()],
            [VirtualHostRule {
                prefix: "/x".into(),
                target: "http://host.xxx".into(),
            }],
        )
    }

    #[test]
    fn context_path_validation() {
        let ctx = RequestContext::default().with_context_path("/ctx").unwrap();
        assert_eq!(ctx.context_path(), Some("/ctx"));

        let ctx = RequestContext::default().with_context_path("").unwrap();
        assert_eq!(ctx.context_path(), None);

        assert_eq!(
            RequestContext::default().with_context_path("ctx").unwrap_err(),
            UrlError::InvalidContextPath("ctx".into())
        );
        assert!(RequestContext::default().with_context_path("/ctx/").is_err());
    }

    #[test]
    fn strip_context_needs_a_separator() {
        let ctx = RequestContext::default().with_context_path("/ctx").unwrap();
        assert_eq!(ctx.strip_context("/ctx/a/b"), Some("/a/b"));
        assert_eq!(ctx.strip_context("/ctxa/b"), None);
        assert_eq!(ctx.strip_context("/ctx"), None);
        assert_eq!(RequestContext::default().strip_context("/ctx/a"), None);
    }

    #[test]
    fn virtual_host_resolver_resolves_known_paths() {
        let resolver = vhost();
        assert_eq!(
            resolver.resolve("/a/bb/ccc"),
            Some(ResourceHandle::new("/a/bb/ccc"))
        );
        assert_eq!(resolver.resolve("/a/bb"), None);
    }

    #[test]
    fn virtual_host_resolver_maps_prefixes() {
        let ctx = RequestContext::default().with_context_path("/ctx").unwrap();
        let resolver = vhost();
        assert_eq!(resolver.map(&ctx, "/x/bb"), "http://host.xxx/bb");
        assert_eq!(resolver.map(&ctx, "/x"), "http://host.xxx/");
        assert_eq!(resolver.map(&ctx, "/xy/bb"), "/ctx/xy/bb");
        assert_eq!(resolver.map(&ctx, "/a/b"), "/ctx/a/b");
    }

    #[test]
    fn default_mapper_can_be_disabled() {
        let ctx = RequestContext::default();
        assert!(ctx.default_link_mapper().is_some());
        assert!(ctx.with_link_mapper(None).default_link_mapper().is_none());
    }

    #[test]
    fn noop_resolver_uses_default_mapping() {
        let ctx = RequestContext::default().with_context_path("/ctx").unwrap();
        assert_eq!(NoopResolver.resolve("/a"), None);
        assert_eq!(NoopResolver.map(&ctx, "/a"), "/ctx/a");
        assert_eq!(NoopResolver.map(&RequestContext::default(), "/a"), "/a");
    }
}
