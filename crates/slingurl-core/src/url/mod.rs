//! The mutable URL model.
//!
//! A [`SlingUrl`] is created by parsing a string or from a resource path and
//! then adjusted through chained setters. Rendering and resource resolution
//! are memoized; every setter invalidates both.

mod assemble;
mod kind;
mod memo;
mod mutate;
mod params;
mod render;

pub use kind::{PathParts, Structured, UrlKind};
pub use params::Parameters;

use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::classify::{classify, UrlType};
use crate::context::{RequestContext, ResourceHandle};
use crate::error::UrlError;
use crate::mapping::LinkMapper;
use memo::Memo;

static NO_PARAMETERS: Parameters = Parameters::new();

/// Memoized outcome of the resource lookup.
#[derive(Debug, Clone, Default)]
struct Resolution {
    path: Option<String>,
    handle: Option<ResourceHandle>,
}

/// A URL decomposed into scheme, authority, path, name, selectors,
/// extension, suffix, parameters and fragment.
#[derive(Clone)]
pub struct SlingUrl {
    ctx: Arc<RequestContext>,
    mapper: Option<Arc<dyn LinkMapper>>,
    scheme: Option<String>,
    kind: UrlKind,
    rendered: Memo<String>,
    resolved: Memo<Resolution>,
}

impl SlingUrl {
    /// Blank URL using the context's default link mapper.
    pub fn new(ctx: Arc<RequestContext>) -> Self {
        let mapper = ctx.default_link_mapper();
        Self::with_mapper(ctx, mapper)
    }

    /// Blank URL with an explicit mapper; `None` disables mapping.
    pub fn with_mapper(ctx: Arc<RequestContext>, mapper: Option<Arc<dyn LinkMapper>>) -> Self {
        Self {
            ctx,
            mapper,
            scheme: None,
            kind: UrlKind::default(),
            rendered: Memo::new(),
            resolved: Memo::new(),
        }
    }

    /// Parses `input`, decoding escapes. Never fails.
    pub fn parse(ctx: Arc<RequestContext>, input: &str) -> Self {
        let mut url = Self::new(ctx);
        url.parse_url(input, true);
        url
    }

    /// Parses `input` keeping every escape as given.
    pub fn parse_raw(ctx: Arc<RequestContext>, input: &str) -> Self {
        let mut url = Self::new(ctx);
        url.parse_url(input, false);
        url
    }

    /// Replaces the whole state with the parse of `input`, keeping the
    /// context and mapper.
    pub fn parse_url(&mut self, input: &str, decode: bool) -> &mut Self {
        self.reset();
        let assembled = assemble::assemble(classify(input), decode, &self.ctx);
        self.scheme = assembled.scheme;
        self.kind = assembled.kind;
        self
    }

    /// Builder entry point: an internal URL for an absolute resource path.
    pub fn from_resource(ctx: Arc<RequestContext>, resource_path: &str) -> Result<Self, UrlError> {
        if !resource_path.starts_with('/') {
            return Err(UrlError::RelativeResourcePath(resource_path.to_string()));
        }
        let mut parts = PathParts::default();
        parts.set_resource_path(resource_path);
        let mut url = Self::new(ctx);
        url.kind = UrlKind::Structured(Structured {
            parts,
            ..Structured::default()
        });
        Ok(url)
    }

    /// The rendered URL, computed on first use after a change.
    pub fn url(&self) -> &str {
        self.rendered.get_or_compute(|| {
            tracing::trace!(url_type = %self.url_type(), "rendering url");
            render::render(
                self.scheme.as_deref(),
                &self.kind,
                self.mapper.as_deref(),
                &self.ctx,
            )
        })
    }

    pub fn context(&self) -> &RequestContext {
        &self.ctx
    }

    pub fn link_mapper(&self) -> Option<&dyn LinkMapper> {
        self.mapper.as_deref()
    }

    pub fn kind(&self) -> &UrlKind {
        &self.kind
    }

    pub fn url_type(&self) -> UrlType {
        self.kind.url_type()
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// A scheme is present.
    pub fn is_external(&self) -> bool {
        self.scheme.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.kind.structured().and_then(|s| s.username.as_deref())
    }

    pub fn password(&self) -> Option<&str> {
        self.kind.structured().and_then(|s| s.password.as_deref())
    }

    pub fn host(&self) -> Option<&str> {
        self.kind.structured().and_then(|s| s.host.as_deref())
    }

    pub fn port(&self) -> Option<u16> {
        self.kind.structured().and_then(|s| s.port)
    }

    /// Context prefix detected while parsing.
    pub fn context_path(&self) -> Option<&str> {
        self.kind.structured().and_then(|s| s.context_path.as_deref())
    }

    /// Directory without the context prefix; empty for opaque URLs.
    pub fn path(&self) -> &str {
        self.kind.parts().map_or("", |p| p.path.as_str())
    }

    /// File name without selectors and extension, or the unparsed payload.
    pub fn name(&self) -> &str {
        match &self.kind {
            UrlKind::Opaque(payload) | UrlKind::Unparseable(payload) => payload,
            UrlKind::Structured(s) => &s.parts.name,
            UrlKind::Relative(parts) => &parts.name,
        }
    }

    /// `path + name`, or the unparsed payload.
    pub fn path_and_name(&self) -> String {
        match self.kind.parts() {
            Some(parts) => parts.path_and_name(),
            None => self.name().to_string(),
        }
    }

    pub fn selectors(&self) -> &[String] {
        self.kind
            .parts()
            .map(|p| p.selectors.as_slice())
            .unwrap_or_default()
    }

    pub fn extension(&self) -> Option<&str> {
        self.kind.parts().and_then(|p| p.extension.as_deref())
    }

    pub fn suffix(&self) -> Option<&str> {
        self.kind.parts().and_then(|p| p.suffix.as_deref())
    }

    pub fn parameters(&self) -> &Parameters {
        self.kind.parts().map_or(&NO_PARAMETERS, |p| &p.parameters)
    }

    pub fn fragment(&self) -> Option<&str> {
        self.kind.parts().and_then(|p| p.fragment.as_deref())
    }

    /// Resource path of an internal structured URL: `path + name + "." + extension`
    /// if the resolver knows it, else `path + name`.
    pub fn resource_path(&self) -> Option<&str> {
        self.resolution().path.as_deref()
    }

    /// The resolved resource, if the resolver knows the resource path.
    pub fn resource(&self) -> Option<&ResourceHandle> {
        self.resolution().handle.as_ref()
    }

    fn resolution(&self) -> &Resolution {
        self.resolved.get_or_compute(|| self.resolve())
    }

    fn resolve(&self) -> Resolution {
        let parts = match &self.kind {
            UrlKind::Structured(s) if !self.is_external() => &s.parts,
            _ => return Resolution::default(),
        };
        let resolver = self.ctx.resolver();
        let base = parts.path_and_name();
        if let Some(extension) = &parts.extension {
            let candidate = format!("{base}.{extension}");
            if let Some(handle) = resolver.resolve(&candidate) {
                return Resolution {
                    path: Some(candidate),
                    handle: Some(handle),
                };
            }
        }
        let handle = resolver.resolve(&base);
        tracing::trace!(path = %base, found = handle.is_some(), "resolved resource path");
        Resolution {
            path: Some(base),
            handle,
        }
    }

    /// Snapshot of every field, for tooling.
    pub fn parts(&self) -> UrlParts {
        let structured = self.kind.structured();
        UrlParts {
            url: self.url().to_string(),
            url_type: self.url_type(),
            scheme: self.scheme.clone(),
            username: self.username().map(str::to_string),
            password: self.password().map(str::to_string),
            host: self.host().map(str::to_string),
            port: self.port(),
            context_path: structured.and_then(|s| s.context_path.clone()),
            path: self.kind.parts().map(|p| p.path.clone()),
            name: self.name().to_string(),
            selectors: self.selectors().to_vec(),
            extension: self.extension().map(str::to_string),
            suffix: self.suffix().map(str::to_string),
            parameters: self.parameters().clone(),
            fragment: self.fragment().map(str::to_string),
            external: self.is_external(),
            resource_path: self.resource_path().map(str::to_string),
        }
    }

    /// True while the rendered string has to be recomputed.
    #[cfg(test)]
    pub(crate) fn is_dirty(&self) -> bool {
        self.rendered.is_dirty()
    }
}

/// Serializable view of a [`SlingUrl`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlParts {
    pub url: String,
    #[serde(rename = "type")]
    pub url_type: UrlType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selectors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(skip_serializing_if = "Parameters::is_empty")]
    pub parameters: Parameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
    pub external: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_path: Option<String>,
}

impl fmt::Display for SlingUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url())
    }
}

impl fmt::Debug for SlingUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("SlingUrl");
        d.field("type", &self.url_type());
        if let Some(scheme) = &self.scheme {
            d.field("scheme", scheme);
        }
        match &self.kind {
            UrlKind::Opaque(payload) | UrlKind::Unparseable(payload) => {
                d.field("name", payload);
            }
            UrlKind::Structured(s) => {
                for (label, value) in [
                    ("username", &s.username),
                    ("password", &s.password),
                    ("host", &s.host),
                    ("context_path", &s.context_path),
                ] {
                    if let Some(value) = value {
                        d.field(label, value);
                    }
                }
                if let Some(port) = s.port {
                    d.field("port", &port);
                }
                debug_parts(&mut d, &s.parts);
            }
            UrlKind::Relative(parts) => debug_parts(&mut d, parts),
        }
        d.finish()
    }
}

fn debug_parts(d: &mut fmt::DebugStruct<'_, '_>, parts: &PathParts) {
    d.field("path", &parts.path).field("name", &parts.name);
    if !parts.selectors.is_empty() {
        d.field("selectors", &parts.selectors);
    }
    if let Some(extension) = &parts.extension {
        d.field("extension", extension);
    }
    if let Some(suffix) = &parts.suffix {
        d.field("suffix", suffix);
    }
    if !parts.parameters.is_empty() {
        d.field("parameters", &parts.parameters.iter().collect::<Vec<_>>());
    }
    if let Some(fragment) = &parts.fragment {
        d.field("fragment", fragment);
    }
}

impl PartialEq for SlingUrl {
    fn eq(&self, other: &Self) -> bool {
        self.url() == other.url()
    }
}

impl Eq for SlingUrl {}

impl Hash for SlingUrl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.url().hash(state);
    }
}

#[cfg(test)]
mod tests;
