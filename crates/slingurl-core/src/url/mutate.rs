//! Chained setters. Every one of them invalidates the memoized values, even
//! when the field it targets does not exist on the current variant (such
//! calls change nothing else).

use std::sync::Arc;

use super::kind::{PathParts, Structured, UrlKind};
use super::SlingUrl;
use crate::classify::UrlType;
use crate::mapping::LinkMapper;

/// `None` for blank text.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

impl SlingUrl {
    fn touch(&mut self) {
        self.rendered.invalidate();
        self.resolved.invalidate();
    }

    fn edit_parts(&mut self, field: &str, edit: impl FnOnce(&mut PathParts)) -> &mut Self {
        self.touch();
        let url_type = self.url_type();
        match self.kind.parts_mut() {
            Some(parts) => edit(parts),
            None => tracing::trace!(field, %url_type, "setter ignored"),
        }
        self
    }

    fn edit_structured(&mut self, field: &str, edit: impl FnOnce(&mut Structured)) -> &mut Self {
        self.touch();
        let url_type = self.url_type();
        match self.kind.structured_mut() {
            Some(structured) => edit(structured),
            None => tracing::trace!(field, %url_type, "setter ignored"),
        }
        self
    }

    /// Clears every field; context and mapper stay.
    pub fn reset(&mut self) -> &mut Self {
        self.touch();
        self.scheme = None;
        self.kind = UrlKind::default();
        self
    }

    /// `None` renders internal paths unmapped.
    pub fn set_link_mapper(&mut self, mapper: Option<Arc<dyn LinkMapper>>) -> &mut Self {
        self.touch();
        self.mapper = mapper;
        self
    }

    /// Converts to another type; see [`UrlKind`] for what carries over.
    pub fn set_type(&mut self, url_type: UrlType) -> &mut Self {
        self.touch();
        let kind = std::mem::take(&mut self.kind);
        self.kind = kind.into_type(url_type);
        self
    }

    /// `None` or blank makes the URL internal (or protocol-relative with a host).
    pub fn set_scheme(&mut self, scheme: Option<&str>) -> &mut Self {
        self.touch();
        self.scheme = non_blank(scheme);
        self
    }

    pub fn set_username(&mut self, username: Option<&str>) -> &mut Self {
        self.edit_structured("username", |s| s.username = non_blank(username))
    }

    pub fn set_password(&mut self, password: Option<&str>) -> &mut Self {
        self.edit_structured("password", |s| s.password = non_blank(password))
    }

    pub fn set_host(&mut self, host: Option<&str>) -> &mut Self {
        self.edit_structured("host", |s| s.host = non_blank(host))
    }

    pub fn set_port(&mut self, port: Option<u16>) -> &mut Self {
        self.edit_structured("port", |s| s.port = port)
    }

    /// Sets the prefix rendered in front of the path.
    pub fn set_context_path(&mut self, context_path: Option<&str>) -> &mut Self {
        self.edit_structured("context_path", |s| s.context_path = non_blank(context_path))
    }

    /// Replaces directory and name from a resource path.
    pub fn set_resource_path(&mut self, resource_path: &str) -> &mut Self {
        self.edit_parts("resource_path", |p| p.set_resource_path(resource_path))
    }

    /// Sets the name, or the payload of an opaque or unparseable URL.
    pub fn set_name(&mut self, name: &str) -> &mut Self {
        self.touch();
        match &mut self.kind {
            UrlKind::Opaque(payload) | UrlKind::Unparseable(payload) => *payload = name.to_string(),
            UrlKind::Structured(s) => s.parts.name = name.to_string(),
            UrlKind::Relative(parts) => parts.name = name.to_string(),
        }
        self
    }

    pub fn add_selector(&mut self, selector: &str) -> &mut Self {
        self.edit_parts("selectors", |p| {
            if !selector.trim().is_empty() {
                p.selectors.push(selector.to_string());
            }
        })
    }

    /// Replaces all selectors by the non-blank `.`-separated tokens of `selectors`.
    pub fn set_selectors(&mut self, selectors: &str) -> &mut Self {
        self.set_selector(selectors.split('.'))
    }

    /// Replaces all selectors by the non-blank `values`.
    pub fn set_selector<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.edit_parts("selectors", |p| {
            p.selectors = values
                .into_iter()
                .filter(|value| !value.as_ref().trim().is_empty())
                .map(|value| value.as_ref().to_string())
                .collect();
        })
    }

    /// Removes the first occurrence of `selector`.
    pub fn remove_selector(&mut self, selector: &str) -> &mut Self {
        self.edit_parts("selectors", |p| {
            if let Some(index) = p.selectors.iter().position(|s| s == selector) {
                p.selectors.remove(index);
            }
        })
    }

    pub fn clear_selectors(&mut self) -> &mut Self {
        self.edit_parts("selectors", |p| p.selectors.clear())
    }

    /// Only the text after the last `.` is kept, so `page.html` sets `html`.
    pub fn set_extension(&mut self, extension: Option<&str>) -> &mut Self {
        let extension = extension.map(|ext| ext.rsplit('.').next().unwrap_or(ext));
        self.edit_parts("extension", |p| p.extension = non_blank(extension))
    }

    /// A missing leading `/` is added.
    pub fn set_suffix(&mut self, suffix: Option<&str>) -> &mut Self {
        let suffix = non_blank(suffix).map(|suffix| {
            if suffix.starts_with('/') {
                suffix
            } else {
                format!("/{suffix}")
            }
        });
        self.edit_parts("suffix", |p| p.suffix = suffix)
    }

    /// Suffix pointing at another resource, optionally with an extension.
    pub fn set_suffix_resource(&mut self, resource_path: &str, extension: Option<&str>) -> &mut Self {
        let suffix = match non_blank(extension) {
            Some(extension) => format!("{resource_path}.{extension}"),
            None => resource_path.to_string(),
        };
        self.set_suffix(Some(suffix.as_str()))
    }

    /// Appends `value` to the values of `name`; `None` only ensures the name exists.
    pub fn add_parameter(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        self.edit_parts("parameters", |p| p.parameters.add(name, value))
    }

    /// Replaces all values of `name`.
    pub fn set_parameter(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        self.edit_parts("parameters", |p| {
            p.parameters.remove(name);
            p.parameters.add(name, value);
        })
    }

    pub fn remove_parameter(&mut self, name: &str) -> &mut Self {
        self.edit_parts("parameters", |p| p.parameters.remove(name))
    }

    pub fn clear_parameters(&mut self) -> &mut Self {
        self.edit_parts("parameters", |p| p.parameters.clear())
    }

    /// Adds every parameter of a query string such as `a=1&b`.
    pub fn add_parameters(&mut self, query: &str, decode: bool) -> &mut Self {
        self.edit_parts("parameters", |p| p.parameters.add_query(query, decode))
    }

    /// Replaces all parameters by those of a query string.
    pub fn set_parameters(&mut self, query: &str, decode: bool) -> &mut Self {
        self.edit_parts("parameters", |p| {
            p.parameters.clear();
            p.parameters.add_query(query, decode);
        })
    }

    pub fn set_fragment(&mut self, fragment: Option<&str>) -> &mut Self {
        self.edit_parts("fragment", |p| p.fragment = non_blank(fragment))
    }
}
