//! Per-type field storage.

use super::params::Parameters;
use crate::classify::UrlType;

/// Directory, name and everything that follows it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParts {
    /// Empty or ending in `/`.
    pub(crate) path: String,
    pub(crate) name: String,
    pub(crate) selectors: Vec<String>,
    pub(crate) extension: Option<String>,
    /// Unset or starting with `/`.
    pub(crate) suffix: Option<String>,
    pub(crate) parameters: Parameters,
    pub(crate) fragment: Option<String>,
}

impl PathParts {
    /// Splits a resource path at its last `/` into directory and name.
    pub(crate) fn set_resource_path(&mut self, resource_path: &str) {
        match resource_path.rfind('/') {
            Some(slash) => {
                self.path = resource_path[..=slash].to_string();
                self.name = resource_path[slash + 1..].to_string();
            }
            None => {
                self.path.clear();
                self.name = resource_path.to_string();
            }
        }
    }

    pub(crate) fn path_and_name(&self) -> String {
        format!("{}{}", self.path, self.name)
    }
}

/// Fields of a structured URL: optional authority and a detected context prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Structured {
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
    /// Context prefix stripped from the front of `parts.path`.
    pub(crate) context_path: Option<String>,
    pub(crate) parts: PathParts,
}

/// One variant per [`UrlType`], each carrying only what that type can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlKind {
    Structured(Structured),
    Relative(PathParts),
    /// Payload after `scheme:`, unparsed.
    Opaque(String),
    /// The input (after `scheme:` if there was one), unparsed.
    Unparseable(String),
}

impl Default for UrlKind {
    fn default() -> Self {
        UrlKind::Relative(PathParts::default())
    }
}

impl UrlKind {
    pub fn url_type(&self) -> UrlType {
        match self {
            UrlKind::Structured(_) => UrlType::Structured,
            UrlKind::Relative(_) => UrlType::Relative,
            UrlKind::Opaque(_) => UrlType::Opaque,
            UrlKind::Unparseable(_) => UrlType::Unparseable,
        }
    }

    pub(crate) fn parts(&self) -> Option<&PathParts> {
        match self {
            UrlKind::Structured(s) => Some(&s.parts),
            UrlKind::Relative(parts) => Some(parts),
            UrlKind::Opaque(_) | UrlKind::Unparseable(_) => None,
        }
    }

    pub(crate) fn parts_mut(&mut self) -> Option<&mut PathParts> {
        match self {
            UrlKind::Structured(s) => Some(&mut s.parts),
            UrlKind::Relative(parts) => Some(parts),
            UrlKind::Opaque(_) | UrlKind::Unparseable(_) => None,
        }
    }

    pub(crate) fn structured(&self) -> Option<&Structured> {
        match self {
            UrlKind::Structured(s) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn structured_mut(&mut self) -> Option<&mut Structured> {
        match self {
            UrlKind::Structured(s) => Some(s),
            _ => None,
        }
    }

    /// Converts to another variant. Structured and relative URLs share their
    /// path fields; an unparsed payload and `name` turn into each other.
    pub(crate) fn into_type(self, url_type: UrlType) -> UrlKind {
        if self.url_type() == url_type {
            return self;
        }
        let parts = match self {
            UrlKind::Structured(s) => s.parts,
            UrlKind::Relative(parts) => parts,
            UrlKind::Opaque(payload) | UrlKind::Unparseable(payload) => PathParts {
                name: payload,
                ..PathParts::default()
            },
        };
        match url_type {
            UrlType::Structured => UrlKind::Structured(Structured {
                parts,
                ..Structured::default()
            }),
            UrlType::Relative => UrlKind::Relative(parts),
            UrlType::Opaque => UrlKind::Opaque(parts.name),
            UrlType::Unparseable => UrlKind::Unparseable(parts.name),
        }
    }
}
