//! Errors for the few operations that can be misused.
//!
//! Parsing and rendering never fail; these only report programmer errors at
//! construction time.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// `SlingUrl::from_resource` needs an absolute resource path.
    #[error("resource path must be absolute: {0:?}")]
    RelativeResourcePath(String),

    /// Context prefixes start with `/` and do not end with `/`.
    #[error("invalid context path {0:?}: must start with '/' and must not end with '/'")]
    InvalidContextPath(String),
}
