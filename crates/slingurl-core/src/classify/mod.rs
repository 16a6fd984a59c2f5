//! Classification of raw input into one of the four URL types.
//!
//! The classifier only slices the input: every group it returns is still raw
//! (percent-encoded or not, exactly as given). Decoding and field assembly
//! happen in [`crate::url`].

mod patterns;

pub(crate) use patterns::MAPPED_PORT;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;

use patterns::{is_opaque_scheme, RELATIVE, SCHEME, STRUCTURED};

/// The shape a URL was recognised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlType {
    /// Absolute URL or server-internal absolute path, optionally with scheme and authority.
    Structured,
    /// Path without leading `/` and without scheme.
    Relative,
    /// Scheme without hierarchical part (`mailto:`, `tel:`, `fax:`).
    Opaque,
    /// Anything no structural pattern accepts.
    Unparseable,
}

impl fmt::Display for UrlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UrlType::Structured => "structured",
            UrlType::Relative => "relative",
            UrlType::Opaque => "opaque",
            UrlType::Unparseable => "unparseable",
        };
        f.write_str(s)
    }
}

/// Raw groups cut out of the input. Blank groups are reported as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGroups<'a> {
    pub scheme: Option<&'a str>,
    /// Whether a `//` authority introducer was present.
    pub authority: bool,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
    pub host: Option<&'a str>,
    pub port: Option<u16>,
    pub path: Option<&'a str>,
    pub name: Option<&'a str>,
    /// The `.a.b.ext` cluster including its leading dot.
    pub extensions: Option<&'a str>,
    pub suffix: Option<&'a str>,
    /// Query text including its leading `?`.
    pub query: Option<&'a str>,
    /// Fragment text without its leading `#`.
    pub fragment: Option<&'a str>,
    /// Everything after `scheme:` (or the whole input) for opaque and unparseable input.
    pub payload: Option<&'a str>,
}

/// Result of [`classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    pub url_type: UrlType,
    pub groups: RawGroups<'a>,
}

/// Assigns a [`UrlType`] to `input` and cuts out its raw groups. Never fails.
///
/// Order, first match wins: opaque scheme, structured match with scheme,
/// unparseable with scheme, structured (absolute or protocol-relative)
/// path, relative path, unparseable.
pub fn classify(input: &str) -> Classification<'_> {
    let classification = match SCHEME.captures(input) {
        Some(caps) => {
            let scheme = caps.name("scheme").map(|m| m.as_str());
            let rest = &input[caps.get(0).map_or(0, |m| m.end())..];
            classify_with_scheme(scheme, rest)
        }
        None => classify_without_scheme(input),
    };
    tracing::debug!(
        url_type = %classification.url_type,
        input,
        "classified url"
    );
    classification
}

fn classify_with_scheme<'a>(scheme: Option<&'a str>, rest: &'a str) -> Classification<'a> {
    if scheme.is_some_and(is_opaque_scheme) {
        return opaque(UrlType::Opaque, scheme, rest);
    }
    match structural(&STRUCTURED, rest).filter(has_directory) {
        Some(mut groups) => {
            groups.scheme = scheme;
            Classification {
                url_type: UrlType::Structured,
                groups,
            }
        }
        None => opaque(UrlType::Unparseable, scheme, rest),
    }
}

fn classify_without_scheme(input: &str) -> Classification<'_> {
    if input.starts_with('/') {
        if let Some(groups) = structural(&STRUCTURED, input).filter(has_directory) {
            return Classification {
                url_type: UrlType::Structured,
                groups,
            };
        }
    } else if let Some(groups) = structural(&RELATIVE, input) {
        return Classification {
            url_type: UrlType::Relative,
            groups,
        };
    }
    opaque(UrlType::Unparseable, None, input)
}

fn opaque<'a>(url_type: UrlType, scheme: Option<&'a str>, payload: &'a str) -> Classification<'a> {
    Classification {
        url_type,
        groups: RawGroups {
            scheme,
            payload: Some(payload),
            ..RawGroups::default()
        },
    }
}

/// Matches one of the structural patterns and validates what the grammar cannot.
fn structural<'a>(pattern: &Regex, input: &'a str) -> Option<RawGroups<'a>> {
    let caps = pattern.captures(input)?;
    let port = match group(&caps, "port") {
        Some(port) => Some(port.parse::<u16>().ok()?),
        None => None,
    };
    let groups = RawGroups {
        scheme: None,
        authority: caps.name("authority").is_some(),
        username: group(&caps, "username"),
        password: group(&caps, "password"),
        host: group(&caps, "host"),
        port,
        path: group(&caps, "path"),
        name: group(&caps, "name"),
        extensions: group(&caps, "extensions"),
        suffix: group(&caps, "suffix"),
        query: group(&caps, "query"),
        fragment: group(&caps, "fragment"),
        payload: None,
    };
    Some(groups)
}

/// A structured match needs a directory; only a bare `//host[:port]` may omit
/// it, since anything trailing the host would otherwise be taken for a name.
fn has_directory(groups: &RawGroups<'_>) -> bool {
    groups.path.is_some() || (groups.authority && groups.host.is_some() && groups.name.is_none())
}

fn group<'a>(caps: &Captures<'a>, name: &str) -> Option<&'a str> {
    caps.name(name)
        .map(|m| m.as_str())
        .filter(|s| !s.trim().is_empty())
}
