//! Structural patterns for the supported URL shapes.
//!
//! All patterns share one tail: after the last `/` comes a name without dots,
//! an optional cluster of `.token` groups and, only after such a cluster, a
//! suffix starting with `/`. Query and fragment follow.

use regex::Regex;
use std::sync::LazyLock;

/// Leading `scheme:` token. Letters and hyphens only.
pub(crate) static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<scheme>[a-zA-Z-]+):").unwrap());

/// Optional `//[user[:pass]@]host[:port]`, then an absolute directory and the tail.
pub(crate) static STRUCTURED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^(?:{AUTHORITY})?(?:{ABSOLUTE_DIR})?{TAIL}")).unwrap()
});

/// A directory without leading `/` (possibly empty), then the tail.
pub(crate) static RELATIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{RELATIVE_DIR}{TAIL}")).unwrap());

/// Absolute `http(s)://host:port` prefix of a mapped URL.
pub(crate) static MAPPED_PORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<origin>(?i:(?P<scheme>https?))://[^/:?#]+):(?P<port>[0-9]+)(?P<rest>[/?#].*)?$")
        .unwrap()
});

/// Schemes with no hierarchical part; their remainder is kept as an opaque payload.
pub(crate) const OPAQUE_SCHEMES: [&str; 3] = ["mailto", "tel", "fax"];

const AUTHORITY: &str = r"(?P<authority>//(?:(?P<username>[^:@/?#]+)(?::(?P<password>[^:@/?#]+))?@)?(?:(?P<host>[^/:?#@]+)(?::(?P<port>[0-9]+))?)?)";

const ABSOLUTE_DIR: &str = r"(?P<path>(?:/(?:[^/.?#]+|\.\.?))*/)";

const RELATIVE_DIR: &str = r"(?P<path>(?:(?:[^/.?#]+|\.\.?)/)*)";

const TAIL: &str = r"(?:(?P<name>[^/.?#]+)(?:(?P<extensions>(?:\.[^./?#]+)+)(?P<suffix>/[^?#]*)?)?)?(?P<query>\?[^?#]*)?(?:#(?P<fragment>(?s:.*)))?$";

pub(crate) fn is_opaque_scheme(scheme: &str) -> bool {
    OPAQUE_SCHEMES
        .iter()
        .any(|opaque| opaque.eq_ignore_ascii_case(scheme))
}
