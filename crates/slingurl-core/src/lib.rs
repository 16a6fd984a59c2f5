pub mod classify;
pub mod codec;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod mapping;
pub mod url;

pub use classify::{classify, Classification, UrlType};
pub use context::{
    NoopResolver, PathResolver, RequestContext, ResourceHandle, VirtualHostResolver,
    VirtualHostRule,
};
pub use error::UrlError;
pub use mapping::{ContextMapper, IdentityMapper, LinkMapper, MapperKind, ResolverMapper};
pub use url::{Parameters, SlingUrl, UrlKind, UrlParts};
