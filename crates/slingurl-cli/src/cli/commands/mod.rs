//! CLI command handlers. Each command is in its own file.

mod build;
mod codec;
mod completions;
mod parse;
mod render;

pub use build::{run_build, BuildOptions};
pub use codec::{run_decode, run_encode};
pub use completions::run_completions;
pub use parse::run_parse;
pub use render::run_render;

#[cfg(test)]
pub use build::build_url;
#[cfg(test)]
pub use parse::format_parts;
