//! CLI for the slingurl URL engine.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use slingurl_core::config::{self, UrlConfig};
use slingurl_core::{MapperKind, RequestContext};
use std::path::PathBuf;
use std::sync::Arc;

use commands::{run_build, run_completions, run_decode, run_encode, run_parse, run_render, BuildOptions};

/// Top-level CLI for the slingurl URL engine.
#[derive(Debug, Parser)]
#[command(name = "slingurl")]
#[command(about = "slingurl: decompose, rewrite and render resource URLs", long_about = None)]
pub struct Cli {
    /// Configuration file to use instead of ~/.config/slingurl/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Context prefix of the hosting application, e.g. /ctx.
    #[arg(long, global = true, value_name = "PREFIX")]
    pub context_path: Option<String>,

    /// Link mapper for internal paths: none, identity, context or resolver.
    #[arg(long, global = true, value_name = "KIND")]
    pub mapper: Option<MapperKind>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the decomposition of a URL.
    Parse {
        url: String,
        /// Keep percent escapes instead of decoding them.
        #[arg(long)]
        raw: bool,
        /// Print JSON instead of aligned text.
        #[arg(long)]
        json: bool,
    },

    /// Parse a URL and print it re-serialized (mapped, if internal).
    Render {
        url: String,
        /// Keep percent escapes instead of decoding them.
        #[arg(long)]
        raw: bool,
    },

    /// Build an internal URL from an absolute resource path.
    Build {
        /// Absolute resource path, e.g. /content/site/page.
        resource_path: String,
        /// Dot-separated selectors, e.g. "mobile.large".
        #[arg(long, value_name = "S")]
        selectors: Option<String>,
        #[arg(long, value_name = "E")]
        extension: Option<String>,
        #[arg(long, value_name = "S")]
        suffix: Option<String>,
        /// Query string, e.g. "a=1&b".
        #[arg(long, value_name = "Q")]
        query: Option<String>,
        #[arg(long, value_name = "F")]
        fragment: Option<String>,
    },

    /// Percent-encode text.
    Encode {
        text: String,
        /// Keep '/' separators.
        #[arg(long)]
        path: bool,
    },

    /// Percent-decode text.
    Decode { text: String },

    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Configuration from `--config` (or the default file) with the global
    /// flags applied on top.
    fn load_config(&self) -> Result<UrlConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        if let Some(context_path) = &self.context_path {
            cfg.context_path = Some(context_path.clone());
        }
        if let Some(mapper) = self.mapper {
            cfg.link_mapper = Some(mapper);
        }
        Ok(cfg)
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // These need neither configuration nor a request context.
        match &cli.command {
            CliCommand::Encode { text, path } => return run_encode(text, *path),
            CliCommand::Decode { text } => return run_decode(text),
            CliCommand::Completions { shell } => return run_completions(*shell),
            _ => {}
        }

        let cfg = cli.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let ctx: Arc<RequestContext> = Arc::new(cfg.request_context()?);

        match cli.command {
            CliCommand::Parse { url, raw, json } => run_parse(ctx, &url, cfg.decode && !raw, json)?,
            CliCommand::Render { url, raw } => run_render(ctx, &url, cfg.decode && !raw)?,
            CliCommand::Build {
                resource_path,
                selectors,
                extension,
                suffix,
                query,
                fragment,
            } => {
                let options = BuildOptions {
                    selectors,
                    extension,
                    suffix,
                    query,
                    fragment,
                };
                run_build(ctx, &resource_path, &options)?;
            }
            CliCommand::Encode { .. } | CliCommand::Decode { .. } | CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
