//! Command line and environment configuration.
//!
//! ```bash
//! http-file-server --port 8080 --root ./public --hidden-files visible
//! HTTP_PORT=8080 DOC_ROOT=./public http-file-server
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::{
    document_root::DocumentRoot,
    handlers::ServeContext,
    mime::MimeTable,
    policy::{AmbiguousExtensionPolicy, HiddenFilePolicy, ServePolicy},
};

const DEFAULT_SERVER_NAME: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Parser)]
#[command(name = "http-file-server")]
#[command(about = "Serves files and directory listings from a document root")]
#[command(version)]
pub struct Config {
    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Document root; defaults to the working directory
    #[arg(short, long, env = "DOC_ROOT")]
    pub root: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = HiddenFilePolicy::Excluded, env = "HIDDEN_FILES")]
    pub hidden_files: HiddenFilePolicy,

    #[arg(long, value_enum, default_value_t = AmbiguousExtensionPolicy::Allow, env = "AMBIGUOUS_EXTENSIONS")]
    pub ambiguous_extensions: AmbiguousExtensionPolicy,

    /// Serve paths that resolve outside the document root
    #[arg(long, env = "ALLOW_TRAVERSAL")]
    pub allow_traversal: bool,

    /// Value of the Server header
    #[arg(long, default_value = DEFAULT_SERVER_NAME, env = "SERVER_NAME")]
    pub server_name: String,

    /// Extra content type mapping, e.g. `css=text/css`; may be repeated
    #[arg(long = "mime-type", value_name = "EXT=TYPE", value_parser = parse_mime_mapping)]
    pub mime_types: Vec<(String, String)>,
}

fn parse_mime_mapping(s: &str) -> Result<(String, String), String> {
    let (ext, mime) = s
        .split_once('=')
        .ok_or_else(|| format!("expected EXT=TYPE, got {:?}", s))?;

    if ext.trim_start_matches('.').is_empty() || mime.is_empty() {
        return Err(format!("expected EXT=TYPE, got {:?}", s));
    }

    Ok((ext.to_string(), mime.to_string()))
}

impl Config {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn document_root(&self) -> anyhow::Result<DocumentRoot> {
        let path = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("failed to read the working directory")?,
        };

        DocumentRoot::new(&path)
            .with_context(|| format!("invalid document root {}", path.display()))
    }

    pub fn policy(&self) -> ServePolicy {
        ServePolicy {
            hidden_files: self.hidden_files,
            ambiguous_extensions: self.ambiguous_extensions,
            confine_to_root: !self.allow_traversal,
        }
    }

    pub fn mime_table(&self) -> MimeTable {
        MimeTable::with_extra(self.mime_types.iter().cloned())
    }

    pub fn serve_context(&self) -> anyhow::Result<ServeContext> {
        Ok(ServeContext {
            root: self.document_root()?,
            mime: self.mime_table(),
            policy: self.policy(),
            server_name: self.server_name.clone(),
        })
    }
}
