//! Reading, parsing, and rendering JSON and TOML documents.

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::node::{Node, Walk};

/// On-disk document syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Infer the format from a file extension, if it names one.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else {
            None
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Toml => f.write_str("toml"),
        }
    }
}

/// A parsed document tree.
///
/// JSON objects keep their key order. TOML documents keep comments, key
/// order, and layout; only string contents are rewritten.
#[derive(Debug, Clone)]
pub enum Document {
    Json(serde_json::Value),
    Toml(toml_edit::DocumentMut),
}

impl Document {
    pub fn parse(format: DocumentFormat, text: &str) -> Result<Self> {
        match format {
            DocumentFormat::Json => {
                let value = serde_json::from_str(text).context("parse json document")?;
                Ok(Self::Json(value))
            }
            DocumentFormat::Toml => {
                let doc = text
                    .parse::<toml_edit::DocumentMut>()
                    .context("parse toml document")?;
                Ok(Self::Toml(doc))
            }
        }
    }

    pub fn format(&self) -> DocumentFormat {
        match self {
            Self::Json(_) => DocumentFormat::Json,
            Self::Toml(_) => DocumentFormat::Toml,
        }
    }

    /// Serialize back to text, always ending in a newline.
    pub fn render(&self, pretty_json: bool) -> Result<String> {
        let mut out = match self {
            Self::Json(value) if pretty_json => {
                serde_json::to_string_pretty(value).context("serialize json document")?
            }
            Self::Json(value) => serde_json::to_string(value).context("serialize json document")?,
            Self::Toml(doc) => doc.to_string(),
        };
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}

impl Walk for Document {
    fn node(&mut self) -> Node<'_> {
        match self {
            Self::Json(value) => value.node(),
            Self::Toml(doc) => doc.as_table_mut().node(),
        }
    }
}

/// Read a document from `path`, or from stdin when `path` is `None` or `-`.
///
/// Fails if the input exceeds `max_bytes`.
pub fn read_source(path: Option<&Path>, max_bytes: u64) -> Result<String> {
    match path.filter(|path| path.as_os_str() != "-") {
        Some(path) => {
            let len = fs::metadata(path)
                .with_context(|| format!("stat {}", path.display()))?
                .len();
            if len > max_bytes {
                bail!(
                    "{} is {len} bytes, larger than max_document_bytes ({max_bytes})",
                    path.display()
                );
            }
            debug!(path = %path.display(), len, "reading document");
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
        }
        None => read_limited(std::io::stdin().lock(), max_bytes).context("read stdin"),
    }
}

fn read_limited(reader: impl Read, max_bytes: u64) -> Result<String> {
    let mut buf = String::new();
    reader
        .take(max_bytes.saturating_add(1))
        .read_to_string(&mut buf)
        .context("read document")?;
    if buf.len() as u64 > max_bytes {
        bail!("input is larger than max_document_bytes ({max_bytes})");
    }
    Ok(buf)
}
