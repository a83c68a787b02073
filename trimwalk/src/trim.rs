//! The `trimwalk trim` command: read a document, trim it, write it back out.

use std::path::PathBuf;

use anyhow::{Result, bail};
use tracing::{info, instrument};

use crate::core::mutator::{Summary, Trimmer};
use crate::io::config::TrimwalkConfig;
use crate::io::document::{Document, DocumentFormat, read_source};
use crate::io::write_atomic;

/// What to trim and where the result goes.
#[derive(Debug, Clone, Default)]
pub struct TrimRequest {
    /// Source file; `None` or `-` reads stdin.
    pub input: Option<PathBuf>,
    /// Overrides extension detection and `default_format`.
    pub format: Option<DocumentFormat>,
    /// Rewrite the source file instead of printing.
    pub in_place: bool,
    /// Report whether anything would change without writing.
    pub check: bool,
}

impl TrimRequest {
    fn reads_stdin(&self) -> bool {
        self.input
            .as_deref()
            .is_none_or(|path| path.as_os_str() == "-")
    }

    fn resolve_format(&self, cfg: &TrimwalkConfig) -> DocumentFormat {
        self.format
            .or_else(|| self.input.as_deref().and_then(DocumentFormat::from_path))
            .unwrap_or(cfg.default_format)
    }
}

#[derive(Debug, Clone)]
pub struct TrimOutcome {
    pub format: DocumentFormat,
    pub summary: Summary,
    /// Trimmed document text.
    pub rendered: String,
    /// True if the source file was rewritten.
    pub wrote: bool,
}

impl TrimOutcome {
    pub fn changed(&self) -> bool {
        self.summary.changed()
    }
}

/// Run one trim request against `cfg`.
#[instrument(skip_all, fields(in_place = request.in_place, check = request.check))]
pub fn run_trim(request: &TrimRequest, cfg: &TrimwalkConfig) -> Result<TrimOutcome> {
    cfg.validate()?;
    if request.in_place && request.reads_stdin() {
        bail!("--in-place requires a file path");
    }

    let format = request.resolve_format(cfg);
    let source = read_source(request.input.as_deref(), cfg.max_document_bytes)?;
    let mut document = Document::parse(format, &source)?;
    let summary = Trimmer::new().run(&mut document);
    let rendered = document.render(cfg.pretty_json)?;

    let mut wrote = false;
    if request.in_place && !request.check && summary.changed() {
        if let Some(path) = request.input.as_deref() {
            write_atomic(path, &rendered)?;
            wrote = true;
        }
    }

    info!(
        %format,
        texts = summary.texts,
        rewritten = summary.rewritten,
        wrote,
        "trim finished"
    );
    Ok(TrimOutcome {
        format,
        summary,
        rendered,
        wrote,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn request(path: PathBuf) -> TrimRequest {
        TrimRequest {
            input: Some(path),
            ..TrimRequest::default()
        }
    }

    #[test]
    fn trims_json_file_without_touching_it() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("doc.json");
        fs::write(&path, r#"{"name":"  Ada  "}"#).expect("write");

        let outcome = run_trim(&request(path.clone()), &TrimwalkConfig::default()).expect("trim");
        assert_eq!(outcome.format, DocumentFormat::Json);
        assert!(outcome.changed());
        assert!(!outcome.wrote);
        assert!(outcome.rendered.contains("\"Ada\""));
        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            r#"{"name":"  Ada  "}"#
        );
    }

    #[test]
    fn in_place_rewrites_only_when_changed() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("doc.toml");
        fs::write(&path, "name = \" Ada \"\n").expect("write");

        let mut req = request(path.clone());
        req.in_place = true;
        let outcome = run_trim(&req, &TrimwalkConfig::default()).expect("trim");
        assert!(outcome.wrote);
        assert_eq!(fs::read_to_string(&path).expect("read"), "name = \"Ada\"\n");

        let again = run_trim(&req, &TrimwalkConfig::default()).expect("trim again");
        assert!(!again.changed());
        assert!(!again.wrote);
    }

    #[test]
    fn check_never_writes() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("doc.json");
        fs::write(&path, r#"[" a "]"#).expect("write");

        let mut req = request(path.clone());
        req.in_place = true;
        req.check = true;
        let outcome = run_trim(&req, &TrimwalkConfig::default()).expect("trim");
        assert!(outcome.changed());
        assert!(!outcome.wrote);
        assert_eq!(fs::read_to_string(&path).expect("read"), r#"[" a "]"#);
    }

    #[test]
    fn explicit_format_beats_extension() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("doc.txt");
        fs::write(&path, "k = \" v \"\n").expect("write");

        let mut req = request(path);
        req.format = Some(DocumentFormat::Toml);
        let outcome = run_trim(&req, &TrimwalkConfig::default()).expect("trim");
        assert_eq!(outcome.format, DocumentFormat::Toml);
        assert_eq!(outcome.rendered, "k = \"v\"\n");
    }

    #[test]
    fn unknown_extension_uses_configured_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("doc.data");
        fs::write(&path, "k = \"v\"\n").expect("write");

        let cfg = TrimwalkConfig {
            default_format: DocumentFormat::Toml,
            ..TrimwalkConfig::default()
        };
        let outcome = run_trim(&request(path), &cfg).expect("trim");
        assert_eq!(outcome.format, DocumentFormat::Toml);
        assert!(!outcome.changed());
    }

    #[test]
    fn in_place_on_stdin_is_rejected() {
        let req = TrimRequest {
            in_place: true,
            ..TrimRequest::default()
        };
        let err = run_trim(&req, &TrimwalkConfig::default()).expect_err("stdin");
        assert!(err.to_string().contains("--in-place"));
    }

    #[test]
    fn compact_json_when_pretty_disabled() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("doc.json");
        fs::write(&path, "{\n  \"a\": [\" 1 \", 2]\n}\n").expect("write");

        let cfg = TrimwalkConfig {
            pretty_json: false,
            ..TrimwalkConfig::default()
        };
        let outcome = run_trim(&request(path), &cfg).expect("trim");
        assert_eq!(outcome.rendered, "{\"a\":[\"1\",2]}\n");
    }
}
