//! Trim leading and trailing whitespace from every string in a JSON or TOML
//! document, leaving keys and non-text values untouched.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use trimwalk::exit_codes;
use trimwalk::io::config::{DEFAULT_CONFIG_FILE, TrimwalkConfig, load_config, write_config};
use trimwalk::io::document::DocumentFormat;
use trimwalk::logging;
use trimwalk::trim::{TrimRequest, run_trim};

#[derive(Parser)]
#[command(
    name = "trimwalk",
    version,
    about = "Trim whitespace from every string in a document"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Trim every string value and print the result.
    Trim {
        /// Document to read; omit or pass `-` for stdin.
        path: Option<PathBuf>,

        /// Document format. Defaults to the file extension, then config.
        #[arg(long, value_enum)]
        format: Option<DocumentFormat>,

        /// Rewrite the file instead of printing to stdout.
        #[arg(short, long)]
        in_place: bool,

        /// Exit 2 if anything would be trimmed; print nothing.
        #[arg(long)]
        check: bool,

        /// Config file path.
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
    /// Write a default `trimwalk.toml`.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,

        /// Config file path.
        #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Trim {
            path,
            format,
            in_place,
            check,
            config,
        } => {
            let request = TrimRequest {
                input: path,
                format,
                in_place,
                check,
            };
            cmd_trim(&request, &config)
        }
        Command::Init { force, config } => {
            cmd_init(&config, force)?;
            Ok(exit_codes::OK)
        }
    }
}

fn cmd_trim(request: &TrimRequest, config_path: &Path) -> Result<i32> {
    let cfg = load_config(config_path)?;
    let outcome = run_trim(request, &cfg)?;
    if request.check {
        return Ok(if outcome.changed() {
            exit_codes::CHANGED
        } else {
            exit_codes::OK
        });
    }
    if !request.in_place {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(outcome.rendered.as_bytes())
            .context("write stdout")?;
        stdout.flush().context("flush stdout")?;
    }
    Ok(exit_codes::OK)
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_config(path, &TrimwalkConfig::default())
        .with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::parse_from(["trimwalk", "init"]);
        assert!(matches!(cli.command, Command::Init { force: false, .. }));
    }

    #[test]
    fn parse_init_force() {
        let cli = Cli::parse_from(["trimwalk", "init", "--force"]);
        assert!(matches!(cli.command, Command::Init { force: true, .. }));
    }

    #[test]
    fn parse_trim_defaults_to_stdin() {
        let cli = Cli::parse_from(["trimwalk", "trim"]);
        match cli.command {
            Command::Trim {
                path,
                format,
                in_place,
                check,
                config,
            } => {
                assert!(path.is_none());
                assert!(format.is_none());
                assert!(!in_place && !check);
                assert_eq!(config, PathBuf::from(DEFAULT_CONFIG_FILE));
            }
            Command::Init { .. } => panic!("expected trim"),
        }
    }

    #[test]
    fn parse_trim_flags() {
        let cli = Cli::parse_from([
            "trimwalk", "trim", "doc.txt", "--format", "toml", "-i", "--check",
        ]);
        match cli.command {
            Command::Trim {
                path,
                format,
                in_place,
                check,
                ..
            } => {
                assert_eq!(path, Some(PathBuf::from("doc.txt")));
                assert_eq!(format, Some(DocumentFormat::Toml));
                assert!(in_place && check);
            }
            Command::Init { .. } => panic!("expected trim"),
        }
    }

    #[test]
    fn init_refuses_to_clobber() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("trimwalk.toml");
        cmd_init(&path, false).expect("first init");
        assert!(cmd_init(&path, false).is_err());
        cmd_init(&path, true).expect("forced init");
        assert_eq!(load_config(&path).expect("load"), TrimwalkConfig::default());
    }
}
