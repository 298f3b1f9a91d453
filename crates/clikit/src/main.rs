//! clikit command-line entry point.
//!
//! Parses arguments with `clap`, initialises logging, opens the
//! configuration store and dispatches the `config` subcommands.
//!
//! # Usage
//!
//! ```text
//! clikit [--config-file <PATH>] [--verbose] config <COMMAND>
//!
//! Commands:
//!   get [KEY] [--all] [--output plain|json|table]
//!   set <KEY> <VALUE> [--skip-validation] [--dry-run]
//!   list [--output plain|json|table]
//!   reset [KEY] [--yes] [--dry-run]
//!   export [PATH] [--modified-only] [--format json|toml]
//!   import <PATH> [--merge] [--force] [--format json|toml] [--dry-run]
//!   check
//!   path
//! ```
//!
//! # Environment variables
//!
//! | Variable        | Description                                         |
//! |-----------------|-----------------------------------------------------|
//! | `CLIKIT_CONFIG` | Config file path (same as `--config-file`)          |
//! | `RUST_LOG`      | Log filter; defaults to `warn` (`debug` with `-v`)  |
//!
//! Command output goes to stdout; logs go to stderr.  Any error exits with a
//! non-zero status.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use clikit::application::config_store::{
    CommitMode, ConfigStore, ResetOutcome, ResetTarget, StoreError,
};
use clikit::application::ports::{ConfigRepository, Confirmation};
use clikit::infrastructure::prompt::StdinConfirmation;
use clikit::infrastructure::storage::{transfer_file, JsonFileRepository};
use clikit::presentation::render::{
    render_changes, render_list, render_validation_errors, render_value, render_values,
};
use clikit::presentation::OutputStyle;
use clikit_core::{ConfigError, ExportFormat, ExportScope, ImportMode};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Demonstration command-line toolkit.
#[derive(Debug, Parser)]
#[command(name = "clikit", version)]
struct Cli {
    /// Path to the configuration file.
    ///
    /// Defaults to `config.json` in the platform config directory.
    #[arg(long, global = true, env = "CLIKIT_CONFIG")]
    config_file: Option<PathBuf>,

    /// Log at debug level (`RUST_LOG` takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Inspect and change configuration settings.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print one setting, or all of them.
    Get {
        /// Setting to print; omit to print every setting.
        key: Option<String>,

        /// Print every setting.
        #[arg(long, conflicts_with = "key")]
        all: bool,

        #[arg(short, long, value_enum, default_value_t)]
        output: OutputStyle,
    },

    /// Change a setting.
    Set {
        key: String,
        value: String,

        /// Store the value even if it fails validation.
        #[arg(long)]
        skip_validation: bool,

        /// Show the change without saving it.
        #[arg(long)]
        dry_run: bool,
    },

    /// List every setting with its description.
    List {
        #[arg(short, long, value_enum, default_value_t)]
        output: OutputStyle,
    },

    /// Restore one setting, or all of them, to the default.
    Reset {
        /// Setting to reset; omit to reset everything.
        key: Option<String>,

        /// Do not ask for confirmation.
        #[arg(short, long)]
        yes: bool,

        /// Show what would be reset without saving.
        #[arg(long)]
        dry_run: bool,
    },

    /// Write the configuration to a file, or to stdout.
    Export {
        path: Option<PathBuf>,

        /// Only include settings that differ from their defaults.
        #[arg(long)]
        modified_only: bool,

        /// Output format; inferred from the file extension when omitted.
        #[arg(long)]
        format: Option<ExportFormat>,
    },

    /// Load settings from an exported file.
    Import {
        path: PathBuf,

        /// Keep current values for settings missing from the file.
        #[arg(long)]
        merge: bool,

        /// Apply the file even if some entries fail validation.
        #[arg(long)]
        force: bool,

        /// Input format; inferred from the file extension when omitted.
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Show the result without saving it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Re-validate every stored setting.
    Check,

    /// Print the configuration file path.
    Path,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let repository = match cli.config_file {
        Some(path) => JsonFileRepository::new(path),
        None => JsonFileRepository::at_default_location()
            .context("set --config-file or CLIKIT_CONFIG to choose a location")?,
    };
    debug!("using config file {}", repository.path().display());
    let mut store = ConfigStore::open(repository);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Config(command) => run_config(&mut store, command, &StdinConfirmation, &mut out),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

// ── Command dispatch ──────────────────────────────────────────────────────────

fn run_config<R: ConfigRepository>(
    store: &mut ConfigStore<R>,
    command: ConfigCommand,
    confirmation: &dyn Confirmation,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        ConfigCommand::Get { key, output, .. } => match key {
            Some(key) => {
                let value = store.get(&key)?;
                out.write_all(render_value(&key, value, output).as_bytes())?;
            }
            None => out.write_all(render_values(&store.list(), output)?.as_bytes())?,
        },

        ConfigCommand::Set {
            key,
            value,
            skip_validation,
            dry_run,
        } => {
            let change = store.set(&key, &value, skip_validation, CommitMode { dry_run })?;
            out.write_all(render_changes(&[change]).as_bytes())?;
            if dry_run {
                writeln!(out, "(dry run, nothing saved)")?;
            }
        }

        ConfigCommand::List { output } => {
            out.write_all(render_list(&store.list(), output).as_bytes())?;
        }

        ConfigCommand::Reset { key, yes, dry_run } => {
            let target = key.map_or(ResetTarget::All, ResetTarget::Key);
            match store.reset(&target, confirmation, yes, CommitMode { dry_run })? {
                ResetOutcome::Cancelled => writeln!(out, "Reset cancelled.")?,
                ResetOutcome::Applied(changes) if changes.is_empty() => {
                    writeln!(out, "Nothing to reset, all settings are at their defaults.")?;
                }
                ResetOutcome::Applied(changes) => {
                    out.write_all(render_changes(&changes).as_bytes())?;
                    if dry_run {
                        writeln!(out, "(dry run, nothing saved)")?;
                    }
                }
            }
        }

        ConfigCommand::Export {
            path,
            modified_only,
            format,
        } => {
            let format = format
                .or_else(|| path.as_deref().map(ExportFormat::from_path))
                .unwrap_or_default();
            let scope = if modified_only {
                ExportScope::ModifiedOnly
            } else {
                ExportScope::All
            };
            let text = store.export(scope, format)?;
            match path {
                Some(path) => {
                    transfer_file::write_text(&path, &text)?;
                    writeln!(out, "Exported configuration to {}", path.display())?;
                }
                None => out.write_all(text.as_bytes())?,
            }
        }

        ConfigCommand::Import {
            path,
            merge,
            force,
            format,
            dry_run,
        } => {
            let format = format.unwrap_or_else(|| ExportFormat::from_path(&path));
            let mode = if merge {
                ImportMode::Merge
            } else {
                ImportMode::Replace
            };
            let text = transfer_file::read_text(&path)?;
            let outcome = match store.import(&text, format, mode, force, CommitMode { dry_run }) {
                Ok(outcome) => outcome,
                Err(StoreError::Config(ConfigError::ImportRejected(errors))) => bail!(
                    "import aborted, nothing was changed ({} invalid entries; use --force to apply anyway):\n{}",
                    errors.len(),
                    render_validation_errors(&errors).trim_end()
                ),
                Err(e) => return Err(e.into()),
            };
            writeln!(
                out,
                "Imported {} setting(s) from {} ({mode} mode)",
                outcome.applied.len(),
                path.display()
            )?;
            if !outcome.errors.is_empty() {
                writeln!(out, "Applied despite validation errors:")?;
                out.write_all(render_validation_errors(&outcome.errors).as_bytes())?;
            }
            if dry_run {
                writeln!(out, "(dry run, nothing saved)")?;
            }
        }

        ConfigCommand::Check => {
            let problems = store.check();
            if !problems.is_empty() {
                bail!(
                    "configuration has {} invalid value(s):\n{}",
                    problems.len(),
                    render_validation_errors(&problems).trim_end()
                );
            }
            writeln!(out, "Configuration is valid.")?;
        }

        ConfigCommand::Path => {
            writeln!(out, "{}", store.repository().location().display())?;
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clikit_core::{ConfigDocument, ConfigValue};
    use uuid::Uuid;

    /// Fixed answer to every confirmation prompt.
    struct Answer(bool);

    impl Confirmation for Answer {
        fn confirm(&self, _prompt: &str) -> io::Result<bool> {
            Ok(self.0)
        }
    }

    struct TempDir(PathBuf);

    impl TempDir {
        fn new() -> Self {
            let dir = std::env::temp_dir().join(format!("clikit_cli_{}", Uuid::new_v4()));
            std::fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn store(&self) -> ConfigStore<JsonFileRepository> {
            ConfigStore::open(JsonFileRepository::new(self.0.join("config.json")))
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            std::fs::remove_dir_all(&self.0).ok();
        }
    }

    fn run(dir: &TempDir, args: &[&str], answer: bool) -> anyhow::Result<String> {
        let cli = Cli::parse_from(std::iter::once("clikit").chain(args.iter().copied()));
        let Command::Config(command) = cli.command;
        let mut store = dir.store();
        let mut out = Vec::new();
        run_config(&mut store, command, &Answer(answer), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    // ── Argument parsing ──────────────────────────────────────────────────────

    #[test]
    fn test_get_defaults_to_plain_output() {
        let cli = Cli::parse_from(["clikit", "config", "get", "theme"]);
        match cli.command {
            Command::Config(ConfigCommand::Get { key, all, output }) => {
                assert_eq!(key.as_deref(), Some("theme"));
                assert!(!all);
                assert_eq!(output, OutputStyle::Plain);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_get_all_conflicts_with_key() {
        let result = Cli::try_parse_from(["clikit", "config", "get", "theme", "--all"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_export_format_parses_from_flag() {
        let cli = Cli::parse_from(["clikit", "config", "export", "--format", "toml"]);
        match cli.command {
            Command::Config(ConfigCommand::Export { format, path, .. }) => {
                assert_eq!(format, Some(ExportFormat::Toml));
                assert!(path.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_config_file_flag_is_global() {
        let cli = Cli::parse_from(["clikit", "config", "path", "--config-file", "/tmp/c.json"]);
        assert_eq!(cli.config_file, Some(PathBuf::from("/tmp/c.json")));
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    #[test]
    fn test_set_then_get_reads_back_persisted_value() {
        // Arrange
        let dir = TempDir::new();

        // Act
        let set_out = run(&dir, &["config", "set", "theme", "dark"], false).unwrap();
        let get_out = run(&dir, &["config", "get", "theme"], false).unwrap();

        // Assert
        assert_eq!(set_out, "theme: default -> dark\n");
        assert_eq!(get_out, "dark\n");
    }

    #[test]
    fn test_set_invalid_value_is_an_error() {
        let dir = TempDir::new();
        let err = run(&dir, &["config", "set", "theme", "neon"], false).unwrap_err();
        assert!(err.to_string().contains("Must be one of: default, dark, light, rainbow"));
    }

    #[test]
    fn test_get_unknown_key_is_an_error() {
        let dir = TempDir::new();
        let err = run(&dir, &["config", "get", "nope"], false).unwrap_err();
        assert!(err.to_string().contains("valid keys"));
    }

    #[test]
    fn test_reset_declined_keeps_value() {
        let dir = TempDir::new();
        run(&dir, &["config", "set", "debug", "true"], false).unwrap();

        let out = run(&dir, &["config", "reset", "debug"], false).unwrap();

        assert_eq!(out, "Reset cancelled.\n");
        assert_eq!(dir.store().get("debug").unwrap(), &ConfigValue::Boolean(true));
    }

    #[test]
    fn test_reset_all_at_defaults_reports_nothing_without_asking() {
        let dir = TempDir::new();

        // A declining answer would print "Reset cancelled." if a prompt were shown.
        let out = run(&dir, &["config", "reset"], false).unwrap();

        assert_eq!(out, "Nothing to reset, all settings are at their defaults.\n");
        assert!(!dir.0.join("config.json").exists());
    }

    #[test]
    fn test_reset_all_with_yes_restores_defaults() {
        let dir = TempDir::new();
        run(&dir, &["config", "set", "debug", "true"], false).unwrap();

        let out = run(&dir, &["config", "reset", "--yes"], false).unwrap();

        assert_eq!(out, "debug: true -> false\n");
        assert_eq!(dir.store().document(), &ConfigDocument::defaults());
    }

    #[test]
    fn test_export_to_stdout_then_import_file_round_trips() {
        // Arrange
        let dir = TempDir::new();
        run(&dir, &["config", "set", "maxItems", "250"], false).unwrap();
        let exported = run(&dir, &["config", "export", "--modified-only"], false).unwrap();
        let file = dir.0.join("backup.json");
        std::fs::write(&file, &exported).unwrap();
        run(&dir, &["config", "reset", "--yes"], false).unwrap();

        // Act
        let out = run(&dir, &["config", "import", file.to_str().unwrap()], false).unwrap();

        // Assert
        assert!(out.starts_with("Imported 1 setting(s)"), "{out}");
        assert_eq!(dir.store().get("maxItems").unwrap(), &ConfigValue::Integer(250));
    }

    #[test]
    fn test_rejected_import_lists_every_error() {
        let dir = TempDir::new();
        let file = dir.0.join("bad.toml");
        std::fs::write(&file, "theme = \"neon\"\nmaxItems = 0\n").unwrap();

        let err = run(&dir, &["config", "import", file.to_str().unwrap()], false).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("2 invalid entries"), "{msg}");
        assert!(msg.contains("theme (out-of-range)"), "{msg}");
        assert!(msg.contains("maxItems (out-of-range)"), "{msg}");
    }

    #[test]
    fn test_check_fails_after_skip_validation() {
        let dir = TempDir::new();
        run(&dir, &["config", "set", "timeout", "10", "--skip-validation"], false).unwrap();

        let err = run(&dir, &["config", "check"], false).unwrap_err();

        assert!(err.to_string().contains("timeout (out-of-range)"));
    }

    #[test]
    fn test_path_prints_repository_location() {
        let dir = TempDir::new();
        let out = run(&dir, &["config", "path"], false).unwrap();
        assert_eq!(out.trim_end(), dir.0.join("config.json").display().to_string());
    }
}
