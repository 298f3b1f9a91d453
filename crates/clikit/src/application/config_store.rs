//! ConfigStore: the `config` command group's use cases.
//!
//! [`ConfigStore`] owns the live [`ConfigDocument`] and the repository it was
//! loaded from.  Every successful mutation is written back immediately unless
//! the caller asked for a dry run.
//!
//! # Failure policy
//!
//! - A missing, unreadable or malformed stored file never blocks the user:
//!   [`ConfigStore::open`] logs a warning and starts from the defaults.
//! - A failed write is returned to the caller.  The in-memory document has
//!   already been updated at that point and is not rolled back; since each
//!   CLI invocation is a fresh process, the next run reloads from disk.
//! - Validation failures are returned as [`ConfigError`] values and leave
//!   both the in-memory and the stored document untouched.

use clikit_core::transfer::{self, Candidates};
use clikit_core::{
    Change, ConfigDocument, ConfigError, ConfigValue, ExportFormat, ExportScope, ImportMode,
    Setting, ValidationError,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::ports::{ConfigRepository, Confirmation, StorageError};

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The confirmation prompt could not be answered.
    #[error("failed to read confirmation: {0}")]
    Prompt(#[source] std::io::Error),
}

/// Options shared by the mutating operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitMode {
    /// Compute and report the result without persisting it.
    pub dry_run: bool,
}

/// Which keys a reset applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetTarget {
    Key(String),
    All,
}

/// Outcome of [`ConfigStore::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The reset was applied (or simulated for a dry run).
    Applied(Vec<Change>),
    /// The user declined the confirmation prompt.
    Cancelled,
}

/// One row of `config list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub setting: &'static Setting,
    pub value: ConfigValue,
    pub modified: bool,
}

/// Loaded configuration bound to its repository.
pub struct ConfigStore<R> {
    repository: R,
    document: ConfigDocument,
}

impl<R: ConfigRepository> ConfigStore<R> {
    /// Loads the stored document, falling back to defaults on any failure.
    pub fn open(repository: R) -> Self {
        let document = match repository.read() {
            Ok(Some(stored)) => ConfigDocument::from_stored(&stored),
            Ok(None) => {
                debug!("no stored config at {}; using defaults", repository.location().display());
                ConfigDocument::defaults()
            }
            Err(e) => {
                warn!("{e}; using defaults");
                ConfigDocument::defaults()
            }
        };
        Self {
            repository,
            document,
        }
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Returns the value of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] for undeclared keys.
    pub fn get(&self, key: &str) -> Result<&ConfigValue, ConfigError> {
        self.document.get(key)
    }

    /// Every key with its value, description and modified flag.
    pub fn list(&self) -> Vec<ListEntry> {
        self.document
            .entries()
            .map(|(setting, value)| ListEntry {
                setting,
                value: value.clone(),
                modified: self.document.is_modified(setting.key),
            })
            .collect()
    }

    /// Re-validates the loaded document.
    pub fn check(&self) -> Vec<ValidationError> {
        self.document.check()
    }

    /// Sets `key` from command-line text.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the key is unknown or the value is
    /// invalid, or [`StoreError::Storage`] if persisting fails.
    pub fn set(
        &mut self,
        key: &str,
        raw: &str,
        skip_validation: bool,
        mode: CommitMode,
    ) -> Result<Change, StoreError> {
        let (next, change) =
            self.document
                .set(key, &Value::String(raw.to_string()), skip_validation)?;
        if skip_validation {
            if let Err(e) = clikit_core::validate::check_value(key, &change.current) {
                warn!("validation skipped: {e}");
            }
        }
        self.commit(next, mode)?;
        info!("set {} = {} (was {})", change.key, change.current, change.previous);
        Ok(change)
    }

    /// Restores one key or the whole document to defaults.
    ///
    /// Unless `assume_yes` or a dry run is requested, `confirmation` is asked
    /// first; declining leaves everything untouched.  Resetting all keys when
    /// none is modified neither prompts nor writes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] for an unknown key,
    /// [`StoreError::Prompt`] if the prompt fails, or
    /// [`StoreError::Storage`] if persisting fails.
    pub fn reset(
        &mut self,
        target: &ResetTarget,
        confirmation: &dyn Confirmation,
        assume_yes: bool,
        mode: CommitMode,
    ) -> Result<ResetOutcome, StoreError> {
        let (next, changes) = match target {
            ResetTarget::Key(key) => {
                let (next, change) = self.document.reset_key(key)?;
                (next, vec![change])
            }
            ResetTarget::All => self.document.reset_all(),
        };

        if changes.is_empty() {
            debug!("every setting already holds its default");
            return Ok(ResetOutcome::Applied(changes));
        }

        if !assume_yes && !mode.dry_run {
            let prompt = match target {
                ResetTarget::Key(key) => format!("Reset '{key}' to its default value?"),
                ResetTarget::All => "Reset all configuration to defaults?".to_string(),
            };
            if !confirmation.confirm(&prompt).map_err(StoreError::Prompt)? {
                debug!("reset cancelled by user");
                return Ok(ResetOutcome::Cancelled);
            }
        }

        self.commit(next, mode)?;
        info!("reset {} key(s)", changes.len());
        Ok(ResetOutcome::Applied(changes))
    }

    /// Renders the document for export.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transfer`] if serialisation fails.
    pub fn export(&self, scope: ExportScope, format: ExportFormat) -> Result<String, ConfigError> {
        Ok(transfer::export(&self.document, scope, format)?)
    }

    /// Parses `text` and imports it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the text cannot be parsed or, unless
    /// `force` is set, if any entry fails validation.  In that case nothing is
    /// changed or written.
    pub fn import(
        &mut self,
        text: &str,
        format: ExportFormat,
        import_mode: ImportMode,
        force: bool,
        mode: CommitMode,
    ) -> Result<transfer::ImportOutcome, StoreError> {
        let candidates: Candidates =
            transfer::parse_candidates(text, format).map_err(ConfigError::from)?;
        let outcome = transfer::import(&self.document, &candidates, import_mode, force)?;
        for e in &outcome.errors {
            warn!("forced past validation error: {e}");
        }
        self.commit(outcome.document.clone(), mode)?;
        info!(
            "imported {} key(s) in {import_mode} mode",
            outcome.applied.len()
        );
        Ok(outcome)
    }

    fn commit(&mut self, next: ConfigDocument, mode: CommitMode) -> Result<(), StorageError> {
        if mode.dry_run {
            debug!("dry run: not persisting");
            return Ok(());
        }
        self.document = next;
        self.repository.write(&self.document)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
