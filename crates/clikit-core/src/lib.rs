//! # clikit-core
//!
//! Configuration model for clikit: the closed settings schema, type-directed
//! coercion and validation, the always-complete [`ConfigDocument`], and the
//! JSON/TOML export/import codec.
//!
//! This crate performs no file-system or terminal I/O.  Loading and saving
//! the document, prompting for confirmation and rendering output are the
//! job of the `clikit` application crate.
//!
//! # Modules
//!
//! - **`schema`** – The ten declared settings, their types, defaults and
//!   descriptions.
//!
//! - **`validate`** – Turns raw input (command-line strings or imported
//!   scalars) into typed [`ConfigValue`]s and checks ranges and choice lists.
//!
//! - **`document`** – The live key → value map.  Operations return a new
//!   document plus a record of what changed; they never mutate in place.
//!
//! - **`transfer`** – Rendering a document for export and merging an
//!   imported file back in, in either merge or replace mode.

pub mod document;
pub mod error;
pub mod schema;
pub mod transfer;
pub mod validate;

pub use document::{Change, ConfigDocument, Modification};
pub use error::{ConfigError, TransferError, ValidationError, ValidationReason};
pub use schema::{ConfigValue, Setting, SettingKind, SCHEMA};
pub use transfer::{ExportFormat, ExportScope, ImportMode, ImportOutcome};
