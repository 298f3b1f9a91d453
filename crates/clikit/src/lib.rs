//! clikit library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! ```text
//! main()  (clap CLI, logging)
//!  └─ presentation/   render results as plain text, JSON or tables
//!  └─ application/    ConfigStore use cases + repository/confirmation ports
//!  └─ infrastructure/ JSON config file, import/export files, stdin prompt
//!        ↓
//!   clikit-core       schema, validation, document, export/import codec
//! ```

pub mod application;
pub mod infrastructure;
pub mod presentation;
