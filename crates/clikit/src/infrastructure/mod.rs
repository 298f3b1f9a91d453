//! Infrastructure layer: file-system storage and the terminal prompt.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `clikit_core`, but MUST NOT be imported by the `application` layer.

pub mod prompt;
pub mod storage;
