//! Application layer use cases.
//!
//! - **`ports`** – Traits for the storage and confirmation collaborators.
//! - **`config_store`** – Load, inspect, mutate, export and import the
//!   configuration document, persisting after each successful mutation.
//!
//! Nothing in this layer touches the file system or the terminal directly.

pub mod config_store;
pub mod ports;
