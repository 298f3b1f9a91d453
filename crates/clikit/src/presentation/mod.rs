//! Presentation layer: turns use-case results into terminal text.

pub mod render;

pub use render::OutputStyle;
