//! Testing utilities
//!
//! Factories for hand-built token streams, so tracker tests can describe a layout by its
//! line-leading columns instead of writing source text. Integration tests under `tests/` use
//! the same helpers.

pub mod factories;
