//! # offside
//!
//! Indentation-sensitive token stream transformer.
//!
//! A raw scanner produces flat tokens with line and column positions. The
//! [indentation tracker](offside::lexing::indentation) rewrites that stream so that
//! indented blocks are delimited by explicit `BlockOpen` / `BlockDedent` tokens, which a
//! grammar with no notion of whitespace can then consume like braces.
//!
//! ## Testing
//!
//! Token factories for tests live in the [testing module](offside::testing).

pub mod offside;
