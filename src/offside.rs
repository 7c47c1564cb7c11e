//! Main module for offside library functionality

pub mod config;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod processor;
pub mod stream;
pub mod structure;
pub mod testing;
pub mod token;

pub use error::{Error, Result};
pub use token::{Token, TokenKind};
