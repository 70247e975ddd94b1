//! # fortran-forest
//!
//! A backtracking parse-forest parser for a fixed-form Fortran subset.
//!
//! The crate exposes one domain module, [`fortran`], and a thin
//! [`parse`] entry point: give it source text, get back an ordered forest
//! of typed tokens renderable as an indented structural dump, or a typed
//! parse error.

pub mod fortran;

pub use fortran::{parse, ParseError, Parser, PrimitiveKind, Token, TokenForest};
