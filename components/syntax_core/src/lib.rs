//! Core source-tracking types shared across the parser components.
//!
//! This crate provides:
//! - [`Position`] / [`Span`] - source locations attached to tokens and nodes
//! - [`ParseError`] / [`ErrorKind`] - the positioned error value that crosses
//!   the component boundary
//! - [`Comment`] - a skipped comment, reported through the comment callback

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod comment;
pub mod error;
pub mod position;

pub use comment::Comment;
pub use error::{ErrorKind, ParseError};
pub use position::{Position, Span};
