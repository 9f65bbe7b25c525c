//! Error types for conversion failures.
//!
//! This module provides [`ConvertError`] for a single failure located by a
//! [`FieldPath`](crate::FieldPath), and [`ConvertErrors`] for the accumulated
//! report produced by a pre-flight check.

mod convert_error;

pub use convert_error::{ConvertError, ConvertErrors};
